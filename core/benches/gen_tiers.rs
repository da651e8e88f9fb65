use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use sweep_core::*;

const TIERS: [(&str, Coord2, CellCount); 4] = [
    ("default", (10, 10), 10),
    ("intermediate", (16, 16), 40),
    ("expert", (16, 30), 99),
    ("dense", (16, 30), 400),
];

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for (name, size, mines) in TIERS {
        group.bench_with_input(BenchmarkId::from_parameter(name), &(size, mines), |b, &(size, mines)| {
            let mut generator = RandomGenerator::new(0x5eed);
            let mut board = Board::new(size).unwrap();
            b.iter(|| {
                generator.generate(&mut board, mines).unwrap();
                black_box(board.total_mines())
            });
        });
    }
    group.finish();
}

fn bench_flood_reveal(c: &mut Criterion) {
    // a single corner mine leaves one huge zero region to cascade through
    let board = Board::from_mine_coords((200, 200), &[(199, 199)]).unwrap();
    c.bench_function("flood_reveal_200x200", |b| {
        b.iter(|| {
            let mut engine = PlayEngine::new(board.clone());
            black_box(engine.reveal((0, 0)).unwrap())
        });
    });
}

criterion_group!(benches, bench_generate, bench_flood_reveal);
criterion_main!(benches);
