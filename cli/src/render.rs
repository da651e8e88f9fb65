use std::io::{self, Write};

use sweep_core::{CellView, ControllerState, GameSnapshot};

fn cell_symbol(cell: &CellView) -> char {
    match (cell.mine, cell.adjacent_mines) {
        (Some(true), _) => '*',
        (Some(false), Some(0)) => '.',
        (Some(false), Some(count)) => char::from(b'0' + count),
        _ if cell.flagged => 'F',
        _ => '#',
    }
}

fn status_label(state: ControllerState) -> &'static str {
    match state {
        ControllerState::Idle => "idle",
        ControllerState::Active => "playing",
        ControllerState::Won => "cleared",
        ControllerState::Lost => "exploded",
    }
}

pub fn render(out: &mut impl Write, snapshot: &GameSnapshot) -> io::Result<()> {
    writeln!(
        out,
        "[{}] mines: {}  time: {}  best: {}",
        status_label(snapshot.state),
        snapshot.mines_remaining,
        snapshot.elapsed_display,
        snapshot.best_time_display.as_deref().unwrap_or("--:--"),
    )?;

    if snapshot.cells.is_empty() {
        return Ok(());
    }

    let (_, cols) = snapshot.size;
    write!(out, "   ")?;
    for col in 0..cols {
        write!(out, "{col:>3}")?;
    }
    writeln!(out)?;

    for row in snapshot.cells.chunks(usize::from(cols)) {
        write!(out, "{:>3}", row[0].row)?;
        for cell in row {
            write!(out, "{:>3}", cell_symbol(cell))?;
        }
        writeln!(out)?;
    }
    Ok(())
}
