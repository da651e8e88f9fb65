/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Converts a row-major flat index back into coordinates for a board of `size`.
pub const fn from_flat_index(index: usize, size: Coord2) -> Coord2 {
    let cols = size.1 as usize;
    ((index / cols) as Coord, (index % cols) as Coord)
}

/// Board dimensions of an `ndarray` shape, clamped to the coordinate range.
pub fn dim_to_coord2((rows, cols): (usize, usize)) -> Coord2 {
    (
        rows.try_into().unwrap_or(Coord::MAX),
        cols.try_into().unwrap_or(Coord::MAX),
    )
}

const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// The up to eight cells surrounding `center` on a board of `bounds`, in row-major order.
pub fn neighbors(center: Coord2, bounds: Coord2) -> impl Iterator<Item = Coord2> {
    DISPLACEMENTS.into_iter().filter_map(move |(d_row, d_col)| {
        let row = center.0.checked_add_signed(d_row).filter(|&row| row < bounds.0)?;
        let col = center.1.checked_add_signed(d_col).filter(|&col| col < bounds.1)?;
        Some((row, col))
    })
}
