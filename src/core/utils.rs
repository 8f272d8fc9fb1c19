use crate::core::definitions::Position;

/** Every cell of the board, row 1 to 8, column 1 to 8 inside a row. */
pub const ITER_INDEX: [Position; 64] = {
    let mut arr = [Position::new(1, 1); 64];
    let mut idx = 0;
    while idx < 64 {
        arr[idx] = Position::new((idx / 8) as u8 + 1, (idx % 8) as u8 + 1);
        idx += 1;
    }
    arr
};

pub struct DirectionIterator {
    position: Option<Position>,
    direction: (i8, i8),
}

impl Iterator for DirectionIterator {
    type Item = Position;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let (d_row, d_column) = self.direction;
        self.position = self.position?.offset(d_row, d_column);
        self.position
    }
}

/// Cells along a ray from `position` (exclusive) up to the board edge.
pub fn in_direction(position: Position, direction: (i8, i8)) -> DirectionIterator {
    DirectionIterator {
        position: Some(position),
        direction,
    }
}

/// Cells one jump away from `position`, skipping those off the board.
pub fn leaps(position: Position, offsets: &'static [(i8, i8)]) -> impl Iterator<Item = Position> {
    offsets
        .iter()
        .filter_map(move |&(d_row, d_column)| position.offset(d_row, d_column))
}
