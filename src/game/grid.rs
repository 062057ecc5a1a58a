use ratatui::layout::{Position, Positions, Rect, Size};

/// The square board the snake lives on.  Cells are addressed by `Position`s
/// relative to the top-left corner, with both coordinates in `0..size`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Grid {
    size: u16,
}

impl Grid {
    pub(crate) fn new(size: u16) -> Grid {
        Grid { size }
    }

    /// Return the number of cells along each side of the board
    pub(crate) fn size(self) -> u16 {
        self.size
    }

    /// Return the total number of cells on the board
    pub(super) fn cell_count(self) -> usize {
        usize::from(self.size) * usize::from(self.size)
    }

    /// Return the cell at which a new snake starts
    pub(super) fn center(self) -> Position {
        Position::new(self.size / 2, self.size / 2)
    }

    /// Iterate over every cell of the board, row by row
    pub(super) fn positions(self) -> Positions {
        Rect::from((
            Position::ORIGIN,
            Size {
                width: self.size,
                height: self.size,
            },
        ))
        .positions()
    }
}
