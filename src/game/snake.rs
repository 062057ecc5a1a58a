use ratatui::layout::Position;
use std::collections::VecDeque;

/// Snake state.  Snate.
///
/// The cells the snake occupies, head first.  All positions are relative to
/// the top-left corner of the board.  A snake always has at least one cell.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    pub(super) cells: VecDeque<Position>,
}

impl Snake {
    /// Create a new snake consisting of only a head at `head`
    pub(super) fn new(head: Position) -> Snake {
        Snake {
            cells: VecDeque::from([head]),
        }
    }

    /// Return the position of the snake's head
    pub(crate) fn head(&self) -> Position {
        self.cells[0]
    }

    /// Iterate over the snake's cells other than the head, from the neck to
    /// the tail
    pub(crate) fn body(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells.iter().skip(1).copied()
    }

    pub(super) fn len(&self) -> usize {
        self.cells.len()
    }

    /// Does any part of the snake, tail included, occupy `pos`?
    pub(super) fn contains(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }

    /// Move the head to `pos`, growing the snake by one cell
    pub(super) fn push_head(&mut self, pos: Position) {
        self.cells.push_front(pos);
    }

    /// Drop the last cell of the snake.  The head is never removed.
    pub(super) fn pop_tail(&mut self) {
        if self.cells.len() > 1 {
            let _ = self.cells.pop_back();
        }
    }
}
