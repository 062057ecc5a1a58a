use super::grid::Grid;
use super::snake::Snake;
use crate::consts;
use rand::{seq::IteratorRandom, Rng};
use ratatui::layout::Position;

/// Pick a random cell of `grid` not occupied by `snake`.
///
/// Candidates are drawn uniformly from the whole board and redrawn while they
/// land on the snake.  After [`FOOD_PLACEMENT_ATTEMPTS`][consts::FOOD_PLACEMENT_ATTEMPTS]
/// misses, a free cell is instead chosen uniformly from an enumeration of the
/// board, so the result stays uniform and the search always terminates.
///
/// Returns `None` if the snake covers the whole board.
pub(super) fn place_food<R: Rng>(rng: &mut R, snake: &Snake, grid: Grid) -> Option<Position> {
    if snake.len() >= grid.cell_count() {
        return None;
    }
    for _ in 0..consts::FOOD_PLACEMENT_ATTEMPTS {
        let candidate = Position::new(
            rng.random_range(0..grid.size()),
            rng.random_range(0..grid.size()),
        );
        if !snake.contains(candidate) {
            return Some(candidate);
        }
    }
    grid.positions().filter(|&p| !snake.contains(p)).choose(rng)
}
