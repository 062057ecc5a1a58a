use super::direction::Direction;
use super::food::place_food;
use super::grid::Grid;
use super::snake::Snake;
use crate::consts;
use crate::options::Options;
use rand::Rng;
use ratatui::layout::Position;
use std::time::Duration;

/// The simulation state of one round of Snake and the operations that change
/// it.  Nothing in here knows about terminals or timers; the caller decides
/// when to call [`Engine::tick()`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct Engine<R> {
    rng: R,
    options: Options,
    grid: Grid,
    pub(super) snake: Snake,
    /// `None` only once the snake has filled the board
    pub(super) food: Option<Position>,
    /// The most recently accepted direction; the snake moves this way on the
    /// next tick.
    pub(super) direction: Direction,
    /// The direction of the snake's last move, for drawing the head
    heading: Direction,
    score: u32,
    /// Time between ticks
    speed: Duration,
    status: Status,
}

impl<R: Rng> Engine<R> {
    pub(super) fn new(options: Options, rng: R) -> Engine<R> {
        let grid = Grid::new(options.grid_size());
        let mut engine = Engine {
            rng,
            options,
            grid,
            snake: Snake::new(grid.center()),
            food: None,
            direction: Direction::Right,
            heading: Direction::Right,
            score: 0,
            speed: options.initial_speed(),
            status: Status::Running,
        };
        engine.reset();
        engine
    }

    /// Advance the world by one step.  Does nothing if the game is paused or
    /// over.
    ///
    /// A move onto any cell of the snake, including the tail cell that would
    /// be vacated this tick, counts as a collision.  On a collision the snake
    /// is left as it was before the tick.
    pub(super) fn tick(&mut self) -> TickOutcome {
        if self.status != Status::Running {
            return TickOutcome::Idle;
        }
        let Some(head) = self.direction.advance(self.snake.head(), self.grid) else {
            return self.end(Ending::Wall);
        };
        if self.snake.contains(head) {
            return self.end(Ending::SelfCollision);
        }
        self.snake.push_head(head);
        self.heading = self.direction;
        if self.food == Some(head) {
            self.score += 1;
            self.speed = speed_up(self.speed);
            self.food = place_food(&mut self.rng, &self.snake, self.grid);
            if self.food.is_none() {
                return self.end(Ending::BoardFull);
            }
            TickOutcome::Ate
        } else {
            self.snake.pop_tail();
            TickOutcome::Moved
        }
    }

    /// Discard the current round and start a fresh one with the configured
    /// board size & initial speed
    pub(super) fn reset(&mut self) {
        self.grid = Grid::new(self.options.grid_size());
        self.snake = Snake::new(self.grid.center());
        self.direction = Direction::Right;
        self.heading = Direction::Right;
        self.score = 0;
        self.speed = self.options.initial_speed();
        self.status = Status::Running;
        self.food = place_food(&mut self.rng, &self.snake, self.grid);
        if self.food.is_none() {
            self.status = Status::Over(Ending::BoardFull);
        }
    }
}

impl<R> Engine<R> {
    /// Request that the snake turn to face `requested`.  The request is
    /// dropped if the game is over or if it would reverse the most recently
    /// accepted direction.
    pub(super) fn set_direction(&mut self, requested: Direction) {
        if matches!(self.status, Status::Over(_)) || requested == self.direction.reverse() {
            return;
        }
        self.direction = requested;
    }

    /// Pause a running game or resume a paused one.  Does nothing once the
    /// game is over.
    pub(super) fn toggle_pause(&mut self) {
        self.status = match self.status {
            Status::Running => Status::Paused,
            Status::Paused => Status::Running,
            over @ Status::Over(_) => over,
        };
    }

    pub(super) fn status(&self) -> Status {
        self.status
    }

    pub(super) fn score(&self) -> u32 {
        self.score
    }

    pub(super) fn speed(&self) -> Duration {
        self.speed
    }

    pub(super) fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            grid: self.grid,
            snake: &self.snake,
            food: self.food,
            heading: self.heading,
            score: self.score,
            status: self.status,
        }
    }

    fn end(&mut self, ending: Ending) -> TickOutcome {
        self.status = Status::Over(ending);
        TickOutcome::Ended(ending)
    }
}

/// Shrink the tick interval by 5%, but not below
/// [`MIN_SPEED`][consts::MIN_SPEED]
fn speed_up(speed: Duration) -> Duration {
    (speed * consts::SPEEDUP_NUMERATOR / consts::SPEEDUP_DENOMINATOR).max(consts::MIN_SPEED)
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Status {
    Running,
    Paused,
    Over(Ending),
}

/// How a round came to an end
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Ending {
    /// The snake tried to move off the board.
    Wall,
    /// The snake tried to move onto itself.
    SelfCollision,
    /// The snake has filled the board and there are no more cells to place
    /// food in.
    BoardFull,
}

/// What happened during a call to [`Engine::tick()`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum TickOutcome {
    /// The game was paused or over, so nothing happened.
    Idle,
    Moved,
    /// The snake ate the food and grew.
    Ate,
    Ended(Ending),
}

/// A read-only view of the game state for drawing
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Snapshot<'a> {
    pub(super) grid: Grid,
    pub(super) snake: &'a Snake,
    pub(super) food: Option<Position>,
    /// The direction of the snake's last move, which may differ from a turn
    /// requested since
    pub(super) heading: Direction,
    pub(super) score: u32,
    pub(super) status: Status,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use rstest::rstest;
    use std::collections::VecDeque;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn engine(grid_size: u16) -> Engine<ChaCha12Rng> {
        let options = Options::default().with_grid_size(grid_size).unwrap();
        Engine::new(options, ChaCha12Rng::seed_from_u64(RNG_SEED))
    }

    fn place(engine: &mut Engine<ChaCha12Rng>, cells: &[(u16, u16)], food: (u16, u16)) {
        engine.snake.cells = cells.iter().map(|&(x, y)| Position::new(x, y)).collect();
        engine.food = Some(Position::new(food.0, food.1));
    }

    fn cells(engine: &Engine<ChaCha12Rng>) -> Vec<(u16, u16)> {
        engine.snake.cells.iter().map(|p| (p.x, p.y)).collect()
    }

    #[test]
    fn new_round() {
        let engine = engine(20);
        assert_eq!(cells(&engine), [(10, 10)]);
        assert_eq!(engine.direction, Direction::Right);
        assert_eq!(engine.score, 0);
        assert_eq!(engine.speed, Duration::from_millis(150));
        assert_eq!(engine.status, Status::Running);
        let food = engine.food.unwrap();
        assert_ne!(food, Position::new(10, 10));
        assert!(food.x < 20 && food.y < 20);
    }

    #[test]
    fn move_without_food() {
        let mut engine = engine(5);
        place(&mut engine, &[(2, 2), (1, 2), (1, 3)], (0, 0));
        assert_eq!(engine.tick(), TickOutcome::Moved);
        assert_eq!(cells(&engine), [(3, 2), (2, 2), (1, 2)]);
        assert_eq!(engine.score, 0);
        assert_eq!(engine.speed, Duration::from_millis(150));
        assert_eq!(engine.food, Some(Position::new(0, 0)));
    }

    #[test]
    fn eat_food() {
        let mut engine = engine(5);
        place(&mut engine, &[(2, 2)], (3, 2));
        assert_eq!(engine.tick(), TickOutcome::Ate);
        assert_eq!(cells(&engine), [(3, 2), (2, 2)]);
        assert_eq!(engine.score, 1);
        assert_eq!(engine.speed, Duration::from_micros(142_500));
        let food = engine.food.unwrap();
        assert_ne!(food, Position::new(3, 2));
        assert!(!engine.snake.contains(food));
        assert_eq!(engine.status, Status::Running);
    }

    #[test]
    fn speed_floor() {
        let mut engine = engine(5);
        engine.speed = Duration::from_millis(52);
        place(&mut engine, &[(2, 2)], (3, 2));
        assert_eq!(engine.tick(), TickOutcome::Ate);
        assert_eq!(engine.speed, consts::MIN_SPEED);
    }

    #[rstest]
    #[case(Duration::from_millis(150), Duration::from_micros(142_500))]
    #[case(Duration::from_micros(142_500), Duration::from_micros(135_375))]
    #[case(Duration::from_millis(60), Duration::from_millis(57))]
    #[case(Duration::from_millis(52), Duration::from_millis(50))]
    #[case(Duration::from_millis(50), Duration::from_millis(50))]
    fn test_speed_up(#[case] before: Duration, #[case] after: Duration) {
        assert_eq!(speed_up(before), after);
    }

    #[rstest]
    #[case(&[(4, 2)], Direction::Right)]
    #[case(&[(0, 2)], Direction::Left)]
    #[case(&[(2, 0)], Direction::Up)]
    #[case(&[(2, 4), (2, 3)], Direction::Down)]
    fn wall_collision(#[case] snake: &[(u16, u16)], #[case] direction: Direction) {
        let mut engine = engine(5);
        place(&mut engine, snake, (0, 0));
        engine.direction = direction;
        assert_eq!(engine.tick(), TickOutcome::Ended(Ending::Wall));
        assert_eq!(engine.status, Status::Over(Ending::Wall));
        assert_eq!(cells(&engine), snake);
    }

    #[test]
    fn moving_into_tail_collides() {
        let mut engine = engine(5);
        place(&mut engine, &[(2, 2), (2, 3)], (0, 0));
        engine.direction = Direction::Down;
        assert_eq!(engine.tick(), TickOutcome::Ended(Ending::SelfCollision));
        assert_eq!(engine.status, Status::Over(Ending::SelfCollision));
        assert_eq!(cells(&engine), [(2, 2), (2, 3)]);
    }

    #[test]
    fn chasing_tail_in_a_loop_collides() {
        let mut engine = engine(5);
        place(&mut engine, &[(1, 1), (2, 1), (2, 2), (1, 2)], (4, 4));
        engine.direction = Direction::Down;
        assert_eq!(engine.tick(), TickOutcome::Ended(Ending::SelfCollision));
        assert_eq!(cells(&engine), [(1, 1), (2, 1), (2, 2), (1, 2)]);
    }

    #[test]
    fn reject_reversal() {
        let mut engine = engine(5);
        engine.set_direction(Direction::Left);
        assert_eq!(engine.direction, Direction::Right);
        engine.set_direction(Direction::Up);
        assert_eq!(engine.direction, Direction::Up);
        engine.set_direction(Direction::Down);
        assert_eq!(engine.direction, Direction::Up);
    }

    #[test]
    fn reversal_checked_against_latest_request() {
        let mut engine = engine(5);
        engine.set_direction(Direction::Up);
        engine.set_direction(Direction::Left);
        assert_eq!(engine.direction, Direction::Left);
        engine.set_direction(Direction::Right);
        assert_eq!(engine.direction, Direction::Left);
    }

    #[test]
    fn pause_and_resume() {
        let mut engine = engine(5);
        place(&mut engine, &[(2, 2)], (0, 0));
        engine.toggle_pause();
        assert_eq!(engine.status, Status::Paused);
        assert_eq!(engine.tick(), TickOutcome::Idle);
        assert_eq!(cells(&engine), [(2, 2)]);
        engine.toggle_pause();
        assert_eq!(engine.status, Status::Running);
        assert_eq!(engine.tick(), TickOutcome::Moved);
        assert_eq!(cells(&engine), [(3, 2)]);
    }

    #[test]
    fn direction_change_while_paused() {
        let mut engine = engine(5);
        engine.toggle_pause();
        engine.set_direction(Direction::Down);
        assert_eq!(engine.direction, Direction::Down);
    }

    #[test]
    fn frozen_once_over() {
        let mut engine = engine(5);
        place(&mut engine, &[(4, 2)], (0, 0));
        assert_eq!(engine.tick(), TickOutcome::Ended(Ending::Wall));
        let before = engine.clone();
        engine.set_direction(Direction::Up);
        engine.toggle_pause();
        assert_eq!(engine.tick(), TickOutcome::Idle);
        engine.set_direction(Direction::Down);
        engine.toggle_pause();
        assert_eq!(engine.tick(), TickOutcome::Idle);
        assert_eq!(engine, before);
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut engine = engine(5);
        place(&mut engine, &[(2, 2)], (3, 2));
        assert_eq!(engine.tick(), TickOutcome::Ate);
        engine.set_direction(Direction::Up);
        engine.toggle_pause();
        engine.reset();
        assert_eq!(cells(&engine), [(2, 2)]);
        assert_eq!(engine.direction, Direction::Right);
        assert_eq!(engine.score, 0);
        assert_eq!(engine.speed, Duration::from_millis(150));
        assert_eq!(engine.status, Status::Running);
        assert!(engine.food.is_some_and(|f| f != Position::new(2, 2)));
    }

    #[test]
    fn reset_after_game_over() {
        let mut engine = engine(5);
        place(&mut engine, &[(4, 2)], (0, 0));
        let _ = engine.tick();
        assert!(matches!(engine.status, Status::Over(_)));
        engine.reset();
        assert_eq!(engine.status, Status::Running);
        assert_eq!(engine.snake.len(), 1);
    }

    #[test]
    fn fill_board() {
        let mut engine = engine(2);
        place(&mut engine, &[(0, 1), (0, 0), (1, 0)], (1, 1));
        assert_eq!(engine.tick(), TickOutcome::Ended(Ending::BoardFull));
        assert_eq!(engine.status, Status::Over(Ending::BoardFull));
        assert_eq!(engine.score, 1);
        assert_eq!(engine.snake.len(), 4);
        assert_eq!(engine.food, None);
    }

    #[test]
    fn play_a_while() {
        let mut engine = engine(8);
        let mut eaten = 0;
        for _ in 0..200 {
            let head = engine.snake.head();
            let food = engine.food.unwrap();
            let mut want = if food.x > head.x {
                Direction::Right
            } else if food.x < head.x {
                Direction::Left
            } else if food.y > head.y {
                Direction::Down
            } else {
                Direction::Up
            };
            if want == engine.direction.reverse() {
                want = match want {
                    Direction::Up | Direction::Down if head.x == 0 => Direction::Right,
                    Direction::Up | Direction::Down => Direction::Left,
                    Direction::Left | Direction::Right if head.y == 0 => Direction::Down,
                    Direction::Left | Direction::Right => Direction::Up,
                };
            }
            engine.set_direction(want);
            let len = engine.snake.len();
            match engine.tick() {
                TickOutcome::Moved => assert_eq!(engine.snake.len(), len),
                TickOutcome::Ate => {
                    eaten += 1;
                    assert_eq!(engine.snake.len(), len + 1);
                    assert!(!engine.snake.contains(engine.food.unwrap()));
                }
                TickOutcome::Ended(_) => break,
                TickOutcome::Idle => panic!("Running engine should not idle"),
            }
            let unique = engine
                .snake
                .cells
                .iter()
                .collect::<std::collections::HashSet<_>>();
            assert_eq!(unique.len(), engine.snake.len());
        }
        assert_eq!(engine.score, eaten);
        assert!(eaten > 0);
    }

    #[test]
    fn snapshot() {
        let mut engine = engine(5);
        engine.snake.cells = VecDeque::from([Position::new(1, 1), Position::new(0, 1)]);
        engine.food = Some(Position::new(3, 3));
        engine.toggle_pause();
        let snap = engine.snapshot();
        assert_eq!(snap.grid, Grid::new(5));
        assert_eq!(snap.snake.head(), Position::new(1, 1));
        assert_eq!(snap.food, Some(Position::new(3, 3)));
        assert_eq!(snap.heading, Direction::Right);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.status, Status::Paused);
    }

    #[test]
    fn heading_follows_moves() {
        let mut engine = engine(5);
        place(&mut engine, &[(2, 2)], (0, 0));
        engine.set_direction(Direction::Up);
        assert_eq!(engine.direction, Direction::Up);
        assert_eq!(engine.snapshot().heading, Direction::Right);
        assert_eq!(engine.tick(), TickOutcome::Moved);
        assert_eq!(engine.snapshot().heading, Direction::Up);
        engine.set_direction(Direction::Left);
        engine.reset();
        assert_eq!(engine.snapshot().heading, Direction::Right);
    }
}
