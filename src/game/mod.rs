mod direction;
mod engine;
mod food;
mod grid;
mod popups;
mod snake;
mod ticker;
use self::direction::Direction;
use self::engine::{Engine, Ending, Status, TickOutcome};
use self::popups::{GameOver, Paused};
use self::ticker::Ticker;
use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::highscore::ScoreStore;
use crate::options::Options;
use crate::util::center_rect;
use crate::warning::{Warning, WarningOutcome};
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Position, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Widget},
    Frame,
};
use std::time::Instant;

/// The game screen: a round of Snake plus the high score, the timer that
/// drives the snake, and any warning about the high score file
#[derive(Debug)]
pub(crate) struct Game<R = rand::rngs::ThreadRng> {
    engine: Engine<R>,
    high_score: u32,
    /// `None` once loading or saving the high score has failed
    store: Option<Box<dyn ScoreStore>>,
    ticker: Ticker,
    warning: Option<Warning>,
}

impl Game<rand::rngs::ThreadRng> {
    pub(crate) fn new(options: Options, store: Box<dyn ScoreStore>) -> Self {
        Game::new_with_rng(options, store, rand::rng())
    }
}

impl<R: Rng> Game<R> {
    pub(crate) fn new_with_rng(
        options: Options,
        mut store: Box<dyn ScoreStore>,
        rng: R,
    ) -> Game<R> {
        let (high_score, store, warning) = match store.load() {
            Ok(score) => {
                tracing::debug!(high_score = score, ?store, "Loaded high score");
                (score, Some(store), None)
            }
            Err(e) => {
                tracing::warn!(error = ?e, ?store, "Failed to load high score");
                (0, None, Some(Warning::from(e)))
            }
        };
        Game {
            engine: Engine::new(options, rng),
            high_score,
            store,
            ticker: Ticker::new(),
            warning,
        }
    }

    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        if self.ticking() {
            let wait = self.ticker.arm(Instant::now(), self.engine.speed());
            if wait.is_zero() || !poll(wait)? {
                if self.ticker.fire(Instant::now()) {
                    self.advance();
                }
                Ok(None)
            } else {
                Ok(self.handle_event(read()?))
            }
        } else {
            Ok(self.handle_event(read()?))
        }
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        if let Some(ref warning) = self.warning {
            match warning.handle_command(Command::from_key_event(event.as_key_press_event()?)?)? {
                WarningOutcome::Dismissed => self.warning = None,
                WarningOutcome::Quit => return Some(Screen::Quit),
            }
            return None;
        }
        match self.engine.status() {
            Status::Running => {
                if event == Event::FocusLost {
                    self.pause();
                } else {
                    match Command::from_key_event(event.as_key_press_event()?)? {
                        Command::Quit => return Some(Screen::Quit),
                        Command::Up => self.engine.set_direction(Direction::Up),
                        Command::Down => self.engine.set_direction(Direction::Down),
                        Command::Left => self.engine.set_direction(Direction::Left),
                        Command::Right => self.engine.set_direction(Direction::Right),
                        Command::Pause => self.pause(),
                        _ => (),
                    }
                }
            }
            // Direction keys are dropped while paused so that the snake
            // resumes the way it was going.
            Status::Paused => match Command::from_key_event(event.as_key_press_event()?)? {
                Command::Pause => {
                    tracing::debug!("Resuming");
                    self.engine.toggle_pause();
                }
                Command::Quit | Command::Q => return Some(Screen::Quit),
                _ => (),
            },
            Status::Over(_) => match Command::from_key_event(event.as_key_press_event()?)? {
                Command::R | Command::Enter => self.restart(),
                Command::Quit | Command::Q => return Some(Screen::Quit),
                _ => (),
            },
        }
        None
    }

    fn advance(&mut self) {
        match self.engine.tick() {
            TickOutcome::Idle => return,
            TickOutcome::Moved => {
                tracing::trace!(head = ?self.engine.snapshot().snake.head(), "Moved");
            }
            TickOutcome::Ate => tracing::debug!(
                score = self.engine.score(),
                speed = ?self.engine.speed(),
                "Snake ate food"
            ),
            TickOutcome::Ended(ending) => tracing::info!(
                ?ending,
                score = self.engine.score(),
                "Round over"
            ),
        }
        self.record_score();
    }

    fn restart(&mut self) {
        self.ticker.cancel();
        self.engine.reset();
        tracing::info!("Starting new round");
    }
}

impl<R> Game<R> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    fn ticking(&self) -> bool {
        self.engine.status() == Status::Running && self.warning.is_none()
    }

    fn pause(&mut self) {
        tracing::debug!("Pausing");
        self.engine.toggle_pause();
        self.ticker.cancel();
    }

    /// If the current score beats the high score, make it the new high score
    /// and save it.  If saving fails, the store is discarded and a warning is
    /// shown.
    fn record_score(&mut self) {
        let score = self.engine.score();
        if score <= self.high_score {
            return;
        }
        self.high_score = score;
        let Some(store) = self.store.as_mut() else {
            return;
        };
        if let Err(e) = store.save(score) {
            tracing::warn!(error = ?e, "Failed to save high score; no longer saving");
            self.store = None;
            self.ticker.cancel();
            self.warning = Some(Warning::from(e));
        }
    }
}

impl<R> Widget for &Game<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let snapshot = self.engine.snapshot();
        let grid_size = snapshot.grid.size();
        let board_size = Size {
            width: grid_size
                .saturating_mul(consts::CELL_WIDTH)
                .saturating_add(2),
            height: grid_size.saturating_add(2),
        };
        let display = center_rect(
            area,
            Size {
                width: board_size.width.max(consts::MIN_DISPLAY_WIDTH),
                height: board_size.height.saturating_add(2),
            },
        );
        let [score_area, board_area, legend_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(display);
        Line::styled(format!(" Score: {}", snapshot.score), consts::SCORE_BAR_STYLE)
            .render(score_area, buf);
        Line::from(format!("High: {} ", self.high_score))
            .right_aligned()
            .render(score_area, buf);
        key_legend().render(legend_area, buf);

        let block_area = center_rect(board_area, board_size);
        Block::bordered().render(block_area, buf);
        let mut board = Canvas {
            area: block_area.inner(Margin::new(1, 1)),
            buf,
        };
        for pos in snapshot.snake.body() {
            board.draw_cell(pos, consts::SNAKE_BODY_SYMBOL, consts::SNAKE_STYLE);
        }
        if let Some(pos) = snapshot.food {
            board.draw_cell(pos, consts::FOOD_SYMBOL, consts::FOOD_STYLE);
        }
        let head = snapshot.snake.head();
        if let Status::Over(Ending::Wall | Ending::SelfCollision) = snapshot.status {
            board.draw_cell(head, consts::COLLISION_SYMBOL, consts::COLLISION_STYLE);
        } else {
            board.draw_cell(head, head_symbol(snapshot.heading), consts::SNAKE_STYLE);
        }

        match snapshot.status {
            Status::Running => (),
            Status::Paused => Paused.render(center_rect(display, Paused::SIZE), buf),
            Status::Over(ending) => GameOver {
                score: snapshot.score,
                ending,
            }
            .render(center_rect(display, GameOver::SIZE), buf),
        }
        if let Some(ref warning) = self.warning {
            warning.render(area, buf);
        }
    }
}

/// `←↑↓→/wasd move  p/space pause`, with the keys highlighted
fn key_legend() -> Line<'static> {
    Line::from_iter([
        Span::styled("←↑↓→", consts::KEY_STYLE),
        Span::raw("/"),
        Span::styled("wasd", consts::KEY_STYLE),
        Span::raw(" move  "),
        Span::styled("p", consts::KEY_STYLE),
        Span::raw("/"),
        Span::styled("space", consts::KEY_STYLE),
        Span::raw(" pause"),
    ])
    .centered()
}

fn head_symbol(direction: Direction) -> char {
    match direction {
        Direction::Up => consts::SNAKE_HEAD_UP_SYMBOL,
        Direction::Down => consts::SNAKE_HEAD_DOWN_SYMBOL,
        Direction::Left => consts::SNAKE_HEAD_LEFT_SYMBOL,
        Direction::Right => consts::SNAKE_HEAD_RIGHT_SYMBOL,
    }
}

/// The inside of the board's border.  Each board cell is
/// [`CELL_WIDTH`][consts::CELL_WIDTH] columns wide, with the symbol in the
/// leftmost column.
#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, pos: Position, symbol: char, style: Style) {
        let Some(x) = pos
            .x
            .checked_mul(consts::CELL_WIDTH)
            .and_then(|x| self.area.x.checked_add(x))
        else {
            return;
        };
        let Some(y) = self.area.y.checked_add(pos.y) else {
            return;
        };
        if !self.area.contains(Position::new(x, y)) {
            return;
        }
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_char(symbol);
            cell.set_style(Style::reset().patch(style));
        }
    }
}
