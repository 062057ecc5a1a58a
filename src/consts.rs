//! Assorted constants & hard-coded configuration
use ratatui::style::{Color, Modifier, Style};
use std::time::Duration;

/// Default width & height of the (square) board, in cells
pub(crate) const DEFAULT_GRID_SIZE: u16 = 20;

/// Smallest board size accepted from configuration.  A 1×1 board would be
/// filled by the snake before the first fruit could be placed.
pub(crate) const MIN_GRID_SIZE: u16 = 2;

/// Largest board size accepted from configuration
pub(crate) const MAX_GRID_SIZE: u16 = 40;

/// Default time between movements of the snake at the start of a round
pub(crate) const DEFAULT_INITIAL_SPEED: Duration = Duration::from_millis(150);

/// The tick interval never drops below this, no matter how much food has
/// been eaten.  It is also the smallest configurable initial speed.
pub(crate) const MIN_SPEED: Duration = Duration::from_millis(50);

/// Largest configurable initial tick interval
pub(crate) const MAX_SPEED: Duration = Duration::from_millis(5000);

/// Each fruit eaten multiplies the tick interval by
/// `SPEEDUP_NUMERATOR / SPEEDUP_DENOMINATOR` (i.e., a 5% reduction).
pub(crate) const SPEEDUP_NUMERATOR: u32 = 19;

/// See [`SPEEDUP_NUMERATOR`]
pub(crate) const SPEEDUP_DENOMINATOR: u32 = 20;

/// Number of random draws attempted when placing food before falling back to
/// picking among the free cells directly
pub(crate) const FOOD_PLACEMENT_ATTEMPTS: usize = 64;

/// Number of terminal columns used to draw one cell of the board, so that
/// cells look roughly square
pub(crate) const CELL_WIDTH: u16 = 2;

/// The game screen is never drawn narrower than this, so that the score bar
/// and the key legend fit even on small boards.
pub(crate) const MIN_DISPLAY_WIDTH: u16 = 30;

/// Glyph for the snake's head when it is moving up
pub(crate) const SNAKE_HEAD_UP_SYMBOL: char = 'v';

/// Glyph for the snake's head when it is moving down
pub(crate) const SNAKE_HEAD_DOWN_SYMBOL: char = '^';

/// Glyph for the snake's head when it is moving right
pub(crate) const SNAKE_HEAD_RIGHT_SYMBOL: char = '<';

/// Glyph for the snake's head when it is moving left
pub(crate) const SNAKE_HEAD_LEFT_SYMBOL: char = '>';

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: char = '⚬';

/// Glyph for the food
pub(crate) const FOOD_SYMBOL: char = '●';

/// Glyph for the snake's head once it has run into a wall or itself
pub(crate) const COLLISION_SYMBOL: char = '×';

/// Style for the snake's head and body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style for the food
pub(crate) const FOOD_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);
