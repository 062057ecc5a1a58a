use crate::consts;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Gameplay settings, fixed for the lifetime of a game.  Values are always
/// within the ranges accepted by [`Options::new()`].
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(try_from = "RawOptions")]
pub(crate) struct Options {
    grid_size: u16,
    initial_speed: Duration,
}

impl Options {
    /// Construct a set of options, checking that the board size and initial
    /// tick interval are within the supported ranges
    pub(crate) fn new(grid_size: u16, initial_speed: Duration) -> Result<Options, OptionsError> {
        if !(consts::MIN_GRID_SIZE..=consts::MAX_GRID_SIZE).contains(&grid_size) {
            return Err(OptionsError::GridSize(grid_size));
        }
        if !(consts::MIN_SPEED..=consts::MAX_SPEED).contains(&initial_speed) {
            return Err(OptionsError::InitialSpeed(initial_speed));
        }
        Ok(Options {
            grid_size,
            initial_speed,
        })
    }

    pub(crate) fn grid_size(self) -> u16 {
        self.grid_size
    }

    /// The time between movements of the snake before it has eaten anything
    pub(crate) fn initial_speed(self) -> Duration {
        self.initial_speed
    }

    pub(crate) fn with_grid_size(self, grid_size: u16) -> Result<Options, OptionsError> {
        Options::new(grid_size, self.initial_speed)
    }

    pub(crate) fn with_initial_speed(self, speed: Duration) -> Result<Options, OptionsError> {
        Options::new(self.grid_size, speed)
    }
}

impl Default for Options {
    fn default() -> Options {
        Options {
            grid_size: consts::DEFAULT_GRID_SIZE,
            initial_speed: consts::DEFAULT_INITIAL_SPEED,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
struct RawOptions {
    grid_size: u16,
    /// Milliseconds
    initial_speed: u64,
}

impl Default for RawOptions {
    fn default() -> RawOptions {
        let opts = Options::default();
        RawOptions {
            grid_size: opts.grid_size,
            initial_speed: u64::try_from(opts.initial_speed.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

impl TryFrom<RawOptions> for Options {
    type Error = OptionsError;

    fn try_from(value: RawOptions) -> Result<Options, OptionsError> {
        Options::new(value.grid_size, Duration::from_millis(value.initial_speed))
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum OptionsError {
    #[error(
        "grid size must be between {min} and {max}, not {0}",
        min = consts::MIN_GRID_SIZE,
        max = consts::MAX_GRID_SIZE
    )]
    GridSize(u16),
    #[error(
        "initial speed must be between {min} and {max} milliseconds, not {ms}",
        min = consts::MIN_SPEED.as_millis(),
        max = consts::MAX_SPEED.as_millis(),
        ms = .0.as_millis()
    )]
    InitialSpeed(Duration),
}
