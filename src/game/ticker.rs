use std::time::{Duration, Instant};

/// A restartable single-shot deadline for the next movement of the snake.
///
/// The deadline is armed with the tick interval in effect at the time, fires
/// once, and must then be armed again with whatever the interval has become.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(super) struct Ticker {
    deadline: Option<Instant>,
}

impl Ticker {
    pub(super) fn new() -> Ticker {
        Ticker::default()
    }

    /// If no deadline is pending, schedule one `period` after `now`.  Returns
    /// how long remains until the pending deadline.
    pub(super) fn arm(&mut self, now: Instant, period: Duration) -> Duration {
        let deadline = *self.deadline.get_or_insert(now + period);
        deadline.saturating_duration_since(now)
    }

    /// If the pending deadline has passed as of `now`, consume it and return
    /// `true`.
    pub(super) fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Discard any pending deadline
    pub(super) fn cancel(&mut self) {
        self.deadline = None;
    }
}
