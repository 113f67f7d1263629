use std::time::{Duration, Instant};

/// # Timers
/// The delay and sound timers count down to 0 at a fixed real-time rate,
/// independent of how many instructions run in between.
///
/// A tick decrements each timer by at most 1, however long it has been since
/// the last one.
#[derive(Debug, Clone)]
pub struct Timers {
    interval: Duration,
    last_tick: Option<Instant>,
}

impl Timers {
    pub fn new(interval: Duration) -> Self {
        Timers {
            interval,
            last_tick: None,
        }
    }

    /// Returns true if a full interval has passed since the last tick.
    ///
    /// The first call only starts the clock.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.last_tick {
            None => {
                self.last_tick = Some(now);
                false
            }
            Some(last) if now.saturating_duration_since(last) >= self.interval => {
                self.last_tick = Some(now);
                true
            }
            Some(_) => false,
        }
    }
}

/// Counts a timer down by one, stopping at 0
pub fn decay(timer: &mut u8) {
    *timer = timer.saturating_sub(1);
}
