use std::time::Duration;

use crate::constants::TIMER_INTERVAL;

/// Tunables for a `Chip8`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// How often the delay and sound timers count down
    pub timer_interval: Duration,
    /// Seed for `Cxkk`; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Config {
    /// Timers counting down `hz` times a second
    pub fn with_timer_hz(mut self, hz: u32) -> Self {
        self.timer_interval = Duration::from_secs(1) / hz.max(1);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            timer_interval: TIMER_INTERVAL,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_60hz() {
        assert_eq!(Config::default().timer_interval, Duration::from_nanos(16_666_666));
    }

    #[test]
    fn test_timer_hz() {
        let config = Config::default().with_timer_hz(100);
        assert_eq!(config.timer_interval, Duration::from_millis(10));
        // zero would never tick
        let config = Config::default().with_timer_hz(0);
        assert_eq!(config.timer_interval, Duration::from_secs(1));
    }
}
