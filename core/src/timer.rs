use std::time::Duration;

use crate::constants::TIMER_HZ;

/// Converts real elapsed time into 60Hz timer ticks.
///
/// Time that doesn't add up to a whole tick is carried over to the next call,
/// so the tick rate is independent of how often `advance` is called.
#[derive(Debug, Clone, Copy)]
pub struct TimerClock {
    period: Duration,
    carry: Duration,
}

impl TimerClock {
    pub fn new() -> Self {
        Self::with_rate(TIMER_HZ)
    }

    pub fn with_rate(hz: u32) -> Self {
        TimerClock {
            period: Duration::from_secs(1) / hz.max(1),
            carry: Duration::ZERO,
        }
    }

    /// Number of whole ticks that have come due after `elapsed` more time
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.carry += elapsed;
        let due = self.carry.as_nanos() / self.period.as_nanos();
        let ticks = u32::try_from(due).unwrap_or(u32::MAX);
        self.carry -= self.period * ticks;
        ticks
    }

    pub fn reset(&mut self) {
        self.carry = Duration::ZERO;
    }
}

impl Default for TimerClock {
    fn default() -> Self {
        Self::new()
    }
}
