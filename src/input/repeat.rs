//! Hold-to-repeat scheduling and reconciler timing.

use crate::config::TimingConfig;
use std::time::{Duration, Instant};

/// Runtime timing settings for the reconciler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Minimum gap between two accepted press starts
    pub debounce: Duration,
    /// Hold time before the first repeat fires
    pub hold_delay: Duration,
    /// Gap between repeats
    pub repeat_interval: Duration,
    /// How long after a touch ends mouse events are treated as synthesized
    pub touch_compat_window: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self::from(&TimingConfig::default())
    }
}

impl From<&TimingConfig> for Timing {
    fn from(cfg: &TimingConfig) -> Self {
        Self {
            debounce: Duration::from_millis(cfg.debounce_ms),
            hold_delay: Duration::from_millis(cfg.hold_delay_ms),
            repeat_interval: Duration::from_millis(cfg.repeat_interval_ms.max(1)),
            touch_compat_window: Duration::from_millis(cfg.touch_compat_window_ms),
        }
    }
}

/// A cancellable one-shot delay followed by a recurring interval.
///
/// The task holds no thread or timer handle; cancelling is dropping it.
/// Owners poll it with the current time and get back how many ticks fell due.
#[derive(Debug, Clone)]
pub struct RepeatTask {
    next_due: Instant,
    interval: Duration,
}

impl RepeatTask {
    /// Arms a task whose first tick is `delay` after `armed_at`.
    pub fn arm(armed_at: Instant, delay: Duration, interval: Duration) -> Self {
        Self {
            next_due: armed_at + delay,
            interval: interval.max(Duration::from_millis(1)),
        }
    }

    /// Instant of the next tick.
    pub fn deadline(&self) -> Instant {
        self.next_due
    }

    /// Consumes every tick due at or before `now`, returning how many.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let mut due = 0;
        while self.next_due <= now {
            due += 1;
            self.next_due += self.interval;
        }
        due
    }
}
