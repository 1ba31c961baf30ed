//! Tick-rate gate
//!
//! Decouples how often the water is simulated from how often the caller
//! renders. A pure comparison; it never sleeps.

use crate::consts::DEFAULT_TICK_RATE;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationClock {
    /// Minimum time between ticks
    rate: f64,
    last_tick: f64,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::with_rate(DEFAULT_TICK_RATE)
    }
}

impl SimulationClock {
    pub fn with_rate(rate: f64) -> Self {
        Self {
            rate,
            last_tick: 0.0,
        }
    }

    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Time of the last accepted tick
    #[inline]
    pub fn last_tick(&self) -> f64 {
        self.last_tick
    }

    /// True if more than `rate` has passed since the last accepted tick.
    /// Accepting a tick records `now` as the new reference point.
    pub fn should_tick(&mut self, now: f64) -> bool {
        if now - self.last_tick > self.rate {
            self.last_tick = now;
            true
        } else {
            false
        }
    }

    /// Restart timing from `now`
    pub fn reset(&mut self, now: f64) {
        self.last_tick = now;
    }
}
