//! Deterministic timers advanced inside the update tick.
//!
//! There are no deferred callbacks anywhere in the simulation: every delayed
//! effect holds one of these timers and is advanced (or dropped) by its
//! owner. An effect whose owner dies is cancelled by dropping it.

use serde::{Deserialize, Serialize};

/// One-shot countdown. Fires exactly once, on the tick it crosses zero.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Countdown {
    remaining: f32,
}

impl Countdown {
    pub fn new(duration: f32) -> Self {
        Self {
            remaining: duration.max(0.0),
        }
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn is_done(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Advance; returns `true` only on the tick the countdown expires.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.remaining <= 0.0 {
            return false;
        }

        self.remaining = (self.remaining - dt.max(0.0)).max(0.0);
        self.remaining == 0.0
    }
}

/// Repeating timer with a bounded number of firings. Used for multi-tick
/// damage-over-time effects.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Repeating {
    interval: f32,
    elapsed: f32,
    remaining_ticks: u32,
}

impl Repeating {
    pub fn new(interval: f32, ticks: u32) -> Self {
        Self {
            interval: interval.max(f32::EPSILON),
            elapsed: 0.0,
            remaining_ticks: ticks,
        }
    }

    /// Whether all firings have been consumed.
    pub fn is_finished(&self) -> bool {
        self.remaining_ticks == 0
    }

    pub fn ticks_left(&self) -> u32 {
        self.remaining_ticks
    }

    /// Advance; returns how many times the timer fired this frame (a large
    /// `dt` can cover several intervals, still capped by the tick budget).
    pub fn tick(&mut self, dt: f32) -> u32 {
        if self.remaining_ticks == 0 {
            return 0;
        }

        self.elapsed += dt.max(0.0);
        let mut fired = 0;
        while self.elapsed >= self.interval && self.remaining_ticks > 0 {
            self.elapsed -= self.interval;
            self.remaining_ticks -= 1;
            fired += 1;
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_fires_once() {
        let mut timer = Countdown::new(0.3);
        assert!(!timer.tick(0.1));
        assert!(!timer.tick(0.1));
        assert!(timer.tick(0.1));
        assert!(!timer.tick(0.1));
        assert!(timer.is_done());
    }

    #[test]
    fn test_repeating_fires_per_interval() {
        let mut timer = Repeating::new(0.5, 3);

        assert_eq!(timer.tick(0.4), 0);
        assert_eq!(timer.tick(0.1), 1);
        assert_eq!(timer.tick(0.5), 1);
        assert_eq!(timer.tick(0.5), 1);
        assert!(timer.is_finished());
        assert_eq!(timer.tick(1.0), 0);
    }

    #[test]
    fn test_repeating_large_step_fires_multiple() {
        let mut timer = Repeating::new(0.25, 4);
        assert_eq!(timer.tick(1.0), 4);
        assert!(timer.is_finished());
    }
}
