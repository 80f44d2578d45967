//! Ignition component for fused props (exploding barrels).
//!
//! Damage does not destroy these props outright: any positive hit lights the
//! fuse, the prop burns for `detonate_delay` seconds while taking continuous
//! damage, then detonates. A damage-then-timer-then-effect cascade.

use serde::{Deserialize, Serialize};

/// Per-frame result of advancing an ignition.
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnitionTick {
    /// Damage-over-time to apply to the owner this frame.
    pub burn_damage: f32,
    /// Whether the fuse expired this frame.
    pub detonated: bool,
}

/// Fuse state machine: unlit until damaged, then burning until detonation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ignition {
    /// Seconds between ignition and detonation.
    pub detonate_delay: f32,

    /// Continuous damage applied to the owner while burning.
    pub damage_per_second: f32,

    /// Remaining fuse time; `None` while unlit.
    fuse: Option<f32>,
}

impl Ignition {
    pub fn new(detonate_delay: f32, damage_per_second: f32) -> Self {
        Self {
            detonate_delay: detonate_delay.max(0.0),
            damage_per_second: damage_per_second.max(0.0),
            fuse: None,
        }
    }

    #[inline]
    pub fn is_lit(&self) -> bool {
        self.fuse.is_some()
    }

    /// Light the fuse. No-op if already burning.
    pub fn light(&mut self) {
        if self.fuse.is_none() {
            self.fuse = Some(self.detonate_delay);
        }
    }

    /// Snuff the fuse (respawn path).
    pub fn reset(&mut self) {
        self.fuse = None;
    }

    /// Advance the fuse by one frame.
    pub fn tick(&mut self, dt: f32) -> IgnitionTick {
        let Some(remaining) = self.fuse else {
            return IgnitionTick::default();
        };

        let dt = dt.max(0.0);
        let next = remaining - dt;
        if next <= 0.0 {
            self.fuse = None;
            IgnitionTick {
                burn_damage: self.damage_per_second * remaining.max(0.0),
                detonated: true,
            }
        } else {
            self.fuse = Some(next);
            IgnitionTick {
                burn_damage: self.damage_per_second * dt,
                detonated: false,
            }
        }
    }
}
