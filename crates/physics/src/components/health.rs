//! Health component shared by heroes, enemies, and destructible props.

use serde::{Deserialize, Serialize};

/// Outcome of a [`Health::take_damage`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageResult {
    /// Nothing changed: non-positive amount, or the target was already dead.
    Ignored,
    /// Damage was applied but the target survived.
    Damaged,
    /// This hit brought health to zero.
    Destroyed,
}

/// Bounded health pool.
///
/// Invariant: `0 <= current <= max` before and after every operation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    max: f32,
    current: f32,
}

impl Health {
    /// Create a full health pool.
    pub fn new(max: f32) -> Self {
        let max = max.max(0.0);
        Self { max, current: max }
    }

    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }

    #[inline]
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Current health as a fraction of max, in `[0, 1]`. Used by the HUD.
    pub fn ratio(&self) -> f32 {
        if self.max <= 0.0 {
            0.0
        } else {
            self.current / self.max
        }
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }

    /// Apply damage. Non-positive amounts are clamped away and damaging an
    /// already-dead pool is a no-op, so callers never need to pre-check.
    pub fn take_damage(&mut self, amount: f32) -> DamageResult {
        let amount = amount.max(0.0);
        if self.is_dead() || amount == 0.0 {
            return DamageResult::Ignored;
        }

        self.current = (self.current - amount).max(0.0);
        if self.current == 0.0 {
            DamageResult::Destroyed
        } else {
            DamageResult::Damaged
        }
    }

    /// Heal by `amount`, clamped to max. Dead pools are not revived here;
    /// use [`Health::restore`] on respawn. Returns the health actually added.
    pub fn heal(&mut self, amount: f32) -> f32 {
        if self.is_dead() {
            return 0.0;
        }

        let before = self.current;
        self.current = (self.current + amount.max(0.0)).min(self.max);
        self.current - before
    }

    /// Reset to full health (respawn path).
    pub fn restore(&mut self) {
        self.current = self.max;
    }
}
