//! Ability slots and the cooldown scheduler.
//!
//! Every hero holds exactly four slots (Q/W/E/R). Slots are ticked
//! unconditionally every frame; use is a guarded entry point that refuses
//! with an explicit reason instead of silently doing nothing, so callers and
//! tests can be exhaustive about failure modes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why an ability activation was refused.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum AbilityError {
    #[error("ability on cooldown ({remaining:.2}s remaining)")]
    OnCooldown { remaining: f32 },

    #[error("ultimate charge not full")]
    ChargeNotFull,

    #[error("hero is dead")]
    Dead,
}

/// What an ability effect accomplished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbilityOutcome {
    /// Damaged `hits` targets, `kills` of which died.
    Hit { hits: u32, kills: u32 },
    /// A movement effect fired (dash, leap).
    Moved,
    /// A self-buff toggled on (guard, hover).
    Toggled,
    /// The effect resolved but found nothing to affect.
    NoTarget,
}

/// The four ability slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Q,
    W,
    E,
    /// The ultimate slot: gated by charge, not cooldown.
    R,
}

/// One ability slot: name, cooldown, readiness.
///
/// Invariant: `current_cooldown > 0` implies `!ready`; the cooldown is
/// clamped to zero at the crossing and `ready` flips there.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ability {
    /// Display name. Not round-tripped through serde; snapshots restore it
    /// from the hero kind's kit.
    #[serde(skip)]
    pub name: &'static str,

    /// Full cooldown in seconds. Zero for ultimates.
    pub cooldown: f32,

    /// Whether this slot is charge-gated rather than cooldown-gated.
    pub ultimate: bool,

    current_cooldown: f32,
    ready: bool,
}

impl Ability {
    pub fn new(name: &'static str, cooldown: f32) -> Self {
        Self {
            name,
            cooldown: cooldown.max(0.0),
            ultimate: false,
            current_cooldown: 0.0,
            ready: true,
        }
    }

    /// An ultimate slot. Readiness is decided by the hero's charge, not by
    /// this struct; `try_use` always passes for ultimates.
    pub fn new_ultimate(name: &'static str) -> Self {
        Self {
            ultimate: true,
            ..Self::new(name, 0.0)
        }
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn cooldown_remaining(&self) -> f32 {
        self.current_cooldown
    }

    /// Remaining cooldown as a fraction of the full cooldown, for the HUD.
    pub fn cooldown_ratio(&self) -> f32 {
        if self.cooldown <= 0.0 {
            0.0
        } else {
            self.current_cooldown / self.cooldown
        }
    }

    /// Tick the cooldown. Called every frame for every slot.
    pub fn update(&mut self, dt: f32) {
        if self.current_cooldown > 0.0 {
            self.current_cooldown = (self.current_cooldown - dt.max(0.0)).max(0.0);
            if self.current_cooldown == 0.0 {
                self.ready = true;
            }
        }
    }

    /// Guarded activation. Non-ultimate slots refuse while cooling down and
    /// otherwise restart their cooldown. Ultimate slots pass unconditionally;
    /// the hero layer enforces the charge gate.
    pub fn try_use(&mut self) -> Result<(), AbilityError> {
        if self.ultimate {
            return Ok(());
        }
        if !self.ready {
            return Err(AbilityError::OnCooldown {
                remaining: self.current_cooldown,
            });
        }

        self.current_cooldown = self.cooldown;
        self.ready = false;
        Ok(())
    }

    /// Make the slot immediately usable again (chained reset effects).
    pub fn reset_cooldown(&mut self) {
        self.current_cooldown = 0.0;
        self.ready = true;
    }
}

/// A hero's full kit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilitySlots {
    pub q: Ability,
    pub w: Ability,
    pub e: Ability,
    pub r: Ability,
}

impl AbilitySlots {
    pub fn get(&self, slot: Slot) -> &Ability {
        match slot {
            Slot::Q => &self.q,
            Slot::W => &self.w,
            Slot::E => &self.e,
            Slot::R => &self.r,
        }
    }

    pub fn get_mut(&mut self, slot: Slot) -> &mut Ability {
        match slot {
            Slot::Q => &mut self.q,
            Slot::W => &mut self.w,
            Slot::E => &mut self.e,
            Slot::R => &mut self.r,
        }
    }

    /// Tick every slot. Unconditional, every frame.
    pub fn update_all(&mut self, dt: f32) {
        self.q.update(dt);
        self.w.update(dt);
        self.e.update(dt);
        self.r.update(dt);
    }
}

/// Whether a whiffed ultimate refunds its charge.
///
/// The charge is always consumed before the effect resolves; with
/// `RefundOnWhiff` a `NoTarget` outcome restores it afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UltimateCostPolicy {
    /// Attempting costs the full charge even if the effect hits nothing.
    #[default]
    AlwaysConsume,
    /// Charge is restored when the effect finds no valid target.
    RefundOnWhiff,
}
