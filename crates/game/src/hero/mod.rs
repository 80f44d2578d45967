//! Playable heroes: movement, health, ability casting, ultimate charge.

pub mod kinds;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use skirmish_physics::{Aabb, Body, DamageResult, Health};

use crate::ability::{AbilityError, AbilityOutcome, AbilitySlots, Slot, UltimateCostPolicy};
use crate::enemy::Enemy;
use crate::input::{ButtonEdges, PlayerInput};

pub use kinds::HeroKind;

/// Aim-stick magnitude below which the aim vector reads as neutral.
const AIM_DEADZONE: f32 = 0.1;

/// Which way an entity faces. Also the sign of its forward direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    #[inline]
    pub fn flipped(self) -> Facing {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }
}

/// Team affiliation for game modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Team {
    Red,
    Blue,
}

impl Team {
    pub fn opponent(self) -> Team {
        match self {
            Team::Red => Team::Blue,
            Team::Blue => Team::Red,
        }
    }
}

/// Tuning shared by every hero.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HeroConfig {
    /// Horizontal run speed (units/second).
    pub run_speed: f32,

    /// Upward velocity applied per jump.
    pub jump_velocity: f32,

    /// Gravity magnitude (units/second^2).
    pub gravity: f32,

    /// Jump budget, reset on landing and on death.
    pub max_jumps: u8,

    /// Collision half-extents.
    pub half: Vec2,

    pub max_health: f32,

    /// Seconds between death and soft respawn.
    pub respawn_delay: f32,

    /// How long a drop-through request suppresses one-way platforms.
    pub drop_through_window: f32,

    /// Vertical speed while climbing a ladder.
    pub climb_speed: f32,

    /// Exponential decay rate for externally applied horizontal impulses
    /// (dashes, knockback). Higher stops sooner.
    pub impulse_damping: f32,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            run_speed: 6.0,
            jump_velocity: 9.0,
            gravity: 20.0,
            max_jumps: 2,
            half: Vec2::new(0.4, 0.9),
            max_health: 200.0,
            respawn_delay: 3.0,
            drop_through_window: 0.25,
            climb_speed: 4.0,
            impulse_damping: 6.0,
        }
    }
}

/// Ultimate charge tuning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UltimateConfig {
    pub charge_max: f32,

    /// Passive charge per second while alive and below max.
    pub passive_rate: f32,

    /// Charge per confirmed area-damage hit.
    pub charge_per_hit: f32,

    /// Bonus charge per killing blow.
    pub charge_per_kill: f32,

    pub cost_policy: UltimateCostPolicy,
}

impl Default for UltimateConfig {
    fn default() -> Self {
        Self {
            charge_max: 100.0,
            passive_rate: 5.0,
            charge_per_hit: 5.0,
            charge_per_kill: 25.0,
            cost_policy: UltimateCostPolicy::default(),
        }
    }
}

/// World access handed to an ability effect for exactly one activation.
///
/// Dependencies are passed in per call rather than stored on the hero, so
/// there is no post-construction field wiring to forget.
pub struct AbilityContext<'a> {
    pub enemies: &'a mut [Enemy],
    pub bodies: &'a mut [Body],
    pub ultimate: &'a UltimateConfig,
}

/// A playable hero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hero {
    pub id: u32,
    pub team: Team,
    pub kind: HeroKind,

    pub position: Vec2,
    pub velocity: Vec2,
    pub facing: Facing,
    pub grounded: bool,
    pub jumps_remaining: u8,

    /// Set by the level sweep when the hero overlaps a ladder.
    pub on_ladder: bool,

    pub health: Health,
    pub spawn_point: Vec2,
    pub abilities: AbilitySlots,
    pub ultimate_charge: f32,

    pub kills: u32,
    pub deaths: u32,

    half: Vec2,
    max_jumps: u8,
    respawn_delay: f32,

    alive: bool,
    respawn_timer: f32,
    invulnerable_remaining: f32,
    hover_remaining: f32,
    drop_through_remaining: f32,

    /// Externally applied horizontal speed, added on top of run input and
    /// decayed every tick. Dashes and knockback write here so player input
    /// cannot cancel them.
    impulse_x: f32,
}

impl Hero {
    pub fn new(id: u32, team: Team, kind: HeroKind, spawn: Vec2, config: &HeroConfig) -> Self {
        Self {
            id,
            team,
            kind,
            position: spawn,
            velocity: Vec2::ZERO,
            facing: Facing::Right,
            grounded: false,
            jumps_remaining: config.max_jumps,
            on_ladder: false,
            health: Health::new(config.max_health),
            spawn_point: spawn,
            abilities: kind.kit(),
            ultimate_charge: 0.0,
            kills: 0,
            deaths: 0,
            half: config.half,
            max_jumps: config.max_jumps,
            respawn_delay: config.respawn_delay,
            alive: true,
            respawn_timer: 0.0,
            invulnerable_remaining: 0.0,
            hover_remaining: 0.0,
            drop_through_remaining: 0.0,
            impulse_x: 0.0,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    #[inline]
    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_remaining > 0.0
    }

    #[inline]
    pub fn is_dropping_through(&self) -> bool {
        self.drop_through_remaining > 0.0
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.position, self.half)
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.half
    }

    // ========================================================================
    // Movement
    // ========================================================================

    /// Integrate gravity and input-driven motion for one tick. Collision is
    /// resolved afterwards by the level sweep.
    pub fn integrate(
        &mut self,
        input: &PlayerInput,
        edges: &ButtonEdges,
        config: &HeroConfig,
        dt: f32,
    ) {
        if !self.alive {
            return;
        }

        let axis = input.horizontal();
        self.velocity.x = axis * config.run_speed + self.impulse_x;
        if axis > 0.0 {
            self.facing = Facing::Right;
        } else if axis < 0.0 {
            self.facing = Facing::Left;
        } else if input.aim.x > AIM_DEADZONE {
            // Standing still, the aim stick turns the hero.
            self.facing = Facing::Right;
        } else if input.aim.x < -AIM_DEADZONE {
            self.facing = Facing::Left;
        }

        if edges.jump && self.jumps_remaining > 0 {
            self.velocity.y = config.jump_velocity;
            self.jumps_remaining -= 1;
            self.grounded = false;
        }

        if edges.drop_through && self.grounded {
            self.drop_through_remaining = config.drop_through_window;
            self.grounded = false;
        }

        if self.on_ladder && input.aim.y.abs() > AIM_DEADZONE {
            // Climbing: aim direction drives vertical speed, gravity is off.
            self.velocity.y = input.aim.y.signum() * config.climb_speed;
        } else if self.hover_remaining > 0.0 {
            // Hover holds altitude: vertical velocity decays instead of
            // accelerating downward.
            self.velocity.y *= (1.0 - 10.0 * dt).max(0.0);
        } else {
            self.velocity.y -= config.gravity * dt;
        }

        self.position += self.velocity * dt;

        self.impulse_x *= (1.0 - config.impulse_damping * dt).max(0.0);
        if self.impulse_x.abs() < 0.01 {
            self.impulse_x = 0.0;
        }
    }

    /// Apply an external horizontal impulse (dash, knockback). The impulse
    /// rides on top of run input and decays over a few tenths of a second.
    pub fn push(&mut self, velocity_x: f32) {
        self.impulse_x = velocity_x;
    }

    /// Called by the level sweep when the hero comes to rest on ground.
    pub fn land(&mut self) {
        self.grounded = true;
        self.jumps_remaining = self.max_jumps;
    }

    // ========================================================================
    // Damage and respawn
    // ========================================================================

    /// Apply damage. Invulnerability windows and death make this a no-op.
    pub fn take_damage(&mut self, amount: f32) -> DamageResult {
        if !self.alive || self.is_invulnerable() {
            return DamageResult::Ignored;
        }

        let result = self.health.take_damage(amount);
        if result == DamageResult::Destroyed {
            self.die();
        }
        result
    }

    /// Soft respawn: the hero is never removed, only sent back to spawn
    /// after the respawn delay with full health and a fresh jump budget.
    pub fn die(&mut self) {
        self.deaths += 1;
        self.alive = false;
        self.velocity = Vec2::ZERO;
        self.impulse_x = 0.0;
        self.on_ladder = false;
        self.hover_remaining = 0.0;
        self.invulnerable_remaining = 0.0;
        self.drop_through_remaining = 0.0;
        self.respawn_timer = self.respawn_delay;
        if self.respawn_delay <= 0.0 {
            self.revive();
        }
    }

    fn revive(&mut self) {
        self.alive = true;
        self.position = self.spawn_point;
        self.velocity = Vec2::ZERO;
        self.impulse_x = 0.0;
        self.health.restore();
        self.jumps_remaining = self.max_jumps;
        self.grounded = false;
    }

    /// Advance status timers, passive charge, and the respawn countdown.
    pub fn tick_status(&mut self, ultimate: &UltimateConfig, dt: f32) {
        self.invulnerable_remaining = (self.invulnerable_remaining - dt).max(0.0);
        self.hover_remaining = (self.hover_remaining - dt).max(0.0);
        self.drop_through_remaining = (self.drop_through_remaining - dt).max(0.0);

        if self.alive {
            self.gain_charge(ultimate.passive_rate * dt, ultimate);
        } else if self.respawn_timer > 0.0 {
            self.respawn_timer = (self.respawn_timer - dt).max(0.0);
            if self.respawn_timer == 0.0 {
                self.revive();
            }
        }
    }

    // ========================================================================
    // Abilities
    // ========================================================================

    /// Add ultimate charge, clamped to the configured max.
    pub fn gain_charge(&mut self, amount: f32, ultimate: &UltimateConfig) {
        self.ultimate_charge = (self.ultimate_charge + amount.max(0.0)).min(ultimate.charge_max);
    }

    /// Ultimate charge as a fraction of max, for the HUD.
    pub fn ultimate_ratio(&self, ultimate: &UltimateConfig) -> f32 {
        if ultimate.charge_max <= 0.0 {
            0.0
        } else {
            self.ultimate_charge / ultimate.charge_max
        }
    }

    /// Guarded ability activation.
    ///
    /// Non-ultimate slots go through the cooldown gate. The ultimate slot
    /// requires full charge and consumes it *before* the effect resolves;
    /// whether a whiff refunds it is decided by the configured policy.
    pub fn try_cast(
        &mut self,
        slot: Slot,
        ctx: &mut AbilityContext<'_>,
    ) -> Result<AbilityOutcome, AbilityError> {
        if !self.alive {
            return Err(AbilityError::Dead);
        }

        let effect = self.kind.effect(slot);

        if self.abilities.get(slot).ultimate {
            if self.ultimate_charge < ctx.ultimate.charge_max {
                return Err(AbilityError::ChargeNotFull);
            }

            self.ultimate_charge = 0.0;
            let outcome = effect(self, ctx);
            if outcome == AbilityOutcome::NoTarget
                && ctx.ultimate.cost_policy == UltimateCostPolicy::RefundOnWhiff
            {
                self.ultimate_charge = ctx.ultimate.charge_max;
            }
            return Ok(outcome);
        }

        self.abilities.get_mut(slot).try_use()?;
        Ok(effect(self, ctx))
    }

    /// Timed invulnerability (guard abilities).
    pub fn set_invulnerable(&mut self, duration: f32) {
        self.invulnerable_remaining = self.invulnerable_remaining.max(duration);
    }

    /// Timed hover (gravity suspension).
    pub fn set_hover(&mut self, duration: f32) {
        self.hover_remaining = self.hover_remaining.max(duration);
    }
}
