//! The playable roster.
//!
//! Each kind is a closed variant with four effects of one uniform signature
//! (`fn(&mut Hero, &mut AbilityContext) -> AbilityOutcome`), selected through
//! a single dispatch table. Adding a hero means adding a variant, a kit, and
//! four table rows; nothing else in the crate changes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use skirmish_physics::Aabb;

use crate::ability::{Ability, AbilityOutcome, AbilitySlots, Slot};
use crate::combat::{area_damage, damage_bodies, HitReport};

use super::{AbilityContext, Hero};

/// Uniform ability effect signature. Every effect, basic or ultimate, fits
/// this shape, so dispatch is a plain function-pointer table.
pub type EffectFn = fn(&mut Hero, &mut AbilityContext<'_>) -> AbilityOutcome;

/// The closed set of playable heroes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeroKind {
    /// Melee bruiser: short reach, heavy hits, a guard.
    Vanguard,
    /// Skirmisher: long thin strikes, a dash, hover.
    Tempest,
    /// Controller: fear, self-sustain, a long sanctuary.
    Warden,
    /// Assassin: bleed, cooldown-resetting harvest, a single-target execute.
    Revenant,
}

impl HeroKind {
    pub fn name(self) -> &'static str {
        match self {
            HeroKind::Vanguard => "Vanguard",
            HeroKind::Tempest => "Tempest",
            HeroKind::Warden => "Warden",
            HeroKind::Revenant => "Revenant",
        }
    }

    /// The kit for this kind: slot names and cooldowns.
    pub fn kit(self) -> AbilitySlots {
        match self {
            HeroKind::Vanguard => AbilitySlots {
                q: Ability::new("Cleave", 1.5),
                w: Ability::new("Charge", 5.0),
                e: Ability::new("Bulwark", 10.0),
                r: Ability::new_ultimate("Cataclysm"),
            },
            HeroKind::Tempest => AbilitySlots {
                q: Ability::new("Bolt", 0.8),
                w: Ability::new("Gale Dash", 4.0),
                e: Ability::new("Updraft", 8.0),
                r: Ability::new_ultimate("Skyfall"),
            },
            HeroKind::Warden => AbilitySlots {
                q: Ability::new("Bash", 2.0),
                w: Ability::new("Terrify", 8.0),
                e: Ability::new("Mend", 12.0),
                r: Ability::new_ultimate("Sanctuary"),
            },
            HeroKind::Revenant => AbilitySlots {
                q: Ability::new("Slash", 1.2),
                w: Ability::new("Harvest", 6.0),
                e: Ability::new("Shadowstep", 5.0),
                r: Ability::new_ultimate("Deathmark"),
            },
        }
    }

    /// The dispatch table.
    pub fn effect(self, slot: Slot) -> EffectFn {
        match (self, slot) {
            (HeroKind::Vanguard, Slot::Q) => cleave,
            (HeroKind::Vanguard, Slot::W) => charge_dash,
            (HeroKind::Vanguard, Slot::E) => bulwark,
            (HeroKind::Vanguard, Slot::R) => cataclysm,

            (HeroKind::Tempest, Slot::Q) => bolt,
            (HeroKind::Tempest, Slot::W) => gale_dash,
            (HeroKind::Tempest, Slot::E) => updraft,
            (HeroKind::Tempest, Slot::R) => skyfall,

            (HeroKind::Warden, Slot::Q) => bash,
            (HeroKind::Warden, Slot::W) => terrify,
            (HeroKind::Warden, Slot::E) => mend,
            (HeroKind::Warden, Slot::R) => sanctuary,

            (HeroKind::Revenant, Slot::Q) => slash,
            (HeroKind::Revenant, Slot::W) => harvest,
            (HeroKind::Revenant, Slot::E) => shadowstep,
            (HeroKind::Revenant, Slot::R) => deathmark,
        }
    }
}

// ============================================================================
// Shared effect building blocks
// ============================================================================

/// A strike box extending `reach` in front of the hero.
fn strike_region(hero: &Hero, reach: f32, half_height: f32) -> Aabb {
    let center = hero.position + Vec2::new(hero.facing.sign() * reach * 0.5, 0.0);
    Aabb::new(center, Vec2::new(reach * 0.5, half_height))
}

/// Area strike plus charge accrual. Basic abilities feed the ultimate meter;
/// ultimate effects call `area_damage` directly and accrue nothing.
fn strike(hero: &mut Hero, ctx: &mut AbilityContext<'_>, region: &Aabb, damage: f32) -> HitReport {
    let report = area_damage(region, damage, 1.0, ctx.enemies);
    let gained = report.hits as f32 * ctx.ultimate.charge_per_hit
        + report.kills as f32 * ctx.ultimate.charge_per_kill;
    hero.gain_charge(gained, ctx.ultimate);
    hero.kills += report.kills;
    report
}

fn report_outcome(report: HitReport) -> AbilityOutcome {
    if report.connected() {
        AbilityOutcome::Hit {
            hits: report.hits,
            kills: report.kills,
        }
    } else {
        AbilityOutcome::NoTarget
    }
}

fn dash(hero: &mut Hero, speed: f32) -> AbilityOutcome {
    hero.push(hero.facing.sign() * speed);
    AbilityOutcome::Moved
}

// ============================================================================
// Vanguard
// ============================================================================

fn cleave(hero: &mut Hero, ctx: &mut AbilityContext<'_>) -> AbilityOutcome {
    let region = strike_region(hero, 2.0, 1.2);
    report_outcome(strike(hero, ctx, &region, 15.0))
}

fn charge_dash(hero: &mut Hero, _ctx: &mut AbilityContext<'_>) -> AbilityOutcome {
    dash(hero, 14.0)
}

fn bulwark(hero: &mut Hero, _ctx: &mut AbilityContext<'_>) -> AbilityOutcome {
    hero.set_invulnerable(1.5);
    AbilityOutcome::Toggled
}

/// Ultimate: a blast centered on the hero that also breaks destructibles.
fn cataclysm(hero: &mut Hero, ctx: &mut AbilityContext<'_>) -> AbilityOutcome {
    let region = Aabb::new(hero.position, Vec2::new(5.0, 3.0));
    let report = area_damage(&region, 60.0, 1.0, ctx.enemies);
    hero.kills += report.kills;
    let bodies_hit = damage_bodies(&region, 60.0, ctx.bodies);
    if report.connected() || bodies_hit > 0 {
        AbilityOutcome::Hit {
            hits: report.hits + bodies_hit,
            kills: report.kills,
        }
    } else {
        AbilityOutcome::NoTarget
    }
}

// ============================================================================
// Tempest
// ============================================================================

fn bolt(hero: &mut Hero, ctx: &mut AbilityContext<'_>) -> AbilityOutcome {
    let region = strike_region(hero, 6.0, 0.4);
    report_outcome(strike(hero, ctx, &region, 10.0))
}

fn gale_dash(hero: &mut Hero, _ctx: &mut AbilityContext<'_>) -> AbilityOutcome {
    dash(hero, 18.0)
}

fn updraft(hero: &mut Hero, _ctx: &mut AbilityContext<'_>) -> AbilityOutcome {
    hero.set_hover(2.0);
    hero.velocity.y = hero.velocity.y.max(4.0);
    AbilityOutcome::Toggled
}

/// Ultimate: a tall column ahead of the hero.
fn skyfall(hero: &mut Hero, ctx: &mut AbilityContext<'_>) -> AbilityOutcome {
    let center = hero.position + Vec2::new(hero.facing.sign() * 4.0, 2.0);
    let region = Aabb::new(center, Vec2::new(2.0, 5.0));
    let report = area_damage(&region, 50.0, 1.0, ctx.enemies);
    hero.kills += report.kills;
    report_outcome(report)
}

// ============================================================================
// Warden
// ============================================================================

fn bash(hero: &mut Hero, ctx: &mut AbilityContext<'_>) -> AbilityOutcome {
    let region = strike_region(hero, 1.8, 1.2);
    report_outcome(strike(hero, ctx, &region, 12.0))
}

/// Fear: light damage, and every hit enemy runs away from the hero.
fn terrify(hero: &mut Hero, ctx: &mut AbilityContext<'_>) -> AbilityOutcome {
    let region = Aabb::new(hero.position, Vec2::new(4.0, 2.0));
    let x = hero.position.x;
    let mut report = HitReport::default();
    for enemy in ctx.enemies.iter_mut() {
        if !enemy.is_alive() || !region.overlaps(&enemy.bounds()) {
            continue;
        }
        report.hits += 1;
        if enemy.health.take_damage(5.0) == skirmish_physics::DamageResult::Destroyed {
            report.kills += 1;
        } else {
            enemy.flee_from(x);
        }
    }
    let gained = report.hits as f32 * ctx.ultimate.charge_per_hit
        + report.kills as f32 * ctx.ultimate.charge_per_kill;
    hero.gain_charge(gained, ctx.ultimate);
    hero.kills += report.kills;
    report_outcome(report)
}

fn mend(hero: &mut Hero, _ctx: &mut AbilityContext<'_>) -> AbilityOutcome {
    hero.health.heal(25.0);
    AbilityOutcome::Toggled
}

/// Ultimate: long invulnerability plus a strong self-heal. Self-targeted, so
/// it can never whiff.
fn sanctuary(hero: &mut Hero, _ctx: &mut AbilityContext<'_>) -> AbilityOutcome {
    hero.set_invulnerable(3.0);
    hero.health.heal(50.0);
    AbilityOutcome::Toggled
}

// ============================================================================
// Revenant
// ============================================================================

fn slash(hero: &mut Hero, ctx: &mut AbilityContext<'_>) -> AbilityOutcome {
    let region = strike_region(hero, 2.2, 1.0);
    let report = strike(hero, ctx, &region, 14.0);
    // Slash wounds: survivors bleed for a short while.
    for enemy in ctx.enemies.iter_mut() {
        if enemy.is_alive() && region.overlaps(&enemy.bounds()) {
            enemy.apply_bleed(3.0, 0.5, 4);
        }
    }
    report_outcome(report)
}

/// Kills refund Slash, at most twice per activation.
fn harvest(hero: &mut Hero, ctx: &mut AbilityContext<'_>) -> AbilityOutcome {
    let region = Aabb::new(hero.position, Vec2::new(3.0, 1.5));
    let report = strike(hero, ctx, &region, 20.0);
    let resets = report.kills.min(2);
    for _ in 0..resets {
        hero.abilities.q.reset_cooldown();
    }
    report_outcome(report)
}

fn shadowstep(hero: &mut Hero, _ctx: &mut AbilityContext<'_>) -> AbilityOutcome {
    dash(hero, 20.0)
}

/// Ultimate: execute the nearest living enemy within range. The one effect
/// in the roster that can whiff outright, which is what the refund policy
/// exists for.
fn deathmark(hero: &mut Hero, ctx: &mut AbilityContext<'_>) -> AbilityOutcome {
    const RANGE: f32 = 8.0;
    const DAMAGE: f32 = 100.0;

    let origin = hero.position;
    let target = ctx
        .enemies
        .iter_mut()
        .filter(|e| e.is_alive() && e.position.distance(origin) <= RANGE)
        .min_by(|a, b| {
            a.position
                .distance(origin)
                .total_cmp(&b.position.distance(origin))
        });

    match target {
        Some(enemy) => {
            let mut kills = 0;
            if enemy.health.take_damage(DAMAGE) == skirmish_physics::DamageResult::Destroyed {
                kills = 1;
                hero.kills += 1;
            }
            AbilityOutcome::Hit { hits: 1, kills }
        }
        None => AbilityOutcome::NoTarget,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::{AbilityError, UltimateCostPolicy};
    use crate::enemy::Enemy;
    use crate::hero::{HeroConfig, Team, UltimateConfig};
    use skirmish_physics::Body;

    fn arena(kind: HeroKind) -> (Hero, Vec<Enemy>, Vec<Body>, UltimateConfig) {
        let config = HeroConfig::default();
        let hero = Hero::new(1, Team::Red, kind, Vec2::new(0.0, 0.9), &config);
        let enemy = Enemy::new(10, Vec2::new(1.0, 0.5), Vec2::splat(0.5), 30.0, 2.0);
        (hero, vec![enemy], Vec::new(), UltimateConfig::default())
    }

    fn cast(
        hero: &mut Hero,
        slot: Slot,
        enemies: &mut Vec<Enemy>,
        bodies: &mut Vec<Body>,
        ultimate: &UltimateConfig,
    ) -> Result<AbilityOutcome, AbilityError> {
        let mut ctx = AbilityContext {
            enemies,
            bodies,
            ultimate,
        };
        hero.try_cast(slot, &mut ctx)
    }

    #[test]
    fn test_every_kind_has_a_full_kit() {
        for kind in [
            HeroKind::Vanguard,
            HeroKind::Tempest,
            HeroKind::Warden,
            HeroKind::Revenant,
        ] {
            let kit = kind.kit();
            assert!(!kit.q.ultimate);
            assert!(!kit.w.ultimate);
            assert!(!kit.e.ultimate);
            assert!(kit.r.ultimate, "{} R slot must be the ultimate", kind.name());
        }
    }

    #[test]
    fn test_basic_strike_hits_and_charges() {
        let (mut hero, mut enemies, mut bodies, ultimate) = arena(HeroKind::Vanguard);

        let outcome = cast(&mut hero, Slot::Q, &mut enemies, &mut bodies, &ultimate).unwrap();
        assert_eq!(outcome, AbilityOutcome::Hit { hits: 1, kills: 0 });
        assert!(hero.ultimate_charge > 0.0);
        assert!(enemies[0].health.current() < enemies[0].health.max());
    }

    #[test]
    fn test_strike_misses_behind() {
        let (mut hero, mut enemies, mut bodies, ultimate) = arena(HeroKind::Vanguard);
        enemies[0].position.x = -3.0; // behind a right-facing hero

        let outcome = cast(&mut hero, Slot::Q, &mut enemies, &mut bodies, &ultimate).unwrap();
        assert_eq!(outcome, AbilityOutcome::NoTarget);
        assert_eq!(hero.ultimate_charge, 0.0);
    }

    #[test]
    fn test_ultimate_requires_full_charge() {
        let (mut hero, mut enemies, mut bodies, ultimate) = arena(HeroKind::Vanguard);
        hero.ultimate_charge = 99.0;

        assert_eq!(
            cast(&mut hero, Slot::R, &mut enemies, &mut bodies, &ultimate),
            Err(AbilityError::ChargeNotFull)
        );
        // The failed attempt costs nothing.
        assert_eq!(hero.ultimate_charge, 99.0);
    }

    #[test]
    fn test_ultimate_consumes_charge_on_hit() {
        let (mut hero, mut enemies, mut bodies, ultimate) = arena(HeroKind::Vanguard);
        hero.ultimate_charge = ultimate.charge_max;

        let outcome = cast(&mut hero, Slot::R, &mut enemies, &mut bodies, &ultimate).unwrap();
        assert!(matches!(outcome, AbilityOutcome::Hit { .. }));
        assert_eq!(hero.ultimate_charge, 0.0);
    }

    #[test]
    fn test_whiffed_ultimate_always_consume() {
        let (mut hero, mut bodies, ultimate) = {
            let (h, _, b, u) = arena(HeroKind::Revenant);
            (h, b, u)
        };
        let mut enemies: Vec<Enemy> = Vec::new(); // nothing in range
        hero.ultimate_charge = ultimate.charge_max;

        let outcome = cast(&mut hero, Slot::R, &mut enemies, &mut bodies, &ultimate).unwrap();
        assert_eq!(outcome, AbilityOutcome::NoTarget);
        assert_eq!(hero.ultimate_charge, 0.0);
    }

    #[test]
    fn test_whiffed_ultimate_refund_policy() {
        let (mut hero, _, mut bodies, mut ultimate) = arena(HeroKind::Revenant);
        ultimate.cost_policy = UltimateCostPolicy::RefundOnWhiff;
        let mut enemies: Vec<Enemy> = Vec::new();
        hero.ultimate_charge = ultimate.charge_max;

        let outcome = cast(&mut hero, Slot::R, &mut enemies, &mut bodies, &ultimate).unwrap();
        assert_eq!(outcome, AbilityOutcome::NoTarget);
        assert_eq!(hero.ultimate_charge, ultimate.charge_max);
    }

    #[test]
    fn test_four_kills_fill_the_meter() {
        let (mut hero, _, mut bodies, ultimate) = arena(HeroKind::Revenant);
        // Four nearly dead enemies inside Harvest's radius.
        let mut enemies: Vec<Enemy> = (0..4)
            .map(|i| Enemy::new(10 + i, Vec2::new(i as f32 - 1.5, 0.5), Vec2::splat(0.4), 30.0, 2.0))
            .collect();
        for enemy in &mut enemies {
            enemy.health.take_damage(25.0);
        }

        let outcome = cast(&mut hero, Slot::W, &mut enemies, &mut bodies, &ultimate).unwrap();
        assert_eq!(outcome, AbilityOutcome::Hit { hits: 4, kills: 4 });
        assert_eq!(hero.ultimate_charge, ultimate.charge_max);

        // The meter is full, so the ultimate goes through.
        assert!(cast(&mut hero, Slot::R, &mut enemies, &mut bodies, &ultimate).is_ok());
    }

    #[test]
    fn test_deathmark_picks_nearest() {
        let (mut hero, mut enemies, mut bodies, ultimate) = arena(HeroKind::Revenant);
        enemies.push(Enemy::new(11, Vec2::new(4.0, 0.5), Vec2::splat(0.5), 30.0, 2.0));
        hero.ultimate_charge = ultimate.charge_max;

        let outcome = cast(&mut hero, Slot::R, &mut enemies, &mut bodies, &ultimate).unwrap();
        assert_eq!(outcome, AbilityOutcome::Hit { hits: 1, kills: 0 });
        // The closer enemy (x=1) took the hit; the far one is untouched.
        assert!(enemies[0].health.current() < enemies[0].health.max());
        assert_eq!(enemies[1].health.current(), enemies[1].health.max());
    }

    #[test]
    fn test_harvest_resets_slash_on_kill() {
        let (mut hero, mut enemies, mut bodies, ultimate) = arena(HeroKind::Revenant);
        enemies[0].health.take_damage(25.0); // 5 hp left, Harvest's 20 kills it

        hero.abilities.q.try_use().unwrap();
        assert!(!hero.abilities.q.is_ready());

        let outcome = cast(&mut hero, Slot::W, &mut enemies, &mut bodies, &ultimate).unwrap();
        assert_eq!(outcome, AbilityOutcome::Hit { hits: 1, kills: 1 });
        assert!(hero.abilities.q.is_ready(), "kill refunds the Q cooldown");
    }

    #[test]
    fn test_terrify_turns_survivors_away() {
        let (mut hero, mut enemies, mut bodies, ultimate) = arena(HeroKind::Warden);
        enemies[0].direction = crate::hero::Facing::Left; // walking toward the hero

        let outcome = cast(&mut hero, Slot::W, &mut enemies, &mut bodies, &ultimate).unwrap();
        assert!(matches!(outcome, AbilityOutcome::Hit { .. }));
        assert_eq!(enemies[0].direction, crate::hero::Facing::Right);
    }

    #[test]
    fn test_guard_and_hover_toggle() {
        let (mut hero, mut enemies, mut bodies, ultimate) = arena(HeroKind::Vanguard);
        let outcome = cast(&mut hero, Slot::E, &mut enemies, &mut bodies, &ultimate).unwrap();
        assert_eq!(outcome, AbilityOutcome::Toggled);
        assert!(hero.is_invulnerable());
    }

    #[test]
    fn test_cataclysm_breaks_barrels() {
        let (mut hero, mut bodies, ultimate) = {
            let (h, _, b, u) = arena(HeroKind::Vanguard);
            (h, b, u)
        };
        let mut enemies: Vec<Enemy> = Vec::new();
        bodies.push(Body::barrel(
            5,
            "barrel_0",
            Vec2::new(2.0, 0.5),
            Vec2::splat(0.5),
            60.0,
            5.0,
            20.0,
            50.0,
            1.0,
            20.0,
            skirmish_physics::BlastSpec {
                half_extents: Vec2::splat(2.0),
                damage: 40.0,
            },
        ));
        hero.ultimate_charge = ultimate.charge_max;

        let outcome = cast(&mut hero, Slot::R, &mut enemies, &mut bodies, &ultimate).unwrap();
        assert_eq!(outcome, AbilityOutcome::Hit { hits: 1, kills: 0 });
        assert!(bodies[0].health.current() < bodies[0].health.max());
    }
}
