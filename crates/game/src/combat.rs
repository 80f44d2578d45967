//! Shared combat primitives.
//!
//! Area damage is the one primitive every hero kit is built from: given an
//! AABB region, every living enemy overlapping it takes one hit. Callers
//! convert the returned report into ultimate charge.

use skirmish_physics::{Aabb, Body, DamageResult};

use crate::enemy::Enemy;

/// What an area-damage resolution accomplished.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitReport {
    /// Enemies that took the hit.
    pub hits: u32,
    /// Subset of hits that were killing blows.
    pub kills: u32,
}

impl HitReport {
    pub fn connected(&self) -> bool {
        self.hits > 0
    }

    pub fn merge(self, other: HitReport) -> HitReport {
        HitReport {
            hits: self.hits + other.hits,
            kills: self.kills + other.kills,
        }
    }
}

/// Damage every living enemy whose bounds overlap `region`.
///
/// `multiplier` scales the per-hit damage (ability tuning, debug tools); it
/// never changes how many targets are hit.
pub fn area_damage(
    region: &Aabb,
    damage: f32,
    multiplier: f32,
    enemies: &mut [Enemy],
) -> HitReport {
    let mut report = HitReport::default();

    for enemy in enemies.iter_mut() {
        if !enemy.is_alive() || !region.overlaps(&enemy.bounds()) {
            continue;
        }

        report.hits += 1;
        if enemy.health.take_damage(damage * multiplier) == DamageResult::Destroyed {
            report.kills += 1;
        }
    }

    report
}

/// Damage every destructible body overlapping `region`. Destroyed bodies
/// have no bounds and are skipped automatically.
pub fn damage_bodies(region: &Aabb, damage: f32, bodies: &mut [Body]) -> u32 {
    let mut hit = 0;
    for body in bodies.iter_mut() {
        let Some(bounds) = body.bounds() else {
            continue;
        };
        if region.overlaps(&bounds) {
            body.take_damage(damage);
            hit += 1;
        }
    }
    hit
}
