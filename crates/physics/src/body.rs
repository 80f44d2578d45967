//! Destructible world bodies: bridges, barrels, ladders, loose props.
//!
//! A body is a plain record plus capability components. Lifecycle events
//! (destruction, respawn, detonation) are returned as data from `update`
//! rather than delivered through stored callbacks, so nothing can call back
//! into an owner that no longer exists.

use glam::Vec2;
use log::trace;
use serde::{Deserialize, Serialize};

use crate::bounds::Aabb;
use crate::collision;
use crate::components::{DamageResult, Health, Ignition, Kinematics, Respawn};
use crate::platform::Platform;

/// Unique identifier for a world body.
pub type BodyId = u32;

/// Explosion parameters for fused props.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlastSpec {
    /// Half-extents of the damage region centered on the body.
    pub half_extents: Vec2,
    /// Damage dealt to everything overlapping the region.
    pub damage: f32,
}

/// Closed set of body types. Adding a prop type means adding a variant here
/// and handling it exhaustively - there is no subclassing to get wrong.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BodyKind {
    /// Generic destructible scenery.
    Prop,
    /// Walkable destructible span; collision while alive only.
    Bridge,
    /// Fused explosive. Any damage lights it; it burns, then detonates.
    Barrel(BlastSpec),
    /// Climbable destructible.
    Ladder,
}

/// Lifecycle event emitted by [`Body::update`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyEvent {
    Destroyed(BodyId),
    Respawned(BodyId),
    /// A barrel detonated: apply `damage` to everything overlapping `region`.
    Detonated {
        id: BodyId,
        region: Aabb,
        damage: f32,
    },
}

/// A destructible world body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub id: BodyId,
    pub kind: BodyKind,

    /// Tag linking back to the level data this body was loaded from.
    pub map_key: String,

    pub position: Vec2,

    /// Collision half-extents; `None` for bodies with no collision shape.
    pub half: Option<Vec2>,

    /// Whether the body is simulated by gravity and can be pushed around.
    pub movable: bool,

    pub health: Health,
    pub respawn: Respawn,

    /// Present on movable bodies only.
    pub kinematics: Option<Kinematics>,

    /// Present on fused bodies only.
    pub ignition: Option<Ignition>,

    destroyed: bool,
}

impl Body {
    /// Generic immovable destructible (bridge segments, doors, scenery).
    pub fn fixture(
        id: BodyId,
        kind: BodyKind,
        map_key: &str,
        position: Vec2,
        half: Vec2,
        max_health: f32,
        respawn_delay: f32,
    ) -> Self {
        Self {
            id,
            kind,
            map_key: map_key.to_string(),
            position,
            half: Some(half),
            movable: false,
            health: Health::new(max_health),
            respawn: Respawn::new(position, respawn_delay),
            kinematics: None,
            ignition: None,
            destroyed: false,
        }
    }

    /// A movable gravity-affected prop that force-respawns when launched
    /// further than `respawn_distance` from its spawn point.
    pub fn prop(
        id: BodyId,
        map_key: &str,
        position: Vec2,
        half: Vec2,
        max_health: f32,
        respawn_delay: f32,
        gravity: f32,
        respawn_distance: f32,
    ) -> Self {
        Self {
            movable: true,
            respawn: Respawn::with_distance(position, respawn_delay, respawn_distance),
            kinematics: Some(Kinematics::new(gravity)),
            ..Self::fixture(id, BodyKind::Prop, map_key, position, half, max_health, respawn_delay)
        }
    }

    /// An exploding barrel.
    #[allow(clippy::too_many_arguments)]
    pub fn barrel(
        id: BodyId,
        map_key: &str,
        position: Vec2,
        half: Vec2,
        max_health: f32,
        respawn_delay: f32,
        gravity: f32,
        respawn_distance: f32,
        detonate_delay: f32,
        burn_damage_per_second: f32,
        blast: BlastSpec,
    ) -> Self {
        Self {
            kind: BodyKind::Barrel(blast),
            ignition: Some(Ignition::new(detonate_delay, burn_damage_per_second)),
            ..Self::prop(
                id,
                map_key,
                position,
                half,
                max_health,
                respawn_delay,
                gravity,
                respawn_distance,
            )
        }
    }

    /// Current collision bounds, if the body has a shape and is alive.
    /// Destroyed bodies stop colliding until they respawn.
    pub fn bounds(&self) -> Option<Aabb> {
        if self.destroyed {
            return None;
        }
        self.half.map(|half| Aabb::new(self.position, half))
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Apply damage. Lights the fuse on fused bodies. Unfused bodies break
    /// the moment health reaches zero; fused ones detonate on their next
    /// update. Damage to a destroyed body is a no-op.
    pub fn take_damage(&mut self, amount: f32) -> DamageResult {
        if self.destroyed {
            return DamageResult::Ignored;
        }

        if amount > 0.0 {
            if let Some(ignition) = &mut self.ignition {
                ignition.light();
            }
        }

        let result = self.health.take_damage(amount);
        if result == DamageResult::Destroyed {
            // Fused bodies are torn down by their next `update` instead, so
            // the `Detonated` event is still delivered on a lethal hit.
            if self.ignition.is_none() {
                self.destroy();
            }
        }
        result
    }

    fn destroy(&mut self) {
        trace!("body {} ({}) destroyed", self.id, self.map_key);
        self.destroyed = true;
        self.respawn.start();
        if let Some(kinematics) = &mut self.kinematics {
            kinematics.reset();
        }
    }

    fn revive(&mut self) {
        trace!("body {} ({}) respawned", self.id, self.map_key);
        self.destroyed = false;
        self.position = self.respawn.spawn_point;
        self.health.restore();
        if let Some(ignition) = &mut self.ignition {
            ignition.reset();
        }
        if let Some(kinematics) = &mut self.kinematics {
            kinematics.reset();
        }
    }

    /// Advance the body by one tick: respawn countdown while destroyed;
    /// otherwise fuse, gravity, collision, and the off-stage respawn check.
    pub fn update(&mut self, dt: f32, platforms: &[Platform]) -> Vec<BodyEvent> {
        let mut events = Vec::new();

        if self.destroyed {
            if self.respawn.tick(dt) {
                self.revive();
                events.push(BodyEvent::Respawned(self.id));
            }
            return events;
        }

        // Fuse first: a detonation this tick destroys the body regardless of
        // how much health the burn damage left.
        if let Some(ignition) = &mut self.ignition {
            let tick = ignition.tick(dt);
            if tick.burn_damage > 0.0 {
                self.health.take_damage(tick.burn_damage);
            }
            let burned_out = self.health.is_dead();
            if tick.detonated || burned_out {
                if let BodyKind::Barrel(blast) = self.kind {
                    events.push(BodyEvent::Detonated {
                        id: self.id,
                        region: Aabb::new(self.position, blast.half_extents),
                        damage: blast.damage,
                    });
                }
                self.destroy();
                events.push(BodyEvent::Destroyed(self.id));
                return events;
            }
        }

        if let Some(kinematics) = &mut self.kinematics {
            kinematics.integrate(&mut self.position, dt);
            if let Some(half) = self.half {
                collision::sweep(
                    &mut self.position,
                    &mut kinematics.velocity,
                    half,
                    platforms,
                    false,
                );
            }

            if self.respawn.out_of_range(self.position) {
                self.revive();
                events.push(BodyEvent::Respawned(self.id));
            }
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::PlatformKind;

    fn test_barrel() -> Body {
        Body::barrel(
            1,
            "barrel_a",
            Vec2::new(2.0, 0.0),
            Vec2::splat(0.5),
            60.0,
            5.0,
            0.0,
            100.0,
            1.0,
            20.0,
            BlastSpec {
                half_extents: Vec2::splat(3.0),
                damage: 50.0,
            },
        )
    }

    #[test]
    fn test_destroy_and_respawn_cycle() {
        let mut body = Body::fixture(
            1,
            BodyKind::Bridge,
            "bridge_1",
            Vec2::new(4.0, 1.0),
            Vec2::new(2.0, 0.25),
            40.0,
            2.0,
        );

        assert_eq!(body.take_damage(40.0), DamageResult::Destroyed);
        assert!(body.is_destroyed());
        assert!(body.bounds().is_none(), "destroyed bodies stop colliding");

        // Accumulate exactly the respawn delay.
        let dt = 1.0 / 60.0;
        let mut elapsed = 0.0;
        loop {
            elapsed += dt;
            let events = body.update(dt, &[]);
            if events.contains(&BodyEvent::Respawned(1)) {
                break;
            }
            assert!(elapsed < 3.0, "never respawned");
        }

        assert!((elapsed - 2.0).abs() <= dt);
        assert!(!body.is_destroyed());
        assert_eq!(body.position, Vec2::new(4.0, 1.0));
        assert_eq!(body.health.current(), 40.0);
    }

    #[test]
    fn test_damage_while_destroyed_is_ignored() {
        let mut body = Body::fixture(
            2,
            BodyKind::Prop,
            "crate",
            Vec2::ZERO,
            Vec2::splat(0.5),
            10.0,
            1.0,
        );
        body.take_damage(10.0);

        assert_eq!(body.take_damage(5.0), DamageResult::Ignored);
    }

    #[test]
    fn test_barrel_ignites_then_detonates() {
        let mut barrel = test_barrel();

        // Any positive damage lights the fuse but does not destroy.
        assert_eq!(barrel.take_damage(1.0), DamageResult::Damaged);
        assert!(barrel.ignition.unwrap().is_lit());

        // After one second of ticks the fuse expires and the blast fires,
        // even though the 20/s burn alone would not have zeroed 60 health.
        let dt = 0.05;
        let mut detonated_region = None;
        for _ in 0..30 {
            for event in barrel.update(dt, &[]) {
                if let BodyEvent::Detonated { region, damage, .. } = event {
                    detonated_region = Some((region, damage));
                }
            }
            if detonated_region.is_some() {
                break;
            }
        }

        let (region, damage) = detonated_region.expect("barrel should detonate");
        assert!(barrel.is_destroyed());
        assert_eq!(damage, 50.0);
        assert_eq!(region.center, Vec2::new(2.0, 0.0));
        assert_eq!(region.half, Vec2::splat(3.0));
    }

    #[test]
    fn test_barrel_burned_to_zero_still_detonates() {
        // Burn strong enough to zero health before the fuse runs out: the
        // blast fires the moment health empties.
        let mut barrel = test_barrel();
        barrel.health = Health::new(2.0);
        barrel.take_damage(1.0);

        let mut saw_blast = false;
        for _ in 0..30 {
            let events = barrel.update(0.05, &[]);
            if events
                .iter()
                .any(|event| matches!(event, BodyEvent::Detonated { .. }))
            {
                saw_blast = true;
                break;
            }
        }
        assert!(saw_blast);
    }

    #[test]
    fn test_barrel_one_shot_still_detonates() {
        // A single lethal hit must not skip the blast: the barrel holds
        // together until its next update delivers the Detonated event.
        let mut barrel = test_barrel();
        assert_eq!(barrel.take_damage(60.0), DamageResult::Destroyed);
        assert!(!barrel.is_destroyed(), "teardown waits for the update");

        let events = barrel.update(1.0 / 60.0, &[]);
        assert!(events
            .iter()
            .any(|event| matches!(event, BodyEvent::Detonated { damage, .. } if *damage == 50.0)));
        assert!(events.contains(&BodyEvent::Destroyed(1)));
        assert!(barrel.is_destroyed());
    }

    #[test]
    fn test_zero_delay_respawn_is_immediate() {
        let mut body = Body::fixture(
            7,
            BodyKind::Prop,
            "crate",
            Vec2::ZERO,
            Vec2::splat(0.5),
            10.0,
            0.0,
        );

        assert_eq!(body.take_damage(10.0), DamageResult::Destroyed);
        assert!(body.is_destroyed());

        // The very next tick brings it back.
        let events = body.update(1.0 / 60.0, &[]);
        assert!(events.contains(&BodyEvent::Respawned(7)));
        assert!(!body.is_destroyed());
        assert_eq!(body.health.current(), 10.0);
    }

    #[test]
    fn test_prop_launched_off_stage_respawns() {
        let mut prop = Body::prop(
            3,
            "boulder",
            Vec2::ZERO,
            Vec2::splat(0.5),
            100.0,
            3.0,
            0.0,
            10.0,
        );
        prop.kinematics.as_mut().unwrap().impulse(Vec2::new(50.0, 0.0));

        let events = prop.update(0.5, &[]);
        assert!(events.contains(&BodyEvent::Respawned(3)));
        assert_eq!(prop.position, Vec2::ZERO);
        assert_eq!(prop.kinematics.unwrap().velocity, Vec2::ZERO);
    }

    #[test]
    fn test_movable_prop_lands_on_platform() {
        let platforms = vec![Platform::fixed(
            Aabb::new(Vec2::new(0.0, -1.0), Vec2::new(10.0, 0.5)),
            PlatformKind::Ground,
        )];
        let mut prop = Body::prop(
            4,
            "crate",
            Vec2::new(0.0, 2.0),
            Vec2::splat(0.5),
            50.0,
            3.0,
            20.0,
            100.0,
        );

        for _ in 0..120 {
            prop.update(1.0 / 60.0, &platforms);
        }

        // Resting flush on the platform top (-0.5) plus half height.
        assert!((prop.position.y - 0.0).abs() < 1e-4);
        assert_eq!(prop.kinematics.unwrap().velocity.y, 0.0);
    }
}
