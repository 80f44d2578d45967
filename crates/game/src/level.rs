//! Level state: platform, body, enemy, and spawn point registries.
//!
//! The level is a plain container populated by whoever loads the map; the
//! core never parses map files. It owns the per-tick resolution sweep that
//! keeps heroes on platforms and the kill plane that recycles anything
//! falling out of the world.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use skirmish_physics::{collision, Aabb, Body, Platform, PlatformKind};

use crate::enemy::Enemy;
use crate::hero::{Hero, Team};

/// How long a claimed spawn point stays reserved.
const SPAWN_RESERVE_SECONDS: f32 = 2.0;

/// A spawn location, optionally restricted to one team.
///
/// Claiming reserves the point for a short window so two heroes respawning
/// in the same tick don't stack on one spot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub position: Vec2,
    pub team: Option<Team>,
    reserved_for: f32,
}

impl SpawnPoint {
    pub fn new(position: Vec2, team: Option<Team>) -> Self {
        Self {
            position,
            team,
            reserved_for: 0.0,
        }
    }

    #[inline]
    pub fn is_reserved(&self) -> bool {
        self.reserved_for > 0.0
    }

    fn accepts(&self, team: Team) -> bool {
        !self.is_reserved() && self.team.map_or(true, |t| t == team)
    }
}

/// A loaded level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    pub platforms: Vec<Platform>,
    pub bodies: Vec<Body>,
    pub enemies: Vec<Enemy>,
    pub spawn_points: Vec<SpawnPoint>,

    /// Anything whose center drops below this is respawned unconditionally.
    pub kill_y: f32,
}

impl Level {
    pub fn new(name: &str, kill_y: f32) -> Self {
        Self {
            name: name.to_string(),
            platforms: Vec::new(),
            bodies: Vec::new(),
            enemies: Vec::new(),
            spawn_points: Vec::new(),
            kill_y,
        }
    }

    /// A small symmetric arena used by tests and the headless demo: a wide
    /// floor, two one-way ledges, side walls, one barrel, one walker, and a
    /// spawn point per team.
    pub fn test_arena() -> Self {
        let mut level = Level::new("test_arena", -20.0);

        // Floor and walls.
        level.platforms.push(Platform::fixed(
            Aabb::new(Vec2::new(0.0, -1.0), Vec2::new(20.0, 1.0)),
            PlatformKind::Ground,
        ));
        level.platforms.push(Platform::fixed(
            Aabb::new(Vec2::new(-20.5, 5.0), Vec2::new(0.5, 7.0)),
            PlatformKind::Wall,
        ));
        level.platforms.push(Platform::fixed(
            Aabb::new(Vec2::new(20.5, 5.0), Vec2::new(0.5, 7.0)),
            PlatformKind::Wall,
        ));

        // One-way ledges.
        level.platforms.push(Platform::fixed(
            Aabb::new(Vec2::new(-8.0, 3.0), Vec2::new(3.0, 0.25)),
            PlatformKind::OneWay,
        ));
        level.platforms.push(Platform::fixed(
            Aabb::new(Vec2::new(8.0, 3.0), Vec2::new(3.0, 0.25)),
            PlatformKind::OneWay,
        ));

        level.bodies.push(Body::barrel(
            1,
            "barrel_mid",
            Vec2::new(0.0, 0.5),
            Vec2::splat(0.5),
            60.0,
            10.0,
            20.0,
            50.0,
            1.0,
            20.0,
            skirmish_physics::BlastSpec {
                half_extents: Vec2::splat(2.5),
                damage: 50.0,
            },
        ));

        // Climbable route up to the left ledge, breakable like any fixture.
        level.platforms.push(Platform::fixed(
            Aabb::new(Vec2::new(-11.5, 1.5), Vec2::new(0.4, 1.5)),
            PlatformKind::Ladder,
        ));
        level.bodies.push(Body::fixture(
            2,
            skirmish_physics::BodyKind::Ladder,
            "ladder_left",
            Vec2::new(-11.5, 1.5),
            Vec2::new(0.4, 1.5),
            40.0,
            15.0,
        ));

        level
            .enemies
            .push(Enemy::new(1, Vec2::new(4.0, 0.5), Vec2::splat(0.5), 30.0, 2.0));

        level
            .spawn_points
            .push(SpawnPoint::new(Vec2::new(-15.0, 1.0), Some(Team::Red)));
        level
            .spawn_points
            .push(SpawnPoint::new(Vec2::new(15.0, 1.0), Some(Team::Blue)));

        level
    }

    /// Advance platform patrols and release expired spawn reservations.
    pub fn update(&mut self, dt: f32) {
        for platform in &mut self.platforms {
            platform.update(dt);
        }
        for spawn in &mut self.spawn_points {
            spawn.reserved_for = (spawn.reserved_for - dt).max(0.0);
        }
    }

    /// Pick and reserve a spawn point for `team`.
    ///
    /// Prefers an unreserved point owned by the team, then an unreserved
    /// neutral one, and as a last resort reuses the first team-compatible
    /// point even if reserved, so a spawn position always exists.
    pub fn claim_spawn(&mut self, team: Team) -> Option<Vec2> {
        if let Some(spawn) = self
            .spawn_points
            .iter_mut()
            .find(|s| s.team == Some(team) && !s.is_reserved())
        {
            spawn.reserved_for = SPAWN_RESERVE_SECONDS;
            return Some(spawn.position);
        }
        if let Some(spawn) = self
            .spawn_points
            .iter_mut()
            .find(|s| s.accepts(team))
        {
            spawn.reserved_for = SPAWN_RESERVE_SECONDS;
            return Some(spawn.position);
        }
        self.spawn_points
            .iter()
            .find(|s| s.team.map_or(true, |t| t == team))
            .map(|s| s.position)
    }

    /// Resolve one hero against every platform, in registration order.
    /// Ground contact lands the hero (resetting jumps); the kill plane sends
    /// it straight back to spawn.
    pub fn sweep_hero(&self, hero: &mut Hero) {
        if !hero.is_alive() {
            return;
        }

        let half = hero.half_extents();
        let dropping_through = hero.is_dropping_through();
        let result = collision::sweep(
            &mut hero.position,
            &mut hero.velocity,
            half,
            &self.platforms,
            dropping_through,
        );
        if result.grounded {
            hero.land();
        } else {
            hero.grounded = false;
        }

        // Ladders never block, so overlap is queried separately; the flag
        // feeds next tick's climb input.
        let bounds = hero.bounds();
        hero.on_ladder = self
            .platforms
            .iter()
            .any(|p| p.kind == PlatformKind::Ladder && p.bounds.overlaps(&bounds));

        if hero.position.y < self.kill_y {
            hero.die();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hero::{HeroConfig, HeroKind};
    use crate::input::{ButtonEdges, PlayerInput};

    #[test]
    fn test_claim_prefers_own_team_point() {
        let mut level = Level::test_arena();

        let red = level.claim_spawn(Team::Red).unwrap();
        assert_eq!(red, Vec2::new(-15.0, 1.0));
        assert!(level.spawn_points[0].is_reserved());
    }

    #[test]
    fn test_reservation_blocks_double_spawn() {
        let mut level = Level::new("t", -10.0);
        level
            .spawn_points
            .push(SpawnPoint::new(Vec2::new(0.0, 0.0), None));
        level
            .spawn_points
            .push(SpawnPoint::new(Vec2::new(5.0, 0.0), None));

        let a = level.claim_spawn(Team::Red).unwrap();
        let b = level.claim_spawn(Team::Red).unwrap();
        assert_ne!(a, b, "second claim lands on the other point");

        // Reservations expire.
        level.update(3.0);
        assert!(!level.spawn_points[0].is_reserved());
    }

    #[test]
    fn test_claim_always_yields_a_position() {
        let mut level = Level::new("t", -10.0);
        level
            .spawn_points
            .push(SpawnPoint::new(Vec2::new(0.0, 0.0), None));

        // Exhaust the only point, then claim again.
        level.claim_spawn(Team::Blue).unwrap();
        assert!(level.claim_spawn(Team::Blue).is_some());
    }

    #[test]
    fn test_hero_lands_on_arena_floor() {
        let mut level = Level::test_arena();
        let config = HeroConfig::default();
        let mut hero = Hero::new(1, Team::Red, HeroKind::Vanguard, Vec2::new(0.0, 3.0), &config);
        let input = PlayerInput::default();
        let edges = ButtonEdges::default();

        for _ in 0..120 {
            hero.integrate(&input, &edges, &config, 1.0 / 60.0);
            level.sweep_hero(&mut hero);
        }

        assert!(hero.grounded);
        assert_eq!(hero.jumps_remaining, config.max_jumps);
        // Resting flush on the floor: top of floor is y = 0.
        assert!((hero.position.y - config.half.y).abs() < 1e-3);
        assert_eq!(hero.velocity.y, 0.0);
    }

    #[test]
    fn test_arena_ladder_is_climbable() {
        let level = Level::test_arena();
        let config = HeroConfig::default();
        let mut hero =
            Hero::new(1, Team::Red, HeroKind::Vanguard, Vec2::new(-11.5, 1.0), &config);
        let edges = ButtonEdges::default();

        // One sweep while overlapping the rungs latches the ladder flag.
        level.sweep_hero(&mut hero);
        assert!(hero.on_ladder);

        let mut input = PlayerInput::default();
        input.aim = Vec2::new(0.0, 1.0);
        let start_y = hero.position.y;
        for _ in 0..30 {
            hero.integrate(&input, &edges, &config, 1.0 / 60.0);
            level.sweep_hero(&mut hero);
        }

        assert!(hero.position.y > start_y + 1.0, "climbed, not fell");

        // Off to the side there is no ladder.
        hero.position = Vec2::new(0.0, 1.0);
        level.sweep_hero(&mut hero);
        assert!(!hero.on_ladder);
    }

    #[test]
    fn test_kill_plane_respawns_hero() {
        let mut level = Level::new("pit", -5.0);
        let config = HeroConfig {
            respawn_delay: 0.0,
            ..HeroConfig::default()
        };
        let mut hero = Hero::new(1, Team::Red, HeroKind::Tempest, Vec2::new(0.0, 2.0), &config);
        hero.position.y = -6.0;

        level.sweep_hero(&mut hero);
        assert_eq!(hero.deaths, 1);
        assert!(hero.is_alive(), "zero-delay respawn is immediate");
        assert_eq!(hero.position, hero.spawn_point);
    }
}
