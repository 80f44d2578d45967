//! Enemy walkers.
//!
//! Enemies are a minimal finite-state machine: walk at constant speed in the
//! current direction, reverse when the look-ahead probe finds no ground at
//! the next step (edge detection), and reverse away from fear effects.
//! Gravity and ground collision mirror the hero path, without jumping.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use skirmish_physics::{collision, Aabb, Health, Platform, PlatformKind, Repeating};

use crate::hero::Facing;

/// A periodic damage effect owned by the enemy it afflicts. Dropped with the
/// enemy, so no tick can outlive its target.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bleed {
    pub timer: Repeating,
    pub damage_per_tick: f32,
}

/// Patrol enemy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub position: Vec2,
    pub velocity: Vec2,
    pub direction: Facing,
    pub half: Vec2,
    pub health: Health,

    /// Walk speed (units/second).
    pub speed: f32,

    /// Active damage-over-time effects.
    bleeds: Vec<Bleed>,

    grounded: bool,
}

/// Tuning shared by all enemies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnemyConfig {
    pub gravity: f32,

    /// How far ahead of the current position the ground probe looks.
    pub edge_probe_distance: f32,

    /// How far below the feet the probe accepts ground.
    pub max_probe_drop: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            gravity: 20.0,
            edge_probe_distance: 1.0,
            max_probe_drop: 1.0,
        }
    }
}

impl Enemy {
    pub fn new(id: u32, position: Vec2, half: Vec2, max_health: f32, speed: f32) -> Self {
        Self {
            id,
            position,
            velocity: Vec2::ZERO,
            direction: Facing::Right,
            half,
            health: Health::new(max_health),
            speed,
            bleeds: Vec::new(),
            grounded: false,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.health.is_dead()
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.position, self.half)
    }

    /// Attach a damage-over-time effect.
    pub fn apply_bleed(&mut self, damage_per_tick: f32, interval: f32, ticks: u32) {
        self.bleeds.push(Bleed {
            timer: Repeating::new(interval, ticks),
            damage_per_tick,
        });
    }

    /// Turn and run away from `x` (fear effects).
    pub fn flee_from(&mut self, x: f32) {
        self.direction = if self.position.x < x {
            Facing::Left
        } else {
            Facing::Right
        };
    }

    /// Advance one tick: bleed effects, edge detection, gravity, collision.
    pub fn update(&mut self, dt: f32, platforms: &[Platform], config: &EnemyConfig) {
        if !self.is_alive() {
            return;
        }

        // Owned bleed timers, removed as they finish.
        let mut bleed_damage = 0.0;
        for bleed in &mut self.bleeds {
            bleed_damage += bleed.timer.tick(dt) as f32 * bleed.damage_per_tick;
        }
        self.bleeds.retain(|bleed| !bleed.timer.is_finished());
        if bleed_damage > 0.0 {
            self.health.take_damage(bleed_damage);
            if !self.is_alive() {
                return;
            }
        }

        // Edge detection: probe ahead of the next position; no ground there
        // means reverse within this same tick.
        if self.grounded {
            let probe_x = self.position.x + self.direction.sign() * config.edge_probe_distance;
            let feet_y = self.position.y - self.half.y;
            if !ground_below(platforms, probe_x, feet_y, config.max_probe_drop) {
                self.direction = self.direction.flipped();
            }
        }

        self.velocity.x = self.direction.sign() * self.speed;
        self.velocity.y -= config.gravity * dt;
        self.position += self.velocity * dt;

        let result = collision::sweep(
            &mut self.position,
            &mut self.velocity,
            self.half,
            platforms,
            false,
        );
        self.grounded = result.grounded;
    }
}

/// Whether standable ground exists at `x`, at or just below `feet_y`.
fn ground_below(platforms: &[Platform], x: f32, feet_y: f32, max_drop: f32) -> bool {
    platforms.iter().any(|platform| {
        matches!(platform.kind, PlatformKind::Ground | PlatformKind::OneWay)
            && x >= platform.bounds.left()
            && x <= platform.bounds.right()
            && platform.bounds.top() <= feet_y + 1e-3
            && platform.bounds.top() >= feet_y - max_drop
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walkway(left: f32, right: f32, top: f32) -> Platform {
        Platform::fixed(
            Aabb::from_min_max(Vec2::new(left, top - 1.0), Vec2::new(right, top)),
            PlatformKind::Ground,
        )
    }

    #[test]
    fn test_walker_reverses_at_platform_edge() {
        // Enemy at x=10 walking right over a platform that ends at x=10.5;
        // the probe at x=11 finds no ground and flips direction this tick.
        let platforms = vec![walkway(-10.0, 10.5, 0.0)];
        let config = EnemyConfig::default();
        let mut enemy = Enemy::new(1, Vec2::new(10.0, 0.5), Vec2::splat(0.5), 30.0, 2.0);

        // Settle onto the ground first.
        enemy.update(1.0 / 60.0, &platforms, &config);
        assert_eq!(enemy.direction, Facing::Right);

        enemy.update(1.0 / 60.0, &platforms, &config);
        assert_eq!(enemy.direction, Facing::Left);
        assert!(enemy.velocity.x < 0.0);
    }

    #[test]
    fn test_walker_continues_over_solid_ground() {
        let platforms = vec![walkway(-50.0, 50.0, 0.0)];
        let config = EnemyConfig::default();
        let mut enemy = Enemy::new(1, Vec2::new(0.0, 0.5), Vec2::splat(0.5), 30.0, 2.0);

        let start_x = enemy.position.x;
        for _ in 0..60 {
            enemy.update(1.0 / 60.0, &platforms, &config);
        }

        assert_eq!(enemy.direction, Facing::Right);
        assert!(enemy.position.x > start_x + 1.0);
    }

    #[test]
    fn test_flee_from() {
        let mut enemy = Enemy::new(1, Vec2::new(5.0, 0.0), Vec2::splat(0.5), 30.0, 2.0);
        enemy.flee_from(8.0);
        assert_eq!(enemy.direction, Facing::Left);
        enemy.flee_from(0.0);
        assert_eq!(enemy.direction, Facing::Right);
    }

    #[test]
    fn test_bleed_kills_over_time() {
        let platforms = vec![walkway(-50.0, 50.0, 0.0)];
        let config = EnemyConfig::default();
        let mut enemy = Enemy::new(1, Vec2::new(0.0, 0.5), Vec2::splat(0.5), 30.0, 0.0);

        // 3 ticks of 10 damage at 0.5s intervals.
        enemy.apply_bleed(10.0, 0.5, 3);
        for _ in 0..120 {
            enemy.update(1.0 / 60.0, &platforms, &config);
        }

        assert!((enemy.health.current() - 0.0).abs() < 1e-4);
        assert!(!enemy.is_alive());
    }

    #[test]
    fn test_dead_enemy_does_not_move() {
        let platforms = vec![walkway(-50.0, 50.0, 0.0)];
        let config = EnemyConfig::default();
        let mut enemy = Enemy::new(1, Vec2::new(0.0, 0.5), Vec2::splat(0.5), 10.0, 2.0);
        enemy.health.take_damage(10.0);

        let pos = enemy.position;
        enemy.update(1.0, &platforms, &config);
        assert_eq!(enemy.position, pos);
    }
}
