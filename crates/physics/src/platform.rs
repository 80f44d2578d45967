//! Static and moving platforms.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::bounds::Aabb;

/// How a platform participates in collision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlatformKind {
    /// Fully solid from every direction.
    Ground,
    /// Blocks only bodies landing from above; pass-through from below and
    /// via a timed drop-through.
    OneWay,
    /// Solid vertical obstacle; functionally identical to `Ground`, tagged
    /// for level tooling.
    Wall,
    /// Climbable volume. Never resolved by the collision sweep; queried by
    /// gameplay code directly.
    Ladder,
}

/// A collidable platform, optionally patrolling between two extremes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub bounds: Aabb,
    pub kind: PlatformKind,

    /// Current velocity. Zero for static platforms.
    pub velocity: Vec2,

    /// Patrol path for moving platforms.
    patrol: Option<Patrol>,
}

/// Ping-pong patrol around an origin.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct Patrol {
    origin: Vec2,
    /// Maximum displacement from `origin` on each axis.
    extent: Vec2,
}

impl Platform {
    /// A static platform.
    pub fn fixed(bounds: Aabb, kind: PlatformKind) -> Self {
        Self {
            bounds,
            kind,
            velocity: Vec2::ZERO,
            patrol: None,
        }
    }

    /// A platform that ping-pongs up to `extent` away from its starting
    /// center, reversing at the ends of the path.
    pub fn moving(bounds: Aabb, kind: PlatformKind, velocity: Vec2, extent: Vec2) -> Self {
        Self {
            bounds,
            kind,
            velocity,
            patrol: Some(Patrol {
                origin: bounds.center,
                extent: extent.abs(),
            }),
        }
    }

    #[inline]
    pub fn is_moving(&self) -> bool {
        self.velocity != Vec2::ZERO
    }

    /// Advance a moving platform along its patrol.
    pub fn update(&mut self, dt: f32) {
        if self.velocity == Vec2::ZERO {
            return;
        }

        self.bounds.center += self.velocity * dt;

        if let Some(patrol) = self.patrol {
            let offset = self.bounds.center - patrol.origin;
            if offset.x.abs() > patrol.extent.x {
                self.bounds.center.x = patrol.origin.x + patrol.extent.x * offset.x.signum();
                self.velocity.x = -self.velocity.x;
            }
            if offset.y.abs() > patrol.extent.y {
                self.bounds.center.y = patrol.origin.y + patrol.extent.y * offset.y.signum();
                self.velocity.y = -self.velocity.y;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_platform_does_not_move() {
        let mut platform = Platform::fixed(
            Aabb::new(Vec2::ZERO, Vec2::new(5.0, 0.5)),
            PlatformKind::Ground,
        );
        platform.update(1.0);
        assert_eq!(platform.bounds.center, Vec2::ZERO);
    }

    #[test]
    fn test_patrol_reverses_at_extent() {
        let mut platform = Platform::moving(
            Aabb::new(Vec2::ZERO, Vec2::new(2.0, 0.5)),
            PlatformKind::OneWay,
            Vec2::new(2.0, 0.0),
            Vec2::new(3.0, 0.0),
        );

        // 2 units/s for 2s would overshoot the 3-unit extent.
        platform.update(1.0);
        platform.update(1.0);

        assert!((platform.bounds.center.x - 3.0).abs() < 1e-6);
        assert!(platform.velocity.x < 0.0, "should have reversed");
    }
}
