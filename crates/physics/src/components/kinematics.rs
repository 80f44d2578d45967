//! Velocity/gravity integration component for free-moving bodies.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Simple Euler integrator: gravity into velocity, velocity into position.
///
/// Gravity is stored as a positive magnitude and pulls along -Y, matching
/// the rest of the simulation (Y up).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Kinematics {
    pub velocity: Vec2,
    pub gravity: f32,
}

impl Kinematics {
    pub fn new(gravity: f32) -> Self {
        Self {
            velocity: Vec2::ZERO,
            gravity,
        }
    }

    /// Advance `position` by one step.
    pub fn integrate(&mut self, position: &mut Vec2, dt: f32) {
        self.velocity.y -= self.gravity * dt;
        *position += self.velocity * dt;
    }

    /// Apply an instantaneous velocity change (explosion knockback, launches).
    pub fn impulse(&mut self, delta: Vec2) {
        self.velocity += delta;
    }

    /// Zero all motion (respawn path).
    pub fn reset(&mut self) {
        self.velocity = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gravity_accelerates_downward() {
        let mut kin = Kinematics::new(10.0);
        let mut pos = Vec2::ZERO;

        kin.integrate(&mut pos, 0.1);
        assert!((kin.velocity.y + 1.0).abs() < 1e-6);
        assert!(pos.y < 0.0);
    }

    #[test]
    fn test_horizontal_velocity_carries() {
        let mut kin = Kinematics::new(0.0);
        kin.impulse(Vec2::new(4.0, 0.0));
        let mut pos = Vec2::ZERO;

        kin.integrate(&mut pos, 0.5);
        assert!((pos.x - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_reset() {
        let mut kin = Kinematics::new(10.0);
        kin.impulse(Vec2::new(3.0, 7.0));
        kin.reset();
        assert_eq!(kin.velocity, Vec2::ZERO);
    }
}
