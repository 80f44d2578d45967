//! Side-view follow camera.
//!
//! Tracks the horizontal midpoint of its targets and optionally lifts once
//! the action climbs. Purely derived state: nothing in the simulation reads
//! the camera back.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// How the camera tracks its targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CameraMode {
    /// Snap to the target point every frame.
    Instant,
    /// Exponential approach toward the target point.
    Smoothed,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CameraConfig {
    pub mode: CameraMode,

    /// Fraction of the remaining distance closed per frame in smoothed mode.
    pub smoothing: f32,

    /// Added to the targets' horizontal midpoint.
    pub x_offset: f32,

    /// Base camera height and distance.
    pub base_y: f32,
    pub base_z: f32,

    /// Once any target's Y exceeds this, the camera starts lifting.
    pub lift_threshold: f32,

    /// Maximum extra height from lifting.
    pub max_lift: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            mode: CameraMode::Smoothed,
            smoothing: 0.1,
            x_offset: 0.0,
            base_y: 4.0,
            base_z: 18.0,
            lift_threshold: 6.0,
            max_lift: 5.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FollowCamera {
    pub position: Vec3,
    pub config: CameraConfig,
}

impl FollowCamera {
    pub fn new(config: CameraConfig) -> Self {
        Self {
            position: Vec3::new(0.0, config.base_y, config.base_z),
            config,
        }
    }

    /// Where the camera wants to be for the given target positions.
    fn desired(&self, targets: &[Vec2]) -> Vec3 {
        if targets.is_empty() {
            return self.position;
        }

        let min_x = targets.iter().map(|t| t.x).fold(f32::INFINITY, f32::min);
        let max_x = targets.iter().map(|t| t.x).fold(f32::NEG_INFINITY, f32::max);
        let x = (min_x + max_x) * 0.5 + self.config.x_offset;

        let highest = targets.iter().map(|t| t.y).fold(f32::NEG_INFINITY, f32::max);
        let lift = (highest - self.config.lift_threshold)
            .clamp(0.0, self.config.max_lift);

        Vec3::new(x, self.config.base_y + lift, self.config.base_z)
    }

    pub fn update(&mut self, targets: &[Vec2]) {
        let desired = self.desired(targets);
        match self.config.mode {
            CameraMode::Instant => self.position = desired,
            CameraMode::Smoothed => {
                self.position += (desired - self.position) * self.config.smoothing;
            }
        }
    }
}
