//! Respawn component driving the alive -> destroyed -> alive loop.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Timed respawn back to a fixed spawn point.
///
/// When the owning entity is destroyed the timer is started with `delay`;
/// [`Respawn::tick`] reports `true` exactly on the tick the timer expires,
/// at which point the owner resets position and health.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Respawn {
    /// Seconds between destruction and respawn.
    pub delay: f32,

    /// Where the entity returns to life.
    pub spawn_point: Vec2,

    /// If set, being displaced further than this from `spawn_point` forces
    /// an immediate respawn (props launched off-stage).
    pub respawn_distance: Option<f32>,

    timer: f32,
    pending: bool,
}

impl Respawn {
    pub fn new(spawn_point: Vec2, delay: f32) -> Self {
        Self {
            delay: delay.max(0.0),
            spawn_point,
            respawn_distance: None,
            timer: 0.0,
            pending: false,
        }
    }

    pub fn with_distance(spawn_point: Vec2, delay: f32, distance: f32) -> Self {
        Self {
            respawn_distance: Some(distance),
            ..Self::new(spawn_point, delay)
        }
    }

    /// Begin counting down. Called when the owner is destroyed.
    pub fn start(&mut self) {
        self.timer = self.delay;
        self.pending = true;
    }

    /// Whether a respawn is currently counting down.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Seconds until respawn (0 when not pending).
    pub fn remaining(&self) -> f32 {
        self.timer
    }

    /// Advance the countdown. Returns `true` on the tick the timer reaches
    /// zero; returns `false` on all other ticks, including when idle. A
    /// zero-delay countdown fires on the first tick after `start`.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.pending {
            return false;
        }

        self.timer = (self.timer - dt.max(0.0)).max(0.0);
        if self.timer == 0.0 {
            self.pending = false;
            return true;
        }
        false
    }

    /// Whether `position` has drifted past the forced-respawn distance.
    pub fn out_of_range(&self, position: Vec2) -> bool {
        match self.respawn_distance {
            Some(distance) => position.distance_squared(self.spawn_point) > distance * distance,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_fires_once() {
        let mut respawn = Respawn::new(Vec2::ZERO, 1.0);
        respawn.start();

        assert!(respawn.is_pending());
        assert!(!respawn.tick(0.5));
        assert!(respawn.tick(0.5));
        // Already expired - does not fire again.
        assert!(!respawn.tick(0.5));
    }

    #[test]
    fn test_exact_delay_accumulation() {
        // 2.0s delay at 60Hz ticks expires within one tick of the delay.
        let mut respawn = Respawn::new(Vec2::ZERO, 2.0);
        respawn.start();

        let dt = 1.0 / 60.0;
        let mut elapsed = 0.0;
        loop {
            elapsed += dt;
            if respawn.tick(dt) {
                break;
            }
            assert!(elapsed < 3.0, "respawn never fired");
        }

        assert!((elapsed - 2.0).abs() <= dt, "fired at {elapsed}");
    }

    #[test]
    fn test_zero_delay_fires_next_tick() {
        let mut respawn = Respawn::new(Vec2::ZERO, 0.0);
        respawn.start();

        assert!(respawn.is_pending());
        assert!(respawn.tick(1.0 / 60.0));
        assert!(!respawn.is_pending());
        assert!(!respawn.tick(1.0 / 60.0));
    }

    #[test]
    fn test_idle_tick_is_quiet() {
        let mut respawn = Respawn::new(Vec2::ZERO, 1.0);
        assert!(!respawn.tick(10.0));
    }

    #[test]
    fn test_out_of_range() {
        let respawn = Respawn::with_distance(Vec2::ZERO, 1.0, 5.0);
        assert!(!respawn.out_of_range(Vec2::new(3.0, 0.0)));
        assert!(respawn.out_of_range(Vec2::new(6.0, 0.0)));

        let unbounded = Respawn::new(Vec2::ZERO, 1.0);
        assert!(!unbounded.out_of_range(Vec2::new(1e6, 0.0)));
    }
}
