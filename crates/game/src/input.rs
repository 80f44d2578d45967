//! Player input handling.
//!
//! The simulation never reads raw device state; the host samples its input
//! provider into a [`PlayerInput`] each frame and [`InputTracker`] derives
//! the just-pressed edges that one-shot actions (jump, abilities) need.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Raw action state for a single frame.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PlayerInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    /// Q slot.
    pub ability1: bool,
    /// W slot.
    pub ability2: bool,
    /// E slot.
    pub ability3: bool,
    /// R slot.
    pub ultimate: bool,
    /// Drop through one-way platforms.
    pub drop_through: bool,
    /// Normalized aim direction supplied by the host.
    pub aim: Vec2,
}

impl PlayerInput {
    /// Horizontal movement axis in `{-1, 0, 1}`.
    pub fn horizontal(&self) -> f32 {
        let mut axis = 0.0;
        if self.left {
            axis -= 1.0;
        }
        if self.right {
            axis += 1.0;
        }
        axis
    }
}

/// Buttons that went from released to pressed this frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonEdges {
    pub jump: bool,
    pub ability1: bool,
    pub ability2: bool,
    pub ability3: bool,
    pub ultimate: bool,
    pub drop_through: bool,
}

/// Tracks the previous frame's input to detect key edges.
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    prev: PlayerInput,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute edges for this frame and remember the input for the next.
    pub fn edges(&mut self, input: &PlayerInput) -> ButtonEdges {
        let edges = ButtonEdges {
            jump: input.jump && !self.prev.jump,
            ability1: input.ability1 && !self.prev.ability1,
            ability2: input.ability2 && !self.prev.ability2,
            ability3: input.ability3 && !self.prev.ability3,
            ultimate: input.ultimate && !self.prev.ultimate,
            drop_through: input.drop_through && !self.prev.drop_through,
        };
        self.prev = *input;
        edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_axis() {
        let mut input = PlayerInput::default();
        assert_eq!(input.horizontal(), 0.0);

        input.left = true;
        assert_eq!(input.horizontal(), -1.0);

        input.right = true;
        assert_eq!(input.horizontal(), 0.0, "both held cancels");
    }

    #[test]
    fn test_edge_fires_once_while_held() {
        let mut tracker = InputTracker::new();
        let mut input = PlayerInput::default();
        input.jump = true;

        assert!(tracker.edges(&input).jump);
        assert!(!tracker.edges(&input).jump, "held key is not an edge");

        input.jump = false;
        tracker.edges(&input);
        input.jump = true;
        assert!(tracker.edges(&input).jump, "re-press is a new edge");
    }
}
