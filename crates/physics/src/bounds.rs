//! Axis-aligned bounding boxes and overlap queries.
//!
//! Every collision test in the simulation goes through [`Aabb`]. Boxes are
//! stored as center + half-extents, which keeps translation and symmetry
//! checks cheap.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box in world space.
///
/// `half` holds the half-extents on each axis, so the box spans
/// `center - half` to `center + half`. Y is up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Center position.
    pub center: Vec2,
    /// Half-extents (always non-negative).
    pub half: Vec2,
}

impl Aabb {
    /// Create a box from center and half-extents.
    pub fn new(center: Vec2, half: Vec2) -> Self {
        Self {
            center,
            half: half.abs(),
        }
    }

    /// Create a box from its minimum and maximum corners.
    pub fn from_min_max(min: Vec2, max: Vec2) -> Self {
        Self {
            center: (min + max) * 0.5,
            half: ((max - min) * 0.5).abs(),
        }
    }

    /// Minimum corner (bottom-left).
    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half
    }

    /// Maximum corner (top-right).
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.center.x - self.half.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center.x + self.half.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y + self.half.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y - self.half.y
    }

    /// Return this box translated by `offset`.
    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            center: self.center + offset,
            half: self.half,
        }
    }

    /// Check whether a point lies inside (or on the edge of) this box.
    pub fn contains_point(&self, point: Vec2) -> bool {
        let diff = (point - self.center).abs();
        diff.x <= self.half.x && diff.y <= self.half.y
    }

    /// AABB overlap test. Symmetric: `a.overlaps(&b) == b.overlaps(&a)`.
    ///
    /// Touching edges do not count as overlap, so resting flush against a
    /// platform produces no further resolution.
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let diff = (self.center - other.center).abs();
        let combined = self.half + other.half;
        diff.x < combined.x && diff.y < combined.y
    }
}

/// The four directional penetration depths of a body box into a platform box.
///
/// Each depth measures how far the body would have to move in that direction
/// to clear the corresponding platform face. All four are positive exactly
/// when the boxes overlap.
#[derive(Debug, Clone, Copy)]
pub struct Penetration {
    /// Depth through the platform's left face (push body left to resolve).
    pub left: f32,
    /// Depth through the platform's right face (push body right to resolve).
    pub right: f32,
    /// Depth through the platform's top face (push body up to resolve - landing).
    pub top: f32,
    /// Depth through the platform's bottom face (push body down to resolve).
    pub bottom: f32,
}

impl Penetration {
    /// Compute penetration depths, or `None` when the boxes do not overlap.
    pub fn between(body: &Aabb, platform: &Aabb) -> Option<Self> {
        if !body.overlaps(platform) {
            return None;
        }

        Some(Self {
            left: body.right() - platform.left(),
            right: platform.right() - body.left(),
            top: platform.top() - body.bottom(),
            bottom: body.top() - platform.bottom(),
        })
    }

    /// The smallest of the four depths.
    pub fn min_depth(&self) -> f32 {
        self.left.min(self.right).min(self.top).min(self.bottom)
    }
}
