//! Skirmish Physics
//!
//! Deterministic 2D AABB physics for a side-view action game. All
//! calculations are plain per-tick integration with explicit delta time;
//! there are no background timers and nothing asynchronous.
//!
//! # Architecture
//!
//! - **Bounds**: AABB overlap tests and directional penetration depths
//! - **Collision**: minimum-overlap resolution against platform lists
//! - **Components**: health, respawn, kinematics, and ignition capabilities
//!   composed onto plain entity records
//! - **Bodies**: destructible world props built from those components,
//!   reporting lifecycle events as data
//!
//! # Design Principles
//!
//! 1. **Determinism**: same inputs always produce the same outputs
//! 2. **Composition**: capability components instead of an inheritance chain
//! 3. **Owned timers**: every delayed effect is advanced inside the tick and
//!    dies with its owner

pub mod body;
pub mod bounds;
pub mod collision;
pub mod components;
pub mod platform;
pub mod timer;

// Re-export commonly used types
pub use body::{BlastSpec, Body, BodyEvent, BodyId, BodyKind};
pub use bounds::{Aabb, Penetration};
pub use collision::{resolve, sweep, Contact, Resolution, SweepResult};
pub use components::{DamageResult, Health, Ignition, Kinematics, Respawn};
pub use platform::{Platform, PlatformKind};
pub use timer::{Countdown, Repeating};
