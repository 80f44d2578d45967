//! Capability components attached to entity records.
//!
//! Instead of a deep inheritance chain, a body is a plain record plus the
//! components it needs: [`Health`] for anything damageable, [`Respawn`] for
//! the destroyed -> alive loop, [`Kinematics`] for gravity-affected props,
//! [`Ignition`] for fused explosives. Entity types select their components
//! via tagged variants at construction.

pub mod health;
pub mod ignition;
pub mod kinematics;
pub mod respawn;

pub use health::{DamageResult, Health};
pub use ignition::{Ignition, IgnitionTick};
pub use kinematics::Kinematics;
pub use respawn::Respawn;
