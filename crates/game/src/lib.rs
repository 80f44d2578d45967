//! Skirmish game core: heroes, abilities, enemies, levels, and modes on top
//! of the `skirmish-physics` collision and lifecycle layer.
//!
//! # Architecture
//!
//! Everything funnels into [`simulation::Simulation`], a single-threaded
//! deterministic loop with a fixed per-tick phase order. Modules below it
//! are plain data plus functions:
//!
//! - [`input`] - polled input snapshots and press-edge detection
//! - [`hero`] - playable heroes, the closed roster, ability dispatch
//! - [`ability`] - cooldown slots and the ultimate charge gate
//! - [`combat`] - AABB area-damage queries
//! - [`enemy`] - patrol walkers with ledge probing
//! - [`level`] - platform/body/enemy/spawn registries and the sweep
//! - [`modes`] - Arena, King of the Hill, and Capture the Flag scoring
//! - [`camera`] - a derived-state follow camera
//!
//! # Design principles
//!
//! Dependencies are handed in at call sites (`AbilityContext`, config
//! references) rather than wired into entities, state is serde-serializable
//! throughout, and nothing here does I/O: loading maps and rendering belong
//! to the embedding application.

pub mod ability;
pub mod camera;
pub mod combat;
pub mod enemy;
pub mod hero;
pub mod input;
pub mod level;
pub mod modes;
pub mod simulation;

pub use ability::{Ability, AbilityError, AbilityOutcome, AbilitySlots, Slot, UltimateCostPolicy};
pub use camera::{CameraConfig, CameraMode, FollowCamera};
pub use combat::HitReport;
pub use enemy::{Enemy, EnemyConfig};
pub use hero::{
    AbilityContext, Facing, Hero, HeroConfig, HeroKind, Team, UltimateConfig,
};
pub use input::{ButtonEdges, InputTracker, PlayerInput};
pub use level::{Level, SpawnPoint};
pub use modes::{ArenaMode, CtfMode, GameMode, KothMode, MatchStatus, Scoreboard};
pub use simulation::{HeroHud, Simulation, SimulationConfig, Timestep};
