//! Headless match simulation: entities, economy, collision rules and the
//! match state machine, driven one frame at a time.

pub use tanks_core as core;

pub mod assets;
pub mod economy;
pub mod engine;
pub mod entity;
pub mod physics;
pub mod scheduler;
pub mod systems;
pub mod world;
pub mod world_setup;

pub use engine::{MatchConfig, Simulation};
