//! Per-tick systems operating on the entity collection.
//!
//! Systems are free functions over `World` plus whatever context they need.
//! They own no state of their own.

pub mod cleanup;
pub mod collision;
pub mod snapshot;
pub mod spawner;
