//! Core types and definitions for the TANKS simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! ids, time, enums, key commands, events, snapshots, constants and errors.
//! It has no dependency on any rendering, audio or physics runtime.

pub mod commands;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;

pub use glam::DVec2;
