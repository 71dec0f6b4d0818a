//! Terrain system for TANKS.
//!
//! Procedural rolling-hill generation: randomized key points, half-cosine
//! expansion into a dense collision boundary, and height queries.

pub use tanks_core as core;

pub mod config;
pub mod hills;
pub mod keypoints;
pub mod polyline;

// Re-export key types for convenience.
pub use config::TerrainConfig;
pub use hills::Hills;
pub use keypoints::generate_key_points;
pub use polyline::expand_hills;

#[cfg(test)]
mod tests;
