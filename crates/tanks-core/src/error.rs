//! Error taxonomy for configuration, assets and runtime invariants.
//!
//! None of these is fatal: configuration errors leave the previous valid
//! configuration in place, and runtime errors are reported to the error
//! channel while the match carries on.

use thiserror::Error;

use crate::types::EntityId;

/// Rejected terrain or match configuration.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("terrain needs more than 2 key points, got {0}")]
    TooFewKeyPoints(usize),
    #[error("{field} must be a finite value >= 0, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("{field} must be a finite value > 0, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("vertical band is empty: height {height}, paddings {top}/{bottom}")]
    EmptyBand { height: f64, top: f64, bottom: f64 },
    #[error("min_dy {min_dy} leaves no valid height from the band center (headroom {headroom})")]
    UnreachableHeight { min_dy: f64, headroom: f64 },
}

/// Runtime problems reported to the simulation's error channel.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SimError {
    #[error("asset not found: {0}")]
    MissingAsset(String),
    #[error("{name} {id} has no physics body while {state}")]
    MissingBody {
        id: EntityId,
        name: &'static str,
        state: &'static str,
    },
    #[error("unknown entity {0}")]
    UnknownEntity(EntityId),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
