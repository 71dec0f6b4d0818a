//! Terrain generation parameters and their validation.

use serde::{Deserialize, Serialize};

use tanks_core::constants::*;
use tanks_core::error::ConfigError;

/// Parameters of the rolling-hill generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainConfig {
    /// Number of generated key points, not counting the last point and the run-out.
    pub min_key_points: usize,
    /// Flat lead-in after the first on-screen point (0 = none).
    pub begin: f64,
    /// Flat run-out after the last point (0 = none).
    pub end: f64,
    pub min_dx: f64,
    pub range_dx: f64,
    pub min_dy: f64,
    pub range_dy: f64,
    pub padding_top: f64,
    pub padding_bottom: f64,
    /// Height of the band the hills live in.
    pub height: f64,
    /// Height of the off-screen point left of x = 0.
    pub lead_in_y: f64,
    /// Width of one boundary segment.
    pub segment_width: f64,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            min_key_points: TERRAIN_MIN_KEY_POINTS,
            begin: TERRAIN_BEGIN,
            end: TERRAIN_END,
            min_dx: TERRAIN_MIN_DX,
            range_dx: TERRAIN_RANGE_DX,
            min_dy: TERRAIN_MIN_DY,
            range_dy: TERRAIN_RANGE_DY,
            padding_top: TERRAIN_PADDING_TOP,
            padding_bottom: TERRAIN_PADDING_BOTTOM,
            height: TERRAIN_HEIGHT,
            lead_in_y: VIEWPORT_HEIGHT / 2.0,
            segment_width: TERRAIN_SEGMENT_WIDTH,
        }
    }
}

impl TerrainConfig {
    /// Check that generation terminates and yields strictly increasing x.
    ///
    /// Height sampling starts at the band center. Once one step from there
    /// has succeeded, the alternating sign guarantees a valid step of
    /// `min_dy` exists, so only the first step needs headroom.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_key_points <= 2 {
            return Err(ConfigError::TooFewKeyPoints(self.min_key_points));
        }

        positive("min_dx", self.min_dx)?;
        positive("segment_width", self.segment_width)?;
        positive("height", self.height)?;
        non_negative("range_dx", self.range_dx)?;
        non_negative("min_dy", self.min_dy)?;
        non_negative("range_dy", self.range_dy)?;
        non_negative("begin", self.begin)?;
        non_negative("end", self.end)?;
        non_negative("padding_top", self.padding_top)?;
        non_negative("padding_bottom", self.padding_bottom)?;
        if !self.lead_in_y.is_finite() {
            return Err(ConfigError::Negative {
                field: "lead_in_y",
                value: self.lead_in_y,
            });
        }

        let top = self.height - self.padding_top;
        if top <= self.padding_bottom {
            return Err(ConfigError::EmptyBand {
                height: self.height,
                top: self.padding_top,
                bottom: self.padding_bottom,
            });
        }

        let center = self.height / 2.0;
        let headroom = (top - center).min(center - self.padding_bottom);
        if self.min_dy >= headroom {
            return Err(ConfigError::UnreachableHeight {
                min_dy: self.min_dy,
                headroom,
            });
        }

        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}
