//! Cached procedural hills.
//!
//! `Hills` owns a validated `TerrainConfig` and lazily generates key points
//! and the dense boundary from it. Any accepted parameter change drops the
//! cache; the next `ensure_generated` regenerates from the new parameters.

use glam::DVec2;
use rand::Rng;

use tanks_core::error::ConfigError;

use crate::config::TerrainConfig;
use crate::keypoints::generate_key_points;
use crate::polyline;

#[derive(Debug, Clone)]
struct Generated {
    key_points: Vec<DVec2>,
    boundary: Vec<DVec2>,
}

#[derive(Debug, Clone)]
pub struct Hills {
    config: TerrainConfig,
    generated: Option<Generated>,
}

impl Hills {
    pub fn new(config: TerrainConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            generated: None,
        })
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// Replace every parameter at once. Rejected configs leave the current one in place.
    pub fn set_config(&mut self, config: TerrainConfig) -> Result<(), ConfigError> {
        self.update(|c| *c = config)
    }

    pub fn set_min_key_points(&mut self, value: usize) -> Result<(), ConfigError> {
        self.update(|c| c.min_key_points = value)
    }

    pub fn set_begin(&mut self, value: f64) -> Result<(), ConfigError> {
        self.update(|c| c.begin = value)
    }

    pub fn set_end(&mut self, value: f64) -> Result<(), ConfigError> {
        self.update(|c| c.end = value)
    }

    pub fn set_min_dx(&mut self, value: f64) -> Result<(), ConfigError> {
        self.update(|c| c.min_dx = value)
    }

    pub fn set_range_dx(&mut self, value: f64) -> Result<(), ConfigError> {
        self.update(|c| c.range_dx = value)
    }

    pub fn set_min_dy(&mut self, value: f64) -> Result<(), ConfigError> {
        self.update(|c| c.min_dy = value)
    }

    pub fn set_range_dy(&mut self, value: f64) -> Result<(), ConfigError> {
        self.update(|c| c.range_dy = value)
    }

    pub fn set_padding_top(&mut self, value: f64) -> Result<(), ConfigError> {
        self.update(|c| c.padding_top = value)
    }

    pub fn set_padding_bottom(&mut self, value: f64) -> Result<(), ConfigError> {
        self.update(|c| c.padding_bottom = value)
    }

    fn update(&mut self, change: impl FnOnce(&mut TerrainConfig)) -> Result<(), ConfigError> {
        let mut candidate = self.config.clone();
        change(&mut candidate);
        if candidate == self.config {
            return Ok(());
        }
        if let Err(err) = candidate.validate() {
            tracing::warn!(%err, "rejected terrain parameter change");
            return Err(err);
        }
        self.config = candidate;
        self.generated = None;
        Ok(())
    }

    pub fn is_generated(&self) -> bool {
        self.generated.is_some()
    }

    /// Generate from the current parameters, replacing any cached result.
    pub fn generate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let key_points = generate_key_points(&self.config, rng);
        let boundary = polyline::expand_hills(&key_points, self.config.segment_width);
        tracing::debug!(
            key_points = key_points.len(),
            boundary = boundary.len(),
            width = key_points.last().map_or(0.0, |p| p.x),
            "generated hills"
        );
        self.generated = Some(Generated {
            key_points,
            boundary,
        });
    }

    /// Generate only if nothing is cached.
    pub fn ensure_generated<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if !self.is_generated() {
            self.generate(rng);
        }
    }

    /// Key points of the last generation (empty before the first).
    pub fn key_points(&self) -> &[DVec2] {
        self.generated
            .as_ref()
            .map_or(&[][..], |g| g.key_points.as_slice())
    }

    /// Dense collision boundary (empty before the first generation).
    pub fn boundary(&self) -> &[DVec2] {
        self.generated
            .as_ref()
            .map_or(&[][..], |g| g.boundary.as_slice())
    }

    /// Field width: x of the last key point, 0 before generation.
    pub fn width(&self) -> f64 {
        self.key_points().last().map_or(0.0, |p| p.x)
    }

    /// Ground height at `x`, `None` outside the generated range.
    pub fn height_at(&self, x: f64) -> Option<f64> {
        polyline::height_at(self.boundary(), x)
    }

    /// Boundary closed down to y = 0 for filled rendering.
    pub fn closed_outline(&self) -> Vec<DVec2> {
        polyline::closed_outline(self.boundary())
    }
}
