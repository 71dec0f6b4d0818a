//! Static and presentational elements: terrain, sensors, background.

use glam::DVec2;

use tanks_core::error::SimError;
use tanks_core::types::AssetHandle;

use super::{Context, EntityCore, Lifecycle};

/// The generated ground. Immutable once built.
#[derive(Debug, Clone)]
pub struct TerrainBody {
    /// Fill texture; untextured when the asset is missing.
    pub texture: Option<AssetHandle>,
    pub width: f64,
}

impl Lifecycle for TerrainBody {}

/// Boundary trigger at either end of the field.
#[derive(Debug, Clone, Default)]
pub struct Sensor;

impl Lifecycle for Sensor {}

/// Layered backdrop that tracks the camera.
#[derive(Debug, Clone, Default)]
pub struct ParallaxBackground {
    /// Far to near. Missing layers are omitted.
    pub layers: [Option<AssetHandle>; 3],
    pub position: DVec2,
}

impl ParallaxBackground {
    pub fn layer_count(&self) -> usize {
        self.layers.iter().flatten().count()
    }
}

impl Lifecycle for ParallaxBackground {
    fn update(&mut self, _core: &mut EntityCore, ctx: &mut Context<'_>) -> Result<(), SimError> {
        self.position = ctx.camera;
        Ok(())
    }
}
