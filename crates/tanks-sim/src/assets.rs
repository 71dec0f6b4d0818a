//! Asset lookup seam.
//!
//! The presentation layer owns textures and sounds; the simulation only asks
//! for opaque handles by name. A missing asset is never fatal: it is reported
//! and the element that wanted it degrades.

use std::collections::HashMap;

use tanks_core::error::SimError;
use tanks_core::types::AssetHandle;

pub const TERRAIN: &str = "terrain";
pub const BACKGROUND_LAYERS: [&str; 3] = ["background1", "background3", "background2"];
pub const BULLET: &str = "bullet";
pub const ROCKET: &str = "rocket";
pub const HUD_BULLET: &str = "itemBullet";
/// The rocket bar reuses the projectile sprite.
pub const HUD_ROCKET: &str = ROCKET;

/// Every name the simulation asks for.
pub const ALL: [&str; 7] = [
    TERRAIN,
    BACKGROUND_LAYERS[0],
    BACKGROUND_LAYERS[1],
    BACKGROUND_LAYERS[2],
    BULLET,
    ROCKET,
    HUD_BULLET,
];

pub trait AssetCatalog {
    fn resolve(&self, name: &str) -> Option<AssetHandle>;
}

/// Catalog with nothing in it.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAssets;

impl AssetCatalog for NoAssets {
    fn resolve(&self, _name: &str) -> Option<AssetHandle> {
        None
    }
}

impl AssetCatalog for HashMap<String, AssetHandle> {
    fn resolve(&self, name: &str) -> Option<AssetHandle> {
        self.get(name).copied()
    }
}

/// Catalog that hands out a handle for every name in [`ALL`].
pub fn full_catalog() -> HashMap<String, AssetHandle> {
    ALL.iter()
        .enumerate()
        .map(|(i, name)| (name.to_string(), AssetHandle(i as u32 + 1)))
        .collect()
}

/// Resolve `name`, reporting it to `errors` when missing.
pub(crate) fn require(
    catalog: &dyn AssetCatalog,
    name: &str,
    errors: &mut Vec<SimError>,
) -> Option<AssetHandle> {
    let handle = catalog.resolve(name);
    if handle.is_none() {
        tracing::warn!(asset = name, "asset not found");
        errors.push(SimError::MissingAsset(name.to_string()));
    }
    handle
}
