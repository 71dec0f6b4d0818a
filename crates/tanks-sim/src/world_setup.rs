//! Entity spawn factories for building a level.
//!
//! Creates the background, terrain, player, initial enemy line-up and the
//! two boundary sensors, and resolves the assets they need.

use glam::DVec2;
use rand::Rng;

use tanks_core::constants::*;
use tanks_core::enums::Weapon;
use tanks_core::error::{ConfigError, SimError};
use tanks_core::state::HudView;
use tanks_core::types::{AssetHandle, EntityId};
use tanks_terrain::Hills;

use crate::assets::{self, AssetCatalog};
use crate::economy::EconomyRules;
use crate::engine::MatchConfig;
use crate::entity::{Body, EntityKind, ParallaxBackground, Projectile, Sensor, Tank, TerrainBody};
use crate::world::World;

/// Everything the simulation keeps from level construction.
#[derive(Debug)]
pub struct Level {
    pub player: EntityId,
    pub hills: Hills,
    pub field_width: f64,
    pub hud: HudView,
    pub sprites: Sprites,
}

/// Projectile sprites, resolved once per level.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sprites {
    pub bullet: Option<AssetHandle>,
    pub rocket: Option<AssetHandle>,
}

impl Sprites {
    pub fn for_weapon(&self, weapon: Weapon) -> Option<AssetHandle> {
        match weapon {
            Weapon::Bullet => self.bullet,
            Weapon::Rocket => self.rocket,
        }
    }
}

/// Build a complete level into an empty `world`.
pub fn build_level<R: Rng + ?Sized>(
    world: &mut World,
    config: &MatchConfig,
    rng: &mut R,
    catalog: &dyn AssetCatalog,
    errors: &mut Vec<SimError>,
) -> Result<Level, ConfigError> {
    let mut hills = Hills::new(config.terrain.clone())?;
    hills.ensure_generated(rng);
    let field_width = hills.width();

    spawn_background(world, catalog, errors);
    spawn_terrain(world, &hills, catalog, errors);

    let player = spawn_tank(
        world,
        DVec2::new(PLAYER_START_X, PLAYER_START_Y),
        false,
        &config.economy,
    );

    let enemies = initial_enemy_count(field_width, config.enemy_spacing);
    for i in 1..=enemies {
        spawn_tank(
            world,
            DVec2::new(f64::from(i) * config.enemy_spacing, ENEMY_SPAWN_Y),
            true,
            &config.economy,
        );
    }

    spawn_sensors(world, field_width, config.viewport);

    let hud = HudView {
        health_bar: true,
        bullets_bar: assets::require(catalog, assets::HUD_BULLET, errors).is_some(),
        rockets_bar: assets::require(catalog, assets::HUD_ROCKET, errors).is_some(),
    };
    let sprites = Sprites {
        bullet: assets::require(catalog, assets::BULLET, errors),
        rocket: assets::require(catalog, assets::ROCKET, errors),
    };

    tracing::info!(
        field_width,
        enemies,
        entities = world.len(),
        "level ready"
    );

    Ok(Level {
        player,
        hills,
        field_width,
        hud,
        sprites,
    })
}

/// Initial enemies sit every `spacing` points, leaving the last stretch free.
pub fn initial_enemy_count(field_width: f64, spacing: f64) -> u32 {
    if spacing <= 0.0 || !field_width.is_finite() {
        return 0;
    }
    let slots = (field_width / spacing).floor() as i64 - 1;
    slots.max(0) as u32
}

pub fn spawn_background(
    world: &mut World,
    catalog: &dyn AssetCatalog,
    errors: &mut Vec<SimError>,
) -> EntityId {
    let layers = assets::BACKGROUND_LAYERS.map(|name| assets::require(catalog, name, errors));
    world.spawn(
        "Background",
        None,
        EntityKind::Background(ParallaxBackground {
            layers,
            position: DVec2::ZERO,
        }),
    )
}

pub fn spawn_terrain(
    world: &mut World,
    hills: &Hills,
    catalog: &dyn AssetCatalog,
    errors: &mut Vec<SimError>,
) -> EntityId {
    let texture = assets::require(catalog, assets::TERRAIN, errors);
    world.spawn(
        "Hill",
        Some(Body::terrain(hills.boundary().to_vec())),
        EntityKind::Terrain(TerrainBody {
            texture,
            width: hills.width(),
        }),
    )
}

pub fn spawn_tank(
    world: &mut World,
    position: DVec2,
    is_enemy: bool,
    rules: &EconomyRules,
) -> EntityId {
    let name = if is_enemy { "Tank" } else { "Player" };
    world.spawn(
        name,
        Some(Body::tank(position, is_enemy)),
        EntityKind::Tank(Tank::new(is_enemy, rules)),
    )
}

pub fn spawn_projectile(
    world: &mut World,
    weapon: Weapon,
    position: DVec2,
    sprites: &Sprites,
) -> EntityId {
    let body = match weapon {
        Weapon::Bullet => Body::bullet(position),
        Weapon::Rocket => Body::rocket(position),
    };
    world.spawn(
        Projectile::name(weapon),
        Some(body),
        EntityKind::Projectile(Projectile::new(weapon, sprites.for_weapon(weapon))),
    )
}

/// Begin sensor at the origin and end sensor one viewport before the field end.
pub fn spawn_sensors(world: &mut World, field_width: f64, viewport: DVec2) -> [EntityId; 2] {
    let positions = [
        DVec2::new(0.0, SENSOR_Y),
        DVec2::new(field_width - viewport.x - SENSOR_END_MARGIN, SENSOR_Y),
    ];
    positions.map(|position| {
        world.spawn(
            "Sensor",
            Some(Body::sensor(position, SENSOR_HEIGHT)),
            EntityKind::Sensor(Sensor),
        )
    })
}
