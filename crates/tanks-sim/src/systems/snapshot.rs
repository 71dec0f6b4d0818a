//! Snapshot system: builds a `MatchSnapshot` from the entity collection.
//!
//! Read-only; never modifies the world.

use glam::DVec2;

use tanks_core::enums::MatchState;
use tanks_core::state::{EntityView, HudView, MatchSnapshot, TankView};
use tanks_core::types::{EntityId, SimTime};

use crate::entity::{Entity, EntityKind};
use crate::world::World;

pub struct SnapshotInput<'a> {
    pub world: &'a World,
    pub time: SimTime,
    pub state: MatchState,
    pub field_width: f64,
    pub camera: DVec2,
    pub player: Option<EntityId>,
    pub hud: HudView,
}

pub fn build_snapshot(input: SnapshotInput<'_>) -> MatchSnapshot {
    let world = input.world;
    MatchSnapshot {
        time: input.time,
        state: input.state,
        field_width: input.field_width,
        camera: input.camera,
        player: input.player.and_then(|id| world.get(id)).and_then(build_tank),
        enemies_alive: world.iter().filter(|e| e.is_live_enemy()).count() as u32,
        entities: world.iter().map(build_entity).collect(),
        hud: input.hud,
    }
}

fn build_tank(entity: &Entity) -> Option<TankView> {
    let tank = entity.as_tank()?;
    Some(TankView {
        id: entity.id(),
        state: entity.state(),
        position: entity.position(),
        health: tank.health(),
        score: tank.score(),
        bullets: tank.bullets(),
        rockets: tank.rockets(),
    })
}

fn build_entity(entity: &Entity) -> EntityView {
    let angle = match &entity.kind {
        EntityKind::Tank(tank) => tank.turret.degrees(),
        EntityKind::Projectile(p) => p.angle,
        _ => 0.0,
    };
    EntityView {
        id: entity.id(),
        name: entity.core.name.to_string(),
        kind: entity.element_kind(),
        state: entity.state(),
        direction: entity.core.direction,
        position: entity.position(),
        angle,
    }
}
