//! Enemy spawn generator.
//!
//! A single `SpawnEnemy` task is in flight at a time. Each firing spawns one
//! started enemy and re-arms itself, but only while the match is running;
//! once the match has ended the generator simply stops.

use glam::DVec2;

use tanks_core::constants::{ENEMY_SPAWN_MARGIN, ENEMY_SPAWN_Y};
use tanks_core::enums::{ElementKind, MatchState};
use tanks_core::events::GameEvent;
use tanks_core::types::EntityId;

use crate::engine::MatchConfig;
use crate::entity::Context;
use crate::scheduler::{DeferredTask, Scheduler};
use crate::world::World;
use crate::world_setup;

/// Spawn x: one viewport and a margin before the end of the field.
pub fn spawn_x(field_width: f64, viewport: DVec2) -> f64 {
    field_width - viewport.x - ENEMY_SPAWN_MARGIN
}

/// Arm the first spawn when the match starts.
pub fn arm(scheduler: &mut Scheduler, now: u64, x: f64, config: &MatchConfig) {
    scheduler.schedule_once(now, config.spawn_interval_secs, DeferredTask::SpawnEnemy { x });
}

/// Body of the `SpawnEnemy` task.
pub fn run(
    world: &mut World,
    scheduler: &mut Scheduler,
    ctx: &mut Context<'_>,
    state: MatchState,
    x: f64,
    config: &MatchConfig,
) -> Option<EntityId> {
    if state != MatchState::Run {
        tracing::debug!(state = ?state, "spawner stopped");
        return None;
    }

    let position = DVec2::new(x, ENEMY_SPAWN_Y);
    let id = world_setup::spawn_tank(world, position, true, &config.economy);
    ctx.emit(GameEvent::Spawned {
        id,
        kind: ElementKind::Tank,
        position,
    });
    if let Some(entity) = world.get_mut(id) {
        entity.start(ctx);
    }
    tracing::debug!(%id, x, "spawned enemy tank");

    arm(scheduler, ctx.time.tick, x, config);
    Some(id)
}
