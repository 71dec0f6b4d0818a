//! Reap pass: removes unused elements and counts the enemies still alive.

use tanks_core::enums::ElementState;

use crate::entity::Context;
use crate::world::World;

/// Remove and kill every `Unused` entity in one pass, returning how many
/// enemy tanks are not dead.
pub fn reap(world: &mut World, ctx: &mut Context<'_>) -> u32 {
    let mut enemies_alive = 0;
    world.retain_mut(|entity| {
        if entity.state() == ElementState::Unused {
            entity.kill(ctx);
            return false;
        }
        if entity.is_live_enemy() {
            enemies_alive += 1;
        }
        true
    });
    enemies_alive
}
