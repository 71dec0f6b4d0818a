//! Events emitted by the simulation for the presentation layer.
//!
//! The simulation never renders or plays anything itself. Economy changes,
//! entity lifecycle changes and effect cues are queued as `GameEvent`s and
//! drained by whoever draws the HUD, plays sounds or shakes the camera.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::EntityId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    // --- Economy ---
    HealthChanged { tank: EntityId, from: u32, to: u32 },
    ScoreChanged { tank: EntityId, from: u32, to: u32 },
    BulletsChanged { tank: EntityId, from: u32, to: u32 },
    RocketsChanged { tank: EntityId, from: u32, to: u32 },
    /// Fire pressed with no ammunition left for the weapon.
    EmptyWeapon { tank: EntityId, weapon: Weapon },

    // --- Lifecycle ---
    Spawned {
        id: EntityId,
        kind: ElementKind,
        position: DVec2,
    },
    /// Tank fatally hit; it will play its wreck animation next frame.
    Destroyed { id: EntityId },
    /// Wreck animation hook for a tank that just died.
    Wrecked { id: EntityId },
    /// Resources released; the element is gone from the live collection.
    Killed { id: EntityId },

    // --- Effects ---
    Sound { cue: SoundCue },
    ShockWave { point: DVec2 },
    /// Screen shake; `target` limits it to one element.
    Shake { target: Option<EntityId> },
    Flash,
    /// Presentational crater decal; never collidable.
    Crater { point: DVec2, alpha: f32 },

    // --- Match ---
    MatchStateChanged { from: MatchState, to: MatchState },
    /// Delayed finalization ran. `bonus_score` is the ammo bonus on a win.
    MatchFinished {
        outcome: MatchOutcome,
        bonus_score: u32,
    },
}
