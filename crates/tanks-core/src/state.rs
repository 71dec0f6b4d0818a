//! Match state snapshot: the complete visible state handed to the frontend.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{EntityId, SimTime};

/// Complete match state after a frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub time: SimTime,
    pub state: MatchState,
    pub field_width: f64,
    /// Camera-follow target computed from the player position.
    pub camera: DVec2,
    pub player: Option<TankView>,
    /// Enemy tanks that are not dead.
    pub enemies_alive: u32,
    pub entities: Vec<EntityView>,
    pub hud: HudView,
}

/// One element as the renderer sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub id: EntityId,
    pub name: String,
    pub kind: ElementKind,
    pub state: ElementState,
    pub direction: Direction,
    /// `None` for elements without a physics body (background, released).
    pub position: Option<DVec2>,
    /// Sprite rotation in degrees (turret for tanks, body for rockets).
    pub angle: f64,
}

/// Tank bookkeeping for the HUD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TankView {
    pub id: EntityId,
    pub state: ElementState,
    pub position: Option<DVec2>,
    pub health: u32,
    pub score: u32,
    pub bullets: u32,
    pub rockets: u32,
}

/// Which HUD elements can be drawn. Bars whose icon asset is missing are
/// simply absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HudView {
    pub health_bar: bool,
    pub bullets_bar: bool,
    pub rockets_bar: bool,
}

impl Default for HudView {
    fn default() -> Self {
        Self {
            health_bar: true,
            bullets_bar: true,
            rockets_bar: true,
        }
    }
}
