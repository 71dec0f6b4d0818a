//! Entity model: shared core, lifecycle trait and the closed variant set.
//!
//! Every element in the match is an `Entity`: an `EntityCore` (id, name,
//! state, direction, optional body) plus one `EntityKind` variant carrying the
//! variant-specific data. Lifecycle calls receive a `Context` for the current
//! frame instead of holding a reference back to the simulation.

pub mod body;
pub mod projectile;
pub mod scenery;
pub mod tank;

use glam::DVec2;

use tanks_core::enums::{Direction, ElementKind, ElementState, Weapon};
use tanks_core::error::SimError;
use tanks_core::events::GameEvent;
use tanks_core::types::{EntityId, SimTime};

pub use body::{Body, Shape};
pub use projectile::Projectile;
pub use scenery::{ParallaxBackground, Sensor, TerrainBody};
pub use tank::Tank;

/// Playable extent of the level. Projectiles outside it are spent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
}

impl FieldBounds {
    pub fn contains(&self, point: DVec2) -> bool {
        point.x >= self.min_x && point.x <= self.max_x && point.y >= self.min_y
    }
}

/// Per-call view of the simulation handed to lifecycle methods.
pub struct Context<'a> {
    pub time: SimTime,
    /// Camera-follow target of the current frame.
    pub camera: DVec2,
    /// `None` before a level is built.
    pub bounds: Option<FieldBounds>,
    events: &'a mut Vec<GameEvent>,
}

impl<'a> Context<'a> {
    pub fn new(time: SimTime, camera: DVec2, events: &'a mut Vec<GameEvent>) -> Self {
        Self {
            time,
            camera,
            bounds: None,
            events,
        }
    }

    pub fn with_bounds(mut self, bounds: Option<FieldBounds>) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}

/// Fields every element shares.
#[derive(Debug, Clone)]
pub struct EntityCore {
    pub id: EntityId,
    pub name: &'static str,
    pub state: ElementState,
    pub direction: Direction,
    pub body: Option<Body>,
    released: bool,
}

impl EntityCore {
    pub fn new(id: EntityId, name: &'static str, body: Option<Body>) -> Self {
        Self {
            id,
            name,
            state: ElementState::None,
            direction: Direction::None,
            body,
            released: false,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.state.is_dead()
    }

    pub fn position(&self) -> Option<DVec2> {
        self.body.as_ref().map(|b| b.position)
    }

    /// Body access for states that must have one.
    pub fn require_body(&mut self) -> Result<&mut Body, SimError> {
        let (id, name, state) = (self.id, self.name, self.state.label());
        self.body
            .as_mut()
            .ok_or(SimError::MissingBody { id, name, state })
    }

    /// Drop the body and mark the element unused. Safe to call repeatedly.
    pub fn release(&mut self, ctx: &mut Context<'_>) {
        if self.released {
            return;
        }
        self.released = true;
        self.body = None;
        self.state = ElementState::Unused;
        ctx.emit(GameEvent::Killed { id: self.id });
        tracing::debug!(id = %self.id, name = self.name, "kill (set unused)");
    }
}

/// Capabilities shared by every variant. Defaults are no-ops.
pub trait Lifecycle {
    fn start(&mut self, _core: &mut EntityCore, _ctx: &mut Context<'_>) {}

    fn stop(&mut self, _core: &mut EntityCore, _ctx: &mut Context<'_>) {}

    fn pause(&mut self, core: &mut EntityCore, ctx: &mut Context<'_>) {
        self.stop(core, ctx);
    }

    fn update(&mut self, _core: &mut EntityCore, _ctx: &mut Context<'_>) -> Result<(), SimError> {
        Ok(())
    }

    /// Release resources. Idempotent, callable on dead elements.
    fn kill(&mut self, core: &mut EntityCore, ctx: &mut Context<'_>) {
        core.release(ctx);
    }
}

#[derive(Debug, Clone)]
pub enum EntityKind {
    Tank(Tank),
    Projectile(Projectile),
    Terrain(TerrainBody),
    Sensor(Sensor),
    Background(ParallaxBackground),
}

#[derive(Debug, Clone)]
pub struct Entity {
    pub core: EntityCore,
    pub kind: EntityKind,
}

impl Entity {
    pub fn id(&self) -> EntityId {
        self.core.id
    }

    pub fn state(&self) -> ElementState {
        self.core.state
    }

    /// The declared variant the other side of a contact sees.
    pub fn element_kind(&self) -> ElementKind {
        match &self.kind {
            EntityKind::Tank(_) => ElementKind::Tank,
            EntityKind::Projectile(p) => match p.weapon {
                Weapon::Bullet => ElementKind::Bullet,
                Weapon::Rocket => ElementKind::Rocket,
            },
            EntityKind::Terrain(_) => ElementKind::Terrain,
            EntityKind::Sensor(_) => ElementKind::Sensor,
            EntityKind::Background(_) => ElementKind::ParallaxBackground,
        }
    }

    /// Body position, or the camera-anchored position for the background.
    pub fn position(&self) -> Option<DVec2> {
        match &self.kind {
            EntityKind::Background(bg) => Some(bg.position),
            _ => self.core.position(),
        }
    }

    pub fn as_tank(&self) -> Option<&Tank> {
        match &self.kind {
            EntityKind::Tank(tank) => Some(tank),
            _ => None,
        }
    }

    pub fn as_tank_mut(&mut self) -> Option<&mut Tank> {
        match &mut self.kind {
            EntityKind::Tank(tank) => Some(tank),
            _ => None,
        }
    }

    pub fn as_projectile(&self) -> Option<&Projectile> {
        match &self.kind {
            EntityKind::Projectile(p) => Some(p),
            _ => None,
        }
    }

    /// Enemy tank that still counts towards the win condition.
    pub fn is_live_enemy(&self) -> bool {
        self.as_tank().is_some_and(|t| t.is_enemy) && !self.core.is_dead()
    }

    fn parts(&mut self) -> (&mut dyn Lifecycle, &mut EntityCore) {
        let behavior: &mut dyn Lifecycle = match &mut self.kind {
            EntityKind::Tank(t) => t,
            EntityKind::Projectile(p) => p,
            EntityKind::Terrain(t) => t,
            EntityKind::Sensor(s) => s,
            EntityKind::Background(b) => b,
        };
        (behavior, &mut self.core)
    }

    pub fn start(&mut self, ctx: &mut Context<'_>) {
        let (behavior, core) = self.parts();
        behavior.start(core, ctx);
    }

    pub fn stop(&mut self, ctx: &mut Context<'_>) {
        let (behavior, core) = self.parts();
        behavior.stop(core, ctx);
    }

    pub fn pause(&mut self, ctx: &mut Context<'_>) {
        let (behavior, core) = self.parts();
        behavior.pause(core, ctx);
    }

    pub fn update(&mut self, ctx: &mut Context<'_>) -> Result<(), SimError> {
        let (behavior, core) = self.parts();
        behavior.update(core, ctx)
    }

    pub fn kill(&mut self, ctx: &mut Context<'_>) {
        let (behavior, core) = self.parts();
        behavior.kill(core, ctx);
    }
}
