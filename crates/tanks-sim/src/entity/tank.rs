//! Player and enemy tanks.

use glam::DVec2;

use tanks_core::constants::*;
use tanks_core::enums::{Direction, ElementState, TurretAngle};
use tanks_core::error::SimError;
use tanks_core::events::GameEvent;
use tanks_core::types::EntityId;

use super::{Context, EntityCore, Lifecycle};
use crate::economy::{Change, EconomyRules, HealthChange, Ledger};

#[derive(Debug, Clone)]
pub struct Tank {
    pub is_enemy: bool,
    pub(crate) ledger: Ledger,
    /// Horizontal target velocity while moving. Negative drives left.
    pub speed: f64,
    pub turret: TurretAngle,
}

impl Tank {
    pub fn new(is_enemy: bool, rules: &EconomyRules) -> Self {
        Self {
            is_enemy,
            ledger: Ledger::new(rules),
            speed: 0.0,
            turret: TurretAngle::default(),
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn health(&self) -> u32 {
        self.ledger.health
    }

    pub fn score(&self) -> u32 {
        self.ledger.score
    }

    pub fn bullets(&self) -> u32 {
        self.ledger.bullets
    }

    pub fn rockets(&self) -> u32 {
        self.ledger.rockets
    }

    fn drive(&mut self, core: &mut EntityCore, speed: f64, direction: Direction) {
        if core.is_dead() {
            return;
        }
        self.speed = speed;
        core.direction = direction;
        if let Some(body) = core.body.as_mut() {
            body.pinned = false;
        }
        self.turret = TurretAngle::Down;
        core.state = ElementState::Moving;
        tracing::debug!(id = %core.id, name = core.name, speed, "start");
    }

    fn halt(&mut self, core: &mut EntityCore, state: ElementState) {
        if core.is_dead() {
            return;
        }
        self.speed = 0.0;
        if let Some(body) = core.body.as_mut() {
            body.pinned = true;
            body.target_velocity = Some(DVec2::ZERO);
        }
        self.turret = TurretAngle::Middle;
        core.state = state;
        tracing::debug!(id = %core.id, name = core.name, state = state.label(), "halt");
    }

    pub fn start_left(&mut self, core: &mut EntityCore) {
        self.drive(core, -PLAYER_SPEED, Direction::Left);
    }

    pub fn start_right(&mut self, core: &mut EntityCore) {
        self.drive(core, PLAYER_SPEED, Direction::Right);
    }

    pub fn reverse_direction(&mut self, core: &mut EntityCore) {
        self.speed = -self.speed;
        core.direction = core.direction.reversed();
        tracing::debug!(id = %core.id, speed = self.speed, "reverse direction");
    }

    pub fn make_faster(&mut self, core: &mut EntityCore) {
        self.speed = if self.is_enemy {
            -CONVOY_FAST_SPEED
        } else {
            CONVOY_FAST_SPEED
        };
        tracing::debug!(id = %core.id, speed = self.speed, "get faster");
    }

    /// Turret kick while firing; the next update settles it back down.
    pub fn recoil(&mut self) {
        self.turret = TurretAngle::Recoil;
    }

    /// Fatal hit. Returns false if the tank was already dead.
    pub fn destroy(&mut self, core: &mut EntityCore, ctx: &mut Context<'_>) -> bool {
        if core.is_dead() {
            return false;
        }
        ctx.emit(GameEvent::Shake { target: None });
        core.state = ElementState::WillDie;
        ctx.emit(GameEvent::Destroyed { id: core.id });
        tracing::debug!(id = %core.id, name = core.name, "will die");
        true
    }

    fn wreck(&mut self, core: &mut EntityCore, ctx: &mut Context<'_>) {
        self.speed = 0.0;
        if let Some(body) = core.body.as_mut() {
            body.disable_contacts();
            body.target_velocity = None;
            body.velocity = DVec2::ZERO;
        }
        ctx.emit(GameEvent::Wrecked { id: core.id });
        ctx.emit(GameEvent::Shake {
            target: Some(core.id),
        });
        tracing::debug!(id = %core.id, name = core.name, "destroyed");
    }

    // --- Economy ---

    pub fn change_health(
        &mut self,
        id: EntityId,
        delta: i32,
        max: u32,
        ctx: &mut Context<'_>,
    ) -> HealthChange {
        let result = self.ledger.change_health(delta, max);
        let Change { from, to } = result.change;
        tracing::debug!(%id, from, to, "health changed");
        if result.change.changed() {
            ctx.emit(GameEvent::HealthChanged { tank: id, from, to });
        }
        result
    }

    pub fn change_score(&mut self, id: EntityId, delta: i32, ctx: &mut Context<'_>) -> Change {
        let change = self.ledger.change_score(delta);
        tracing::debug!(%id, from = change.from, to = change.to, "score changed");
        if change.changed() {
            ctx.emit(GameEvent::ScoreChanged {
                tank: id,
                from: change.from,
                to: change.to,
            });
        }
        change
    }

    pub fn change_bullets(&mut self, id: EntityId, delta: i32, ctx: &mut Context<'_>) -> Change {
        let change = self.ledger.change_bullets(delta);
        tracing::debug!(%id, from = change.from, to = change.to, "bullets changed");
        if change.changed() {
            ctx.emit(GameEvent::BulletsChanged {
                tank: id,
                from: change.from,
                to: change.to,
            });
        }
        change
    }

    pub fn change_rockets(&mut self, id: EntityId, delta: i32, ctx: &mut Context<'_>) -> Change {
        let change = self.ledger.change_rockets(delta);
        tracing::debug!(%id, from = change.from, to = change.to, "rockets changed");
        if change.changed() {
            ctx.emit(GameEvent::RocketsChanged {
                tank: id,
                from: change.from,
                to: change.to,
            });
        }
        change
    }
}

impl Lifecycle for Tank {
    fn start(&mut self, core: &mut EntityCore, _ctx: &mut Context<'_>) {
        if self.is_enemy {
            self.drive(core, -ENEMY_SPEED, Direction::Left);
        } else {
            self.drive(core, PLAYER_SPEED, Direction::Right);
        }
    }

    fn stop(&mut self, core: &mut EntityCore, _ctx: &mut Context<'_>) {
        self.halt(core, ElementState::Stopped);
    }

    fn pause(&mut self, core: &mut EntityCore, _ctx: &mut Context<'_>) {
        self.halt(core, ElementState::Paused);
    }

    fn update(&mut self, core: &mut EntityCore, ctx: &mut Context<'_>) -> Result<(), SimError> {
        if self.turret == TurretAngle::Recoil {
            self.turret = TurretAngle::Down;
        }

        match core.state {
            ElementState::Moving => {
                let speed = self.speed;
                let body = core.require_body()?;
                body.target_velocity = Some(DVec2::new(speed, 0.0));
            }
            ElementState::WillDie => {
                self.wreck(core, ctx);
                core.state = ElementState::Dead;
            }
            _ => {}
        }
        Ok(())
    }
}
