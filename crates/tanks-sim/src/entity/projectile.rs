//! Bullets and rockets.

use glam::DVec2;

use tanks_core::constants::*;
use tanks_core::enums::{ElementState, SoundCue, Weapon};
use tanks_core::error::SimError;
use tanks_core::events::GameEvent;
use tanks_core::types::AssetHandle;

use super::{Context, EntityCore, Lifecycle};

#[derive(Debug, Clone)]
pub struct Projectile {
    pub weapon: Weapon,
    pub target: DVec2,
    /// Seconds spent moving; drives the rocket's arc.
    pub flight_secs: f64,
    /// Sprite rotation in degrees.
    pub angle: f64,
    pub falling: bool,
    pub sprite: Option<AssetHandle>,
}

impl Projectile {
    pub fn new(weapon: Weapon, sprite: Option<AssetHandle>) -> Self {
        Self {
            weapon,
            target: DVec2::ZERO,
            flight_secs: 0.0,
            angle: 0.0,
            falling: false,
            sprite,
        }
    }

    pub fn name(weapon: Weapon) -> &'static str {
        match weapon {
            Weapon::Bullet => "Bullet",
            Weapon::Rocket => "Rocket",
        }
    }

    /// Spent on impact: hidden, resting and out of contact reporting until reaped.
    pub fn consume(&mut self, core: &mut EntityCore) {
        self.target = DVec2::ZERO;
        if let Some(body) = core.body.as_mut() {
            body.resting = true;
            body.target_velocity = None;
            body.velocity = DVec2::ZERO;
            body.disable_contacts();
        }
        core.state = ElementState::Unused;
    }
}

impl Lifecycle for Projectile {
    fn start(&mut self, core: &mut EntityCore, ctx: &mut Context<'_>) {
        match self.weapon {
            Weapon::Bullet => {
                self.target = DVec2::new(BULLET_VELOCITY_X, BULLET_VELOCITY_Y);
                ctx.emit(GameEvent::Sound {
                    cue: SoundCue::Shot,
                });
            }
            Weapon::Rocket => {
                self.target = DVec2::new(ROCKET_VELOCITY_X, ROCKET_VELOCITY_Y);
                self.angle = ROCKET_LAUNCH_ANGLE;
                self.flight_secs = 0.0;
                self.falling = false;
            }
        }
        core.state = ElementState::Moving;
    }

    fn stop(&mut self, core: &mut EntityCore, _ctx: &mut Context<'_>) {
        if core.is_dead() {
            return;
        }
        self.target = DVec2::ZERO;
        if let Some(body) = core.body.as_mut() {
            body.target_velocity = Some(DVec2::ZERO);
        }
        core.state = ElementState::Stopped;
    }

    fn update(&mut self, core: &mut EntityCore, ctx: &mut Context<'_>) -> Result<(), SimError> {
        if core.is_dead() {
            return Ok(());
        }
        if let (Some(bounds), Some(position)) = (ctx.bounds, core.position()) {
            if !bounds.contains(position) {
                tracing::debug!(
                    id = %core.id,
                    name = core.name,
                    x = position.x,
                    y = position.y,
                    "left the field"
                );
                self.consume(core);
                return Ok(());
            }
        }
        if core.state != ElementState::Moving {
            return Ok(());
        }

        let target = self.target;
        core.require_body()?.target_velocity = Some(target);

        if self.weapon == Weapon::Rocket {
            self.flight_secs += ctx.time.dt();
            if self.flight_secs > ROCKET_ARC_SECS && !self.falling {
                self.target.y = ROCKET_FALL_VELOCITY_Y;
                self.angle = ROCKET_FALL_ANGLE;
                self.falling = true;
                tracing::debug!(id = %core.id, "rocket tips over");
            }
        }
        Ok(())
    }
}
