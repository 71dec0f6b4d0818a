//! Simulation orchestrator, the core of the game.
//!
//! `Simulation` owns the live entity collection, the match state machine, the
//! deferred-task scheduler and the event/error channels. It is driven once
//! per frame by an external clock (`on_frame`, or `step` with a physics
//! integrator) and is completely headless, so matches replay exactly from a
//! seed in tests.

use glam::DVec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use tanks_core::commands::GameKey;
use tanks_core::constants::*;
use tanks_core::enums::*;
use tanks_core::error::SimError;
use tanks_core::events::GameEvent;
use tanks_core::state::{HudView, MatchSnapshot};
use tanks_core::types::{EntityId, SimTime};
use tanks_terrain::{Hills, TerrainConfig};

use crate::assets::AssetCatalog;
use crate::economy::EconomyRules;
use crate::entity::{Context, Entity, EntityCore, EntityKind, FieldBounds, Lifecycle, Tank};
use crate::physics::PhysicsIntegrator;
use crate::scheduler::{DeferredTask, Scheduler};
use crate::systems::collision::{self, ContactSide, Reaction};
use crate::systems::snapshot::{build_snapshot, SnapshotInput};
use crate::systems::{cleanup, spawner};
use crate::world::World;
use crate::world_setup::{self, Sprites};

/// Configuration for one match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// RNG seed for determinism. Same seed = same terrain and same match.
    pub seed: u64,
    /// Viewport size, used for the camera offset and spawn placement.
    pub viewport: DVec2,
    pub terrain: TerrainConfig,
    pub economy: EconomyRules,
    pub spawn_interval_secs: f64,
    pub finalize_delay_secs: f64,
    pub convoy_cooldown_secs: f64,
    /// Spacing of the initial enemy line-up.
    pub enemy_spacing: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            viewport: DVec2::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT),
            terrain: TerrainConfig::default(),
            economy: EconomyRules::default(),
            spawn_interval_secs: ENEMY_SPAWN_INTERVAL_SECS,
            finalize_delay_secs: FINALIZE_DELAY_SECS,
            convoy_cooldown_secs: CONVOY_COOLDOWN_SECS,
            enemy_spacing: ENEMY_SPACING,
        }
    }
}

/// The simulation. Owns every element and all match state.
pub struct Simulation {
    config: MatchConfig,
    world: World,
    time: SimTime,
    state: MatchState,
    rng: ChaCha8Rng,
    scheduler: Scheduler,
    hills: Option<Hills>,
    player: Option<EntityId>,
    field_width: f64,
    bounds: Option<FieldBounds>,
    camera: DVec2,
    hud: HudView,
    sprites: Sprites,
    events: Vec<GameEvent>,
    errors: Vec<SimError>,
}

fn report(errors: &mut Vec<SimError>, err: SimError) {
    match &err {
        SimError::MissingBody { .. } => tracing::error!(%err, "invariant violated"),
        SimError::MissingAsset(_) | SimError::UnknownEntity(_) | SimError::Config(_) => {
            tracing::warn!(%err, "simulation problem")
        }
    }
    errors.push(err);
}

impl Simulation {
    pub fn new(config: MatchConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self {
            config,
            world: World::new(),
            time: SimTime::default(),
            state: MatchState::None,
            rng,
            scheduler: Scheduler::new(),
            hills: None,
            player: None,
            field_width: 0.0,
            bounds: None,
            camera: DVec2::ZERO,
            hud: HudView::default(),
            sprites: Sprites::default(),
            events: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Build the level. Missing assets are reported and degrade the element
    /// that wanted them; an invalid terrain configuration aborts setup.
    pub fn setup(&mut self, catalog: &dyn AssetCatalog) -> Result<(), SimError> {
        if !self.world.is_empty() {
            self.teardown();
        }

        let level = world_setup::build_level(
            &mut self.world,
            &self.config,
            &mut self.rng,
            catalog,
            &mut self.errors,
        )?;

        self.player = Some(level.player);
        self.field_width = level.field_width;
        self.bounds = Some(FieldBounds {
            min_x: level.hills.key_points().first().map_or(0.0, |p| p.x),
            max_x: level.field_width,
            min_y: 0.0,
        });
        self.hud = level.hud;
        self.sprites = level.sprites;
        self.hills = Some(level.hills);

        for entity in self.world.iter() {
            if let Some(position) = entity.position() {
                self.events.push(GameEvent::Spawned {
                    id: entity.id(),
                    kind: entity.element_kind(),
                    position,
                });
            }
        }
        self.update_camera();
        Ok(())
    }

    /// Level transition: release everything and return to a blank match.
    pub fn teardown(&mut self) {
        let mut ctx = Context::new(self.time, self.camera, &mut self.events);
        for entity in self.world.iter_mut() {
            entity.kill(&mut ctx);
        }
        self.world.clear();
        self.scheduler.clear();
        self.time = SimTime::default();
        self.rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        self.hills = None;
        self.player = None;
        self.field_width = 0.0;
        self.bounds = None;
        self.camera = DVec2::ZERO;
        self.hud = HudView::default();
        self.sprites = Sprites::default();
        self.set_state(MatchState::None);
        tracing::info!("match torn down");
    }

    // --- Accessors ---

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn match_state(&self) -> MatchState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn field_width(&self) -> f64 {
        self.field_width
    }

    pub fn bounds(&self) -> Option<FieldBounds> {
        self.bounds
    }

    pub fn camera(&self) -> DVec2 {
        self.camera
    }

    pub fn hud(&self) -> HudView {
        self.hud
    }

    pub fn hills(&self) -> Option<&Hills> {
        self.hills.as_ref()
    }

    pub fn player_id(&self) -> Option<EntityId> {
        self.player
    }

    pub fn player(&self) -> Option<&Tank> {
        self.player.and_then(|id| self.world.tank(id))
    }

    pub fn health(&self) -> u32 {
        self.player().map_or(0, Tank::health)
    }

    pub fn score(&self) -> u32 {
        self.player().map_or(0, Tank::score)
    }

    pub fn bullets(&self) -> u32 {
        self.player().map_or(0, Tank::bullets)
    }

    pub fn rockets(&self) -> u32 {
        self.player().map_or(0, Tank::rockets)
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.world.get(id)
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.world.iter()
    }

    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        build_snapshot(SnapshotInput {
            world: &self.world,
            time: self.time,
            state: self.state,
            field_width: self.field_width,
            camera: self.camera,
            player: self.player,
            hud: self.hud,
        })
    }

    /// Events queued since the last drain, oldest first.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn drain_errors(&mut self) -> Vec<SimError> {
        std::mem::take(&mut self.errors)
    }

    // --- Input ---

    pub fn handle_game_key(&mut self, key: GameKey) {
        tracing::debug!(?key, state = ?self.state, "handle game key");

        match self.state {
            MatchState::None => {
                self.start_match();
                return;
            }
            MatchState::Run => {}
            MatchState::Win | MatchState::Loose | MatchState::Paused => return,
        }

        let Some(player) = self.player else {
            return;
        };

        match key {
            GameKey::Left => self.steer(player, Direction::Left),
            GameKey::Right => self.steer(player, Direction::Right),
            GameKey::Up | GameKey::Fire => self.fire(Weapon::Bullet),
            GameKey::Down => {
                if self.entity(player).map(Entity::state) == Some(ElementState::Stopped) {
                    self.fire(Weapon::Rocket);
                }
            }
        }
    }

    /// Stop a tank driving the opposite way, otherwise drive towards `direction`.
    fn steer(&mut self, id: EntityId, direction: Direction) {
        self.with_tank(id, |tank, core, ctx| {
            if core.state == ElementState::Moving {
                if core.direction == direction.reversed() {
                    tank.stop(core, ctx);
                }
                return;
            }
            match direction {
                Direction::Left => tank.start_left(core),
                Direction::Right => tank.start_right(core),
                Direction::None => {}
            }
        });
    }

    fn start_match(&mut self) {
        if self.player.is_none() {
            tracing::warn!("key ignored, match is not set up");
            return;
        }

        let mut ctx = Context::new(self.time, self.camera, &mut self.events);
        for entity in self.world.iter_mut() {
            entity.start(&mut ctx);
        }
        self.set_state(MatchState::Run);

        let x = spawner::spawn_x(self.field_width, self.config.viewport);
        spawner::arm(&mut self.scheduler, self.time.tick, x, &self.config);
    }

    pub fn pause_match(&mut self) -> bool {
        if self.state != MatchState::Run {
            return false;
        }
        self.set_state(MatchState::Paused);
        true
    }

    pub fn resume_match(&mut self) -> bool {
        if self.state != MatchState::Paused {
            return false;
        }
        self.set_state(MatchState::Run);
        true
    }

    fn set_state(&mut self, to: MatchState) {
        let from = self.state;
        if from == to {
            return;
        }
        self.state = to;
        self.events.push(GameEvent::MatchStateChanged { from, to });
        tracing::info!(?from, ?to, "match state changed");
    }

    // --- Frame loop ---

    /// Run one physics step through `physics`, resolve its contacts, then
    /// advance the frame.
    pub fn step<P: PhysicsIntegrator + ?Sized>(&mut self, physics: &mut P) {
        if self.state == MatchState::Paused {
            return;
        }
        let dt = self.time.dt();
        let contacts = {
            let mut bodies = self.world.bodies_mut();
            physics.integrate(&mut bodies, dt)
        };
        for contact in contacts {
            self.handle_contact(contact.a, contact.b, contact.point);
        }
        self.on_frame();
    }

    pub fn on_frame(&mut self) {
        if self.state == MatchState::Paused {
            return;
        }

        self.time.advance();
        for task in self.scheduler.take_due(self.time.tick) {
            self.run_task(task);
        }

        self.update_camera();
        self.update_entities();

        let enemies_alive = {
            let mut ctx = Context::new(self.time, self.camera, &mut self.events);
            cleanup::reap(&mut self.world, &mut ctx)
        };

        if self.state != MatchState::Run {
            return;
        }

        if enemies_alive == 0 {
            tracing::info!("all enemies killed");
            self.finish(MatchOutcome::Win);
            return;
        }

        if self.player().is_some_and(|t| t.ledger().out_of_ammo()) {
            tracing::info!("no weapons left");
            self.finish(MatchOutcome::Loose);
        }
    }

    fn update_camera(&mut self) {
        let position = self
            .player
            .and_then(|id| self.world.get(id))
            .and_then(Entity::position);
        if let Some(position) = position {
            let viewport = self.config.viewport;
            self.camera = position
                + DVec2::new(
                    viewport.x / 2.0 + CAMERA_OFFSET_X,
                    viewport.y / 2.0 + CAMERA_OFFSET_Y,
                );
        }
    }

    fn update_entities(&mut self) {
        let mut ctx =
            Context::new(self.time, self.camera, &mut self.events).with_bounds(self.bounds);
        for entity in self.world.iter_mut() {
            if let Err(err) = entity.update(&mut ctx) {
                report(&mut self.errors, err);
            }
        }
    }

    fn run_task(&mut self, task: DeferredTask) {
        match task {
            DeferredTask::SpawnEnemy { x } => {
                let mut ctx = Context::new(self.time, self.camera, &mut self.events);
                spawner::run(
                    &mut self.world,
                    &mut self.scheduler,
                    &mut ctx,
                    self.state,
                    x,
                    &self.config,
                );
            }
            DeferredTask::FinalizeMatch { outcome } => self.finalize(outcome),
            DeferredTask::ResumeTank { id } => {
                self.with_tank(id, |tank, core, ctx| {
                    if core.state == ElementState::Paused {
                        tracing::debug!(%id, "restart after cooldown");
                        tank.start(core, ctx);
                    }
                });
            }
        }
    }

    /// Enter `win`/`loose` and schedule finalization. Only leaves `run`.
    fn finish(&mut self, outcome: MatchOutcome) {
        if self.state != MatchState::Run {
            return;
        }
        self.set_state(outcome.state());
        self.scheduler.schedule_once(
            self.time.tick,
            self.config.finalize_delay_secs,
            DeferredTask::FinalizeMatch { outcome },
        );
    }

    fn finalize(&mut self, outcome: MatchOutcome) {
        if self.state != outcome.state() {
            return;
        }

        {
            let mut ctx = Context::new(self.time, self.camera, &mut self.events);
            for entity in self.world.iter_mut() {
                entity.stop(&mut ctx);
            }
        }

        let bonus = match outcome {
            MatchOutcome::Win => self.player().map_or(0, |t| {
                self.config.economy.ammo_bonus(t.bullets(), t.rockets())
            }),
            MatchOutcome::Loose => 0,
        };
        if bonus > 0 {
            let delta = i32::try_from(bonus).unwrap_or(i32::MAX);
            self.credit_player(|tank, id, ctx| {
                tank.change_score(id, delta, ctx);
            });
        }

        self.events.push(GameEvent::MatchFinished {
            outcome,
            bonus_score: bonus,
        });
        tracing::info!(?outcome, bonus, score = self.score(), "match finished");
    }

    // --- Tank operations ---

    /// Run `f` on tank `id` with a frame context. `None` if `id` is not a tank.
    fn with_tank<R>(
        &mut self,
        id: EntityId,
        f: impl FnOnce(&mut Tank, &mut EntityCore, &mut Context<'_>) -> R,
    ) -> Option<R> {
        let entity = self.world.get_mut(id)?;
        let EntityKind::Tank(tank) = &mut entity.kind else {
            return None;
        };
        let mut ctx = Context::new(self.time, self.camera, &mut self.events);
        Some(f(tank, &mut entity.core, &mut ctx))
    }

    fn credit_player(&mut self, f: impl FnOnce(&mut Tank, EntityId, &mut Context<'_>)) {
        if let Some(player) = self.player {
            self.with_tank(player, |tank, core, ctx| f(tank, core.id, ctx));
        }
    }

    fn change_player_health(&mut self, delta: i32) {
        let Some(player) = self.player else {
            return;
        };
        let max = self.config.economy.max_health;
        let Some(result) =
            self.with_tank(player, |tank, core, ctx| tank.change_health(core.id, delta, max, ctx))
        else {
            return;
        };

        if result.depleted {
            tracing::debug!(%player, "player is dead");
            if let Some(point) = self.world.get(player).and_then(Entity::position) {
                self.events.push(GameEvent::ShockWave { point });
            }
            self.destroy_tank(player);
            self.finish(MatchOutcome::Loose);
        }
    }

    fn destroy_tank(&mut self, id: EntityId) -> bool {
        self.with_tank(id, |tank, core, ctx| tank.destroy(core, ctx))
            .unwrap_or(false)
    }

    /// One hit: a moving tank stops, a stopped tank is destroyed and the
    /// player collects the bounty while the match is running.
    fn hit_tank(&mut self, target: EntityId, weapon: Weapon) {
        let Some(state) = self.world.get(target).map(Entity::state) else {
            return;
        };
        tracing::debug!(%target, state = state.label(), "get hit");

        match state {
            ElementState::Moving => {
                self.with_tank(target, |tank, core, ctx| {
                    tank.stop(core, ctx);
                    ctx.emit(GameEvent::Shake { target: None });
                });
            }
            ElementState::Stopped => {
                if self.state != MatchState::Run {
                    self.destroy_tank(target);
                    return;
                }
                let rules = &self.config.economy;
                let (health, bullets, score) = (
                    rules.destroy_tank_health,
                    rules.bullets_for_tank,
                    rules.destroy_tank_score,
                );
                self.change_player_health(health);
                if weapon == Weapon::Bullet {
                    self.credit_player(|tank, id, ctx| {
                        tank.change_bullets(id, bullets, ctx);
                    });
                }
                self.credit_player(|tank, id, ctx| {
                    tank.change_score(id, score, ctx);
                });
                self.destroy_tank(target);
            }
            // A tank cooling down after a convoy bump shrugs the hit off.
            ElementState::None
            | ElementState::Idle
            | ElementState::Paused
            | ElementState::WillDie
            | ElementState::Dead
            | ElementState::Unused => {}
        }
    }

    /// Pause a moving tank for `secs`, resuming only if it is still paused.
    fn wait_for(&mut self, id: EntityId, secs: f64) {
        let paused = self
            .with_tank(id, |tank, core, ctx| {
                if core.state != ElementState::Moving {
                    return false;
                }
                tank.pause(core, ctx);
                true
            })
            .unwrap_or(false);
        if paused {
            tracing::debug!(%id, secs, "wait");
            self.scheduler
                .schedule_once(self.time.tick, secs, DeferredTask::ResumeTank { id });
        }
    }

    fn fire(&mut self, weapon: Weapon) {
        let Some(player) = self.player else {
            return;
        };

        let checked = self.with_tank(player, |tank, core, ctx| {
            if core.state == ElementState::None {
                return Ok(None);
            }
            if weapon == Weapon::Bullet {
                tank.recoil();
            }
            if !tank.ledger().has_ammo(weapon) {
                tracing::debug!(id = %core.id, ?weapon, "no ammunition left");
                ctx.emit(GameEvent::EmptyWeapon {
                    tank: core.id,
                    weapon,
                });
                ctx.emit(GameEvent::Sound {
                    cue: SoundCue::EmptyWeapon,
                });
                return Ok(None);
            }
            core.require_body().map(|body| Some(body.position))
        });
        let origin = match checked {
            Some(Ok(Some(origin))) => origin,
            Some(Err(err)) => {
                report(&mut self.errors, err);
                return;
            }
            Some(Ok(None)) | None => return,
        };

        let position = match weapon {
            Weapon::Bullet => {
                origin + DVec2::new(CHASSIS_WIDTH / 2.0 + BULLET_MUZZLE_X, BULLET_MUZZLE_Y)
            }
            Weapon::Rocket => origin + DVec2::new(0.0, ROCKET_LAUNCH_OFFSET_Y),
        };
        let id = self.launch(weapon, position);
        tracing::debug!(%id, ?weapon, "fire");

        match weapon {
            Weapon::Bullet => {
                self.events.push(GameEvent::ShockWave { point: position });
                self.credit_player(|tank, id, ctx| {
                    tank.change_bullets(id, -1, ctx);
                });
            }
            Weapon::Rocket => {
                self.events.push(GameEvent::Shake { target: None });
                self.credit_player(|tank, id, ctx| {
                    tank.change_rockets(id, -1, ctx);
                });
            }
        }
        self.change_player_health(self.config.economy.fire_cost(weapon));
    }

    /// Spawn and start a projectile.
    fn launch(&mut self, weapon: Weapon, position: DVec2) -> EntityId {
        let id = world_setup::spawn_projectile(&mut self.world, weapon, position, &self.sprites);
        let kind = match weapon {
            Weapon::Bullet => ElementKind::Bullet,
            Weapon::Rocket => ElementKind::Rocket,
        };
        self.events.push(GameEvent::Spawned { id, kind, position });
        let mut ctx = Context::new(self.time, self.camera, &mut self.events);
        if let Some(entity) = self.world.get_mut(id) {
            entity.start(&mut ctx);
        }
        id
    }

    // --- Contacts ---

    /// Resolve a contact reported by the physics collaborator.
    pub fn handle_contact(&mut self, a: EntityId, b: EntityId, point: DVec2) {
        let (Some(first), Some(second)) = (self.world.get(a), self.world.get(b)) else {
            let missing = if self.world.get(a).is_none() { a } else { b };
            report(&mut self.errors, SimError::UnknownEntity(missing));
            return;
        };
        let relevant = match (&first.core.body, &second.core.body) {
            (Some(x), Some(y)) => x.contact_relevant(y),
            _ => false,
        };
        if !relevant {
            return;
        }

        self.collide(a, b, point);
        self.collide(b, a, point);
    }

    fn collide(&mut self, subject: EntityId, other: EntityId, point: DVec2) {
        let (Some(s), Some(o)) = (
            self.world.get(subject).map(ContactSide::of),
            self.world.get(other).map(ContactSide::of),
        ) else {
            return;
        };
        let reactions = collision::resolve(&s, &o);
        if !reactions.is_empty() {
            tracing::debug!(%subject, %other, ?reactions, "collides");
        }
        for reaction in reactions {
            self.apply(subject, reaction, point);
        }
    }

    fn apply(&mut self, subject: EntityId, reaction: Reaction, point: DVec2) {
        match reaction {
            Reaction::Consume => {
                if let Some(entity) = self.world.get_mut(subject) {
                    if let EntityKind::Projectile(projectile) = &mut entity.kind {
                        projectile.consume(&mut entity.core);
                    }
                }
                self.events.push(GameEvent::ShockWave { point });
                self.events.push(GameEvent::Shake { target: None });
                self.events.push(GameEvent::Flash);
            }
            Reaction::Sound(cue) => self.events.push(GameEvent::Sound { cue }),
            Reaction::Crater { alpha } => self.events.push(GameEvent::Crater { point, alpha }),
            Reaction::Hit {
                target,
                hits,
                weapon,
            } => {
                for _ in 0..hits {
                    self.hit_tank(target, weapon);
                }
            }
            Reaction::Ram { enemy } => {
                self.events.push(GameEvent::ShockWave { point });
                self.change_player_health(self.config.economy.hit_by_tank);
                self.events.push(GameEvent::Sound {
                    cue: SoundCue::Explosion,
                });
                if self.health() > 0 {
                    self.destroy_tank(enemy);
                }
            }
            Reaction::Convoy { faster, waiting } => {
                self.with_tank(faster, |tank, core, _| tank.make_faster(core));
                self.wait_for(waiting, self.config.convoy_cooldown_secs);
            }
            Reaction::Reverse => {
                self.with_tank(subject, |tank, core, _| tank.reverse_direction(core));
            }
            Reaction::Halt => {
                self.with_tank(subject, |tank, core, ctx| tank.stop(core, ctx));
            }
        }
    }

    // --- Test hooks ---

    #[cfg(test)]
    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[cfg(test)]
    pub(crate) fn player_ledger_mut(&mut self) -> Option<&mut crate::economy::Ledger> {
        let id = self.player?;
        self.world
            .get_mut(id)
            .and_then(Entity::as_tank_mut)
            .map(|t| &mut t.ledger)
    }

    #[cfg(test)]
    pub(crate) fn spawn_test_enemy(&mut self, position: DVec2) -> EntityId {
        let id = world_setup::spawn_tank(&mut self.world, position, true, &self.config.economy);
        let mut ctx = Context::new(self.time, self.camera, &mut self.events);
        if let Some(entity) = self.world.get_mut(id) {
            entity.start(&mut ctx);
        }
        id
    }

    #[cfg(test)]
    pub(crate) fn spawn_test_projectile(&mut self, weapon: Weapon, position: DVec2) -> EntityId {
        self.launch(weapon, position)
    }

    #[cfg(test)]
    pub(crate) fn destroy_for_test(&mut self, id: EntityId) -> bool {
        self.destroy_tank(id)
    }
}
