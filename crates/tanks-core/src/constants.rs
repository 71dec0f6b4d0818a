//! Simulation constants and tuning parameters.
//!
//! Units are scene points and seconds.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Viewport ---

/// Default viewport width, used for camera offsets and spawn placement.
pub const VIEWPORT_WIDTH: f64 = 1024.0;

/// Default viewport height.
pub const VIEWPORT_HEIGHT: f64 = 768.0;

/// Camera x offset from the player (added to half the viewport width).
pub const CAMERA_OFFSET_X: f64 = -60.0;

/// Camera y offset from the player (added to half the viewport height).
pub const CAMERA_OFFSET_Y: f64 = -200.0;

// --- Economy ---

pub const INITIAL_HEALTH: u32 = 100;
pub const MAX_HEALTH: u32 = 100;
pub const INITIAL_BULLETS: u32 = 50;
pub const INITIAL_ROCKETS: u32 = 3;

/// Bullets awarded for destroying a tank with a bullet.
pub const BULLETS_FOR_TANK: i32 = 1;

/// Health lost by the player when ramming an enemy tank.
pub const HEALTH_HIT_BY_TANK: i32 = -50;

/// Health cost of firing one bullet.
pub const HEALTH_SHOOT_BULLET: i32 = -1;

/// Health cost of firing one rocket.
pub const HEALTH_SHOOT_ROCKET: i32 = -10;

/// Health awarded for destroying an enemy tank.
pub const HEALTH_DESTROY_TANK: i32 = 36;

/// Score awarded for destroying an enemy tank.
pub const SCORE_DESTROY_TANK: i32 = 100;

/// Bonus score per bullet left when the match is won.
pub const SCORE_REMAINING_BULLET: u32 = 3;

/// Bonus score per rocket left when the match is won.
pub const SCORE_REMAINING_ROCKET: u32 = 10;

// --- Tanks ---

/// Player driving speed.
pub const PLAYER_SPEED: f64 = 150.0;

/// Enemy patrol speed (enemies drive left).
pub const ENEMY_SPEED: f64 = 120.0;

/// Speed of the leading tank after two enemies collide.
pub const CONVOY_FAST_SPEED: f64 = 180.0;

/// Pause of the trailing tank after two enemies collide (seconds).
pub const CONVOY_COOLDOWN_SECS: f64 = 3.0;

/// Chassis size (width, height).
pub const CHASSIS_WIDTH: f64 = 60.0;
pub const CHASSIS_HEIGHT: f64 = 30.0;

/// Player start position.
pub const PLAYER_START_X: f64 = 100.0;
pub const PLAYER_START_Y: f64 = 400.0;

/// Drop height for enemy tanks.
pub const ENEMY_SPAWN_Y: f64 = 600.0;

/// Horizontal spacing of the initial enemy line-up.
pub const ENEMY_SPACING: f64 = 1000.0;

// --- Projectiles ---

pub const BULLET_VELOCITY_X: f64 = 500.0;
pub const BULLET_VELOCITY_Y: f64 = 0.0;
pub const BULLET_SIZE: f64 = 8.0;

/// Bullet muzzle offset from the chassis center (added to half the chassis width).
pub const BULLET_MUZZLE_X: f64 = 20.0;
pub const BULLET_MUZZLE_Y: f64 = 10.0;

pub const ROCKET_VELOCITY_X: f64 = 250.0;
pub const ROCKET_VELOCITY_Y: f64 = 500.0;

/// Vertical target velocity once the rocket tips over.
pub const ROCKET_FALL_VELOCITY_Y: f64 = -500.0;

/// Flight time after which the rocket starts falling (seconds).
pub const ROCKET_ARC_SECS: f64 = 0.5;

pub const ROCKET_LAUNCH_ANGLE: f64 = 60.0;
pub const ROCKET_FALL_ANGLE: f64 = -60.0;
pub const ROCKET_LAUNCH_OFFSET_Y: f64 = 30.0;
pub const ROCKET_SIZE: f64 = 16.0;

pub const BULLET_CRATER_ALPHA: f32 = 1.0;
pub const ROCKET_CRATER_ALPHA: f32 = 0.5;

// --- Sensors ---

pub const SENSOR_WIDTH: f64 = 10.0;
pub const SENSOR_HEIGHT: f64 = 400.0;
pub const SENSOR_Y: f64 = 200.0;

/// Distance of the far sensor from the last viewport-width of the field.
pub const SENSOR_END_MARGIN: f64 = 50.0;

// --- Match control ---

/// Interval between enemy spawns (seconds).
pub const ENEMY_SPAWN_INTERVAL_SECS: f64 = 6.0;

/// Distance of the spawn point from the last viewport-width of the field.
pub const ENEMY_SPAWN_MARGIN: f64 = 100.0;

/// Delay between win/loose and match finalization (seconds).
pub const FINALIZE_DELAY_SECS: f64 = 1.0;

// --- Terrain ---

pub const TERRAIN_SEGMENT_WIDTH: f64 = 10.0;
pub const TERRAIN_HEIGHT: f64 = 400.0;
pub const TERRAIN_MIN_KEY_POINTS: usize = 50;
pub const TERRAIN_BEGIN: f64 = 500.0;
pub const TERRAIN_END: f64 = 2000.0;
pub const TERRAIN_MIN_DX: f64 = 250.0;
pub const TERRAIN_RANGE_DX: f64 = 80.0;
pub const TERRAIN_MIN_DY: f64 = 60.0;
pub const TERRAIN_RANGE_DY: f64 = 40.0;
pub const TERRAIN_PADDING_TOP: f64 = 20.0;
pub const TERRAIN_PADDING_BOTTOM: f64 = 20.0;

// --- Reference integrator ---

/// Fraction of the velocity error corrected per step (1.0 = immediate).
pub const VELOCITY_CONVERGENCE_RATE: f64 = 1.0;

/// Downward acceleration for free bodies.
pub const GRAVITY: f64 = 980.0;
