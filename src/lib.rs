//! Galaxy Blast - A vertical arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, patterns, collisions, session flow)
//! - `persistence`: Phase progress and high score save stores
//! - `platform`: Fixed-step frame clock
//! - `settings`: Runtime configuration for the headless runner

pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

pub use highscores::HighScore;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICK_RATE as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions (y grows downward)
    pub const SCREEN_WIDTH: f32 = 480.0;
    pub const SCREEN_HEIGHT: f32 = 670.0;
    /// Projectiles beyond the playfield by more than this are despawned
    pub const BOUNDS_MARGIN: f32 = 32.0;

    /// Time scale applied to everything but the player while overcharged
    pub const OVERCHARGE_TIME_SCALE: f32 = 0.4;

    /// Player
    pub const PLAYER_WIDTH: f32 = 57.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;
    pub const PLAYER_SPAWN_Y: f32 = SCREEN_HEIGHT - 60.0;
    pub const PLAYER_SPEED: f32 = 4.0;
    pub const PLAYER_BOOST_FACTOR: f32 = 1.5;
    pub const PLAYER_MAX_HEALTH: i32 = 100;
    pub const FIRE_COOLDOWN_TICKS: f32 = 10.0;
    pub const DOUBLE_SHOT_SPREAD: f32 = 10.0;
    pub const DASH_DURATION_TICKS: f32 = 5.0;
    pub const DASH_COOLDOWN_TICKS: f32 = 30.0;
    pub const DASH_SPEED_FACTOR: f32 = 3.0;
    pub const OVERCHARGE_MAX: u32 = 100;
    pub const OVERCHARGE_DURATION_TICKS: f32 = 60.0;
    /// Cooldown drain multipliers while overcharged
    pub const OVERCHARGE_DASH_DRAIN: f32 = 4.0;
    pub const OVERCHARGE_FIRE_DRAIN: f32 = 6.0;

    /// Power-up effects
    pub const HEALTH_PICKUP_AMOUNT: i32 = 20;
    pub const DOUBLE_SHOT_TICKS: f32 = 300.0;
    pub const SPEED_BOOST_TICKS: f32 = 180.0;
    pub const SHIELD_TICKS: f32 = 120.0;
    pub const DOUBLE_POINTS_TICKS: f32 = 300.0;
    pub const POWERUP_SIZE: f32 = 32.0;
    pub const POWERUP_DRIFT_SPEED: f32 = 2.0;
    pub const POWERUP_DROP_CHANCE: f64 = 0.1;

    /// Projectiles
    pub const PLAYER_BULLET_SPEED: f32 = 10.0;
    pub const PLAYER_BULLET_WIDTH: f32 = 9.0;
    pub const PLAYER_BULLET_HEIGHT: f32 = 28.0;
    pub const ENEMY_BULLET_SPEED: f32 = 4.0;
    pub const ENEMY_BULLET_WIDTH: f32 = 12.0;
    pub const ENEMY_BULLET_HEIGHT: f32 = 22.0;
    pub const MINE_WIDTH: f32 = 25.0;
    pub const MINE_HEIGHT: f32 = 33.0;
    pub const MINE_FUSE_TICKS: f32 = 180.0;
    pub const MINE_FLOAT_AMPLITUDE: f32 = 0.5;
    pub const BOSS_BULLET_SPEED: f32 = 5.0;
    pub const BOSS_BULLET_WIDTH: f32 = 25.0;
    pub const BOSS_BULLET_HEIGHT: f32 = 33.0;
    pub const SPIRAL_GROWTH: f32 = 0.5;
    pub const SPIRAL_MAX_RADIUS: f32 = 300.0;
    pub const RING_BULLETS: u32 = 12;
    pub const CHARGED_BALL_SIZE: f32 = 40.0;
    pub const CHARGED_BALL_SPEED: f32 = 2.0;
    pub const CHARGED_BALL_FUSE_TICKS: f32 = 60.0;
    pub const CHARGED_BALL_PULSE_STEP: f32 = 0.1;
    /// Children spawned by mines and charged balls
    pub const BURST_COUNT: u32 = 8;
    pub const BURST_SPEED: f32 = 3.0;
    /// Charged-ball children leave at boss bullet speed
    pub const CHARGED_BURST_SPEED: f32 = 5.0;

    /// Enemies
    pub const ENEMY_SPAWN_TOP: f32 = -30.0;
    pub const ENEMY_SPAWN_MARGIN: f32 = 20.0;
    pub const ENEMY_ENTRY_SPEED: f32 = 3.0;
    pub const ENEMY_FIRE_INTERVAL_MIN: u32 = 60;
    pub const ENEMY_FIRE_INTERVAL_MAX: u32 = 90;
    pub const ENEMY_FIRE_OFFSET_MAX: u32 = 30;

    /// Boss
    pub const BOSS_SIZE: f32 = 157.0;
    pub const BOSS_BASE_HEALTH: i32 = 1500;
    pub const BOSS_SPAWN_TOP: f32 = -100.0;
    pub const BOSS_ENTRY_DEPTH: f32 = 50.0;
    pub const BOSS_ENTRY_SPEED: f32 = 1.0;
    pub const BOSS_PATROL_SPEED: f32 = 3.0;
    pub const BOSS_FIRE_INTERVAL_TICKS: f32 = 60.0;

    /// Combat
    pub const HIT_DAMAGE: i32 = 10;
    pub const SCORE_HIT: i64 = 50;
    pub const SCORE_HIT_DOUBLE: i64 = 100;
    /// Added on top of the hit score while overcharged
    pub const SCORE_OVERCHARGE_BONUS: i64 = 200;
    pub const SCORE_BOSS_HIT: i64 = 100;
    pub const SCORE_BOSS_HIT_DOUBLE: i64 = 200;
    pub const SCORE_PARRY: i64 = 100;
    pub const SCORE_PARRY_DOUBLE: i64 = 200;
    pub const PENALTY_ENEMY_CONTACT: i64 = -20;
    pub const PENALTY_ENEMY_BULLET: i64 = -10;
    pub const PENALTY_BOSS_BULLET: i64 = -50;
    pub const GAUGE_PER_HIT: u32 = 5;
    pub const GAUGE_PER_PARRY: u32 = 10;

    /// Session
    pub const BOSS_THRESHOLD_BASE: u64 = 1000;
    pub const SPAWN_INTERVAL_BASE_MS: u32 = 1800;
    pub const SPAWN_INTERVAL_STEP_MS: u32 = 150;
    pub const SPAWN_INTERVAL_MIN_MS: u32 = 400;
    pub const BOSS_ALERT_TICKS: f32 = 180.0;
    pub const PHASE_BANNER_TICKS: f32 = 240.0;
    pub const PHASE_CLEAR_BONUS: i64 = 500;
}

/// Unit vector for an angle in degrees (0° = right, 90° = straight down)
#[inline]
pub fn heading(degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}

/// Angle in degrees of the direction from `from` toward `to`
#[inline]
pub fn angle_toward(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x).to_degrees()
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    angle.rem_euclid(360.0)
}
