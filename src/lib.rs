//! Platformer Sim - fixed-step engine for a 2D side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, physics, collisions, game state)
//! - `level`: Level layouts (built-in, JSON, seeded generation) and validation
//! - `controller`: Authoritative state owner with latched movement intents
//! - `game_loop`: Fixed-cadence driver thread and snapshot publishing
//! - `settings`: Runtime configuration

pub mod controller;
pub mod error;
pub mod game_loop;
pub mod level;
pub mod settings;
pub mod sim;

pub use controller::GameController;
pub use error::{LevelError, SettingsError};
pub use game_loop::{Command, GameLoop, GameLoopHandle, SnapshotWatch};
pub use level::LevelData;
pub use settings::Settings;

/// Game configuration constants
///
/// Speeds and accelerations are per tick, not per second: the simulation
/// always advances by exactly one logical step.
pub mod consts {
    /// Downward acceleration added to vertical velocity every tick
    pub const GRAVITY: f32 = 0.8;
    /// Vertical velocity applied on jump (negative is up)
    pub const JUMP_FORCE: f32 = -18.0;
    pub const MOVE_SPEED: f32 = 6.0;
    /// Terminal fall speed. Declared for tuning, not applied by the integrator.
    pub const MAX_FALL_SPEED: f32 = 20.0;
    pub const MAX_HORIZONTAL_SPEED: f32 = 12.0;

    /// World dimensions
    pub const GROUND_LEVEL: f32 = 700.0;
    pub const WORLD_WIDTH: f32 = 3000.0;
    pub const SCREEN_WIDTH: f32 = 400.0;
    pub const SCREEN_HEIGHT: f32 = 800.0;

    /// Game loop
    pub const TARGET_FPS: u32 = 60;
    /// Logical tick duration used for timers (integer ms, 16 at 60 Hz)
    pub const FRAME_TIME_MS: u64 = 1000 / TARGET_FPS as u64;

    /// Gameplay
    pub const INVULNERABILITY_TIME_MS: u64 = 2000;
    pub const ENEMY_DEFEAT_POINTS: u32 = 100;
    pub const ENEMY_SPEED: f32 = 2.0;
    /// Upward velocity given to the player after a stomp
    pub const STOMP_BOUNCE_VELOCITY: f32 = -10.0;
    /// Velocity applied to the player when hit
    pub const KNOCKBACK_VELOCITY_X: f32 = -5.0;
    pub const KNOCKBACK_VELOCITY_Y: f32 = -8.0;
    /// Distance from the right edge of the world that counts as the goal
    pub const LEVEL_COMPLETE_MARGIN: f32 = 200.0;

    /// Entity defaults
    pub const PLAYER_START_X: f32 = 100.0;
    pub const PLAYER_START_Y: f32 = 630.0;
    pub const PLAYER_WIDTH: u32 = 50;
    pub const PLAYER_HEIGHT: u32 = 70;
    pub const PLAYER_START_LIVES: u32 = 3;
    pub const ENEMY_SIZE: u32 = 40;
    pub const COIN_SIZE: u32 = 20;
    pub const DEFAULT_COIN_VALUE: u32 = 100;
    pub const LEVEL_TIME_LIMIT: u32 = 300;
}
