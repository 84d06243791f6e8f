//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one logical step per tick, never wall-clock scaled)
//! - Value snapshots only: every update returns a new entity
//! - Stable iteration order (level order of platforms, enemies and coins)
//! - No threading or platform dependencies

pub mod collision;
pub mod geometry;
pub mod physics;
pub mod state;
pub mod tick;

pub use collision::{
    CollisionInfo, CollisionSide, EnemyCollisionInfo, player_coin_collision,
    player_enemy_collision, player_platform_collision,
};
pub use geometry::{Rect, Size, overlaps};
pub use physics::{
    apply_horizontal_movement, apply_jump, stop_horizontal_movement, update_enemy, update_player,
};
pub use state::{
    Coin, CoinKind, Direction, Enemy, EnemyKind, GameState, GameStatus, Platform, PlatformKind,
    Player, PlayerState,
};
pub use tick::{GameEvent, TickInput, TickOutcome, tick};
