//! Game state and entity value types
//!
//! Every entity is a small `Copy` value. Updates never mutate a live entity in
//! place: they build a new value (`Player { velocity, ..player }`) and the
//! controller swaps the whole `GameState` once per tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, Size};
use crate::consts::*;

/// Overall run status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    /// Active gameplay
    #[default]
    Playing,
    /// Reserved status; pausing is tracked by `GameState::is_paused`
    Paused,
    /// Player ran out of lives
    GameOver,
    /// Player reached the goal area
    LevelComplete,
}

/// Visual state of the player, derived from motion each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerState {
    #[default]
    Idle,
    Running,
    Jumping,
    Falling,
    /// Sticky: once dead, the state never changes again
    Dead,
}

/// Enemy patrol direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Left,
    #[default]
    Right,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// -1.0 for left, 1.0 for right
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

/// Enemy types (cosmetic: all enemies patrol the same way)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnemyKind {
    #[default]
    Goomba,
    Koopa,
    Piranha,
}

/// Platform types
///
/// Only `is_broken` changes physics; the kind is carried for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlatformKind {
    #[default]
    Normal,
    Breakable,
    Bouncy,
    Moving,
    Ice,
    Spike,
}

/// Coin types (cosmetic)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CoinKind {
    #[default]
    Normal,
    Red,
    Blue,
    Rainbow,
}

/// The player character
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: Size,
    /// True while airborne after a jump or a fall
    pub is_jumping: bool,
    pub is_facing_right: bool,
    pub lives: u32,
    pub score: u32,
    pub state: PlayerState,
    /// Milliseconds of invulnerability left (0 = vulnerable)
    pub invulnerability_timer: u64,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(Vec2::new(PLAYER_START_X, PLAYER_START_Y))
    }
}

impl Player {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            size: Size::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            is_jumping: false,
            is_facing_right: true,
            lives: PLAYER_START_LIVES,
            score: 0,
            state: PlayerState::Idle,
            invulnerability_timer: 0,
        }
    }

    /// Invulnerability is derived from the timer so the two can never disagree
    #[inline]
    pub fn is_invulnerable(&self) -> bool {
        self.invulnerability_timer > 0
    }

    pub fn bounding_box(&self) -> Rect {
        Rect::from_position_size(self.position, self.size)
    }

    /// Thin strip at the bottom of the player, inset horizontally (stomp probe)
    pub fn feet_box(&self) -> Rect {
        let feet_height = 5.0;
        let inset = 5.0;
        let bottom = self.position.y + self.size.height as f32;
        Rect::new(
            self.position.x + inset,
            bottom - feet_height,
            self.position.x + self.size.width as f32 - inset,
            bottom,
        )
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.position.y + self.size.height as f32
    }

    /// Recompute the visual state from velocity and the airborne flag
    pub fn with_updated_state(self) -> Self {
        let state = if self.state == PlayerState::Dead {
            PlayerState::Dead
        } else if self.is_jumping && self.velocity.y < 0.0 {
            PlayerState::Jumping
        } else if self.is_jumping && self.velocity.y > 0.0 {
            PlayerState::Falling
        } else if self.velocity.x != 0.0 {
            PlayerState::Running
        } else {
            PlayerState::Idle
        };
        Self { state, ..self }
    }
}

/// A patrolling enemy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: Size,
    pub kind: EnemyKind,
    /// Dead enemies stay in the list but no longer move or collide
    pub is_alive: bool,
    pub direction: Direction,
}

impl Enemy {
    pub fn new(position: Vec2, kind: EnemyKind) -> Self {
        Self {
            position,
            velocity: Vec2::new(ENEMY_SPEED, 0.0),
            size: Size::new(ENEMY_SIZE, ENEMY_SIZE),
            kind,
            is_alive: true,
            direction: Direction::Right,
        }
    }

    pub fn bounding_box(&self) -> Rect {
        Rect::from_position_size(self.position, self.size)
    }

    /// Top 10 units of the enemy (the stompable area)
    pub fn top_hitbox(&self) -> Rect {
        let top_height = 10.0;
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.size.width as f32,
            self.position.y + top_height,
        )
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.position.y + self.size.height as f32
    }
}

/// A static platform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub position: Vec2,
    pub size: Size,
    pub kind: PlatformKind,
    pub is_breakable: bool,
    /// Broken platforms never collide
    pub is_broken: bool,
}

impl Platform {
    pub fn new(position: Vec2, size: Size, kind: PlatformKind) -> Self {
        Self {
            position,
            size,
            kind,
            is_breakable: false,
            is_broken: false,
        }
    }

    pub fn bounding_box(&self) -> Rect {
        Rect::from_position_size(self.position, self.size)
    }

    /// Band of +-5 units around the top edge. Not used by collision resolution.
    pub fn top_surface(&self) -> Rect {
        let thickness = 5.0;
        Rect::new(
            self.position.x,
            self.position.y - thickness,
            self.position.x + self.size.width as f32,
            self.position.y + thickness,
        )
    }

    #[inline]
    pub fn can_support(&self) -> bool {
        !self.is_broken
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.position.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.position.x + self.size.width as f32
    }
}

/// A collectible coin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub position: Vec2,
    pub size: Size,
    /// Collected coins stay in the list but no longer collide
    pub is_collected: bool,
    /// Points awarded on collection
    pub value: u32,
    pub kind: CoinKind,
}

impl Coin {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            size: Size::new(COIN_SIZE, COIN_SIZE),
            is_collected: false,
            value: DEFAULT_COIN_VALUE,
            kind: CoinKind::Normal,
        }
    }

    pub fn bounding_box(&self) -> Rect {
        Rect::from_position_size(self.position, self.size)
    }
}

/// Complete game state (aggregate root, published as a whole each tick)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub player: Player,
    /// Level order is preserved for deterministic iteration
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub coins: Vec<Coin>,
    pub game_status: GameStatus,
    pub current_level: u32,
    /// Level timer in seconds. Displayed only, never counted down.
    pub time_remaining: u32,
    /// Horizontal scroll of the view, >= 0
    pub camera_offset: f32,
    pub is_paused: bool,
}

impl GameState {
    pub fn new(
        player: Player,
        platforms: Vec<Platform>,
        enemies: Vec<Enemy>,
        coins: Vec<Coin>,
        current_level: u32,
    ) -> Self {
        Self {
            player,
            platforms,
            enemies,
            coins,
            game_status: GameStatus::Playing,
            current_level,
            time_remaining: LEVEL_TIME_LIMIT,
            camera_offset: 0.0,
            is_paused: false,
        }
    }

    /// Ticks only have an effect while this is true
    #[inline]
    pub fn is_active(&self) -> bool {
        self.game_status == GameStatus::Playing && !self.is_paused
    }

    pub fn alive_enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|e| e.is_alive)
    }

    /// Platforms that can currently be stood on
    pub fn active_platforms(&self) -> Vec<Platform> {
        self.platforms
            .iter()
            .copied()
            .filter(Platform::can_support)
            .collect()
    }

    pub fn remaining_coins(&self) -> usize {
        self.coins.iter().filter(|c| !c.is_collected).count()
    }
}
