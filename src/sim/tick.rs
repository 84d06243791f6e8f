//! Fixed timestep simulation tick
//!
//! One call advances the whole game by one logical step and returns the next
//! state. The previous state is never modified.

use glam::Vec2;

use super::collision::{player_coin_collision, player_enemy_collision};
use super::physics::{
    apply_horizontal_movement, stop_horizontal_movement, update_enemy, update_player,
};
use super::state::{GameState, GameStatus, Player, PlayerState};
use crate::consts::*;

/// Movement intents held during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
}

impl TickInput {
    /// Horizontal direction; left wins when both are held
    pub fn direction(&self) -> f32 {
        if self.move_left {
            -1.0
        } else if self.move_right {
            1.0
        } else {
            0.0
        }
    }
}

/// Gameplay facts produced by a tick (for sounds and effects)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Player touched down on a platform or the ground
    Landed,
    /// Enemy at this index was stomped
    EnemyStomped { index: usize },
    /// Player took a hit
    PlayerDamaged { lives_left: u32 },
    /// Coin at this index was picked up
    CoinCollected { index: usize, value: u32 },
    StatusChanged { from: GameStatus, to: GameStatus },
}

/// Result of a tick: the next state and what happened on the way
#[derive(Debug, Clone)]
pub struct TickOutcome {
    pub state: GameState,
    pub events: Vec<GameEvent>,
}

/// Advance the game state by one fixed timestep
///
/// Inactive states (paused or finished) come back unchanged with no events.
pub fn tick(state: &GameState, input: &TickInput) -> TickOutcome {
    let mut events = Vec::new();
    if !state.is_active() {
        return TickOutcome {
            state: state.clone(),
            events,
        };
    }

    let active_platforms = state.active_platforms();

    // Movement intent
    let player = if input.move_left || input.move_right {
        apply_horizontal_movement(&state.player, input.direction())
    } else {
        stop_horizontal_movement(&state.player)
    };

    // Physics
    let mut player = update_player(&player, &active_platforms);
    if state.player.is_jumping && !player.is_jumping {
        events.push(GameEvent::Landed);
    }

    let mut enemies: Vec<_> = state
        .enemies
        .iter()
        .map(|enemy| update_enemy(enemy, &active_platforms))
        .collect();

    // Enemies, in level order, against the player as modified so far
    for (index, enemy) in enemies.iter_mut().enumerate() {
        let Some(collision) = player_enemy_collision(&player, enemy) else {
            continue;
        };

        if collision.jumped_on_top {
            enemy.is_alive = false;
            player = Player {
                velocity: Vec2::new(player.velocity.x, STOMP_BOUNCE_VELOCITY),
                score: player.score.saturating_add(ENEMY_DEFEAT_POINTS),
                ..player
            };
            events.push(GameEvent::EnemyStomped { index });
        } else if !player.is_invulnerable() {
            player = take_damage(&player);
            events.push(GameEvent::PlayerDamaged {
                lives_left: player.lives,
            });
        }
    }

    // Coins
    let mut coins = state.coins.clone();
    for (index, coin) in coins.iter_mut().enumerate() {
        if player_coin_collision(&player, coin) {
            coin.is_collected = true;
            player.score = player.score.saturating_add(coin.value);
            events.push(GameEvent::CoinCollected {
                index,
                value: coin.value,
            });
        }
    }

    // Invulnerability countdown
    if player.is_invulnerable() {
        player.invulnerability_timer = player.invulnerability_timer.saturating_sub(FRAME_TIME_MS);
    }

    let camera_offset = camera_offset(player.position.x);

    let game_status = if player.lives == 0 {
        GameStatus::GameOver
    } else if player.position.x >= WORLD_WIDTH - LEVEL_COMPLETE_MARGIN {
        GameStatus::LevelComplete
    } else {
        state.game_status
    };
    if game_status == GameStatus::GameOver {
        player.state = PlayerState::Dead;
    }
    if game_status != state.game_status {
        events.push(GameEvent::StatusChanged {
            from: state.game_status,
            to: game_status,
        });
    }

    TickOutcome {
        state: GameState {
            player,
            enemies,
            coins,
            camera_offset,
            game_status,
            ..state.clone()
        },
        events,
    }
}

/// Lose a life, start invulnerability and knock the player back
fn take_damage(player: &Player) -> Player {
    Player {
        lives: player.lives.saturating_sub(1),
        invulnerability_timer: INVULNERABILITY_TIME_MS,
        velocity: Vec2::new(KNOCKBACK_VELOCITY_X, KNOCKBACK_VELOCITY_Y),
        ..*player
    }
}

/// Horizontal scroll that keeps the player centered, clamped to the world
pub fn camera_offset(player_x: f32) -> f32 {
    let screen_center = SCREEN_WIDTH / 2.0;
    (player_x - screen_center).clamp(0.0, WORLD_WIDTH - SCREEN_WIDTH)
}
