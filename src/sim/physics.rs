//! Per-tick movement integration for the player and enemies
//!
//! Constants are tuned for exactly one call per tick; nothing here scales by
//! elapsed wall-clock time.

use glam::Vec2;

use super::collision::{CollisionSide, player_platform_collision};
use super::state::{Direction, Enemy, Platform, Player};
use crate::consts::*;

/// Advance the player one tick: gravity, integration, platform and ground
/// resolution, horizontal world clamp, visual state.
///
/// Platforms are resolved one after another in slice order against the
/// already-corrected player, so several contacts in one tick compound.
pub fn update_player(player: &Player, platforms: &[Platform]) -> Player {
    let velocity = Vec2::new(player.velocity.x, player.velocity.y + GRAVITY);
    let mut updated = Player {
        position: player.position + velocity,
        velocity,
        ..*player
    };

    let mut landed_on_platform = false;
    for platform in platforms.iter().filter(|p| p.can_support()) {
        let Some(collision) = player_platform_collision(&updated, platform) else {
            continue;
        };

        match collision.side {
            CollisionSide::Top => {
                updated.position.y = platform.position.y - updated.size.height as f32;
                updated.velocity.y = 0.0;
                landed_on_platform = true;
            }
            CollisionSide::Bottom => {
                updated.position.y = platform.position.y + platform.size.height as f32;
                updated.velocity.y = 0.0;
            }
            CollisionSide::Left | CollisionSide::Right => {
                updated.velocity.x = 0.0;
            }
            CollisionSide::None => {}
        }
    }

    let ground_y = GROUND_LEVEL - updated.size.height as f32;
    let on_ground = updated.position.y >= ground_y;
    if on_ground {
        updated.position.y = ground_y;
        updated.velocity.y = 0.0;
    }
    updated.is_jumping = !(on_ground || landed_on_platform);

    let max_x = (WORLD_WIDTH - updated.size.width as f32).max(0.0);
    updated.position.x = updated.position.x.clamp(0.0, max_x);

    updated.with_updated_state()
}

/// Start a jump if the player is grounded; airborne players are unchanged
pub fn apply_jump(player: &Player) -> Player {
    if player.is_jumping {
        return *player;
    }
    Player {
        velocity: Vec2::new(player.velocity.x, JUMP_FORCE),
        is_jumping: true,
        ..*player
    }
}

/// Set horizontal velocity from a direction in [-1, 1]
///
/// Facing only changes for a nonzero direction.
pub fn apply_horizontal_movement(player: &Player, direction: f32) -> Player {
    let vx = (MOVE_SPEED * direction).clamp(-MAX_HORIZONTAL_SPEED, MAX_HORIZONTAL_SPEED);
    let is_facing_right = if direction > 0.0 {
        true
    } else if direction < 0.0 {
        false
    } else {
        player.is_facing_right
    };
    Player {
        velocity: Vec2::new(vx, player.velocity.y),
        is_facing_right,
        ..*player
    }
}

pub fn stop_horizontal_movement(player: &Player) -> Player {
    Player {
        velocity: Vec2::new(0.0, player.velocity.y),
        ..*player
    }
}

/// Advance a patrolling enemy one tick
///
/// The enemy moves by its current velocity. If it stands on a platform
/// (bottom within 5 units of the platform's top) and the move carries it to
/// or past that platform's edge in its direction of travel, it turns around;
/// the new direction sets the velocity used on the next tick.
pub fn update_enemy(enemy: &Enemy, platforms: &[Platform]) -> Enemy {
    if !enemy.is_alive {
        return *enemy;
    }

    let new_x = enemy.position.x + enemy.velocity.x;
    let bottom = enemy.bottom();
    let width = enemy.size.width as f32;

    let should_turn = platforms
        .iter()
        .filter(|p| p.can_support())
        .filter(|p| (bottom - p.position.y).abs() < 5.0)
        .any(|p| match enemy.direction {
            Direction::Right => new_x + width >= p.right(),
            Direction::Left => new_x <= p.left(),
        });

    let direction = if should_turn {
        enemy.direction.flipped()
    } else {
        enemy.direction
    };

    Enemy {
        position: Vec2::new(new_x, enemy.position.y),
        velocity: Vec2::new(ENEMY_SPEED * direction.sign(), enemy.velocity.y),
        direction,
        ..*enemy
    }
}
