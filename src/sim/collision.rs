//! Collision detection between the player and other entities
//!
//! Pure functions: they report what overlaps and from which side, and leave
//! the response (snapping, scoring, damage) to the physics and tick code.

use super::geometry::Rect;
use super::state::{Coin, Enemy, Platform, Player};

/// Side of the platform the player ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionSide {
    /// Player landed on the platform's top edge
    Top,
    /// Player hit the platform from below
    Bottom,
    /// Player ran into the platform's left edge
    Left,
    /// Player ran into the platform's right edge
    Right,
    /// Overlap exists but the velocity rules out every side
    None,
}

/// Result of a player/platform overlap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionInfo {
    pub side: CollisionSide,
    /// Overlap along the resolved side (0 for `CollisionSide::None`)
    pub penetration: f32,
}

/// Result of a player/enemy overlap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyCollisionInfo {
    /// Player's feet came down on the enemy's head
    pub jumped_on_top: bool,
}

/// Penetration of `player` into `platform` along each of the four sides
struct Overlaps {
    left: f32,
    right: f32,
    top: f32,
    bottom: f32,
}

impl Overlaps {
    fn between(player: &Rect, platform: &Rect) -> Self {
        Self {
            left: player.right - platform.left,
            right: platform.right - player.left,
            top: player.bottom - platform.top,
            bottom: platform.bottom - player.top,
        }
    }

    fn min(&self) -> f32 {
        self.left.min(self.right).min(self.top).min(self.bottom)
    }

    fn along(&self, side: CollisionSide) -> f32 {
        match side {
            CollisionSide::Top => self.top,
            CollisionSide::Bottom => self.bottom,
            CollisionSide::Left => self.left,
            CollisionSide::Right => self.right,
            CollisionSide::None => 0.0,
        }
    }
}

/// Check the player against a platform
///
/// The side is the one with the smallest overlap, accepted only when the
/// player is moving into it (down for `Top`, up for `Bottom`, right for
/// `Left`, left for `Right`). Sides are tried in that order; an overlap
/// whose minimum side fails its velocity check reports `CollisionSide::None`.
pub fn player_platform_collision(player: &Player, platform: &Platform) -> Option<CollisionInfo> {
    let player_box = player.bounding_box();
    let platform_box = platform.bounding_box();

    if !player_box.intersects(&platform_box) {
        return None;
    }

    let overlaps = Overlaps::between(&player_box, &platform_box);
    let min = overlaps.min();
    let vel = player.velocity;

    let side = if min == overlaps.top && vel.y > 0.0 {
        CollisionSide::Top
    } else if min == overlaps.bottom && vel.y < 0.0 {
        CollisionSide::Bottom
    } else if min == overlaps.left && vel.x > 0.0 {
        CollisionSide::Left
    } else if min == overlaps.right && vel.x < 0.0 {
        CollisionSide::Right
    } else {
        CollisionSide::None
    };

    Some(CollisionInfo {
        side,
        penetration: overlaps.along(side),
    })
}

/// Check the player against an enemy; dead enemies never collide
pub fn player_enemy_collision(player: &Player, enemy: &Enemy) -> Option<EnemyCollisionInfo> {
    if !enemy.is_alive {
        return None;
    }

    if !player.bounding_box().intersects(&enemy.bounding_box()) {
        return None;
    }

    let jumped_on_top =
        player.feet_box().intersects(&enemy.top_hitbox()) && player.velocity.y > 0.0;

    Some(EnemyCollisionInfo { jumped_on_top })
}

/// Check the player against a coin; collected coins never collide
pub fn player_coin_collision(player: &Player, coin: &Coin) -> bool {
    !coin.is_collected && player.bounding_box().intersects(&coin.bounding_box())
}
