//! Level layouts
//!
//! A level is plain data: where the player spawns and the ordered lists of
//! platforms, enemies and coins. Layouts come from the built-in level one,
//! from JSON, or from a seeded generator, and are validated before a
//! `GameState` is built from them.

use std::path::Path;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::LevelError;
use crate::sim::{
    Coin, CoinKind, Enemy, EnemyKind, GameState, Platform, PlatformKind, Player, Size,
};

/// Platform record in a level layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlatformSpec {
    pub position: Vec2,
    pub size: Size,
    #[serde(default)]
    pub kind: PlatformKind,
    #[serde(default)]
    pub breakable: bool,
}

/// Enemy record in a level layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemySpec {
    pub position: Vec2,
    #[serde(default)]
    pub kind: EnemyKind,
}

/// Coin record in a level layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoinSpec {
    pub position: Vec2,
    #[serde(default = "default_coin_value")]
    pub value: u32,
    #[serde(default)]
    pub kind: CoinKind,
}

fn default_coin_value() -> u32 {
    DEFAULT_COIN_VALUE
}

fn default_player_spawn() -> Vec2 {
    Vec2::new(PLAYER_START_X, PLAYER_START_Y)
}

/// A complete level layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelData {
    #[serde(default = "default_player_spawn")]
    pub player_spawn: Vec2,
    pub platforms: Vec<PlatformSpec>,
    #[serde(default)]
    pub enemies: Vec<EnemySpec>,
    #[serde(default)]
    pub coins: Vec<CoinSpec>,
}

impl Default for LevelData {
    fn default() -> Self {
        Self::level_one()
    }
}

impl LevelData {
    /// The built-in first level
    pub fn level_one() -> Self {
        let platform = |x: f32, y: f32, w: u32, h: u32, kind: PlatformKind| PlatformSpec {
            position: Vec2::new(x, y),
            size: Size::new(w, h),
            kind,
            breakable: false,
        };
        let goomba = |x: f32, y: f32| EnemySpec {
            position: Vec2::new(x, y),
            kind: EnemyKind::Goomba,
        };
        let coin = |x: f32, y: f32| CoinSpec {
            position: Vec2::new(x, y),
            value: DEFAULT_COIN_VALUE,
            kind: CoinKind::Normal,
        };

        Self {
            player_spawn: default_player_spawn(),
            platforms: vec![
                platform(0.0, 700.0, 800, 50, PlatformKind::Normal),
                platform(300.0, 600.0, 150, 30, PlatformKind::Normal),
                platform(600.0, 500.0, 150, 30, PlatformKind::Normal),
                platform(900.0, 400.0, 150, 30, PlatformKind::Normal),
                platform(1200.0, 500.0, 150, 30, PlatformKind::Normal),
                platform(1500.0, 600.0, 150, 30, PlatformKind::Bouncy),
                platform(1800.0, 700.0, 200, 50, PlatformKind::Normal),
            ],
            enemies: vec![
                goomba(400.0, 570.0),
                goomba(700.0, 470.0),
                goomba(1000.0, 370.0),
            ],
            coins: vec![
                coin(350.0, 550.0),
                coin(650.0, 450.0),
                coin(950.0, 350.0),
                coin(1250.0, 450.0),
                coin(1550.0, 550.0),
            ],
        }
    }

    /// Parse and validate a level from JSON
    pub fn from_json_str(json: &str) -> Result<Self, LevelError> {
        let level: LevelData = serde_json::from_str(json)?;
        level.validate()?;
        Ok(level)
    }

    /// Read, parse and validate a level file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let level = Self::from_json_str(&json)?;
        log::info!(
            "Loaded level from {}: {} platforms, {} enemies, {} coins",
            path.display(),
            level.platforms.len(),
            level.enemies.len(),
            level.coins.len()
        );
        Ok(level)
    }

    pub fn to_json(&self) -> Result<String, LevelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Generate a layout from a seed
    ///
    /// Same seed and level number always give the same layout. Platforms form
    /// a left-to-right staircase whose steps stay within jump height; enemies
    /// stand on platforms and coins float above them. Later levels get more
    /// enemies.
    ///
    /// No two platform tops are within the enemy standing distance of each
    /// other, so a patrolling enemy only turns at the edges of its own
    /// platform.
    pub fn generate(seed: u64, level_number: u32) -> Self {
        let level_seed = seed ^ (level_number as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        let mut rng = Pcg32::seed_from_u64(level_seed);

        let mut platforms = vec![PlatformSpec {
            position: Vec2::new(0.0, GROUND_LEVEL),
            size: Size::new(800, 50),
            kind: PlatformKind::Normal,
            breakable: false,
        }];
        let mut enemies = Vec::new();
        let mut coins = Vec::new();

        let enemy_chance = (0.3 + 0.1 * level_number as f64).min(0.9);
        let kinds = [EnemyKind::Goomba, EnemyKind::Koopa, EnemyKind::Piranha];
        let mut x = 300.0_f32;
        let mut y = 600.0_f32;
        let last_x = WORLD_WIDTH - LEVEL_COMPLETE_MARGIN - 400.0;

        while x < last_x {
            let width: u32 = rng.random_range(120..=200);
            let kind = if rng.random_bool(0.15) {
                PlatformKind::Bouncy
            } else {
                PlatformKind::Normal
            };
            platforms.push(PlatformSpec {
                position: Vec2::new(x, y),
                size: Size::new(width, 30),
                kind,
                breakable: false,
            });

            let w = width as f32;
            coins.push(CoinSpec {
                position: Vec2::new(x + w / 2.0 - COIN_SIZE as f32 / 2.0, y - 50.0),
                value: DEFAULT_COIN_VALUE,
                kind: CoinKind::Normal,
            });
            if rng.random_bool(enemy_chance) {
                enemies.push(EnemySpec {
                    position: Vec2::new(x + 10.0, y - ENEMY_SIZE as f32),
                    kind: kinds[rng.random_range(0..kinds.len())],
                });
            }

            x += w + rng.random_range(80.0..160.0);
            // Steps of about 100 units keep every platform within jump height
            let step = (y + rng.random_range(-100.0..=100.0)).clamp(GEN_TOP_MIN, GEN_TOP_MAX);
            y = separated_height(step, &platforms);
        }

        log::debug!(
            "Generated level {} (seed {}): {} platforms, {} enemies",
            level_number,
            seed,
            platforms.len(),
            enemies.len()
        );

        Self {
            player_spawn: default_player_spawn(),
            platforms,
            enemies,
            coins,
        }
    }

    /// Check the layout for values the engine cannot handle
    pub fn validate(&self) -> Result<(), LevelError> {
        check_position("player spawn", 0, self.player_spawn, PLAYER_WIDTH)?;

        for (index, p) in self.platforms.iter().enumerate() {
            if p.size.is_empty() {
                return Err(LevelError::ZeroSize {
                    entity: "platform",
                    index,
                    width: p.size.width,
                    height: p.size.height,
                });
            }
            check_position("platform", index, p.position, p.size.width)?;
        }

        for (index, e) in self.enemies.iter().enumerate() {
            check_position("enemy", index, e.position, ENEMY_SIZE)?;
        }

        for (index, c) in self.coins.iter().enumerate() {
            check_position("coin", index, c.position, COIN_SIZE)?;
            if c.value == 0 {
                return Err(LevelError::ZeroCoinValue { index });
            }
        }

        Ok(())
    }

    /// Build a fresh game state for this layout
    pub fn build_state(&self, level_number: u32) -> GameState {
        let platforms = self
            .platforms
            .iter()
            .map(|p| Platform {
                is_breakable: p.breakable,
                ..Platform::new(p.position, p.size, p.kind)
            })
            .collect();
        let enemies = self
            .enemies
            .iter()
            .map(|e| Enemy::new(e.position, e.kind))
            .collect();
        let coins = self
            .coins
            .iter()
            .map(|c| Coin {
                value: c.value,
                kind: c.kind,
                ..Coin::new(c.position)
            })
            .collect();

        GameState::new(
            Player::new(self.player_spawn),
            platforms,
            enemies,
            coins,
            level_number,
        )
    }
}

/// Highest and lowest platform tops the generator places
const GEN_TOP_MIN: f32 = 400.0;
const GEN_TOP_MAX: f32 = 620.0;
/// Enemies count as standing on any platform whose top is this close to their feet
const STANDING_DISTANCE: f32 = 5.0;

/// Nearest height to `y` whose top is clear of every placed platform's top
///
/// Candidates step outward by more than twice the standing distance, so each
/// placed platform blocks at most one of them.
fn separated_height(y: f32, platforms: &[PlatformSpec]) -> f32 {
    let spacing = 2.0 * STANDING_DISTANCE + 1.0;
    let is_clear = |top: f32| {
        platforms
            .iter()
            .all(|p| (p.position.y - top).abs() > STANDING_DISTANCE)
    };
    (0..=40)
        .flat_map(|k: i32| [k, -k])
        .map(|k| y + k as f32 * spacing)
        .filter(|top| (GEN_TOP_MIN..=GEN_TOP_MAX).contains(top))
        .find(|&top| is_clear(top))
        .unwrap_or(y)
}

fn check_position(
    entity: &'static str,
    index: usize,
    position: Vec2,
    width: u32,
) -> Result<(), LevelError> {
    if !position.is_finite() {
        return Err(LevelError::NonFinitePosition {
            entity,
            index,
            x: position.x,
            y: position.y,
        });
    }
    if position.x < 0.0 || position.x + width as f32 > WORLD_WIDTH {
        return Err(LevelError::OutOfWorld {
            entity,
            index,
            x: position.x,
            width,
            world_width: WORLD_WIDTH,
        });
    }
    Ok(())
}
