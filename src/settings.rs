//! Runtime settings
//!
//! Loaded from an optional JSON file; every field has a default so an empty
//! object (or no file at all) gives a playable configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::TARGET_FPS;
use crate::error::{LevelError, SettingsError};
use crate::level::LevelData;

/// Where the level layout comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case", tag = "source")]
pub enum LevelSource {
    /// Built-in level one
    #[default]
    Builtin,
    /// JSON level file
    File { path: PathBuf },
    /// Seeded procedural layout
    Generated { seed: u64 },
}

/// Engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Loop cadence in ticks per second
    pub target_fps: u32,
    /// Level to play
    pub level: LevelSource,
    /// Level number reported in the game state
    pub level_number: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            target_fps: TARGET_FPS,
            level: LevelSource::Builtin,
            level_number: 1,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json_str(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(1..=1000).contains(&self.target_fps) {
            return Err(SettingsError::InvalidTickRate(self.target_fps));
        }
        Ok(())
    }

    /// Wall-clock time budget of one tick
    pub fn tick_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.target_fps.max(1) as f64)
    }

    /// Resolve the configured level source into validated level data
    pub fn load_level(&self) -> Result<LevelData, LevelError> {
        let level = match &self.level {
            LevelSource::Builtin => LevelData::level_one(),
            LevelSource::File { path } => return LevelData::from_path(path),
            LevelSource::Generated { seed } => LevelData::generate(*seed, self.level_number),
        };
        level.validate()?;
        Ok(level)
    }
}
