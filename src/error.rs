//! Construction-time errors
//!
//! Ticks cannot fail; everything that can go wrong happens while loading
//! settings or level data, before the loop starts.

use std::path::PathBuf;

/// Errors produced while loading or validating level data.
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    /// The level file could not be read.
    #[error("failed to read level file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The level JSON did not match the expected format.
    #[error("malformed level data: {0}")]
    Parse(#[from] serde_json::Error),

    /// An entity has a zero width or height.
    #[error("{entity} #{index} has zero size ({width}x{height})")]
    ZeroSize {
        entity: &'static str,
        index: usize,
        width: u32,
        height: u32,
    },

    /// An entity position is NaN or infinite.
    #[error("{entity} #{index} has a non-finite position ({x}, {y})")]
    NonFinitePosition {
        entity: &'static str,
        index: usize,
        x: f32,
        y: f32,
    },

    /// An entity lies (partly) outside the horizontal world bounds.
    #[error("{entity} #{index} at x={x} (width {width}) is outside the world [0, {world_width}]")]
    OutOfWorld {
        entity: &'static str,
        index: usize,
        x: f32,
        width: u32,
        world_width: f32,
    },

    /// A coin that awards no points.
    #[error("coin #{index} has zero value")]
    ZeroCoinValue { index: usize },
}

/// Errors produced while loading runtime settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),

    /// The tick rate must be between 1 and 1000 ticks per second.
    #[error("target_fps must be in 1..=1000, got {0}")]
    InvalidTickRate(u32),
}
