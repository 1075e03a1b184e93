use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Largest grid side accepted; a terminal cannot show much more
pub const MAX_GRID_SIZE: u16 = 128;

/// Named tick-rate presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// 8 ticks per second
    Easy,
    /// 15 ticks per second
    Medium,
    /// 30 ticks per second
    Hard,
}

impl Difficulty {
    /// Tick interval in milliseconds
    pub fn interval_ms(&self) -> f64 {
        match self {
            Difficulty::Easy => 1000.0 / 8.0,
            Difficulty::Medium => 1000.0 / 15.0,
            Difficulty::Hard => 1000.0 / 30.0,
        }
    }
}

/// Configuration for one game session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Cells per side of the square grid
    pub grid_size: u16,
    /// Initial length of the snake
    pub snake_size: u16,
    /// Milliseconds between logic ticks
    pub interval_ms: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 21,
            snake_size: 9,
            interval_ms: Difficulty::Easy.interval_ms(),
        }
    }
}

impl GameConfig {
    pub fn new(grid_size: u16, snake_size: u16, interval_ms: f64) -> Self {
        Self {
            grid_size,
            snake_size,
            interval_ms,
        }
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.interval_ms = difficulty.interval_ms();
        self
    }

    /// Read a JSON config file; missing fields fall back to the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config {:?}", path))
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.grid_size == 0 || self.snake_size == 0 {
            return Err(GameError::InvalidConfig(format!(
                "grid size {} and snake size {} must both be positive",
                self.grid_size, self.snake_size
            )));
        }
        if self.grid_size > MAX_GRID_SIZE {
            return Err(GameError::InvalidConfig(format!(
                "grid size {} exceeds the maximum of {}",
                self.grid_size, MAX_GRID_SIZE
            )));
        }
        if self.snake_size >= self.grid_size {
            return Err(GameError::InvalidConfig(format!(
                "snake size {} must be smaller than grid size {}",
                self.snake_size, self.grid_size
            )));
        }
        validate_interval(self.interval_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(self.interval_ms / 1000.0)
    }
}

pub(crate) fn validate_interval(interval_ms: f64) -> Result<(), GameError> {
    if interval_ms.is_finite() && interval_ms > 0.0 {
        Ok(())
    } else {
        Err(GameError::InvalidConfig(format!(
            "tick interval {interval_ms}ms must be a positive number"
        )))
    }
}
