//! Game configuration - grid size, speed profile and food seed

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::grid::Grid;
use crate::types::{Speed, DEFAULT_COLS, DEFAULT_ROWS};

/// Largest supported grid, in cells
pub const MAX_GRID_CELLS: usize = 65_536;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub cols: u16,
    pub rows: u16,
    pub speed: Speed,
    /// Seed for food placement
    pub seed: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid {cols}x{rows} has no room for both snake and food")]
    TooSmall { cols: u16, rows: u16 },
    #[error("grid {cols}x{rows} exceeds the maximum of {max} cells")]
    TooLarge { cols: u16, rows: u16, max: usize },
}

impl GameConfig {
    pub fn new(cols: u16, rows: u16, speed: Speed, seed: u64) -> Self {
        Self {
            cols,
            rows,
            speed,
            seed,
        }
    }

    pub fn with_grid(mut self, cols: u16, rows: u16) -> Self {
        self.cols = cols;
        self.rows = rows;
        self
    }

    pub fn with_speed(mut self, speed: Speed) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn capacity(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let cells = self.capacity();
        if cells < 2 {
            return Err(ConfigError::TooSmall {
                cols: self.cols,
                rows: self.rows,
            });
        }
        if cells > MAX_GRID_CELLS {
            return Err(ConfigError::TooLarge {
                cols: self.cols,
                rows: self.rows,
                max: MAX_GRID_CELLS,
            });
        }
        Ok(())
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.cols, self.rows)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(DEFAULT_COLS, DEFAULT_ROWS, Speed::Normal, 1)
    }
}
