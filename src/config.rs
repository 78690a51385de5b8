use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use crate::CellOffset;
use crate::camera::MAX_CELL_SIZE;
use crate::camera::MIN_CELL_SIZE;
use crate::rules::B3S23;
use crate::rules::RuleSet;

const DEFAULT_ROWS: CellOffset = 200;
const DEFAULT_COLUMNS: CellOffset = 300;
const DEFAULT_LIVE_CELLS: usize = 9_000;
const DEFAULT_CELL_SIZE: CellOffset = 4;
const DEFAULT_SPEED: CellOffset = 16;
const DEFAULT_TICK_MS: u64 = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Board dimensions must be positive, got {rows}x{columns}")]
    InvalidDimensions { rows: CellOffset, columns: CellOffset },

    #[error("Cannot place {live} living cells on a board of {cells} cells")]
    TooManyCells { live: usize, cells: usize },

    #[error("Cell size must be in 3..=29, got {0}")]
    InvalidCellSize(CellOffset),
}

/// Command line options of the `bitlife` binary.
#[derive(Parser, Debug)]
#[command(
    name = "bitlife",
    version,
    about = "Conway's Game of Life on a bounded board, drawn in the terminal"
)]
pub struct Cli {
    /// Rows of the board.
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    pub rows: CellOffset,

    /// Columns of the board.
    #[arg(long, default_value_t = DEFAULT_COLUMNS)]
    pub columns: CellOffset,

    /// Living cells placed at random on a freshly seeded board.
    #[arg(long = "live", default_value_t = DEFAULT_LIVE_CELLS)]
    pub live_cells: usize,

    /// Initial side of a cell on screen, in braille dots.
    #[arg(long, default_value_t = DEFAULT_CELL_SIZE)]
    pub cell_size: CellOffset,

    /// A pan moves the camera by at least this many dots.
    #[arg(long = "speed", default_value_t = DEFAULT_SPEED)]
    pub min_movement_speed_in_pixels: CellOffset,

    /// Milliseconds between generations.
    #[arg(long, default_value_t = DEFAULT_TICK_MS)]
    pub tick_ms: u64,

    /// Rulestring such as B3/S23 or b36s23.
    #[arg(long = "rule", default_value_t = B3S23)]
    pub rules: RuleSet,
}

impl Cli {
    /// Turn the parsed options into a checked [`Config`]
    pub fn into_config(self) -> Result<Config, ConfigError> {
        let config = Config {
            rows: self.rows,
            columns: self.columns,
            live_cells: self.live_cells,
            cell_size: self.cell_size,
            min_movement_speed_in_pixels: self.min_movement_speed_in_pixels,
            tick: Duration::from_millis(self.tick_ms),
            rules: self.rules,
        };

        config.validate()?;

        Ok(config)
    }
}

/// Everything needed to start a simulation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub rows: CellOffset,
    pub columns: CellOffset,

    /// Living cells on a freshly seeded board
    pub live_cells: usize,

    /// Initial side of a cell on screen, in pixels
    pub cell_size: CellOffset,

    /// A pan moves the camera by at least this many pixels
    pub min_movement_speed_in_pixels: CellOffset,

    /// Time between generations
    pub tick: Duration,

    pub rules: RuleSet,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            live_cells: DEFAULT_LIVE_CELLS,
            cell_size: DEFAULT_CELL_SIZE,
            min_movement_speed_in_pixels: DEFAULT_SPEED,
            tick: Duration::from_millis(DEFAULT_TICK_MS),
            rules: B3S23,
        }
    }
}

impl Config {
    /// Check that a board and view can be built from this config
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows <= 0 || self.columns <= 0 {
            return Err(ConfigError::InvalidDimensions {
                rows: self.rows,
                columns: self.columns,
            });
        }

        let cells = self.rows as usize * self.columns as usize;
        if self.live_cells > cells {
            return Err(ConfigError::TooManyCells {
                live: self.live_cells,
                cells,
            });
        }

        if !(MIN_CELL_SIZE..=MAX_CELL_SIZE).contains(&self.cell_size) {
            return Err(ConfigError::InvalidCellSize(self.cell_size));
        }

        Ok(())
    }
}
