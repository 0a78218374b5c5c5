use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;
use thiserror::Error;

use crate::rng::RngManager;
use crate::world::World;
use crate::worldgen::SEED_MARGIN;

fn default_dt_ms() -> f64 {
    16.0
}

fn default_day_length_ms() -> f64 {
    2_000.0
}

fn default_warmup_days() -> u32 {
    100
}

fn default_snapshot_interval_ticks() -> u64 {
    30
}

fn default_cell_width() -> f32 {
    64.0
}

fn default_cell_height() -> f32 {
    64.0
}

fn default_cargo_capacity() -> f64 {
    50.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub description: Option<String>,
    pub seed: u64,
    #[serde(default)]
    pub ticks: Option<u64>,
    /// Simulated milliseconds per engine tick.
    #[serde(default = "default_dt_ms")]
    pub dt_ms: f64,
    /// Accumulated milliseconds that make one island day.
    #[serde(default = "default_day_length_ms")]
    pub day_length_ms: f64,
    /// Island days simulated before the first tick, so opening
    /// inventories are settled rather than empty.
    #[serde(default = "default_warmup_days")]
    pub warmup_days: u32,
    #[serde(default = "default_snapshot_interval_ticks")]
    pub snapshot_interval_ticks: u64,
    pub grid: GridConfig,
    #[serde(default)]
    pub continents: ContinentConfig,
    #[serde(default)]
    pub population: PopulationRange,
    #[serde(default = "default_cargo_capacity")]
    pub cargo_capacity: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GridConfig {
    pub rows: u32,
    pub columns: u32,
    #[serde(default = "default_cell_width")]
    pub cell_width: f32,
    #[serde(default = "default_cell_height")]
    pub cell_height: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContinentConfig {
    pub min_count: u32,
    pub max_count: u32,
    pub min_cells: u32,
    pub max_cells: u32,
    pub max_mountains: u32,
}

impl Default for ContinentConfig {
    fn default() -> Self {
        Self {
            min_count: 4,
            max_count: 7,
            min_cells: 5,
            max_cells: 15,
            max_mountains: 2,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PopulationRange {
    pub min: u32,
    pub max: u32,
}

impl Default for PopulationRange {
    fn default() -> Self {
        Self { min: 5, max: 15 }
    }
}

/// Configuration problems caught before any simulation begins. These
/// are the only fatal conditions in the crate; everything later is
/// resolved by construction-time policy (skip, cap, omit).
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error(
        "grid of {rows}x{columns} cells cannot hold the {margin}-cell continent margin"
    )]
    GridTooSmall { rows: u32, columns: u32, margin: u32 },
    #[error("interior of {interior} cells cannot seat {requested} continent seeds")]
    TooManyContinents { interior: u32, requested: u32 },
    #[error("invalid scenario range: {0}")]
    InvalidRange(String),
    #[error("invalid scenario value: {0}")]
    InvalidValue(String),
}

pub struct ScenarioLoader {
    base_dir: PathBuf,
}

impl ScenarioLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Scenario> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
        let scenario: Scenario = serde_yaml::from_str(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(scenario)
    }
}

impl Scenario {
    pub fn validate(&self) -> Result<(), ScenarioError> {
        let margin = SEED_MARGIN;
        if self.grid.rows <= margin * 2 || self.grid.columns <= margin * 2 {
            return Err(ScenarioError::GridTooSmall {
                rows: self.grid.rows,
                columns: self.grid.columns,
                margin,
            });
        }
        let interior =
            (self.grid.rows - margin * 2) * (self.grid.columns - margin * 2);
        if interior < self.continents.max_count {
            return Err(ScenarioError::TooManyContinents {
                interior,
                requested: self.continents.max_count,
            });
        }
        if self.continents.min_count == 0 || self.continents.min_count > self.continents.max_count
        {
            return Err(ScenarioError::InvalidRange(format!(
                "continent count {}..={}",
                self.continents.min_count, self.continents.max_count
            )));
        }
        if self.continents.min_cells > self.continents.max_cells {
            return Err(ScenarioError::InvalidRange(format!(
                "continent size {}..={}",
                self.continents.min_cells, self.continents.max_cells
            )));
        }
        if self.population.min == 0 || self.population.min > self.population.max {
            return Err(ScenarioError::InvalidRange(format!(
                "population {}..={}",
                self.population.min, self.population.max
            )));
        }
        if self.dt_ms <= 0.0 || self.day_length_ms <= 0.0 {
            return Err(ScenarioError::InvalidValue(
                "tick and day lengths must be positive".into(),
            ));
        }
        if self.cargo_capacity <= 0.0 {
            return Err(ScenarioError::InvalidValue(
                "cargo capacity must be positive".into(),
            ));
        }
        Ok(())
    }

    pub fn ticks(&self, override_ticks: Option<u64>) -> u64 {
        override_ticks.or(self.ticks).unwrap_or(600)
    }

    /// Validate, then generate the full world: terrain, islands,
    /// workforce, ships, and the warm-up days.
    pub fn build_world(&self, rng: &mut RngManager) -> Result<World, ScenarioError> {
        self.validate()?;
        Ok(World::generate(self, rng))
    }
}
