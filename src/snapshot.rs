//! Read-only world snapshots - the surface rendering and UI layers
//! consume, and the periodic JSON writer built on top of it.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Serialize;
use thiserror::Error;

use crate::goods::{Good, Stock};
use crate::grid::{Direction, HexCoord, Terrain};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StockSnapshot {
    pub gold: f64,
    pub iron: f64,
    pub wood: f64,
    pub crops: f64,
    pub fish: f64,
}

impl From<&Stock> for StockSnapshot {
    fn from(stock: &Stock) -> Self {
        Self {
            gold: stock[Good::Gold],
            iron: stock[Good::Iron],
            wood: stock[Good::Wood],
            crops: stock[Good::Crops],
            fish: stock[Good::Fish],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CellSnapshot {
    pub col: i32,
    pub row: i32,
    pub terrain: Terrain,
    pub workers: u32,
    pub island: Option<u32>,
    pub stock: StockSnapshot,
}

#[derive(Debug, Clone, Serialize)]
pub struct IslandSnapshot {
    pub id: u32,
    pub population: u32,
    pub port: Option<HexCoord>,
    pub stock: StockSnapshot,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShipSnapshot {
    pub home_port: HexCoord,
    pub away_port: HexCoord,
    pub x: f32,
    pub y: f32,
    pub facing: Direction,
    pub cargo: StockSnapshot,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorldSnapshot {
    pub scenario: String,
    pub tick: u64,
    pub days_elapsed: f64,
    pub cells: Vec<CellSnapshot>,
    pub islands: Vec<IslandSnapshot>,
    pub ships: Vec<ShipSnapshot>,
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Interval-gated JSON dumps under `dir/<scenario>/tick_NNNNNN.json`.
/// Observability output only; nothing in the crate reads these back.
pub struct SnapshotWriter {
    dir: PathBuf,
    interval_ticks: u64,
}

impl SnapshotWriter {
    pub fn new(dir: impl AsRef<Path>, interval_ticks: u64) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            interval_ticks,
        }
    }

    /// Write the snapshot when the tick lands on the interval; an
    /// interval of zero disables writing entirely.
    pub fn maybe_write(
        &self,
        tick: u64,
        snapshot: &WorldSnapshot,
    ) -> Result<Option<PathBuf>, SnapshotError> {
        if self.interval_ticks == 0 || tick % self.interval_ticks != 0 {
            return Ok(None);
        }
        let dir = self.dir.join(&snapshot.scenario);
        fs::create_dir_all(&dir)?;
        let path = dir.join(format!("tick_{tick:06}.json"));
        fs::write(&path, serde_json::to_string_pretty(snapshot)?)?;
        Ok(Some(path))
    }
}
