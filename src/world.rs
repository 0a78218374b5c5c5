//! Aggregate world state - grid, islands, ships, and the simulated
//! clock.

use crate::economy::Economy;
use crate::grid::HexGrid;
use crate::island::Island;
use crate::rng::RngManager;
use crate::scenario::Scenario;
use crate::ship::TradeShip;
use crate::snapshot::{CellSnapshot, IslandSnapshot, ShipSnapshot, StockSnapshot, WorldSnapshot};
use crate::worldgen;

pub struct World {
    pub(crate) grid: HexGrid,
    pub(crate) islands: Vec<Island>,
    pub(crate) ships: Vec<TradeShip>,
    pub(crate) economy: Economy,
    tick: u64,
    elapsed_ms: f64,
    /// Milliseconds accumulated toward the next island day.
    pub(crate) day_timer_ms: f64,
    day_length_ms: f64,
    dt_ms: f64,
    cell_size: (f32, f32),
}

impl World {
    /// Generate terrain, islands, workforce, and ships from a
    /// validated scenario, then run the warm-up days.
    pub(crate) fn generate(scenario: &Scenario, rng: &mut RngManager) -> Self {
        let mut grid = HexGrid::new(scenario.grid.rows, scenario.grid.columns);

        let mut continents = {
            let mut stream = rng.stream("continents");
            worldgen::paint_continents(&mut grid, &scenario.continents, &mut stream)
        };
        let ports = worldgen::carve_coastlines(&mut grid, &mut continents);
        let islands = {
            let mut stream = rng.stream("workforce");
            worldgen::settle_islands(
                &mut grid,
                continents,
                &ports,
                &scenario.population,
                &mut stream,
            )
        };
        let ships = worldgen::launch_ships(&grid, &islands, scenario.cargo_capacity);

        let mut world = Self {
            grid,
            islands,
            ships,
            economy: Economy::default(),
            tick: 0,
            elapsed_ms: 0.0,
            day_timer_ms: 0.0,
            day_length_ms: scenario.day_length_ms,
            dt_ms: scenario.dt_ms,
            cell_size: (scenario.grid.cell_width, scenario.grid.cell_height),
        };
        for _ in 0..scenario.warmup_days {
            world.run_island_day();
        }
        world
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn dt_ms(&self) -> f64 {
        self.dt_ms
    }

    pub fn day_length_ms(&self) -> f64 {
        self.day_length_ms
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    pub fn days_elapsed(&self) -> f64 {
        self.elapsed_ms / self.day_length_ms
    }

    pub fn cell_size(&self) -> (f32, f32) {
        self.cell_size
    }

    pub fn grid(&self) -> &HexGrid {
        &self.grid
    }

    pub fn islands(&self) -> &[Island] {
        &self.islands
    }

    pub fn ships(&self) -> &[TradeShip] {
        &self.ships
    }

    pub fn economy(&self) -> &Economy {
        &self.economy
    }

    pub fn total_population(&self) -> u64 {
        self.islands
            .iter()
            .map(|island| u64::from(island.population()))
            .sum()
    }

    pub fn advance_time(&mut self) {
        self.tick += 1;
        self.elapsed_ms += self.dt_ms;
    }

    /// One island day: every island produces and consumes, in id
    /// order so reruns replay identically.
    pub(crate) fn run_island_day(&mut self) {
        for island in &mut self.islands {
            island.update(&self.grid, &self.economy);
        }
    }

    /// Advance every ship by `dt_ms`, in launch order. Port-call
    /// exchanges run one ship at a time, so concurrent calls at the
    /// same island can never interleave.
    pub(crate) fn advance_ships(&mut self, dt_ms: f64, rng: &mut impl rand::Rng) {
        for ship in &mut self.ships {
            ship.update(dt_ms, &self.grid, &mut self.islands, &self.economy, rng);
        }
    }

    /// Read-only view of the whole world for renderers, observers,
    /// and the snapshot writer.
    pub fn snapshot(&self, scenario: &str) -> WorldSnapshot {
        let cells = self
            .grid
            .coords()
            .filter_map(|coord| {
                let cell = self.grid.get(coord)?;
                Some(CellSnapshot {
                    col: coord.col,
                    row: coord.row,
                    terrain: cell.terrain,
                    workers: cell.workers,
                    island: cell.island.map(|id| id.raw()),
                    stock: StockSnapshot::from(&cell.stock),
                })
            })
            .collect();
        let islands = self
            .islands
            .iter()
            .map(|island| IslandSnapshot {
                id: island.id().raw(),
                population: island.population(),
                port: island.port(),
                stock: StockSnapshot::from(island.stock()),
            })
            .collect();
        let ships = self
            .ships
            .iter()
            .map(|ship| {
                let (x, y) = ship.position(&self.grid, self.cell_size);
                ShipSnapshot {
                    home_port: ship.home_port(),
                    away_port: ship.away_port(),
                    x,
                    y,
                    facing: ship.facing(),
                    cargo: StockSnapshot::from(ship.cargo()),
                }
            })
            .collect();
        WorldSnapshot {
            scenario: scenario.to_string(),
            tick: self.tick,
            days_elapsed: self.days_elapsed(),
            cells,
            islands,
            ships,
        }
    }
}
