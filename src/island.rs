//! Per-landmass population, workforce, and the daily economic tick.

use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};

use crate::economy::Economy;
use crate::goods::{Good, Stock};
use crate::grid::{HexCoord, HexGrid, Terrain};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct IslandId(u32);

impl IslandId {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

/// One connected landmass plus its fringe of shallows, sharing a
/// population and an aggregate stock. Created once during generation
/// and never destroyed.
pub struct Island {
    id: IslandId,
    cells: Vec<HexCoord>,
    port: Option<HexCoord>,
    population: u32,
    stock: Stock,
}

impl Island {
    pub fn new(
        id: IslandId,
        cells: Vec<HexCoord>,
        port: Option<HexCoord>,
        population: u32,
    ) -> Self {
        Self {
            id,
            cells,
            port,
            population,
            stock: Stock::default(),
        }
    }

    pub fn id(&self) -> IslandId {
        self.id
    }

    pub fn cells(&self) -> &[HexCoord] {
        &self.cells
    }

    /// `None` for continents whose coastline never produced a port;
    /// such islands simulate normally but host no ships.
    pub fn port(&self) -> Option<HexCoord> {
        self.port
    }

    pub fn population(&self) -> u32 {
        self.population
    }

    pub fn stock(&self) -> &Stock {
        &self.stock
    }

    pub(crate) fn stock_mut(&mut self) -> &mut Stock {
        &mut self.stock
    }

    /// Scatter the population across the island's workable cells, one
    /// uniformly random draw per worker. Every non-port cell works,
    /// shallows included - they are the only Fish source.
    pub fn assign_workers(&self, grid: &mut HexGrid, rng: &mut impl Rng) {
        let workable: Vec<HexCoord> = self
            .cells
            .iter()
            .copied()
            .filter(|&coord| grid.terrain(coord).is_some_and(|t| t != Terrain::Port))
            .collect();
        for _ in 0..self.population {
            let Some(&coord) = workable.choose(rng) else {
                return;
            };
            if let Some(cell) = grid.get_mut(coord) {
                cell.workers += 1;
            }
        }
    }

    /// Daily tick: every working cell yields its terrain's product,
    /// then the population consumes per-capita amounts of every good.
    /// Deficits are lost demand, clamped at zero, never carried as
    /// debt.
    pub fn update(&mut self, grid: &HexGrid, economy: &Economy) {
        for &coord in &self.cells {
            let Some(cell) = grid.get(coord) else {
                continue;
            };
            if cell.workers == 0 {
                continue;
            }
            if let Some(good) = cell.terrain.product() {
                self.stock[good] +=
                    f64::from(cell.workers) * economy.per_cap_production[good];
            }
        }
        for good in Good::ALL {
            self.stock[good] -=
                f64::from(self.population) * economy.per_cap_consumption[good];
        }
        self.stock.clamp_non_negative();
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn island_with_terrain(terrains: &[(HexCoord, Terrain)], population: u32) -> (HexGrid, Island) {
        let mut grid = HexGrid::new(5, 5);
        let mut cells = Vec::new();
        for &(coord, terrain) in terrains {
            grid.get_mut(coord).unwrap().terrain = terrain;
            cells.push(coord);
        }
        let island = Island::new(IslandId::new(0), cells, None, population);
        (grid, island)
    }

    #[test]
    fn workers_land_only_on_workable_cells() {
        let port = HexCoord::new(2, 2);
        let plains = HexCoord::new(3, 2);
        let (mut grid, island) = island_with_terrain(
            &[(port, Terrain::Port), (plains, Terrain::Plains)],
            12,
        );
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        island.assign_workers(&mut grid, &mut rng);

        assert_eq!(grid.get(port).unwrap().workers, 0, "ports never work");
        assert_eq!(grid.get(plains).unwrap().workers, 12);
    }

    #[test]
    fn production_follows_terrain_and_consumption_clamps() {
        let plains = HexCoord::new(2, 2);
        let (mut grid, mut island) =
            island_with_terrain(&[(plains, Terrain::Plains)], 10);
        grid.get_mut(plains).unwrap().workers = 10;

        let economy = Economy::default();
        island.update(&grid, &economy);

        // 10 workers on plains produce 10 Crops; 10 citizens consume
        // 10 * 0.25 = 2.5 of them. Goods never produced clamp at zero.
        assert_eq!(island.stock()[Good::Crops], 10.0 - 2.5);
        assert_eq!(island.stock()[Good::Gold], 0.0);
        assert_eq!(island.stock()[Good::Fish], 0.0);
    }

    #[test]
    fn stock_never_goes_negative_over_many_days() {
        let jungle = HexCoord::new(1, 1);
        let (mut grid, mut island) =
            island_with_terrain(&[(jungle, Terrain::Jungle)], 15);
        grid.get_mut(jungle).unwrap().workers = 1;

        let economy = Economy::default();
        for _ in 0..50 {
            island.update(&grid, &economy);
            for good in Good::ALL {
                assert!(island.stock()[good] >= 0.0, "{good:?} went negative");
            }
        }
    }
}
