//! Cyclic trade ships - route traversal and the port-call exchange.

use rand::{seq::SliceRandom, Rng};

use crate::economy::Economy;
use crate::goods::{Good, Stock};
use crate::grid::{Direction, HexCoord, HexGrid, Terrain};
use crate::island::{Island, IslandId};
use crate::path::Route;

/// Milliseconds a ship spends traversing one route leg.
const LEG_DURATION_MS: f64 = 1_000.0;

/// A trader perpetually shuttling between two ports. Two states only:
/// traveling toward the route cursor's waypoint, or arriving at it.
/// Arrival at a port triggers an exchange before the next leg starts.
/// The cycle has no terminal state.
pub struct TradeShip {
    cargo: Stock,
    capacity: f64,
    home_port: HexCoord,
    away_port: HexCoord,
    home_island: IslandId,
    away_island: IslandId,
    route: Route,
    departed: HexCoord,
    facing: Direction,
    progress_ms: f64,
}

impl TradeShip {
    pub(crate) fn new(
        home_port: HexCoord,
        away_port: HexCoord,
        home_island: IslandId,
        away_island: IslandId,
        mut route: Route,
        capacity: f64,
    ) -> Self {
        let departed = route.current().cell;
        let first_leg = route.advance();
        Self {
            cargo: Stock::default(),
            capacity,
            home_port,
            away_port,
            home_island,
            away_island,
            route,
            departed,
            facing: first_leg.heading,
            progress_ms: 0.0,
        }
    }

    pub fn cargo(&self) -> &Stock {
        &self.cargo
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn home_port(&self) -> HexCoord {
        self.home_port
    }

    pub fn away_port(&self) -> HexCoord {
        self.away_port
    }

    pub fn home_island(&self) -> IslandId {
        self.home_island
    }

    pub fn away_island(&self) -> IslandId {
        self.away_island
    }

    pub fn facing(&self) -> Direction {
        self.facing
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Interpolated pixel position along the current leg, for the
    /// rendering layer.
    pub fn position(&self, grid: &HexGrid, cell_size: (f32, f32)) -> (f32, f32) {
        let t = (self.progress_ms / LEG_DURATION_MS).clamp(0.0, 1.0) as f32;
        let (from_x, from_y) = grid.cell_origin(self.departed, cell_size);
        let (to_x, to_y) = grid.cell_origin(self.route.current().cell, cell_size);
        (from_x + (to_x - from_x) * t, from_y + (to_y - from_y) * t)
    }

    /// Advance travel by `dt_ms`, handling every waypoint reached in
    /// the interval. Arriving at a port runs the exchange before the
    /// ship turns onto the next leg.
    pub(crate) fn update(
        &mut self,
        dt_ms: f64,
        grid: &HexGrid,
        islands: &mut [Island],
        economy: &Economy,
        rng: &mut impl Rng,
    ) {
        self.progress_ms += dt_ms;
        while self.progress_ms >= LEG_DURATION_MS {
            self.progress_ms -= LEG_DURATION_MS;
            self.arrive(grid, islands, economy, rng);
        }
    }

    fn arrive(
        &mut self,
        grid: &HexGrid,
        islands: &mut [Island],
        economy: &Economy,
        rng: &mut impl Rng,
    ) {
        let reached = self.route.current();
        if let Some(cell) = grid.get(reached.cell) {
            if cell.terrain == Terrain::Port {
                if let Some(island) = cell
                    .island
                    .and_then(|id| islands.iter_mut().find(|island| island.id() == id))
                {
                    self.port_call(island, economy, rng);
                }
            }
        }
        self.departed = reached.cell;
        let next = self.route.advance();
        self.facing = next.heading;
    }

    /// Unload everything, then load surpluses above a two-week demand
    /// buffer. Goods are taken in shuffled order so none is
    /// systematically favored when capacity binds. Both bounds are
    /// computed before any transfer, so cargo can never exceed
    /// capacity and the island stock can never go negative.
    fn port_call(&mut self, island: &mut Island, economy: &Economy, rng: &mut impl Rng) {
        for good in Good::ALL {
            island.stock_mut()[good] += self.cargo[good];
            self.cargo[good] = 0.0;
        }

        let mut goods = Good::ALL;
        goods.shuffle(rng);
        for good in goods {
            let buffer = f64::from(island.population())
                * economy.per_cap_consumption[good]
                * 14.0;
            let held = island.stock()[good];
            if held > buffer {
                let capacity_left = self.capacity - self.cargo.total();
                let loaded = (held - buffer).min(capacity_left);
                self.cargo[good] += loaded;
                island.stock_mut()[good] -= loaded;
            }
        }
    }
}
