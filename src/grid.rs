//! Offset hex lattice - coordinates, terrain, and neighbor topology.

use serde::{Deserialize, Serialize};

use crate::goods::{Good, Stock};
use crate::island::IslandId;

/// Column/row address on the offset lattice. Rows are staggered, so
/// neighbor deltas depend on row parity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct HexCoord {
    pub col: i32,
    pub row: i32,
}

impl HexCoord {
    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Terrain {
    Ocean,
    Shallows,
    Plains,
    Jungle,
    Hills,
    Mountains,
    Port,
}

impl Terrain {
    /// The good one assigned worker yields per day on this terrain.
    pub fn product(self) -> Option<Good> {
        match self {
            Terrain::Mountains => Some(Good::Gold),
            Terrain::Hills => Some(Good::Iron),
            Terrain::Jungle => Some(Good::Wood),
            Terrain::Plains => Some(Good::Crops),
            Terrain::Shallows => Some(Good::Fish),
            Terrain::Ocean | Terrain::Port => None,
        }
    }

    pub fn is_water(self) -> bool {
        matches!(self, Terrain::Ocean | Terrain::Shallows)
    }

    pub fn is_land(self) -> bool {
        !self.is_water()
    }
}

/// Travel heading between two adjacent cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

#[derive(Debug, Clone)]
pub struct Cell {
    pub terrain: Terrain,
    pub workers: u32,
    pub stock: Stock,
    pub island: Option<IslandId>,
}

impl Cell {
    fn ocean() -> Self {
        Self {
            terrain: Terrain::Ocean,
            workers: 0,
            stock: Stock::default(),
            island: None,
        }
    }
}

const EVEN_ROW_DELTAS: [(i32, i32); 6] =
    [(-1, 0), (-1, -1), (0, -1), (1, 0), (0, 1), (-1, 1)];
const ODD_ROW_DELTAS: [(i32, i32); 6] =
    [(-1, 0), (0, -1), (1, -1), (1, 0), (1, 1), (0, 1)];

/// Fixed-size cell storage. Topology is immutable after construction;
/// only cell contents (terrain, workers, stock, ownership) change.
pub struct HexGrid {
    rows: u32,
    columns: u32,
    cells: Vec<Cell>,
}

impl HexGrid {
    /// An all-ocean grid of `rows × columns` cells.
    pub fn new(rows: u32, columns: u32) -> Self {
        let cells = vec![Cell::ocean(); (rows * columns) as usize];
        Self {
            rows,
            columns,
            cells,
        }
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    fn index(&self, coord: HexCoord) -> Option<usize> {
        if coord.col < 0
            || coord.row < 0
            || coord.col >= self.columns as i32
            || coord.row >= self.rows as i32
        {
            return None;
        }
        Some((coord.row as u32 * self.columns + coord.col as u32) as usize)
    }

    pub fn contains(&self, coord: HexCoord) -> bool {
        self.index(coord).is_some()
    }

    pub fn get(&self, coord: HexCoord) -> Option<&Cell> {
        self.index(coord).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, coord: HexCoord) -> Option<&mut Cell> {
        self.index(coord).map(move |i| &mut self.cells[i])
    }

    pub fn terrain(&self, coord: HexCoord) -> Option<Terrain> {
        self.get(coord).map(|cell| cell.terrain)
    }

    /// Row-major coordinate walk, the canonical deterministic order.
    pub fn coords(&self) -> impl Iterator<Item = HexCoord> + '_ {
        (0..self.rows as i32)
            .flat_map(move |row| (0..self.columns as i32).map(move |col| HexCoord::new(col, row)))
    }

    /// The in-grid subset of the six parity-dependent neighbors.
    /// Off-grid positions are silently omitted, never an error.
    pub fn neighbors(&self, coord: HexCoord) -> Vec<HexCoord> {
        let deltas = if coord.row % 2 == 0 {
            &EVEN_ROW_DELTAS
        } else {
            &ODD_ROW_DELTAS
        };
        deltas
            .iter()
            .map(|&(dc, dr)| HexCoord::new(coord.col + dc, coord.row + dr))
            .filter(|&candidate| self.contains(candidate))
            .collect()
    }

    /// Heading for a single-cell step `from → to`, using the same
    /// parity tables as [`HexGrid::neighbors`]. `None` for non-adjacent
    /// pairs.
    pub fn direction_between(from: HexCoord, to: HexCoord) -> Option<Direction> {
        let delta = (to.col - from.col, to.row - from.row);
        let direction = if from.row % 2 == 0 {
            match delta {
                (1, 0) => Direction::East,
                (-1, 0) => Direction::West,
                (0, 1) => Direction::SouthEast,
                (0, -1) => Direction::NorthEast,
                (-1, 1) => Direction::SouthWest,
                (-1, -1) => Direction::NorthWest,
                _ => return None,
            }
        } else {
            match delta {
                (1, 0) => Direction::East,
                (-1, 0) => Direction::West,
                (1, 1) => Direction::SouthEast,
                (0, 1) => Direction::SouthWest,
                (0, -1) => Direction::NorthWest,
                (1, -1) => Direction::NorthEast,
                _ => return None,
            }
        };
        Some(direction)
    }

    /// Pixel origin of a cell for the rendering layer. Odd rows are
    /// staggered half a cell; rows overlap by a quarter cell height.
    /// Opaque to simulation logic.
    pub fn cell_origin(&self, coord: HexCoord, cell_size: (f32, f32)) -> (f32, f32) {
        let (width, height) = cell_size;
        let stagger = if coord.row % 2 == 0 { 0.0 } else { width / 2.0 };
        (
            coord.col as f32 * width + stagger,
            coord.row as f32 * height * 0.75,
        )
    }
}
