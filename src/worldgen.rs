//! Randomized archipelago generation - continent growth, terrain
//! painting, coastline and port derivation, settlement, and ship
//! launching.

use rand::{seq::SliceRandom, Rng};

use crate::grid::{HexCoord, HexGrid, Terrain};
use crate::island::{Island, IslandId};
use crate::path::Route;
use crate::scenario::{ContinentConfig, PopulationRange};
use crate::ship::TradeShip;

/// Interior margin kept clear of continent seeds so every landmass
/// has room to grow before reaching the map edge.
pub(crate) const SEED_MARGIN: u32 = 3;

/// Frontier expansion gives up after this many draws, so a crowded
/// grid yields smaller continents instead of an unbounded loop.
const EXPANSION_ATTEMPT_CAP: u32 = 200;

/// Terrains ships may traverse between ports.
pub(crate) const SHIP_LANES: [Terrain; 2] = [Terrain::Ocean, Terrain::Shallows];

/// Grow every continent's landmass and return one cell list per
/// continent, in seed order. Cells are claimed from open ocean only,
/// so continents never overwrite one another.
pub(crate) fn paint_continents(
    grid: &mut HexGrid,
    config: &ContinentConfig,
    rng: &mut impl Rng,
) -> Vec<Vec<HexCoord>> {
    let count = rng.gen_range(config.min_count..=config.max_count) as usize;
    let seeds = seed_spots(grid, count, rng);
    seeds
        .into_iter()
        .map(|seed| grow_continent(grid, config, seed, rng))
        .collect()
}

/// Candidate seed coordinates sampled without replacement from the
/// grid interior.
fn seed_spots(grid: &HexGrid, count: usize, rng: &mut impl Rng) -> Vec<HexCoord> {
    let margin = SEED_MARGIN as i32;
    let mut interior = Vec::new();
    for row in margin..grid.rows() as i32 - margin {
        for col in margin..grid.columns() as i32 - margin {
            interior.push(HexCoord::new(col, row));
        }
    }
    interior.choose_multiple(rng, count).copied().collect()
}

fn grow_continent(
    grid: &mut HexGrid,
    config: &ContinentConfig,
    seed: HexCoord,
    rng: &mut impl Rng,
) -> Vec<HexCoord> {
    let mut continent = Vec::new();
    let budget = rng.gen_range(config.min_cells..=config.max_cells);
    let mountain_count = rng.gen_range(0..=config.max_mountains);

    // An earlier continent may have grown over this seed; a stolen
    // seed yields an empty continent rather than contested cells.
    if grid.terrain(seed) != Some(Terrain::Ocean) {
        return continent;
    }

    if mountain_count > 0 {
        claim(grid, seed, Terrain::Mountains, &mut continent);
        for _ in 1..mountain_count {
            let latest = *continent.last().unwrap_or(&seed);
            let open: Vec<HexCoord> = ocean_neighbors(grid, latest);
            let Some(&next) = open.choose(rng) else {
                break;
            };
            claim(grid, next, Terrain::Mountains, &mut continent);
        }
        // Every peak gets a full skirt of hills.
        let peaks = continent.clone();
        for peak in peaks {
            for neighbor in ocean_neighbors(grid, peak) {
                claim(grid, neighbor, Terrain::Hills, &mut continent);
            }
        }
    } else {
        claim(grid, seed, Terrain::Jungle, &mut continent);
    }

    // Ring the hills and the jungle seed with jungle.
    let greens: Vec<HexCoord> = continent
        .iter()
        .copied()
        .filter(|&coord| {
            matches!(
                grid.terrain(coord),
                Some(Terrain::Hills) | Some(Terrain::Jungle)
            )
        })
        .collect();
    for green in greens {
        for neighbor in ocean_neighbors(grid, green) {
            claim(grid, neighbor, Terrain::Jungle, &mut continent);
        }
    }

    // Randomized frontier expansion toward the size budget. Mountains
    // never expand; plains and jungle growth both rejoin the frontier.
    let mut frontier: Vec<HexCoord> = continent
        .iter()
        .copied()
        .filter(|&coord| {
            matches!(
                grid.terrain(coord),
                Some(Terrain::Hills) | Some(Terrain::Jungle)
            )
        })
        .collect();
    let mut remaining = budget;
    let mut attempts = 0;
    while remaining > 0 && attempts < EXPANSION_ATTEMPT_CAP {
        attempts += 1;
        let Some(&expander) = frontier.choose(rng) else {
            break;
        };
        let open = ocean_neighbors(grid, expander);
        if let Some(&grown) = open.choose(rng) {
            let terrain = if rng.gen_bool(0.5) {
                Terrain::Plains
            } else {
                Terrain::Jungle
            };
            claim(grid, grown, terrain, &mut continent);
            frontier.push(grown);
            remaining -= 1;
        }
    }

    continent
}

fn claim(grid: &mut HexGrid, coord: HexCoord, terrain: Terrain, continent: &mut Vec<HexCoord>) {
    if let Some(cell) = grid.get_mut(coord) {
        cell.terrain = terrain;
        continent.push(coord);
    }
}

fn ocean_neighbors(grid: &HexGrid, coord: HexCoord) -> Vec<HexCoord> {
    grid.neighbors(coord)
        .into_iter()
        .filter(|&n| grid.terrain(n) == Some(Terrain::Ocean))
        .collect()
}

/// Convert every ocean cell bordering land into shallows and fold the
/// new coast into its continent. The first plains cell found touching
/// open ocean is promoted to the continent's single port; a continent
/// with no such cell stays portless.
pub(crate) fn carve_coastlines(
    grid: &mut HexGrid,
    continents: &mut [Vec<HexCoord>],
) -> Vec<Option<HexCoord>> {
    let mut ports = Vec::with_capacity(continents.len());
    for continent in continents.iter_mut() {
        let mut port = None;
        let mut coast = Vec::new();
        for &cell in continent.iter() {
            for neighbor in grid.neighbors(cell) {
                if grid.terrain(neighbor) != Some(Terrain::Ocean) {
                    continue;
                }
                if port.is_none() && grid.terrain(cell) == Some(Terrain::Plains) {
                    if let Some(promoted) = grid.get_mut(cell) {
                        promoted.terrain = Terrain::Port;
                        port = Some(cell);
                    }
                }
                if let Some(shallow) = grid.get_mut(neighbor) {
                    shallow.terrain = Terrain::Shallows;
                    coast.push(neighbor);
                }
            }
        }
        continent.extend(coast);
        ports.push(port);
    }
    ports
}

/// Turn each continent into an island: claim its cells, roll a
/// population, and scatter the workforce.
pub(crate) fn settle_islands(
    grid: &mut HexGrid,
    continents: Vec<Vec<HexCoord>>,
    ports: &[Option<HexCoord>],
    population: &PopulationRange,
    rng: &mut impl Rng,
) -> Vec<Island> {
    let mut islands = Vec::with_capacity(continents.len());
    for (index, cells) in continents.into_iter().enumerate() {
        let id = IslandId::new(index as u32);
        for &coord in &cells {
            if let Some(cell) = grid.get_mut(coord) {
                cell.island = Some(id);
            }
        }
        let citizens = rng.gen_range(population.min..=population.max);
        let island = Island::new(id, cells, ports.get(index).copied().flatten(), citizens);
        island.assign_workers(grid, rng);
        islands.push(island);
    }
    islands
}

/// One ship per ordered pair of mutually reachable ports. Portless
/// islands and unreachable pairs simply launch nothing.
pub(crate) fn launch_ships(grid: &HexGrid, islands: &[Island], capacity: f64) -> Vec<TradeShip> {
    let mut ships = Vec::new();
    for home in islands {
        let Some(home_port) = home.port() else {
            continue;
        };
        for away in islands {
            if away.id() == home.id() {
                continue;
            }
            let Some(away_port) = away.port() else {
                continue;
            };
            if let Some(route) = Route::between(grid, home_port, away_port, &SHIP_LANES) {
                ships.push(TradeShip::new(
                    home_port,
                    away_port,
                    home.id(),
                    away.id(),
                    route,
                    capacity,
                ));
            }
        }
    }
    ships
}
