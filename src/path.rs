//! Terrain-constrained shortest paths and cyclic ship routes.

use std::collections::HashSet;

use crate::grid::{Direction, HexCoord, HexGrid, Terrain};

/// One visited cell and the arena index of the cell it was reached
/// from. Parent links are plain indices into the flat visit list, so
/// backtracking needs no entity references.
#[derive(Debug, Clone, Copy)]
struct VisitNode {
    coord: HexCoord,
    parent: Option<usize>,
}

/// Unweighted shortest path from `origin` to `destination` over cells
/// whose terrain is in `allowed`.
///
/// The origin is expanded regardless of its own terrain, and the
/// destination matches before terrain filtering - ports are valid
/// endpoints without being traversable water. Returns the full path
/// including both endpoints, minimal in edge count, or `None` when the
/// frontier exhausts without reaching the destination.
pub fn shortest_path(
    grid: &HexGrid,
    origin: HexCoord,
    destination: HexCoord,
    allowed: &[Terrain],
) -> Option<Vec<HexCoord>> {
    let mut nodes = vec![VisitNode {
        coord: origin,
        parent: None,
    }];
    let mut visited: HashSet<HexCoord> = HashSet::new();
    visited.insert(origin);
    let mut frontier: Vec<usize> = vec![0];

    loop {
        let mut next_frontier = Vec::new();
        for &index in &frontier {
            let coord = nodes[index].coord;
            for candidate in grid.neighbors(coord) {
                if candidate == destination {
                    nodes.push(VisitNode {
                        coord: candidate,
                        parent: Some(index),
                    });
                    return Some(backtrack(&nodes, nodes.len() - 1));
                }
                if !visited.insert(candidate) {
                    continue;
                }
                let Some(terrain) = grid.terrain(candidate) else {
                    continue;
                };
                if allowed.contains(&terrain) {
                    nodes.push(VisitNode {
                        coord: candidate,
                        parent: Some(index),
                    });
                    next_frontier.push(nodes.len() - 1);
                }
            }
        }
        if next_frontier.is_empty() {
            return None;
        }
        frontier = next_frontier;
    }
}

fn backtrack(nodes: &[VisitNode], tail: usize) -> Vec<HexCoord> {
    let mut path = Vec::new();
    let mut cursor = Some(tail);
    while let Some(index) = cursor {
        path.push(nodes[index].coord);
        cursor = nodes[index].parent;
    }
    path.reverse();
    path
}

/// A route leg: the cell being entered and the heading traveled to
/// reach it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Waypoint {
    pub cell: HexCoord,
    pub heading: Direction,
}

/// Fixed cyclic waypoint loop between two ports: the outbound path
/// plus its reversed interior, so a ship shuttles forever without any
/// direction inversion logic. Traversal never mutates the loop, only
/// the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    legs: Vec<Waypoint>,
    cursor: usize,
}

impl Route {
    /// Build the loop `home → away → home`, or `None` when no
    /// water path connects the two ports.
    pub fn between(
        grid: &HexGrid,
        home: HexCoord,
        away: HexCoord,
        allowed: &[Terrain],
    ) -> Option<Self> {
        let outbound = shortest_path(grid, home, away, allowed)?;
        let mut loop_cells = outbound.clone();
        if outbound.len() > 2 {
            loop_cells.extend(outbound[1..outbound.len() - 1].iter().rev().copied());
        }

        let mut previous = *loop_cells.last()?;
        let mut legs = Vec::with_capacity(loop_cells.len());
        for &cell in &loop_cells {
            let heading = HexGrid::direction_between(previous, cell)?;
            legs.push(Waypoint { cell, heading });
            previous = cell;
        }
        Some(Self { legs, cursor: 0 })
    }

    pub fn len(&self) -> usize {
        self.legs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }

    pub fn legs(&self) -> &[Waypoint] {
        &self.legs
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The waypoint the cursor currently rests on.
    pub fn current(&self) -> Waypoint {
        self.legs[self.cursor]
    }

    /// Step the cursor one leg forward, wrapping at the end of the
    /// loop, and return the new waypoint.
    pub fn advance(&mut self) -> Waypoint {
        self.cursor = (self.cursor + 1) % self.legs.len();
        self.legs[self.cursor]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WATER: [Terrain; 2] = [Terrain::Ocean, Terrain::Shallows];

    fn open_water(rows: u32, columns: u32) -> HexGrid {
        HexGrid::new(rows, columns)
    }

    /// Naive reference distance: expand level by level counting steps.
    fn flood_distance(grid: &HexGrid, origin: HexCoord, destination: HexCoord) -> Option<usize> {
        let mut seen = HashSet::new();
        seen.insert(origin);
        let mut frontier = vec![origin];
        let mut distance = 0;
        while !frontier.is_empty() {
            if frontier.contains(&destination) {
                return Some(distance);
            }
            let mut next = Vec::new();
            for coord in frontier {
                for neighbor in grid.neighbors(coord) {
                    if seen.insert(neighbor) {
                        next.push(neighbor);
                    }
                }
            }
            frontier = next;
            distance += 1;
        }
        None
    }

    #[test]
    fn path_endpoints_match_and_length_is_minimal() {
        let grid = open_water(7, 9);
        let pairs = [
            (HexCoord::new(0, 0), HexCoord::new(8, 6)),
            (HexCoord::new(2, 3), HexCoord::new(6, 1)),
            (HexCoord::new(1, 5), HexCoord::new(7, 2)),
        ];
        for (origin, destination) in pairs {
            let path = shortest_path(&grid, origin, destination, &WATER)
                .expect("open water is fully connected");
            assert_eq!(path.first().copied(), Some(origin));
            assert_eq!(path.last().copied(), Some(destination));
            let expected = flood_distance(&grid, origin, destination).unwrap();
            assert_eq!(path.len() - 1, expected, "{origin:?} -> {destination:?}");
        }
    }

    #[test]
    fn path_steps_are_adjacent() {
        let grid = open_water(6, 6);
        let path = shortest_path(
            &grid,
            HexCoord::new(0, 0),
            HexCoord::new(5, 5),
            &WATER,
        )
        .unwrap();
        for pair in path.windows(2) {
            assert!(
                grid.neighbors(pair[0]).contains(&pair[1]),
                "{:?} -> {:?} is not a single hex step",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn blocked_crossing_yields_no_path() {
        let mut grid = open_water(5, 5);
        for row in 0..5 {
            grid.get_mut(HexCoord::new(2, row)).unwrap().terrain = Terrain::Plains;
        }
        let result = shortest_path(
            &grid,
            HexCoord::new(0, 2),
            HexCoord::new(4, 2),
            &[Terrain::Ocean],
        );
        assert!(result.is_none(), "a full land column should block water routes");
    }

    #[test]
    fn endpoints_ignore_the_terrain_filter() {
        let mut grid = open_water(3, 5);
        grid.get_mut(HexCoord::new(0, 1)).unwrap().terrain = Terrain::Port;
        grid.get_mut(HexCoord::new(4, 1)).unwrap().terrain = Terrain::Port;
        let path = shortest_path(
            &grid,
            HexCoord::new(0, 1),
            HexCoord::new(4, 1),
            &WATER,
        )
        .expect("ports are valid endpoints without being water");
        assert_eq!(path.first().copied(), Some(HexCoord::new(0, 1)));
        assert_eq!(path.last().copied(), Some(HexCoord::new(4, 1)));
    }

    #[test]
    fn route_is_outbound_plus_reversed_interior() {
        let grid = open_water(3, 6);
        let home = HexCoord::new(0, 1);
        let away = HexCoord::new(5, 1);
        let outbound = shortest_path(&grid, home, away, &WATER).unwrap();
        let route = Route::between(&grid, home, away, &WATER).unwrap();
        assert_eq!(route.len(), outbound.len() * 2 - 2);
        assert_eq!(route.current().cell, home);
    }

    #[test]
    fn cursor_wraps_after_a_full_loop() {
        let grid = open_water(3, 6);
        let mut route = Route::between(
            &grid,
            HexCoord::new(0, 1),
            HexCoord::new(5, 1),
            &WATER,
        )
        .unwrap();
        let start = route.current();
        let start_cursor = route.cursor();
        for _ in 0..route.len() {
            route.advance();
        }
        assert_eq!(route.cursor(), start_cursor);
        assert_eq!(route.current(), start);
    }
}
