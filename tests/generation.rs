use std::path::PathBuf;

use tradewinds::{
    goods::Good,
    grid::Terrain,
    rng::RngManager,
    scenario::{Scenario, ScenarioLoader},
    World,
};

fn scenario_loader() -> ScenarioLoader {
    ScenarioLoader::new(env!("CARGO_MANIFEST_DIR"))
}

fn scenario_path() -> PathBuf {
    PathBuf::from("scenarios/archipelago.yaml")
}

fn build(scenario: &Scenario) -> World {
    let mut rng = RngManager::new(scenario.seed);
    scenario.build_world(&mut rng).expect("scenario validates")
}

#[test]
fn scenario_fixture_loads() {
    let scenario = scenario_loader()
        .load(scenario_path())
        .expect("scenario parses");
    assert_eq!(scenario.name, "archipelago");
    assert_eq!(scenario.grid.rows, 24);
    assert_eq!(scenario.grid.columns, 32);
}

#[test]
fn generation_is_deterministic_per_seed() {
    let scenario = scenario_loader().load(scenario_path()).unwrap();
    let world_a = build(&scenario);
    let world_b = build(&scenario);

    for coord in world_a.grid().coords() {
        assert_eq!(
            world_a.grid().terrain(coord),
            world_b.grid().terrain(coord),
            "terrain diverged at {coord:?}"
        );
        assert_eq!(
            world_a.grid().get(coord).unwrap().workers,
            world_b.grid().get(coord).unwrap().workers,
            "workforce diverged at {coord:?}"
        );
    }

    assert_eq!(world_a.islands().len(), world_b.islands().len());
    for (a, b) in world_a.islands().iter().zip(world_b.islands()) {
        assert_eq!(a.port(), b.port());
        assert_eq!(a.population(), b.population());
        for good in Good::ALL {
            assert_eq!(a.stock()[good], b.stock()[good]);
        }
    }

    assert_eq!(world_a.ships().len(), world_b.ships().len());
    for (a, b) in world_a.ships().iter().zip(world_b.ships()) {
        assert_eq!(a.home_port(), b.home_port());
        assert_eq!(a.away_port(), b.away_port());
        assert_eq!(a.route(), b.route());
    }
}

#[test]
fn every_port_belongs_to_its_island() {
    let scenario = scenario_loader().load(scenario_path()).unwrap();
    let world = build(&scenario);

    for island in world.islands() {
        let Some(port) = island.port() else {
            continue;
        };
        let cell = world.grid().get(port).expect("port is on the grid");
        assert_eq!(cell.terrain, Terrain::Port);
        assert_eq!(cell.island, Some(island.id()));
        assert_eq!(cell.workers, 0, "ports never receive workers");
    }
}

#[test]
fn ships_pair_distinct_ported_islands() {
    let scenario = scenario_loader().load(scenario_path()).unwrap();
    let world = build(&scenario);

    for ship in world.ships() {
        assert_ne!(ship.home_island(), ship.away_island());
        assert_eq!(world.grid().terrain(ship.home_port()), Some(Terrain::Port));
        assert_eq!(world.grid().terrain(ship.away_port()), Some(Terrain::Port));
        for leg in ship.route().legs() {
            let terrain = world.grid().terrain(leg.cell).unwrap();
            assert!(
                terrain.is_water() || terrain == Terrain::Port,
                "route crosses {terrain:?} at {:?}",
                leg.cell
            );
        }
    }
}

#[test]
fn route_cursor_cycles_back_to_start() {
    let scenario = scenario_loader().load(scenario_path()).unwrap();
    let world = build(&scenario);

    for ship in world.ships() {
        let mut route = ship.route().clone();
        let start = route.current();
        let start_cursor = route.cursor();
        for _ in 0..route.len() {
            route.advance();
        }
        assert_eq!(route.cursor(), start_cursor);
        assert_eq!(route.current(), start);
    }
}

#[test]
fn warmup_leaves_every_stock_non_negative() {
    let scenario = scenario_loader().load(scenario_path()).unwrap();
    let world = build(&scenario);

    for island in world.islands() {
        for good in Good::ALL {
            assert!(
                island.stock()[good] >= 0.0,
                "island {:?} holds negative {good:?}",
                island.id()
            );
        }
    }
}
