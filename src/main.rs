use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use tradewinds::{
    engine::{EngineBuilder, EngineSettings},
    rng::RngManager,
    scenario::ScenarioLoader,
    systems::{IslandSystem, ShipSystem},
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Archipelago trade simulation runner")]
struct Cli {
    /// Path to the scenario YAML file
    #[arg(long, default_value = "scenarios/archipelago.yaml")]
    scenario: PathBuf,

    /// Override tick count (uses scenario default when omitted)
    #[arg(long)]
    ticks: Option<u64>,

    /// Override the scenario seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override snapshot interval in ticks
    #[arg(long)]
    snapshot_interval: Option<u64>,

    /// Directory for snapshots
    #[arg(long)]
    snapshot_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let loader = ScenarioLoader::new(".");
    let scenario = loader.load(&cli.scenario)?;
    let seed = cli.seed.unwrap_or(scenario.seed);
    let mut generation_rng = RngManager::new(seed);
    let mut world = scenario.build_world(&mut generation_rng)?;
    let ticks = scenario.ticks(cli.ticks);
    let snapshot_interval = cli
        .snapshot_interval
        .unwrap_or(scenario.snapshot_interval_ticks);
    let snapshot_dir = cli
        .snapshot_dir
        .unwrap_or_else(|| PathBuf::from("snapshots"));

    let settings = EngineSettings {
        scenario_name: scenario.name.clone(),
        seed,
        snapshot_interval_ticks: snapshot_interval,
        snapshot_dir,
    };

    let mut engine = EngineBuilder::new(settings)
        .with_system(IslandSystem::new())
        .with_system(ShipSystem::new())
        .build();

    engine.run(&mut world, ticks)?;
    println!(
        "Scenario '{}' completed for {} ticks: {} islands, {} ships, population {}",
        scenario.name,
        ticks,
        world.islands().len(),
        world.ships().len(),
        world.total_population()
    );
    Ok(())
}
