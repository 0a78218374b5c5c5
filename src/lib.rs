pub mod economy;
pub mod engine;
pub mod goods;
pub mod grid;
pub mod island;
pub mod path;
pub mod rng;
pub mod scenario;
pub mod ship;
pub mod snapshot;
pub mod systems;
pub mod world;
mod worldgen;

pub use scenario::{Scenario, ScenarioError, ScenarioLoader};
pub use world::World;
