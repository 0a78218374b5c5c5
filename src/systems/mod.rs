mod islands;
mod ships;

pub use islands::IslandSystem;
pub use ships::ShipSystem;
