use anyhow::Result;

use crate::{
    engine::{System, SystemContext},
    rng::SystemRng,
    world::World,
};

/// Advances every ship by the tick's elapsed time. Ships run one at a
/// time, so two ships calling at the same port in the same tick touch
/// the island stock strictly in sequence.
pub struct ShipSystem;

impl ShipSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ShipSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for ShipSystem {
    fn name(&self) -> &str {
        "trade"
    }

    fn run(
        &mut self,
        ctx: &SystemContext,
        world: &mut World,
        rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        world.advance_ships(ctx.dt_ms, rng);
        Ok(())
    }
}
