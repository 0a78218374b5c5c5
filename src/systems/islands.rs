use anyhow::Result;

use crate::{
    engine::{System, SystemContext},
    rng::SystemRng,
    world::World,
};

/// Accumulates tick time into the world's day timer and runs the
/// daily island production/consumption update on every crossed day
/// boundary. A large tick can cross several boundaries; each one runs
/// a full day.
pub struct IslandSystem;

impl IslandSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for IslandSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for IslandSystem {
    fn name(&self) -> &str {
        "islands"
    }

    fn run(
        &mut self,
        ctx: &SystemContext,
        world: &mut World,
        _rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        world.day_timer_ms += ctx.dt_ms;
        while world.day_timer_ms >= world.day_length_ms() {
            world.day_timer_ms -= world.day_length_ms();
            world.run_island_day();
        }
        Ok(())
    }
}
