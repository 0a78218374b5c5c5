//! Price, production, and consumption parameters shared read-only by
//! every island and ship.

use crate::goods::{Good, GoodMap};

#[derive(Debug, Clone)]
pub struct Economy {
    pub base_prices: GoodMap<f64>,
    pub per_cap_consumption: GoodMap<f64>,
    pub per_cap_production: GoodMap<f64>,
}

impl Default for Economy {
    fn default() -> Self {
        Self {
            base_prices: GoodMap::from_fn(|good| match good {
                Good::Gold => 10.0,
                Good::Iron => 5.0,
                Good::Wood => 3.0,
                Good::Crops => 2.0,
                Good::Fish => 1.0,
            }),
            per_cap_consumption: GoodMap::from_fn(|good| match good {
                Good::Gold => 0.05,
                Good::Iron => 0.1,
                Good::Wood => 0.2,
                Good::Crops => 0.25,
                Good::Fish => 0.25,
            }),
            per_cap_production: GoodMap::filled(1.0),
        }
    }
}

impl Economy {
    /// Spot price under the given supply and demand.
    ///
    /// Callers must guarantee `supply > 0`; querying a price with no
    /// supply is a contract violation, not a recoverable condition.
    pub fn price(&self, good: Good, supply: f64, demand: f64) -> f64 {
        debug_assert!(supply > 0.0, "price queried with non-positive supply");
        self.base_prices[good] * (demand / supply)
    }
}
