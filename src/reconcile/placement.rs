//! Placeholder placement for newly materialized nodes.
//!
//! The reconciler only ever assigns a position once, at materialization;
//! afterwards the position belongs to the presentation side (layout engines,
//! user drags) and survives every update that keeps the node desired.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::PlacementConfig;
use crate::store::Position;

/// Draws placeholder positions uniformly from `[-spread, spread]²`.
///
/// Seeded strategies produce the same placement sequence every run, which
/// keeps demo output and tests stable.
#[derive(Debug, Clone)]
pub struct PlacementStrategy {
    spread: f64,
    rng: StdRng,
}

impl PlacementStrategy {
    /// Strategy with default spread, seeded from OS entropy.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&PlacementConfig::default())
    }

    #[must_use]
    pub fn from_config(config: &PlacementConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            spread: config.spread,
            rng,
        }
    }

    /// Next placeholder position.
    pub fn place(&mut self) -> Position {
        Position::new(
            self.rng.random_range(-self.spread..=self.spread),
            self.rng.random_range(-self.spread..=self.spread),
        )
    }

    #[must_use]
    pub fn spread(&self) -> f64 {
        self.spread
    }
}

impl Default for PlacementStrategy {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_stay_within_bounds() {
        let mut strategy = PlacementStrategy::from_config(&PlacementConfig::new(2.5, None));
        for _ in 0..200 {
            let position = strategy.place();
            assert!(position.x.abs() <= 2.5);
            assert!(position.y.abs() <= 2.5);
        }
    }

    #[test]
    fn seeded_strategies_are_reproducible() {
        let config = PlacementConfig::new(1.0, Some(7));
        let mut first = PlacementStrategy::from_config(&config);
        let mut second = PlacementStrategy::from_config(&config);
        for _ in 0..10 {
            assert_eq!(first.place(), second.place());
        }
    }

    #[test]
    fn zero_spread_pins_to_origin() {
        let mut strategy = PlacementStrategy::from_config(&PlacementConfig::new(0.0, Some(1)));
        assert_eq!(strategy.place(), Position::new(0.0, 0.0));
    }
}
