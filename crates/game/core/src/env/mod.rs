//! Read-only inputs the controller consults besides state and player input.
//!
//! [`BossEnv`] bundles the validated [`BossConfig`] with the injected
//! [`RngOracle`] and the encounter seed, so the engine can roll dice without
//! hard coupling to a concrete generator.
mod rng;

pub use rng::{PcgRng, RngOracle, RollContext, compute_seed};

use crate::config::{BossConfig, BossTuning, RoomGeometry};

/// Aggregates configuration and randomness required by the controller.
#[derive(Clone, Copy)]
pub struct BossEnv<'a> {
    config: &'a BossConfig,
    rng: &'a dyn RngOracle,
    seed: u64,
}

impl<'a> BossEnv<'a> {
    pub fn new(config: &'a BossConfig, rng: &'a dyn RngOracle, seed: u64) -> Self {
        Self { config, rng, seed }
    }

    pub fn config(&self) -> &'a BossConfig {
        self.config
    }

    pub fn tuning(&self) -> &'a BossTuning {
        &self.config.tuning
    }

    pub fn geometry(&self) -> &'a RoomGeometry {
        &self.config.geometry
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform roll in `[0, 1)` for the given tick and decision.
    pub fn unit(&self, tick: u64, context: RollContext) -> f32 {
        self.rng.unit(compute_seed(self.seed, tick, context))
    }

    /// Returns true with probability `p` for the given tick and decision.
    pub fn chance(&self, tick: u64, context: RollContext, p: f32) -> bool {
        self.rng.chance(compute_seed(self.seed, tick, context), p)
    }

    /// Inclusive integer roll for the given tick and decision.
    pub fn range(&self, tick: u64, context: RollContext, min: u32, max: u32) -> u32 {
        self.rng
            .range(compute_seed(self.seed, tick, context), min, max)
    }
}

impl core::fmt::Debug for BossEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BossEnv")
            .field("config", self.config)
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}
