//! Deterministic boss simulation shared by the runtime and offline tools.
//!
//! `lantern-core` defines the canonical rules for the lantern boss encounter:
//! stealth detection, stair-constrained pathing, the telegraphed vine strike,
//! light-beam damage and the altar activation. All boss state mutation flows
//! through [`engine::BossController`], which returns the next state together
//! with an effect list the caller applies. Nothing in this crate performs I/O
//! or reads ambient time or randomness.
pub mod activation;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;

pub use activation::{ActivationError, AltarRequirements, activate};
pub use config::{BossConfig, BossTuning, ConfigError, RoomGeometry};
pub use engine::{BossController, DamageSources, Ending, PlayerDamage, TickEffects, TickOutcome};
pub use env::{BossEnv, PcgRng, RngOracle, RollContext, compute_seed};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    AiPhase, AiState, BossState, InputActions, Inventory, InventoryError, Level, LightMode,
    MemoryItem, Mutter, MutterLine, PlayerFlags, PlayerSnapshot, Vec2, VineAttack,
};
