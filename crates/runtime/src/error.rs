//! Errors surfaced by the runtime API.
use lantern_core::{ActivationError, ConfigError};
use thiserror::Error;

use crate::encounter::EncounterPhase;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("the altar is {distance:.0} units away, out of reach")]
    AltarOutOfReach { distance: f32 },

    #[error("the altar cannot be used during {phase}")]
    AltarUnavailable { phase: EncounterPhase },

    #[error("a fight cannot start with the boss at {health} health")]
    InvalidBossHealth { health: f32 },

    #[error(transparent)]
    Activation(#[from] ActivationError),

    #[error("boss config rejected")]
    Config(#[source] ConfigError),
}
