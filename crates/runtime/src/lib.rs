//! Frame driver for the lantern encounter.
//!
//! The core crate decides what the boss does; this crate owns everything
//! around it. Consumers build an [`Encounter`] and feed it one
//! [`InputActions`] set per frame, or hand a scripted [`Scenario`] to
//! [`Simulation`].
//!
//! Modules are organized by responsibility:
//! - [`player`] turns held actions into player kinematics and light state
//! - [`encounter`] runs the exploration, fight and ending phases
//! - [`events`] describes what happened each frame
//! - [`simulation`] replays scenarios and summarizes them
//!
//! [`Scenario`]: lantern_content::Scenario
pub mod config;
pub mod encounter;
pub mod error;
pub mod events;
pub mod player;
pub mod simulation;

pub use config::{ArenaConfig, PlayerTuning, RuntimeConfig};
pub use encounter::{Encounter, EncounterPhase};
pub use error::{Result, RuntimeError};
pub use events::GameEvent;
pub use lantern_core::InputActions;
pub use player::PlayerController;
pub use simulation::{BossSummary, EncounterStats, PlayerSummary, Simulation, SimulationReport};
