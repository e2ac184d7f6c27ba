//! Data-driven content for the lantern encounter.
//!
//! This crate owns everything that lives in data files rather than code:
//! - Boss tuning and room geometry (TOML, see [`loaders::ConfigLoader`])
//! - Scripted encounter scenarios (RON, see [`loaders::ScenarioLoader`])
//!
//! Content is read once at startup and handed to the runtime. Nothing here is
//! consulted during a tick.

pub mod scenario;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use scenario::{Scenario, Segment};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadResult, ScenarioLoader};
