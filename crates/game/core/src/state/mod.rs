//! Boss and player state the controller reads and produces.
//!
//! [`BossState`] is the only state the controller owns. The player arrives as
//! a read-only [`PlayerSnapshot`] each tick; runtime layers keep their own
//! authoritative player and only hand this view to the engine.
pub mod types;

pub use types::{
    AiPhase, AiState, BossState, InputActions, Inventory, InventoryError, Level, LightMode,
    MemoryItem, Mutter, MutterLine, PlayerFlags, PlayerSnapshot, Vec2, VineAttack,
};
