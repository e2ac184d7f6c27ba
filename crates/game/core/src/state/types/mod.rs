mod boss;
mod common;
mod input;
mod item;
mod player;

pub use boss::{AiPhase, AiState, BossState, Mutter, MutterLine, VineAttack};
pub use common::{Level, Vec2};
pub use input::InputActions;
pub use item::{Inventory, InventoryError, MemoryItem};
pub use player::{LightMode, PlayerFlags, PlayerSnapshot};
