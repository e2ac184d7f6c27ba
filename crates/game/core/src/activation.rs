//! Altar activation: the only way a dormant boss enters the fight.
//!
//! The altar demands a fixed offering of memory fragments. Once satisfied, the
//! boss is reset to full health at its spawn point and begins wandering after a
//! short delay.

use arrayvec::ArrayVec;
use tracing::info;

use crate::config::BossConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{AiState, BossState, Inventory, MemoryItem, VineAttack};

/// Items the altar requires before it wakes the boss.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AltarRequirements {
    items: ArrayVec<MemoryItem, { Inventory::CAPACITY }>,
}

impl Default for AltarRequirements {
    /// All four shards plus the yearbook.
    fn default() -> Self {
        Self::new([
            MemoryItem::TrophyShard,
            MemoryItem::ToyShard,
            MemoryItem::BeltBuckle,
            MemoryItem::DiaryPage,
            MemoryItem::Yearbook,
        ])
    }
}

impl AltarRequirements {
    /// Duplicates are ignored; anything past capacity is dropped.
    pub fn new(items: impl IntoIterator<Item = MemoryItem>) -> Self {
        let mut required: ArrayVec<MemoryItem, { Inventory::CAPACITY }> = ArrayVec::new();
        for item in items {
            if !required.contains(&item) && required.try_push(item).is_err() {
                break;
            }
        }
        Self { items: required }
    }

    pub fn items(&self) -> &[MemoryItem] {
        &self.items
    }

    /// Required items the inventory lacks, in requirement order.
    pub fn missing(&self, inventory: &Inventory) -> Vec<MemoryItem> {
        self.items
            .iter()
            .copied()
            .filter(|item| !inventory.contains(*item))
            .collect()
    }

    pub fn is_satisfied_by(&self, inventory: &Inventory) -> bool {
        self.items.iter().all(|item| inventory.contains(*item))
    }
}

/// Errors returned by [`activate`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActivationError {
    #[error("the altar still needs {} item(s): {missing:?}", .missing.len())]
    MissingItems { missing: Vec<MemoryItem> },

    #[error("the boss is already awake")]
    AlreadyActive,
}

impl GameError for ActivationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            ActivationError::MissingItems { .. } => "ACTIVATION_MISSING_ITEMS",
            ActivationError::AlreadyActive => "ACTIVATION_ALREADY_ACTIVE",
        }
    }
}

/// Wakes the boss if the inventory satisfies the altar.
///
/// On success the boss is active at full health on its spawn point, wandering
/// with the configured activation delay, with no stun and no vine in flight.
/// A defeated boss may be reactivated; a living active one may not.
///
/// # Errors
///
/// [`ActivationError::AlreadyActive`] if the boss is already fighting, or
/// [`ActivationError::MissingItems`] listing what the inventory lacks.
pub fn activate(
    boss: &mut BossState,
    inventory: &Inventory,
    requirements: &AltarRequirements,
    config: &BossConfig,
) -> Result<(), ActivationError> {
    if boss.active && boss.is_alive() {
        return Err(ActivationError::AlreadyActive);
    }

    let missing = requirements.missing(inventory);
    if !missing.is_empty() {
        return Err(ActivationError::MissingItems { missing });
    }

    boss.active = true;
    boss.health = config.tuning.max_health;
    boss.position = config.geometry.spawn;
    boss.ai = AiState::Wander {
        repath_in: config.tuning.activation_delay,
    };
    boss.stun = None;
    boss.vine = VineAttack::default();

    info!(
        x = boss.position.x,
        y = boss.position.y,
        health = boss.health,
        "boss activated at the altar"
    );
    Ok(())
}
