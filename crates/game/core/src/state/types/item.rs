//! Memory fragments the player gathers before the altar can be lit.

use arrayvec::ArrayVec;

use crate::error::{ErrorSeverity, GameError};

/// Collectible memory fragment.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum MemoryItem {
    Yearbook,
    TrophyShard,
    ToyShard,
    BeltBuckle,
    DiaryPage,
}

impl MemoryItem {
    pub fn label(&self) -> &'static str {
        match self {
            MemoryItem::Yearbook => "Graduation Yearbook",
            MemoryItem::TrophyShard => "Broken Certificate Shard",
            MemoryItem::ToyShard => "Toy Fragment",
            MemoryItem::BeltBuckle => "Belt Buckle",
            MemoryItem::DiaryPage => "Diary Page",
        }
    }

    /// Returns true for the four shards offered at the altar.
    pub fn is_shard(&self) -> bool {
        !matches!(self, MemoryItem::Yearbook)
    }
}

/// Errors raised when modifying an [`Inventory`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    #[error("inventory is full ({capacity} slots)")]
    Full { capacity: usize },
}

impl GameError for InventoryError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            InventoryError::Full { .. } => "INVENTORY_FULL",
        }
    }
}

/// Set of collected memory fragments. Each fragment is held at most once.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    items: ArrayVec<MemoryItem, { Inventory::CAPACITY }>,
}

impl Inventory {
    pub const CAPACITY: usize = 8;

    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `item`. Returns `Ok(false)` if it was already held.
    pub fn collect(&mut self, item: MemoryItem) -> Result<bool, InventoryError> {
        if self.contains(item) {
            return Ok(false);
        }
        self.items.try_push(item).map_err(|_| InventoryError::Full {
            capacity: Self::CAPACITY,
        })?;
        Ok(true)
    }

    pub fn contains(&self, item: MemoryItem) -> bool {
        self.items.contains(&item)
    }

    pub fn iter(&self) -> impl Iterator<Item = MemoryItem> + '_ {
        self.items.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<MemoryItem> for Inventory {
    /// Duplicates are dropped; items past capacity are ignored.
    fn from_iter<I: IntoIterator<Item = MemoryItem>>(iter: I) -> Self {
        let mut inventory = Inventory::new();
        for item in iter {
            if inventory.collect(item).is_err() {
                break;
            }
        }
        inventory
    }
}
