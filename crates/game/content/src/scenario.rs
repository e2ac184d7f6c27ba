//! Scripted encounter scenarios.
//!
//! A scenario fixes the starting conditions of an encounter and a timeline of
//! held inputs. Replaying the same scenario with the same seed always produces
//! the same run.

use lantern_core::{InputActions, Inventory, MemoryItem, Vec2};

/// A stretch of ticks during which the same actions are held.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    pub ticks: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub actions: InputActions,
    /// Use the altar on the first tick of this segment.
    #[cfg_attr(feature = "serde", serde(default))]
    pub interact: bool,
}

impl Segment {
    pub fn new(ticks: u32, actions: InputActions) -> Self {
        Self {
            ticks,
            actions,
            interact: false,
        }
    }

    pub fn interacting(mut self) -> Self {
        self.interact = true;
        self
    }
}

/// Starting conditions plus an input timeline.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scenario {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub seed: u64,
    pub player_start: Vec2,
    /// Fragments already in the player's pockets.
    #[cfg_attr(feature = "serde", serde(default))]
    pub inventory: Vec<MemoryItem>,
    /// Start mid-fight instead of in exploration.
    #[cfg_attr(feature = "serde", serde(default))]
    pub boss_active: bool,
    /// Overrides the configured spawn point.
    #[cfg_attr(feature = "serde", serde(default))]
    pub boss_position: Option<Vec2>,
    /// Overrides the boss's starting health; only meaningful with `boss_active`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub boss_health: Option<f32>,
    /// Overrides the player's starting battery.
    #[cfg_attr(feature = "serde", serde(default))]
    pub battery: Option<f32>,
    pub segments: Vec<Segment>,
}

impl Scenario {
    pub fn new(name: impl Into<String>, seed: u64, player_start: Vec2) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            seed,
            player_start,
            inventory: Vec::new(),
            boss_active: false,
            boss_position: None,
            boss_health: None,
            battery: None,
            segments: Vec::new(),
        }
    }

    pub fn with_inventory(mut self, items: impl IntoIterator<Item = MemoryItem>) -> Self {
        self.inventory = items.into_iter().collect();
        self
    }

    /// Starts the boss awake, optionally at a given position and health.
    pub fn with_active_boss(mut self, position: Option<Vec2>, health: Option<f32>) -> Self {
        self.boss_active = true;
        self.boss_position = position;
        self.boss_health = health;
        self
    }

    pub fn with_battery(mut self, battery: f32) -> Self {
        self.battery = Some(battery);
        self
    }

    pub fn then(mut self, segment: Segment) -> Self {
        self.segments.push(segment);
        self
    }

    /// Length of the whole timeline.
    pub fn total_ticks(&self) -> u64 {
        self.segments.iter().map(|s| u64::from(s.ticks)).sum()
    }

    /// Starting inventory. Duplicates collapse and overflow is dropped.
    pub fn starting_inventory(&self) -> Inventory {
        self.inventory.iter().copied().collect()
    }

    /// Held actions and altar intent for every tick, in order.
    pub fn timeline(&self) -> impl Iterator<Item = (InputActions, bool)> + '_ {
        self.segments.iter().flat_map(|segment| {
            (0..segment.ticks).map(move |i| (segment.actions, segment.interact && i == 0))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeline_expands_segments() {
        let scenario = Scenario::new("walk", 1, Vec2::new(500.0, 400.0))
            .then(Segment::new(2, InputActions::RIGHT).interacting())
            .then(Segment::new(3, InputActions::CROUCH));

        assert_eq!(scenario.total_ticks(), 5);
        let ticks: Vec<_> = scenario.timeline().collect();
        assert_eq!(
            ticks,
            vec![
                (InputActions::RIGHT, true),
                (InputActions::RIGHT, false),
                (InputActions::CROUCH, false),
                (InputActions::CROUCH, false),
                (InputActions::CROUCH, false),
            ]
        );
    }

    #[test]
    fn starting_inventory_collapses_duplicates() {
        let scenario = Scenario::new("dupes", 1, Vec2::ZERO).with_inventory([
            MemoryItem::Yearbook,
            MemoryItem::ToyShard,
            MemoryItem::Yearbook,
        ]);

        let inventory = scenario.starting_inventory();
        assert_eq!(inventory.len(), 2);
        assert!(inventory.contains(MemoryItem::ToyShard));
    }
}
