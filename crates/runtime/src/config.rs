//! Runtime-side tuning: player kinematics and the arena around the boss.

use lantern_core::Vec2;
use serde::{Deserialize, Serialize};

/// Player movement and flashlight constants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Velocity gained per tick while a direction is held.
    pub acceleration: f32,
    /// Velocity multiplier per tick while no direction is held.
    pub friction: f32,
    pub walk_speed: f32,
    pub crouch_speed: f32,
    /// Speeds below this snap to zero.
    pub min_velocity: f32,
    pub max_battery: f32,
    /// Battery spent per tick while the focused beam is lit.
    pub beam_drain: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            acceleration: 0.8,
            friction: 0.8,
            walk_speed: 5.0,
            crouch_speed: 2.0,
            min_velocity: 0.1,
            max_battery: 100.0,
            beam_drain: 0.3,
        }
    }
}

/// The hall the encounter takes place in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub width: f32,
    /// Center of the altar.
    pub altar: Vec2,
    /// Maximum distance from the player's center to the altar for an offering.
    pub altar_reach: f32,
    /// Frames between the boss dying and the wither ending.
    pub wither_delay: u32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 1600.0,
            altar: Vec2::new(740.0, 515.0),
            altar_reach: 100.0,
            wither_delay: 120,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub player: PlayerTuning,
    pub arena: ArenaConfig,
}
