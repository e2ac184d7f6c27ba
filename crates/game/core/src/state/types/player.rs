use bitflags::bitflags;

use crate::config::{DetectionTuning, RoomGeometry};

use super::common::Vec2;

bitflags! {
    /// Posture and flashlight switches of the player for one tick.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct PlayerFlags: u8 {
        const FACING_RIGHT = 1 << 0;
        const CROUCHING    = 1 << 1;
        const FLASHLIGHT   = 1 << 2;
        const HIGH_BEAM    = 1 << 3;
    }
}

/// How the player is lighting the room, as seen by the boss.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum LightMode {
    Dark,
    /// Flashlight on, wide cone.
    Lit,
    /// Flashlight on with the focused high beam.
    Focused,
}

/// Read-only view of the player the controller receives each tick.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerSnapshot {
    /// Top-left corner of the player's box.
    pub position: Vec2,
    pub size: Vec2,
    pub velocity_x: f32,
    pub flags: PlayerFlags,
    pub battery: f32,
    pub health: f32,
}

impl PlayerSnapshot {
    pub const DEFAULT_SIZE: Vec2 = Vec2::new(40.0, 80.0);

    /// Standing, facing right, full battery and health, flashlight off.
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            size: Self::DEFAULT_SIZE,
            velocity_x: 0.0,
            flags: PlayerFlags::FACING_RIGHT,
            battery: 100.0,
            health: 100.0,
        }
    }

    pub fn with_flags(mut self, flags: PlayerFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_velocity(mut self, velocity_x: f32) -> Self {
        self.velocity_x = velocity_x;
        self
    }

    pub fn with_battery(mut self, battery: f32) -> Self {
        self.battery = battery;
        self
    }

    pub fn with_health(mut self, health: f32) -> Self {
        self.health = health;
        self
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.position.x + self.size.x / 2.0,
            self.position.y + self.size.y / 2.0,
        )
    }

    /// Where the flashlight beam originates.
    pub fn light_source(&self, geometry: &RoomGeometry) -> Vec2 {
        Vec2::new(
            self.position.x + self.size.x / 2.0,
            self.position.y + geometry.light_source_offset_y,
        )
    }

    pub fn facing_right(&self) -> bool {
        self.flags.contains(PlayerFlags::FACING_RIGHT)
    }

    pub fn is_crouching(&self) -> bool {
        self.flags.contains(PlayerFlags::CROUCHING)
    }

    pub fn is_moving(&self, detection: &DetectionTuning) -> bool {
        self.velocity_x.abs() > detection.move_epsilon
    }

    /// Moving upright; a stationary or sneaking player is quiet.
    pub fn is_noisy(&self, detection: &DetectionTuning) -> bool {
        self.is_moving(detection) && !self.is_crouching()
    }

    /// Flashlight state. The high-beam switch alone does nothing while the
    /// flashlight is off.
    pub fn light(&self) -> LightMode {
        if !self.flags.contains(PlayerFlags::FLASHLIGHT) {
            LightMode::Dark
        } else if self.flags.contains(PlayerFlags::HIGH_BEAM) {
            LightMode::Focused
        } else {
            LightMode::Lit
        }
    }

    /// Returns true if the focused beam is on and powered.
    pub fn beam_powered(&self) -> bool {
        self.light() == LightMode::Focused && self.battery > 0.0
    }

    /// Returns true if `point` lies on the side the player is facing.
    pub fn faces(&self, origin: Vec2, point: Vec2) -> bool {
        if self.facing_right() {
            point.x > origin.x
        } else {
            point.x < origin.x
        }
    }

    /// Multiplier applied to the boss's hearing range.
    pub fn noise_modifier(&self, detection: &DetectionTuning) -> f32 {
        if !self.is_moving(detection) {
            detection.noise_still
        } else if self.is_crouching() {
            detection.noise_crouched
        } else {
            detection.noise_upright
        }
    }
}
