//! Events describing what happened during a frame.
//!
//! The encounter appends events as it applies the boss controller's effects;
//! clients read them to drive sound, screen shake and dialogue.

use lantern_core::{DamageSources, Ending};
use serde::{Deserialize, Serialize};

/// High-level encounter events, stamped with the frame they happened on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// The altar accepted the offering, or the encounter started mid-fight.
    BossActivated { frame: u64 },

    /// The boss switched into pursuit.
    PlayerDetected { frame: u64 },

    /// The focused beam burned the boss.
    BossHit { frame: u64, health: f32 },

    /// Vine and contact damage applied to the player.
    PlayerDamaged {
        frame: u64,
        amount: f32,
        sources: DamageSources,
        health: f32,
    },

    /// Boss health reached zero; the wither ending follows after a delay.
    BossDefeated { frame: u64 },

    /// The encounter is over.
    EndingReached { frame: u64, ending: Ending },
}

impl GameEvent {
    pub fn frame(&self) -> u64 {
        match self {
            GameEvent::BossActivated { frame }
            | GameEvent::PlayerDetected { frame }
            | GameEvent::BossHit { frame, .. }
            | GameEvent::PlayerDamaged { frame, .. }
            | GameEvent::BossDefeated { frame }
            | GameEvent::EndingReached { frame, .. } => *frame,
        }
    }

    /// Events worth keeping in a run summary. Continuous beam and contact
    /// damage happen every frame and are only counted.
    pub fn is_milestone(&self) -> bool {
        match self {
            GameEvent::BossHit { .. } => false,
            GameEvent::PlayerDamaged { sources, .. } => sources.contains(DamageSources::VINE),
            _ => true,
        }
    }
}
