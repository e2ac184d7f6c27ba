//! Sound and light based perception of the player.

use crate::config::DetectionTuning;
use crate::state::{AiState, BossState, LightMode, PlayerSnapshot};

/// What the boss knows about the player at the start of a tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Perception {
    /// Distance from the boss to the player's top-left corner, before movement.
    pub distance: f32,
    pub detected: bool,
    /// Flashlight on in either mode.
    pub lit: bool,
    /// Player is walking upright.
    pub noisy: bool,
}

/// Computes detection for this tick. Light always reveals the player; in the
/// dark the boss hears within a range scaled by how much noise the player makes.
pub fn perceive(boss: &BossState, player: &PlayerSnapshot, tuning: &DetectionTuning) -> Perception {
    let distance = boss.position.distance(player.position);
    let lit = player.light() != LightMode::Dark;
    let detected = lit || distance < tuning.hearing_range * player.noise_modifier(tuning);

    Perception {
        distance,
        detected,
        lit,
        noisy: player.is_noisy(tuning),
    }
}

/// Re-evaluates chase versus wander, carrying the countdown across.
///
/// The strike sequence is never overridden here. Returns true on the edge into
/// `Chase`.
pub fn reassess(ai: &mut AiState, detected: bool) -> bool {
    if ai.in_strike_sequence() {
        return false;
    }

    let was_chasing = matches!(ai, AiState::Chase { .. });
    let countdown = ai.countdown();
    *ai = if detected {
        AiState::Chase {
            attack_ready_in: countdown,
        }
    } else {
        AiState::Wander {
            repath_in: countdown,
        }
    };

    detected && !was_chasing
}
