//! Telegraphed vine strike: windup, attack, cooldown.

use tracing::debug;

use super::detection::Perception;
use crate::config::BossTuning;
use crate::state::{AiState, BossState, PlayerSnapshot, VineAttack};

/// Frenzy applies only while the player keeps the light off.
fn frenzied(boss: &BossState, perception: &Perception, tuning: &BossTuning) -> bool {
    !perception.lit && boss.health < tuning.frenzy_health
}

fn windup_duration(boss: &BossState, perception: &Perception, tuning: &BossTuning) -> u32 {
    let attack = &tuning.attack;
    if frenzied(boss, perception, tuning) {
        attack.windup_frenzy
    } else if perception.lit {
        attack.windup_lit
    } else {
        attack.windup_dark
    }
}

fn cooldown_duration(boss: &BossState, perception: &Perception, tuning: &BossTuning) -> u32 {
    let attack = &tuning.attack;
    if frenzied(boss, perception, tuning) {
        attack.cooldown_frenzy
    } else if perception.lit {
        attack.cooldown_lit
    } else {
        attack.cooldown_dark
    }
}

/// Starts a windup if the boss is chasing, ready, close, level with the
/// player and the player is lit or noisy. Returns true if a windup started.
pub fn try_begin(
    boss: &mut BossState,
    player: &PlayerSnapshot,
    perception: &Perception,
    tuning: &BossTuning,
) -> bool {
    let attack = &tuning.attack;
    let ready = matches!(boss.ai, AiState::Chase { attack_ready_in: 0 });
    let provoked = perception.lit || perception.noisy;
    let aligned = (boss.position.y - player.position.y).abs() < attack.strike_alignment;

    if !(ready && provoked && perception.distance < attack.strike_range && aligned) {
        return false;
    }

    let strike_in = windup_duration(boss, perception, tuning);
    boss.ai = AiState::Windup { strike_in };
    boss.vine = VineAttack {
        active: true,
        target: player.center(),
        progress: 0.0,
    };
    debug!(strike_in, distance = perception.distance, "vine windup started");
    true
}

/// Advances whichever strike phase the boss is in.
///
/// Returns the vine damage to apply to the player, if the strike landed.
pub fn advance(
    boss: &mut BossState,
    player: &PlayerSnapshot,
    perception: &Perception,
    tuning: &BossTuning,
) -> Option<f32> {
    let attack = &tuning.attack;

    match boss.ai {
        AiState::Windup { strike_in } => {
            if strike_in > attack.tracking_freeze {
                boss.vine.target = boss.vine.target.lerp(player.center(), attack.tracking_blend);
            }
            if strike_in == 0 {
                boss.ai = AiState::Attack {
                    remaining: attack.strike_duration,
                };
                debug!(target_x = boss.vine.target.x, target_y = boss.vine.target.y, "vine strike locked");
            }
            None
        }
        AiState::Attack { .. } => {
            boss.vine.progress += attack.progress_step;
            if boss.vine.progress < 1.0 {
                return None;
            }

            let miss_distance = player.center().distance(boss.vine.target);
            let landed = miss_distance < attack.hit_radius;
            let remaining = cooldown_duration(boss, perception, tuning);
            boss.ai = AiState::Cooldown { remaining };
            boss.vine.active = false;
            debug!(landed, miss_distance, cooldown = remaining, "vine strike resolved");

            landed.then_some(attack.hit_damage)
        }
        AiState::Cooldown { remaining: 0 } => {
            boss.ai = AiState::Chase { attack_ready_in: 0 };
            None
        }
        _ => None,
    }
}
