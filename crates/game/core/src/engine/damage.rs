//! Light-beam damage to the boss, stun recovery and contact damage.

use tracing::debug;

use super::ambience;
use super::detection::Perception;
use crate::env::{BossEnv, RollContext};
use crate::state::{AiState, BossState, PlayerSnapshot};

/// Counts an active stun down. Returns true if the boss was stunned this tick,
/// in which case nothing else runs.
pub fn recover_from_stun(boss: &mut BossState) -> bool {
    let Some(remaining) = boss.stun else {
        return false;
    };

    let remaining = remaining.saturating_sub(1);
    boss.stun = if remaining == 0 {
        debug!("boss recovered from stun");
        None
    } else {
        Some(remaining)
    };
    true
}

/// Applies the focused beam to the boss's core.
///
/// The beam must be powered, the player must face the core and the core must be
/// in range. A hit during windup or attack interrupts the strike with a flinch.
/// Returns true if the beam landed.
pub fn resolve_beam(
    boss: &mut BossState,
    player: &PlayerSnapshot,
    tick: u64,
    env: &BossEnv<'_>,
) -> bool {
    if !player.beam_powered() {
        return false;
    }

    let geometry = env.geometry();
    let damage = &env.tuning().damage;
    let source = player.light_source(geometry);
    let core = boss.position + geometry.core_offset;

    if !player.faces(source, core) || source.distance(core) >= damage.beam_range {
        return false;
    }

    boss.health = (boss.health - damage.beam_damage).max(0.0);
    boss.last_hit = Some(tick);

    if matches!(boss.ai, AiState::Windup { .. } | AiState::Attack { .. }) {
        debug!(phase = %boss.ai.phase(), "beam interrupted the strike");
        boss.ai = AiState::Wander {
            repath_in: damage.flinch_duration,
        };
        boss.vine.active = false;
        ambience::maybe_cry_out(&mut boss.mutter, tick, env);
    }

    if env.chance(tick, RollContext::Stun, damage.stun_chance) {
        debug!(ticks = damage.stun_duration, "beam stunned the boss");
        boss.stun = Some(damage.stun_duration);
    }

    true
}

/// Damage from touching the boss, regardless of AI phase.
pub fn contact(perception: &Perception, env: &BossEnv<'_>) -> Option<f32> {
    let damage = &env.tuning().damage;
    (perception.distance < damage.contact_radius).then_some(damage.contact_damage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BossConfig;
    use crate::env::RngOracle;
    use crate::state::{PlayerFlags, Vec2, VineAttack};

    struct Fixed(u32);

    impl RngOracle for Fixed {
        fn next_u32(&self, _seed: u64) -> u32 {
            self.0
        }
    }

    fn beam_player(x: f32, facing_right: bool) -> PlayerSnapshot {
        let mut flags = PlayerFlags::FLASHLIGHT | PlayerFlags::HIGH_BEAM;
        if facing_right {
            flags |= PlayerFlags::FACING_RIGHT;
        }
        PlayerSnapshot::new(Vec2::new(x, 400.0)).with_flags(flags)
    }

    fn active_boss(config: &BossConfig) -> BossState {
        let mut boss = BossState::from_config(config);
        boss.active = true;
        boss.position = Vec2::new(800.0, 400.0);
        boss.ai = AiState::Chase { attack_ready_in: 0 };
        boss
    }

    #[test]
    fn stun_counts_down_then_clears() {
        let mut boss = BossState::inert(Vec2::new(800.0, 400.0), 100.0);
        assert!(!recover_from_stun(&mut boss));

        boss.stun = Some(2);
        assert!(recover_from_stun(&mut boss));
        assert_eq!(boss.stun, Some(1));
        assert!(recover_from_stun(&mut boss));
        assert_eq!(boss.stun, None);
    }

    #[test]
    fn beam_requires_facing_the_core() {
        let config = BossConfig::default();
        let rng = Fixed(u32::MAX);
        let env = BossEnv::new(&config, &rng, 0);
        let mut boss = active_boss(&config);

        assert!(!resolve_beam(&mut boss, &beam_player(500.0, false), 3, &env));
        assert_eq!(boss.health, 100.0);

        assert!(resolve_beam(&mut boss, &beam_player(500.0, true), 3, &env));
        assert!((boss.health - 99.95).abs() < 1e-4);
        assert_eq!(boss.last_hit, Some(3));
        assert_eq!(boss.stun, None);
    }

    #[test]
    fn beam_out_of_range_or_unpowered_misses() {
        let config = BossConfig::default();
        let rng = Fixed(u32::MAX);
        let env = BossEnv::new(&config, &rng, 0);
        let mut boss = active_boss(&config);
        boss.position = Vec2::new(1100.0, 400.0);

        assert!(!resolve_beam(&mut boss, &beam_player(450.0, true), 0, &env));
        boss.position = Vec2::new(800.0, 400.0);
        assert!(!resolve_beam(&mut boss, &beam_player(500.0, true).with_battery(0.0), 0, &env));
    }

    #[test]
    fn hit_during_windup_flinches() {
        let config = BossConfig::default();
        let rng = Fixed(u32::MAX);
        let env = BossEnv::new(&config, &rng, 0);
        let mut boss = active_boss(&config);
        boss.ai = AiState::Windup { strike_in: 15 };
        boss.vine = VineAttack {
            active: true,
            target: Vec2::new(520.0, 440.0),
            progress: 0.0,
        };

        assert!(resolve_beam(&mut boss, &beam_player(500.0, true), 0, &env));
        assert_eq!(boss.ai, AiState::Wander { repath_in: 30 });
        assert!(!boss.vine.active);
    }

    #[test]
    fn lucky_hit_stuns() {
        let config = BossConfig::default();
        let rng = Fixed(0);
        let env = BossEnv::new(&config, &rng, 0);
        let mut boss = active_boss(&config);

        assert!(resolve_beam(&mut boss, &beam_player(500.0, true), 0, &env));
        assert_eq!(boss.stun, Some(60));
    }
}
