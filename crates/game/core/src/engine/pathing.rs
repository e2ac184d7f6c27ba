//! Target selection, speed table and stair-constrained movement.
//!
//! The room has two walkable levels. The boss may only change level at one of
//! the two stair x-coordinates; everywhere else it walks along its current
//! level and is snapped back onto it after each step.

use tracing::debug;

use crate::config::RoomGeometry;
use crate::env::{BossEnv, RollContext};
use crate::state::{AiState, BossState, LightMode, PlayerSnapshot, Vec2};

/// Where the boss wants to go this tick.
///
/// `Chase` heads for the player projected onto the player's level. `Wander`
/// drifts around the current position on the boss's own level along a fixed
/// sine sweep. The `repath_in` re-roll does not move that drift; it only sets
/// how long the boss waits before it may strike once the countdown carries
/// over into `Chase`. Other phases stay put.
pub fn movement_target(
    boss: &mut BossState,
    player: &PlayerSnapshot,
    tick: u64,
    env: &BossEnv<'_>,
) -> Vec2 {
    let geometry = env.geometry();
    let movement = &env.tuning().movement;

    match &mut boss.ai {
        AiState::Chase { .. } => {
            let level = geometry.level_of(player.position.y);
            Vec2::new(player.position.x, geometry.level_y(level))
        }
        AiState::Wander { repath_in } => {
            if *repath_in == 0 {
                *repath_in = env.range(
                    tick,
                    RollContext::WanderRepath,
                    movement.wander_repath_min,
                    movement.wander_repath_max,
                );
            }
            let phase = tick as f32 * movement.tick_ms / movement.wander_period_ms;
            let level = geometry.level_of(boss.position.y);
            Vec2::new(
                boss.position.x + phase.sin() * movement.wander_amplitude,
                geometry.level_y(level),
            )
        }
        _ => boss.position,
    }
}

/// Picks the movement speed from the light the player is using.
///
/// A focused beam scares the boss and may cancel a windup in progress.
pub fn select_speed(
    boss: &mut BossState,
    player: &PlayerSnapshot,
    tick: u64,
    env: &BossEnv<'_>,
) -> f32 {
    let tuning = env.tuning();
    let movement = &tuning.movement;

    match player.light() {
        LightMode::Focused => {
            if matches!(boss.ai, AiState::Windup { .. })
                && env.chance(
                    tick,
                    RollContext::ScaredCancel,
                    tuning.damage.scared_cancel_chance,
                )
            {
                debug!(tick, "focused beam scared off the windup");
                boss.ai = AiState::Chase {
                    attack_ready_in: tuning.damage.scared_retry_delay,
                };
                boss.vine.active = false;
            }
            movement.speed_scared
        }
        LightMode::Lit => movement.speed_idle,
        LightMode::Dark if boss.health < tuning.frenzy_health => {
            movement.speed_aggro * movement.frenzy_speed_multiplier
        }
        LightMode::Dark => movement.speed_aggro,
    }
}

/// Moves one step toward `target`, routing through the nearest stair when the
/// target lies on the other level.
///
/// The level only changes once the boss stands within the stair snap distance.
/// Within the arrival distance the boss does not move, which also covers the
/// zero-distance case.
pub fn step_toward(position: Vec2, target: Vec2, speed: f32, geometry: &RoomGeometry) -> Vec2 {
    let current = geometry.level_of(position.y);
    let wanted = geometry.level_of(target.y);

    let destination = if current != wanted {
        let stair_x = geometry.nearest_stair(position.x);
        let level = if (position.x - stair_x).abs() < geometry.stair_snap {
            wanted
        } else {
            current
        };
        Vec2::new(stair_x, geometry.level_y(level))
    } else {
        Vec2::new(target.x, geometry.level_y(current))
    };

    let offset = destination - position;
    let distance = offset.length();
    if distance <= geometry.arrival_epsilon {
        return position;
    }

    Vec2::new(
        position.x + offset.x / distance * speed,
        position.y + offset.y / distance * speed,
    )
}

/// Clamps to the horizontal bounds and snaps onto a level unless the boss is
/// on the stairs.
pub fn constrain(position: Vec2, geometry: &RoomGeometry) -> Vec2 {
    let x = position.x.clamp(geometry.min_x, geometry.max_x);
    let mut y = position.y;

    if !geometry.near_stairs(x) {
        if (y - geometry.stage_level_y).abs() < geometry.level_snap {
            y = geometry.stage_level_y;
        } else if (y - geometry.floor_level_y).abs() < geometry.level_snap {
            y = geometry.floor_level_y;
        }
    }

    Vec2::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BossConfig;
    use crate::env::RngOracle;
    use crate::state::{Level, PlayerFlags};

    struct Fixed(u32);

    impl RngOracle for Fixed {
        fn next_u32(&self, _seed: u64) -> u32 {
            self.0
        }
    }

    #[test]
    fn far_from_stairs_walks_toward_stair_on_current_level() {
        let geometry = RoomGeometry::default();
        let position = Vec2::new(700.0, 220.0);
        let target = Vec2::new(700.0, 400.0);

        let next = step_toward(position, target, 2.5, &geometry);
        assert_eq!(next, Vec2::new(697.5, 220.0));
        assert_eq!(geometry.level_of(next.y), Level::Stage);
    }

    #[test]
    fn at_stair_descends_toward_target_level() {
        let geometry = RoomGeometry::default();
        let position = Vec2::new(1095.0, 220.0);
        let target = Vec2::new(700.0, 400.0);

        let next = step_toward(position, target, 2.5, &geometry);
        assert!(next.y > 220.0);
        assert!(next.x > 1095.0);
    }

    #[test]
    fn arrival_stops_movement() {
        let geometry = RoomGeometry::default();
        let position = Vec2::new(700.0, 400.0);

        assert_eq!(step_toward(position, position, 2.5, &geometry), position);
        assert_eq!(
            step_toward(position, Vec2::new(701.5, 400.0), 2.5, &geometry),
            position
        );
    }

    #[test]
    fn constrain_clamps_and_snaps() {
        let geometry = RoomGeometry::default();

        assert_eq!(
            constrain(Vec2::new(300.0, 405.0), &geometry),
            Vec2::new(450.0, 405.0)
        );
        assert_eq!(
            constrain(Vec2::new(700.0, 405.0), &geometry),
            Vec2::new(700.0, 400.0)
        );
        assert_eq!(
            constrain(Vec2::new(700.0, 300.0), &geometry),
            Vec2::new(700.0, 300.0)
        );
    }

    #[test]
    fn speed_table_follows_light_and_frenzy() {
        let config = BossConfig::default();
        let rng = Fixed(u32::MAX);
        let env = BossEnv::new(&config, &rng, 0);
        let mut boss = BossState::from_config(&config);
        let player = PlayerSnapshot::new(Vec2::new(600.0, 400.0));

        assert_eq!(select_speed(&mut boss, &player, 0, &env), 2.5);
        boss.health = 20.0;
        assert_eq!(select_speed(&mut boss, &player, 0, &env), 3.75);

        let lit = player.with_flags(PlayerFlags::FLASHLIGHT);
        assert_eq!(select_speed(&mut boss, &lit, 0, &env), 1.0);

        let focused = player.with_flags(PlayerFlags::FLASHLIGHT | PlayerFlags::HIGH_BEAM);
        boss.ai = AiState::Windup { strike_in: 40 };
        assert_eq!(select_speed(&mut boss, &focused, 0, &env), 0.5);
        assert_eq!(boss.ai, AiState::Windup { strike_in: 40 });
    }

    #[test]
    fn focused_beam_can_cancel_windup() {
        let config = BossConfig::default();
        let rng = Fixed(0);
        let env = BossEnv::new(&config, &rng, 0);
        let mut boss = BossState::from_config(&config);
        boss.ai = AiState::Windup { strike_in: 40 };
        boss.vine.active = true;
        let focused = PlayerSnapshot::new(Vec2::new(600.0, 400.0))
            .with_flags(PlayerFlags::FLASHLIGHT | PlayerFlags::HIGH_BEAM);

        select_speed(&mut boss, &focused, 0, &env);
        assert_eq!(boss.ai, AiState::Chase { attack_ready_in: 20 });
        assert!(!boss.vine.active);
    }

    #[test]
    fn wander_rerolls_lapsed_countdown() {
        let config = BossConfig::default();
        let rng = Fixed(0);
        let env = BossEnv::new(&config, &rng, 0);
        let mut boss = BossState::from_config(&config);
        boss.ai = AiState::Wander { repath_in: 0 };
        let player = PlayerSnapshot::new(Vec2::new(600.0, 400.0));

        let target = movement_target(&mut boss, &player, 0, &env);
        assert_eq!(boss.ai, AiState::Wander { repath_in: 60 });
        assert_eq!(target, Vec2::new(800.0, 220.0));
    }
}
