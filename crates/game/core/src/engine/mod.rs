//! Per-tick boss controller.
//!
//! [`BossController::update`] is the authoritative reducer for [`BossState`].
//! It never touches the player or the surrounding game directly: everything
//! the tick wants done outside the boss is described in [`TickEffects`] and
//! left to the caller to apply. The step order is fixed, since several rolls
//! and transitions depend on what earlier steps decided within the same tick:
//!
//! 1. ambience, 2. stun short-circuit, 3. detection, 4. target and speed,
//! 5. stair-constrained movement, 6. vine strike, 7. beam damage,
//! 8. contact damage, 9. terminal check.
mod ambience;
mod attack;
mod damage;
mod detection;
mod pathing;

pub use detection::Perception;

use bitflags::bitflags;
use tracing::{debug, info, trace, warn};

use crate::env::BossEnv;
use crate::state::{AiState, BossState, PlayerSnapshot};

bitflags! {
    /// What contributed to a player damage request.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct DamageSources: u8 {
        const VINE    = 1 << 0;
        const CONTACT = 1 << 1;
    }
}

/// Health the caller should remove from the player.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerDamage {
    /// Always positive.
    pub amount: f32,
    pub sources: DamageSources,
}

/// How the encounter ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Ending {
    /// The boss was burned away by the light.
    Wither,
    /// The player was overwhelmed.
    Cocoon,
}

/// Side effects requested by a single tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickEffects {
    pub player_damage: Option<PlayerDamage>,
    /// Set only on the tick where the terminal condition is first crossed.
    pub ending: Option<Ending>,
    /// The beam damaged the boss this tick.
    pub boss_hit: bool,
    /// The boss switched into `Chase` this tick.
    pub player_detected: bool,
}

impl TickEffects {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn damage_player(&mut self, amount: f32, source: DamageSources) {
        let damage = self.player_damage.get_or_insert(PlayerDamage {
            amount: 0.0,
            sources: DamageSources::empty(),
        });
        damage.amount += amount;
        damage.sources |= source;
    }
}

/// Next boss state together with the effects to apply.
#[derive(Clone, Debug, PartialEq)]
pub struct TickOutcome {
    pub state: BossState,
    pub effects: TickEffects,
}

impl TickOutcome {
    fn quiet(state: BossState) -> Self {
        Self {
            state,
            effects: TickEffects::default(),
        }
    }
}

/// Stateless driver of the boss state machine.
#[derive(Clone, Copy, Debug, Default)]
pub struct BossController;

impl BossController {
    /// Computes the next boss state from the previous one and a player snapshot.
    ///
    /// Pure with respect to its inputs: the same state, snapshot, config, RNG
    /// and seed always produce the same outcome. Inactive or dead bosses come
    /// back unchanged with no effects. Corrupt values (non-finite health or
    /// position, health outside `[0, max]`) are repaired before anything runs;
    /// an active boss whose health was NaN counts as dying on this tick.
    pub fn update(state: &BossState, player: &PlayerSnapshot, env: &BossEnv<'_>) -> TickOutcome {
        let mut next = state.clone();
        if next.sanitize(env.config()) {
            warn!(health = next.health, "repaired corrupt boss state");
            if state.active && state.health.is_nan() && !next.is_alive() {
                info!(tick = next.tick, "boss health was corrupt, treating as defeated");
                let mut outcome = TickOutcome::quiet(next);
                outcome.effects.ending = Some(Ending::Wither);
                return outcome;
            }
        }
        if !next.active || !next.is_alive() {
            return TickOutcome::quiet(next);
        }

        let health_before = next.health;
        let tick = next.tick;
        next.tick += 1;

        ambience::tick_mutter(&mut next.mutter, tick, env);

        if damage::recover_from_stun(&mut next) {
            trace!(tick, stun = ?next.stun, "boss stunned");
            return TickOutcome::quiet(next);
        }

        next.ai.tick_down();
        let entry_phase = next.ai.phase();
        let mut effects = TickEffects::default();
        let tuning = env.tuning();
        let geometry = env.geometry();

        let perception = detection::perceive(&next, player, &tuning.detection);
        if detection::reassess(&mut next.ai, perception.detected) {
            debug!(tick, distance = perception.distance, lit = perception.lit, "player detected");
            effects.player_detected = true;
        }

        let target = pathing::movement_target(&mut next, player, tick, env);
        let speed = pathing::select_speed(&mut next, player, tick, env);
        if matches!(next.ai, AiState::Chase { .. } | AiState::Wander { .. }) {
            next.position = pathing::step_toward(next.position, target, speed, geometry);
        }
        next.position = pathing::constrain(next.position, geometry);
        trace!(tick, x = next.position.x, y = next.position.y, speed, "boss moved");

        attack::try_begin(&mut next, player, &perception, tuning);
        if let Some(amount) = attack::advance(&mut next, player, &perception, tuning) {
            effects.damage_player(amount, DamageSources::VINE);
        }

        effects.boss_hit = damage::resolve_beam(&mut next, player, tick, env);

        if let Some(amount) = damage::contact(&perception, env) {
            effects.damage_player(amount, DamageSources::CONTACT);
        }

        next.health = next.health.clamp(0.0, tuning.max_health);
        effects.ending = Self::terminal(health_before, &next, player, &effects);
        if let Some(ending) = effects.ending {
            info!(tick, %ending, "encounter ending triggered");
        }

        let exit_phase = next.ai.phase();
        if exit_phase != entry_phase {
            debug!(tick, from = %entry_phase, to = %exit_phase, "boss state transition");
        }

        TickOutcome {
            state: next,
            effects,
        }
    }

    /// Advances `state` in place and returns the effects of the tick.
    pub fn step(state: &mut BossState, player: &PlayerSnapshot, env: &BossEnv<'_>) -> TickEffects {
        let outcome = Self::update(state, player, env);
        *state = outcome.state;
        outcome.effects
    }

    /// Both endings fire only on the tick the threshold is crossed.
    fn terminal(
        health_before: f32,
        next: &BossState,
        player: &PlayerSnapshot,
        effects: &TickEffects,
    ) -> Option<Ending> {
        if health_before > 0.0 && next.health <= 0.0 {
            return Some(Ending::Wither);
        }

        let incoming = effects.player_damage.map_or(0.0, |damage| damage.amount);
        (player.health > 0.0 && player.health - incoming <= 0.0).then_some(Ending::Cocoon)
    }
}
