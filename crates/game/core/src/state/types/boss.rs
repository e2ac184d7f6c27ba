use crate::config::{BossConfig, RoomGeometry};

use super::common::{Level, Vec2};

/// Coarse behavior phase, the field-less view of [`AiState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AiPhase {
    Idle,
    Wander,
    Chase,
    Windup,
    Attack,
    Cooldown,
}

impl AiPhase {
    /// Returns true for phases the strike sequence owns.
    pub fn is_striking(&self) -> bool {
        matches!(self, AiPhase::Windup | AiPhase::Attack | AiPhase::Cooldown)
    }
}

/// Behavior state machine. Each phase carries its own named countdown.
///
/// Countdowns tick down once per non-stunned tick. When detection flips
/// between `Wander` and `Chase`, the remaining countdown carries over and keeps
/// gating the next strike, so a flinching boss cannot strike again the moment
/// it re-acquires the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "phase", rename_all = "snake_case"))]
pub enum AiState {
    /// Dormant, never re-entered once detection has run.
    Idle { wake_in: u32 },
    /// Drifting; the wander anchor is re-rolled when `repath_in` lapses.
    Wander { repath_in: u32 },
    /// Pursuing; a strike may start once `attack_ready_in` lapses.
    Chase { attack_ready_in: u32 },
    /// Telegraphing the vine strike.
    Windup { strike_in: u32 },
    /// Vine is extending toward its frozen target.
    Attack { remaining: u32 },
    /// Recovering after a strike.
    Cooldown { remaining: u32 },
}

impl Default for AiState {
    fn default() -> Self {
        AiState::Wander { repath_in: 0 }
    }
}

impl AiState {
    pub fn phase(&self) -> AiPhase {
        match self {
            AiState::Idle { .. } => AiPhase::Idle,
            AiState::Wander { .. } => AiPhase::Wander,
            AiState::Chase { .. } => AiPhase::Chase,
            AiState::Windup { .. } => AiPhase::Windup,
            AiState::Attack { .. } => AiPhase::Attack,
            AiState::Cooldown { .. } => AiPhase::Cooldown,
        }
    }

    /// Remaining ticks on whichever countdown the current phase carries.
    pub fn countdown(&self) -> u32 {
        match *self {
            AiState::Idle { wake_in: ticks }
            | AiState::Wander { repath_in: ticks }
            | AiState::Chase {
                attack_ready_in: ticks,
            }
            | AiState::Windup { strike_in: ticks }
            | AiState::Attack { remaining: ticks }
            | AiState::Cooldown { remaining: ticks } => ticks,
        }
    }

    /// Decrements the current countdown, saturating at zero.
    pub fn tick_down(&mut self) {
        match self {
            AiState::Idle { wake_in: ticks }
            | AiState::Wander { repath_in: ticks }
            | AiState::Chase {
                attack_ready_in: ticks,
            }
            | AiState::Windup { strike_in: ticks }
            | AiState::Attack { remaining: ticks }
            | AiState::Cooldown { remaining: ticks } => *ticks = ticks.saturating_sub(1),
        }
    }

    /// Returns true while the windup/strike/cooldown sequence owns the boss.
    pub fn in_strike_sequence(&self) -> bool {
        self.phase().is_striking()
    }
}

/// The telegraphed vine strike.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VineAttack {
    pub active: bool,
    /// Impact point; tracks the player during windup, frozen afterwards.
    pub target: Vec2,
    /// Extension in `[0, 1]`; advances only during `Attack`.
    pub progress: f32,
}

const AMBIENT_LINES: [&str; 10] = [
    "It hurts...",
    "Brother...",
    "Why...",
    "So dark...",
    "Go away...",
    "My body... itches...",
    "*sobbing*",
    "Don't look at me...",
    "I'm sorry...",
    "Let me... sleep...",
];

const PAIN_LINES: [&str; 4] = ["AAAAH!", "It burns!", "Stop it!", "I'm on fire..."];

/// A line from one of the fixed mutter pools.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MutterLine {
    Ambient(u8),
    Pain(u8),
}

impl MutterLine {
    pub const AMBIENT_COUNT: u32 = AMBIENT_LINES.len() as u32;
    pub const PAIN_COUNT: u32 = PAIN_LINES.len() as u32;

    /// Display text. Out-of-range indices wrap.
    pub fn text(&self) -> &'static str {
        match *self {
            MutterLine::Ambient(index) => AMBIENT_LINES[index as usize % AMBIENT_LINES.len()],
            MutterLine::Pain(index) => PAIN_LINES[index as usize % PAIN_LINES.len()],
        }
    }
}

/// Ambient speech bubble, independent of the combat state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Mutter {
    pub line: Option<MutterLine>,
    pub timer: u32,
}

/// Complete boss state, owned by the controller.
///
/// Mutated only by [`crate::engine::BossController::update`] and by
/// [`crate::activation::activate`]. Everything else reads it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BossState {
    pub active: bool,
    pub health: f32,
    pub position: Vec2,
    /// Remaining stun ticks; `None` when not stunned.
    #[cfg_attr(feature = "serde", serde(default))]
    pub stun: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ai: AiState,
    #[cfg_attr(feature = "serde", serde(default))]
    pub vine: VineAttack,
    /// Tick of the most recent beam hit, for presentation only.
    #[cfg_attr(feature = "serde", serde(default))]
    pub last_hit: Option<u64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mutter: Mutter,
    /// Number of ticks simulated so far; drives the wander drift and RNG seeds.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tick: u64,
}

impl BossState {
    /// Dormant boss as it exists at game start.
    pub fn inert(spawn: Vec2, max_health: f32) -> Self {
        Self {
            active: false,
            health: max_health,
            position: spawn,
            stun: None,
            ai: AiState::Idle { wake_in: 60 },
            vine: VineAttack::default(),
            last_hit: None,
            mutter: Mutter::default(),
            tick: 0,
        }
    }

    /// Dormant boss placed at the configured spawn point.
    pub fn from_config(config: &BossConfig) -> Self {
        Self::inert(config.geometry.spawn, config.tuning.max_health)
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    pub fn is_stunned(&self) -> bool {
        self.stun.is_some()
    }

    pub fn level(&self, geometry: &RoomGeometry) -> Level {
        geometry.level_of(self.position.y)
    }

    /// Repairs values that would otherwise propagate NaN or out-of-range health.
    ///
    /// Returns true if anything was changed.
    pub fn sanitize(&mut self, config: &BossConfig) -> bool {
        let mut repaired = false;

        if !self.health.is_finite() {
            self.health = 0.0;
            repaired = true;
        } else {
            let clamped = self.health.clamp(0.0, config.tuning.max_health);
            if clamped != self.health {
                self.health = clamped;
                repaired = true;
            }
        }

        if !self.position.is_finite() {
            self.position = config.geometry.spawn;
            repaired = true;
        }

        if !self.vine.target.is_finite() || !self.vine.progress.is_finite() {
            self.vine = VineAttack::default();
            repaired = true;
        } else if self.vine.progress < 0.0 {
            self.vine.progress = 0.0;
            repaired = true;
        }

        repaired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_ticks_down_and_saturates() {
        let mut ai = AiState::Windup { strike_in: 1 };
        ai.tick_down();
        assert_eq!(ai, AiState::Windup { strike_in: 0 });
        ai.tick_down();
        assert_eq!(ai.countdown(), 0);
    }

    #[test]
    fn strike_sequence_membership() {
        assert!(AiState::Windup { strike_in: 3 }.in_strike_sequence());
        assert!(AiState::Cooldown { remaining: 0 }.in_strike_sequence());
        assert!(!AiState::Chase { attack_ready_in: 0 }.in_strike_sequence());
        assert_eq!(AiState::default().phase(), AiPhase::Wander);
        assert_eq!(AiPhase::Windup.to_string(), "WINDUP");
    }

    #[test]
    fn sanitize_repairs_corrupt_values() {
        let config = BossConfig::default();
        let mut boss = BossState::from_config(&config);
        boss.health = 140.0;
        boss.position = Vec2::new(f32::NAN, 10.0);
        boss.vine.progress = f32::INFINITY;

        assert!(boss.sanitize(&config));
        assert_eq!(boss.health, 100.0);
        assert_eq!(boss.position, config.geometry.spawn);
        assert_eq!(boss.vine, VineAttack::default());
        assert!(!boss.sanitize(&config));
    }

    #[test]
    fn mutter_lines_wrap() {
        assert_eq!(MutterLine::Ambient(0).text(), "It hurts...");
        assert_eq!(MutterLine::Pain(5).text(), MutterLine::Pain(1).text());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn missing_sub_state_deserializes_to_safe_defaults() {
        let json = r#"{"active":true,"health":80.0,"position":{"x":700.0,"y":400.0}}"#;
        let boss: BossState = serde_json::from_str(json).unwrap();

        assert_eq!(boss.ai, AiState::Wander { repath_in: 0 });
        assert!(!boss.vine.active);
        assert_eq!(boss.vine.progress, 0.0);
        assert_eq!(boss.stun, None);
    }
}
