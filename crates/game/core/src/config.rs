//! Tuning constants and room geometry consumed by the boss controller.
//!
//! Every number the controller uses lives here so content files can rebalance
//! the encounter without touching code. Values are validated once at load time
//! ([`BossConfig::validate`]); the per-tick update assumes a valid config.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{Level, Vec2};

/// Stealth-detection parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DetectionTuning {
    /// Base hearing range in world units, scaled by the player's noise modifier.
    pub hearing_range: f32,
    /// Noise modifier while the player stands still.
    pub noise_still: f32,
    /// Noise modifier while the player sneaks (moving and crouched).
    pub noise_crouched: f32,
    /// Noise modifier while the player walks upright.
    pub noise_upright: f32,
    /// Horizontal speed above which the player counts as moving.
    pub move_epsilon: f32,
}

impl Default for DetectionTuning {
    fn default() -> Self {
        Self {
            hearing_range: 300.0,
            noise_still: 0.05,
            noise_crouched: 0.1,
            noise_upright: 1.5,
            move_epsilon: 0.1,
        }
    }
}

/// Movement speeds and wander drift.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MovementTuning {
    /// Speed while the plain flashlight is on.
    pub speed_idle: f32,
    /// Hunting speed in darkness.
    pub speed_aggro: f32,
    /// Speed while the focused beam is on the boss.
    pub speed_scared: f32,
    /// Multiplier applied to `speed_aggro` while in frenzy.
    pub frenzy_speed_multiplier: f32,
    /// Horizontal amplitude of the wander drift.
    pub wander_amplitude: f32,
    /// Period of the wander drift in milliseconds.
    pub wander_period_ms: f32,
    /// Simulated milliseconds per tick, used to turn ticks into drift phase.
    pub tick_ms: f32,
    /// Inclusive lower bound of the wander re-anchor delay in ticks.
    pub wander_repath_min: u32,
    /// Inclusive upper bound of the wander re-anchor delay in ticks.
    pub wander_repath_max: u32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            speed_idle: 1.0,
            speed_aggro: 2.5,
            speed_scared: 0.5,
            frenzy_speed_multiplier: 1.5,
            wander_amplitude: 80.0,
            wander_period_ms: 3000.0,
            tick_ms: 1000.0 / 60.0,
            wander_repath_min: 60,
            wander_repath_max: 180,
        }
    }
}

/// Vine strike telegraph and execution.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AttackTuning {
    /// Distance below which a strike may be started.
    pub strike_range: f32,
    /// Maximum vertical offset between boss and player for a strike.
    pub strike_alignment: f32,
    pub windup_lit: u32,
    pub windup_dark: u32,
    pub windup_frenzy: u32,
    /// Countdown carried by the `Attack` state.
    pub strike_duration: u32,
    /// Vine progress added per tick during `Attack`.
    pub progress_step: f32,
    pub cooldown_lit: u32,
    pub cooldown_dark: u32,
    pub cooldown_frenzy: u32,
    /// Per-tick blend of the vine target toward the player during windup.
    pub tracking_blend: f32,
    /// Final windup ticks during which the target no longer tracks.
    pub tracking_freeze: u32,
    pub hit_radius: f32,
    pub hit_damage: f32,
}

impl Default for AttackTuning {
    fn default() -> Self {
        Self {
            strike_range: 250.0,
            strike_alignment: 100.0,
            windup_lit: 90,
            windup_dark: 60,
            windup_frenzy: 30,
            strike_duration: 30,
            progress_step: 0.08,
            cooldown_lit: 140,
            cooldown_dark: 100,
            cooldown_frenzy: 60,
            tracking_blend: 0.15,
            tracking_freeze: 10,
            hit_radius: 60.0,
            hit_damage: 25.0,
        }
    }
}

/// Light-beam, contact and stun parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DamageTuning {
    /// Boss health removed per tick of focused beam.
    pub beam_damage: f32,
    pub beam_range: f32,
    pub contact_radius: f32,
    /// Player health removed per tick of contact.
    pub contact_damage: f32,
    /// `Wander` countdown applied when a hit interrupts a strike.
    pub flinch_duration: u32,
    /// Per-tick chance that the focused beam cancels an in-progress windup.
    pub scared_cancel_chance: f32,
    /// Countdown before the next strike after a scared cancel.
    pub scared_retry_delay: u32,
    pub stun_chance: f32,
    pub stun_duration: u32,
    /// Chance that an interrupting hit shows a pain line.
    pub pain_line_chance: f32,
    pub pain_line_duration: u32,
}

impl Default for DamageTuning {
    fn default() -> Self {
        Self {
            beam_damage: 0.05,
            beam_range: 600.0,
            contact_radius: 40.0,
            contact_damage: 0.5,
            flinch_duration: 30,
            scared_cancel_chance: 0.2,
            scared_retry_delay: 20,
            stun_chance: 0.005,
            stun_duration: 60,
            pain_line_chance: 0.3,
            pain_line_duration: 60,
        }
    }
}

/// Ambient muttering cadence.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AmbienceTuning {
    pub show_duration: u32,
    pub gap_min: u32,
    pub gap_max: u32,
}

impl Default for AmbienceTuning {
    fn default() -> Self {
        Self {
            show_duration: 180,
            gap_min: 100,
            gap_max: 300,
        }
    }
}

/// Complete boss tuning table.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BossTuning {
    pub max_health: f32,
    /// Health below which the boss enters frenzy while unlit.
    pub frenzy_health: f32,
    /// `Wander` countdown given to a freshly activated boss.
    pub activation_delay: u32,
    pub detection: DetectionTuning,
    pub movement: MovementTuning,
    pub attack: AttackTuning,
    pub damage: DamageTuning,
    pub ambience: AmbienceTuning,
}

impl Default for BossTuning {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            frenzy_health: 30.0,
            activation_delay: 60,
            detection: DetectionTuning::default(),
            movement: MovementTuning::default(),
            attack: AttackTuning::default(),
            damage: DamageTuning::default(),
            ambience: AmbienceTuning::default(),
        }
    }
}

/// Static geometry of the boss room: two walkable levels joined by stairs.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RoomGeometry {
    /// Anything with `y` below this is on the stage.
    pub stage_threshold_y: f32,
    pub stage_level_y: f32,
    pub floor_level_y: f32,
    pub stairs_left_x: f32,
    pub stairs_right_x: f32,
    /// Distance to a stair within which the boss may change level.
    pub stair_snap: f32,
    /// Distance to a stair within which vertical snapping is suspended.
    pub stair_band: f32,
    /// Distance to a level within which the boss is snapped onto it.
    pub level_snap: f32,
    pub min_x: f32,
    pub max_x: f32,
    /// Distance to a destination below which the boss stops moving.
    pub arrival_epsilon: f32,
    pub spawn: Vec2,
    /// Offset from the boss position to its light-sensitive core.
    pub core_offset: Vec2,
    /// Vertical offset from the player's top edge to the flashlight.
    pub light_source_offset_y: f32,
}

impl Default for RoomGeometry {
    fn default() -> Self {
        Self {
            stage_threshold_y: 350.0,
            stage_level_y: 220.0,
            floor_level_y: 400.0,
            stairs_left_x: 450.0,
            stairs_right_x: 1100.0,
            stair_snap: 10.0,
            stair_band: 20.0,
            level_snap: 20.0,
            min_x: 450.0,
            max_x: 1100.0,
            arrival_epsilon: 2.0,
            spawn: Vec2::new(800.0, 250.0),
            core_offset: Vec2::new(30.0, -40.0),
            light_source_offset_y: 10.0,
        }
    }
}

impl RoomGeometry {
    /// Classifies a height into one of the two walkable levels.
    pub fn level_of(&self, y: f32) -> Level {
        if y < self.stage_threshold_y {
            Level::Stage
        } else {
            Level::Floor
        }
    }

    /// Canonical height of a level.
    pub fn level_y(&self, level: Level) -> f32 {
        match level {
            Level::Stage => self.stage_level_y,
            Level::Floor => self.floor_level_y,
        }
    }

    /// Stair x-coordinate nearest to `x`. Ties resolve to the right stair.
    pub fn nearest_stair(&self, x: f32) -> f32 {
        let left = (x - self.stairs_left_x).abs();
        let right = (x - self.stairs_right_x).abs();
        if left < right {
            self.stairs_left_x
        } else {
            self.stairs_right_x
        }
    }

    /// Returns true if `x` is within the band where vertical snapping is suspended.
    pub fn near_stairs(&self, x: f32) -> bool {
        (x - self.stairs_left_x).abs() < self.stair_band
            || (x - self.stairs_right_x).abs() < self.stair_band
    }
}

/// Tuning plus geometry: everything the controller reads besides state and input.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BossConfig {
    pub tuning: BossTuning,
    pub geometry: RoomGeometry,
}

impl BossConfig {
    pub fn new(tuning: BossTuning, geometry: RoomGeometry) -> Self {
        Self { tuning, geometry }
    }

    /// Checks the invariants the controller relies on.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.tuning;
        let g = &self.geometry;

        let finite = [
            ("max_health", t.max_health),
            ("frenzy_health", t.frenzy_health),
            ("detection.hearing_range", t.detection.hearing_range),
            ("detection.noise_still", t.detection.noise_still),
            ("detection.noise_crouched", t.detection.noise_crouched),
            ("detection.noise_upright", t.detection.noise_upright),
            ("detection.move_epsilon", t.detection.move_epsilon),
            ("movement.speed_idle", t.movement.speed_idle),
            ("movement.speed_aggro", t.movement.speed_aggro),
            ("movement.speed_scared", t.movement.speed_scared),
            ("movement.frenzy_speed_multiplier", t.movement.frenzy_speed_multiplier),
            ("movement.wander_amplitude", t.movement.wander_amplitude),
            ("movement.wander_period_ms", t.movement.wander_period_ms),
            ("movement.tick_ms", t.movement.tick_ms),
            ("attack.strike_range", t.attack.strike_range),
            ("attack.strike_alignment", t.attack.strike_alignment),
            ("attack.progress_step", t.attack.progress_step),
            ("attack.tracking_blend", t.attack.tracking_blend),
            ("attack.hit_radius", t.attack.hit_radius),
            ("attack.hit_damage", t.attack.hit_damage),
            ("damage.beam_damage", t.damage.beam_damage),
            ("damage.beam_range", t.damage.beam_range),
            ("damage.contact_radius", t.damage.contact_radius),
            ("damage.contact_damage", t.damage.contact_damage),
            ("geometry.stage_threshold_y", g.stage_threshold_y),
            ("geometry.stage_level_y", g.stage_level_y),
            ("geometry.floor_level_y", g.floor_level_y),
            ("geometry.stairs_left_x", g.stairs_left_x),
            ("geometry.stairs_right_x", g.stairs_right_x),
            ("geometry.stair_snap", g.stair_snap),
            ("geometry.stair_band", g.stair_band),
            ("geometry.level_snap", g.level_snap),
            ("geometry.min_x", g.min_x),
            ("geometry.max_x", g.max_x),
            ("geometry.arrival_epsilon", g.arrival_epsilon),
            ("geometry.spawn.x", g.spawn.x),
            ("geometry.spawn.y", g.spawn.y),
            ("geometry.core_offset.x", g.core_offset.x),
            ("geometry.core_offset.y", g.core_offset.y),
            ("geometry.light_source_offset_y", g.light_source_offset_y),
        ];
        if let Some((field, _)) = finite.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ConfigError::NonFinite { field: *field });
        }

        let positive = [
            ("max_health", t.max_health),
            ("detection.hearing_range", t.detection.hearing_range),
            ("movement.wander_period_ms", t.movement.wander_period_ms),
            ("movement.tick_ms", t.movement.tick_ms),
            ("attack.strike_range", t.attack.strike_range),
            ("attack.progress_step", t.attack.progress_step),
            ("attack.hit_radius", t.attack.hit_radius),
            ("damage.beam_range", t.damage.beam_range),
        ];
        if let Some((field, _)) = positive.iter().find(|(_, value)| *value <= 0.0) {
            return Err(ConfigError::NotPositive { field: *field });
        }

        let non_negative = [
            ("frenzy_health", t.frenzy_health),
            ("detection.noise_still", t.detection.noise_still),
            ("detection.noise_crouched", t.detection.noise_crouched),
            ("detection.noise_upright", t.detection.noise_upright),
            ("detection.move_epsilon", t.detection.move_epsilon),
            ("movement.speed_idle", t.movement.speed_idle),
            ("movement.speed_aggro", t.movement.speed_aggro),
            ("movement.speed_scared", t.movement.speed_scared),
            ("movement.frenzy_speed_multiplier", t.movement.frenzy_speed_multiplier),
            ("movement.wander_amplitude", t.movement.wander_amplitude),
            ("attack.strike_alignment", t.attack.strike_alignment),
            ("attack.hit_damage", t.attack.hit_damage),
            ("damage.beam_damage", t.damage.beam_damage),
            ("damage.contact_radius", t.damage.contact_radius),
            ("damage.contact_damage", t.damage.contact_damage),
            ("geometry.stair_snap", g.stair_snap),
            ("geometry.stair_band", g.stair_band),
            ("geometry.level_snap", g.level_snap),
            ("geometry.arrival_epsilon", g.arrival_epsilon),
        ];
        if let Some((field, value)) = non_negative.iter().find(|(_, value)| *value < 0.0) {
            return Err(ConfigError::Negative {
                field: *field,
                value: *value,
            });
        }

        let durations = [
            ("attack.windup_lit", t.attack.windup_lit),
            ("attack.windup_dark", t.attack.windup_dark),
            ("attack.windup_frenzy", t.attack.windup_frenzy),
            ("attack.strike_duration", t.attack.strike_duration),
            ("attack.cooldown_lit", t.attack.cooldown_lit),
            ("attack.cooldown_dark", t.attack.cooldown_dark),
            ("attack.cooldown_frenzy", t.attack.cooldown_frenzy),
            ("damage.stun_duration", t.damage.stun_duration),
            ("ambience.show_duration", t.ambience.show_duration),
        ];
        if let Some((field, _)) = durations.iter().find(|(_, ticks)| *ticks == 0) {
            return Err(ConfigError::NotPositive { field: *field });
        }

        let ranges = [
            (
                "movement.wander_repath",
                t.movement.wander_repath_min,
                t.movement.wander_repath_max,
            ),
            ("ambience.gap", t.ambience.gap_min, t.ambience.gap_max),
        ];
        if let Some((field, min, max)) = ranges.iter().find(|(_, min, max)| min > max) {
            return Err(ConfigError::InvertedRange {
                field: *field,
                min: *min as f32,
                max: *max as f32,
            });
        }
        if g.min_x > g.max_x {
            return Err(ConfigError::InvertedRange {
                field: "geometry.x_bounds",
                min: g.min_x,
                max: g.max_x,
            });
        }

        let probabilities = [
            ("attack.tracking_blend", t.attack.tracking_blend),
            ("damage.scared_cancel_chance", t.damage.scared_cancel_chance),
            ("damage.stun_chance", t.damage.stun_chance),
            ("damage.pain_line_chance", t.damage.pain_line_chance),
        ];
        if let Some((field, value)) = probabilities
            .iter()
            .find(|(_, value)| !(0.0..=1.0).contains(value))
        {
            return Err(ConfigError::ProbabilityOutOfRange {
                field: *field,
                value: *value,
            });
        }

        for stair_x in [g.stairs_left_x, g.stairs_right_x] {
            if stair_x < g.min_x || stair_x > g.max_x {
                return Err(ConfigError::StairOutOfBounds {
                    stair_x,
                    min_x: g.min_x,
                    max_x: g.max_x,
                });
            }
        }

        if !(g.stage_level_y < g.stage_threshold_y && g.floor_level_y >= g.stage_threshold_y) {
            return Err(ConfigError::LevelOrder {
                stage_y: g.stage_level_y,
                threshold_y: g.stage_threshold_y,
                floor_y: g.floor_level_y,
            });
        }

        Ok(())
    }
}

/// Errors produced while validating a [`BossConfig`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("{field} range is inverted: {min} > {max}")]
    InvertedRange {
        field: &'static str,
        min: f32,
        max: f32,
    },

    #[error("{field} must be within [0, 1], got {value}")]
    ProbabilityOutOfRange { field: &'static str, value: f32 },

    #[error("stair at x={stair_x} lies outside the walkable range [{min_x}, {max_x}]")]
    StairOutOfBounds { stair_x: f32, min_x: f32, max_x: f32 },

    #[error(
        "levels must satisfy stage_y < threshold <= floor_y, got {stage_y} / {threshold_y} / {floor_y}"
    )]
    LevelOrder {
        stage_y: f32,
        threshold_y: f32,
        floor_y: f32,
    },
}

impl GameError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ConfigError::StairOutOfBounds { .. } | ConfigError::LevelOrder { .. } => {
                ErrorSeverity::Fatal
            }
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ConfigError::NonFinite { .. } => "CONFIG_NON_FINITE",
            ConfigError::NotPositive { .. } => "CONFIG_NOT_POSITIVE",
            ConfigError::Negative { .. } => "CONFIG_NEGATIVE",
            ConfigError::InvertedRange { .. } => "CONFIG_INVERTED_RANGE",
            ConfigError::ProbabilityOutOfRange { .. } => "CONFIG_PROBABILITY_OUT_OF_RANGE",
            ConfigError::StairOutOfBounds { .. } => "CONFIG_STAIR_OUT_OF_BOUNDS",
            ConfigError::LevelOrder { .. } => "CONFIG_LEVEL_ORDER",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(BossConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_stairs_outside_bounds() {
        let mut config = BossConfig::default();
        config.geometry.min_x = 500.0;

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::StairOutOfBounds { stair_x, .. } if stair_x == 450.0));
        assert_eq!(err.severity(), ErrorSeverity::Fatal);
    }

    #[test]
    fn rejects_inverted_wander_range() {
        let mut config = BossConfig::default();
        config.tuning.movement.wander_repath_min = 200;

        let err = config.validate().unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_INVERTED_RANGE");
    }

    #[test]
    fn rejects_non_finite_and_bad_probability() {
        let mut config = BossConfig::default();
        config.tuning.damage.beam_damage = f32::NAN;
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonFinite {
                field: "damage.beam_damage"
            })
        );

        let mut config = BossConfig::default();
        config.tuning.damage.stun_chance = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ProbabilityOutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_negative_damage_speed_and_tolerances() {
        let cases: [(&str, fn(&mut BossConfig)); 6] = [
            ("damage.beam_damage", |c| c.tuning.damage.beam_damage = -0.05),
            ("attack.hit_damage", |c| c.tuning.attack.hit_damage = -25.0),
            ("damage.contact_damage", |c| c.tuning.damage.contact_damage = -0.5),
            ("movement.speed_aggro", |c| c.tuning.movement.speed_aggro = -2.0),
            ("movement.frenzy_speed_multiplier", |c| {
                c.tuning.movement.frenzy_speed_multiplier = -1.5
            }),
            ("geometry.arrival_epsilon", |c| c.geometry.arrival_epsilon = -1.0),
        ];

        for (field, corrupt) in cases {
            let mut config = BossConfig::default();
            corrupt(&mut config);
            let err = config.validate().unwrap_err();
            assert!(
                matches!(err, ConfigError::Negative { field: f, .. } if f == field),
                "{field}: {err:?}"
            );
            assert_eq!(err.error_code(), "CONFIG_NEGATIVE");
        }

        let mut config = BossConfig::default();
        config.geometry.stair_snap = -5.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Negative {
                field: "geometry.stair_snap",
                ..
            })
        ));

        let mut config = BossConfig::default();
        config.geometry.level_snap = -5.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Negative {
                field: "geometry.level_snap",
                ..
            })
        ));
    }

    #[test]
    fn zero_damage_and_tolerances_are_allowed() {
        let mut config = BossConfig::default();
        config.tuning.damage.beam_damage = 0.0;
        config.tuning.damage.contact_damage = 0.0;
        config.geometry.arrival_epsilon = 0.0;
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn rejects_zero_windup() {
        let mut config = BossConfig::default();
        config.tuning.attack.windup_frenzy = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::NotPositive {
                field: "attack.windup_frenzy"
            })
        );
    }

    #[test]
    fn classifies_levels_and_stairs() {
        let geometry = RoomGeometry::default();

        assert_eq!(geometry.level_of(220.0), Level::Stage);
        assert_eq!(geometry.level_of(350.0), Level::Floor);
        assert_eq!(geometry.level_y(Level::Floor), 400.0);
        assert_eq!(geometry.nearest_stair(600.0), 450.0);
        assert_eq!(geometry.nearest_stair(900.0), 1100.0);
        assert!(geometry.near_stairs(1085.0));
        assert!(!geometry.near_stairs(700.0));
    }
}
