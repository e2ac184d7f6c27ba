//! Headless scenario playback.

use std::sync::Arc;

use lantern_content::Scenario;
use lantern_core::{
    AiPhase, BossConfig, DamageSources, Ending, PcgRng, PlayerSnapshot, RngOracle, Vec2,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::RuntimeConfig;
use crate::encounter::{Encounter, EncounterPhase};
use crate::error::{Result, RuntimeError};
use crate::events::GameEvent;

/// Runs scenarios against a fixed configuration.
pub struct Simulation {
    config: BossConfig,
    runtime: RuntimeConfig,
    rng: Arc<dyn RngOracle>,
}

impl Simulation {
    pub fn new(config: BossConfig) -> Self {
        Self {
            config,
            runtime: RuntimeConfig::default(),
            rng: Arc::new(PcgRng),
        }
    }

    pub fn with_runtime_config(mut self, runtime: RuntimeConfig) -> Self {
        self.runtime = runtime;
        self
    }

    pub fn with_rng(mut self, rng: Arc<dyn RngOracle>) -> Self {
        self.rng = rng;
        self
    }

    /// Builds the encounter a scenario starts from, before any frame runs.
    ///
    /// # Errors
    ///
    /// Fails if the config does not validate.
    pub fn prepare(&self, scenario: &Scenario) -> Result<Encounter> {
        self.config.validate().map_err(RuntimeError::Config)?;

        let battery = scenario.battery.unwrap_or(self.runtime.player.max_battery);
        let player = PlayerSnapshot::new(scenario.player_start).with_battery(battery);
        let mut encounter = Encounter::new(self.config.clone(), scenario.seed, player)
            .with_runtime_config(self.runtime.clone())
            .with_rng(Arc::clone(&self.rng))
            .with_inventory(scenario.starting_inventory());

        if scenario.boss_active {
            encounter.begin_fight(scenario.boss_position, scenario.boss_health)?;
        }
        Ok(encounter)
    }

    /// Plays a scenario to the end of its timeline or until an ending.
    ///
    /// A refused altar offering is logged and counted; the run continues.
    pub fn run(&self, scenario: &Scenario) -> Result<SimulationReport> {
        let mut encounter = self.prepare(scenario)?;
        info!(
            scenario = %scenario.name,
            seed = scenario.seed,
            frames = scenario.total_ticks(),
            "running scenario"
        );

        let mut altar_refusals = 0;
        for (actions, interact) in scenario.timeline() {
            if encounter.phase().is_over() {
                break;
            }
            if interact && let Err(err) = encounter.interact_altar() {
                warn!(frame = encounter.frame(), %err, "altar refused the offering");
                altar_refusals += 1;
            }
            encounter.tick(actions);
        }

        let report = SimulationReport::new(scenario, &encounter, altar_refusals);
        info!(
            scenario = %report.scenario,
            frames = report.frames,
            phase = %report.phase,
            "scenario finished"
        );
        Ok(report)
    }
}

/// Final boss state of a run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BossSummary {
    pub active: bool,
    pub health: f32,
    pub position: Vec2,
    pub ai: AiPhase,
}

/// Final player state of a run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub position: Vec2,
    pub health: f32,
    pub battery: f32,
}

/// Counters accumulated from the event log.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EncounterStats {
    pub detections: u32,
    pub beam_hits: u32,
    pub strikes_landed: u32,
    pub damage_taken: f32,
    pub altar_refusals: u32,
}

impl EncounterStats {
    fn from_events(events: &[GameEvent]) -> Self {
        let mut stats = Self::default();
        for event in events {
            match event {
                GameEvent::PlayerDetected { .. } => stats.detections += 1,
                GameEvent::BossHit { .. } => stats.beam_hits += 1,
                GameEvent::PlayerDamaged {
                    amount, sources, ..
                } => {
                    stats.damage_taken += amount;
                    if sources.contains(DamageSources::VINE) {
                        stats.strikes_landed += 1;
                    }
                }
                _ => {}
            }
        }
        stats
    }
}

/// Serializable summary of one scenario run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub scenario: String,
    pub seed: u64,
    /// Frames actually simulated; fewer than scripted if an ending cut the run short.
    pub frames: u64,
    pub scripted_frames: u64,
    pub phase: EncounterPhase,
    pub ending: Option<Ending>,
    pub ending_frame: Option<u64>,
    pub boss: BossSummary,
    pub player: PlayerSummary,
    pub stats: EncounterStats,
    pub milestones: Vec<GameEvent>,
}

impl SimulationReport {
    fn new(scenario: &Scenario, encounter: &Encounter, altar_refusals: u32) -> Self {
        let events = encounter.events();
        let (ending, ending_frame) = events
            .iter()
            .find_map(|event| match event {
                GameEvent::EndingReached { frame, ending } => Some((*ending, *frame)),
                _ => None,
            })
            .unzip();

        let boss = encounter.boss();
        let player = encounter.player();
        let mut stats = EncounterStats::from_events(events);
        stats.altar_refusals = altar_refusals;

        Self {
            scenario: scenario.name.clone(),
            seed: scenario.seed,
            frames: encounter.frame(),
            scripted_frames: scenario.total_ticks(),
            phase: encounter.phase(),
            ending,
            ending_frame,
            boss: BossSummary {
                active: boss.active,
                health: boss.health,
                position: boss.position,
                ai: boss.ai.phase(),
            },
            player: PlayerSummary {
                position: player.position,
                health: player.health,
                battery: player.battery,
            },
            stats,
            milestones: events
                .iter()
                .filter(|event| event.is_milestone())
                .cloned()
                .collect(),
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
