//! Encounter phase machine.
//!
//! An [`Encounter`] owns the player, the boss and the inventory, and moves
//! through `Exploration → BossFight → Ending`. Each call to
//! [`Encounter::tick`] advances the player from the held actions, runs the
//! boss controller during the fight, and turns the controller's effect list
//! into player damage and [`GameEvent`]s.

use std::fmt;
use std::sync::Arc;

use lantern_core::{
    AltarRequirements, BossConfig, BossController, BossEnv, BossState, Ending, InputActions,
    Inventory, PcgRng, PlayerSnapshot, RngOracle, TickEffects, Vec2, activate,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::events::GameEvent;
use crate::player::PlayerController;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", content = "ending", rename_all = "snake_case")]
pub enum EncounterPhase {
    Exploration,
    BossFight,
    Ending(Ending),
}

impl EncounterPhase {
    pub fn is_over(&self) -> bool {
        matches!(self, EncounterPhase::Ending(_))
    }
}

impl fmt::Display for EncounterPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncounterPhase::Exploration => write!(f, "exploration"),
            EncounterPhase::BossFight => write!(f, "the boss fight"),
            EncounterPhase::Ending(ending) => write!(f, "the {} ending", ending),
        }
    }
}

/// A single playthrough of the boss room.
pub struct Encounter {
    config: BossConfig,
    runtime: RuntimeConfig,
    rng: Arc<dyn RngOracle>,
    seed: u64,
    requirements: AltarRequirements,
    controller: PlayerController,

    player: PlayerSnapshot,
    boss: BossState,
    inventory: Inventory,
    phase: EncounterPhase,
    frame: u64,
    /// Frames left before the wither ending once the boss has died.
    wither_in: Option<u32>,
    events: Vec<GameEvent>,
}

impl Encounter {
    /// Creates an encounter in exploration with a dormant boss.
    ///
    /// The config must already be validated; content loaders do this.
    pub fn new(config: BossConfig, seed: u64, player: PlayerSnapshot) -> Self {
        let runtime = RuntimeConfig::default();
        let boss = BossState::from_config(&config);
        Self {
            controller: PlayerController::new(runtime.player.clone(), runtime.arena.width),
            config,
            runtime,
            rng: Arc::new(PcgRng),
            seed,
            requirements: AltarRequirements::default(),
            player,
            boss,
            inventory: Inventory::new(),
            phase: EncounterPhase::Exploration,
            frame: 0,
            wither_in: None,
            events: Vec::new(),
        }
    }

    pub fn with_runtime_config(mut self, runtime: RuntimeConfig) -> Self {
        self.controller = PlayerController::new(runtime.player.clone(), runtime.arena.width);
        self.runtime = runtime;
        self
    }

    pub fn with_rng(mut self, rng: Arc<dyn RngOracle>) -> Self {
        self.rng = rng;
        self
    }

    pub fn with_inventory(mut self, inventory: Inventory) -> Self {
        self.inventory = inventory;
        self
    }

    pub fn with_requirements(mut self, requirements: AltarRequirements) -> Self {
        self.requirements = requirements;
        self
    }

    pub fn phase(&self) -> EncounterPhase {
        self.phase
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn player(&self) -> &PlayerSnapshot {
        &self.player
    }

    pub fn boss(&self) -> &BossState {
        &self.boss
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    pub fn config(&self) -> &BossConfig {
        &self.config
    }

    /// Every event since the encounter began.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Offers the inventory at the altar.
    ///
    /// # Errors
    ///
    /// Fails outside exploration, when the player is too far from the altar,
    /// or when the inventory lacks required fragments.
    pub fn interact_altar(&mut self) -> Result<()> {
        if self.phase != EncounterPhase::Exploration {
            return Err(RuntimeError::AltarUnavailable { phase: self.phase });
        }

        let arena = &self.runtime.arena;
        let distance = self.player.center().distance(arena.altar);
        if distance >= arena.altar_reach {
            return Err(RuntimeError::AltarOutOfReach { distance });
        }

        activate(
            &mut self.boss,
            &self.inventory,
            &self.requirements,
            &self.config,
        )?;
        self.enter_fight();
        Ok(())
    }

    /// Skips the altar and starts the fight directly, optionally overriding
    /// where the boss stands and how much health it has left.
    ///
    /// # Errors
    ///
    /// Fails if the fight has already started or ended, or if the health
    /// override is not a positive number.
    pub fn begin_fight(&mut self, position: Option<Vec2>, health: Option<f32>) -> Result<()> {
        if self.phase != EncounterPhase::Exploration {
            return Err(RuntimeError::AltarUnavailable { phase: self.phase });
        }
        if let Some(health) = health
            && (health.is_nan() || health <= 0.0)
        {
            return Err(RuntimeError::InvalidBossHealth { health });
        }

        activate(
            &mut self.boss,
            &self.inventory,
            &AltarRequirements::new(std::iter::empty()),
            &self.config,
        )?;
        if let Some(position) = position {
            self.boss.position = position;
        }
        if let Some(health) = health {
            self.boss.health = health.clamp(0.0, self.config.tuning.max_health);
        }
        self.enter_fight();
        Ok(())
    }

    /// Advances one frame. Returns the events raised during it.
    ///
    /// Once an ending is reached the encounter is frozen and further ticks do
    /// nothing.
    pub fn tick(&mut self, actions: InputActions) -> &[GameEvent] {
        let first_new = self.events.len();
        if self.phase.is_over() {
            return &self.events[first_new..];
        }

        let frame = self.frame;
        self.frame += 1;

        let lock_on = (self.boss.active && self.boss.is_alive()).then_some(self.boss.position);
        self.controller.step(&mut self.player, actions, lock_on);

        if self.phase == EncounterPhase::BossFight {
            let env = BossEnv::new(&self.config, self.rng.as_ref(), self.seed);
            let effects = BossController::step(&mut self.boss, &self.player, &env);
            self.apply(frame, effects);
        }

        if self.player.health <= 0.0 {
            self.enter_ending(frame, Ending::Cocoon);
        } else if let Some(remaining) = self.wither_in {
            if remaining == 0 {
                self.enter_ending(frame, Ending::Wither);
            } else {
                self.wither_in = Some(remaining - 1);
            }
        }

        &self.events[first_new..]
    }

    fn enter_fight(&mut self) {
        self.phase = EncounterPhase::BossFight;
        self.wither_in = None;
        self.events.push(GameEvent::BossActivated { frame: self.frame });
        info!(
            frame = self.frame,
            health = self.boss.health,
            "boss fight started"
        );
    }

    fn apply(&mut self, frame: u64, effects: TickEffects) {
        if effects.player_detected {
            debug!(frame, "player detected");
            self.events.push(GameEvent::PlayerDetected { frame });
        }

        if effects.boss_hit {
            self.events.push(GameEvent::BossHit {
                frame,
                health: self.boss.health,
            });
        }

        if let Some(damage) = effects.player_damage {
            PlayerController::damage(&mut self.player, damage.amount);
            debug!(
                frame,
                amount = damage.amount,
                health = self.player.health,
                "player damaged"
            );
            self.events.push(GameEvent::PlayerDamaged {
                frame,
                amount: damage.amount,
                sources: damage.sources,
                health: self.player.health,
            });
        }

        if effects.ending == Some(Ending::Wither) {
            info!(frame, delay = self.runtime.arena.wither_delay, "boss defeated");
            self.events.push(GameEvent::BossDefeated { frame });
            self.wither_in = Some(self.runtime.arena.wither_delay);
        }
    }

    fn enter_ending(&mut self, frame: u64, ending: Ending) {
        if self.phase.is_over() {
            return;
        }
        self.phase = EncounterPhase::Ending(ending);
        self.wither_in = None;
        info!(frame, %ending, "encounter ended");
        self.events.push(GameEvent::EndingReached { frame, ending });
    }
}

impl fmt::Debug for Encounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Encounter")
            .field("phase", &self.phase)
            .field("frame", &self.frame)
            .field("seed", &self.seed)
            .field("player", &self.player)
            .field("boss", &self.boss)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lantern_core::{AiPhase, MemoryItem};

    fn all_fragments() -> Inventory {
        [
            MemoryItem::TrophyShard,
            MemoryItem::ToyShard,
            MemoryItem::BeltBuckle,
            MemoryItem::DiaryPage,
            MemoryItem::Yearbook,
        ]
        .into_iter()
        .collect()
    }

    fn at_altar() -> PlayerSnapshot {
        PlayerSnapshot::new(Vec2::new(720.0, 400.0))
    }

    #[test]
    fn altar_starts_the_fight() {
        let mut encounter =
            Encounter::new(BossConfig::default(), 1, at_altar()).with_inventory(all_fragments());

        encounter.interact_altar().unwrap();

        assert_eq!(encounter.phase(), EncounterPhase::BossFight);
        assert!(encounter.boss().active);
        assert_eq!(encounter.events(), &[GameEvent::BossActivated { frame: 0 }]);
    }

    #[test]
    fn altar_must_be_within_reach() {
        let player = PlayerSnapshot::new(Vec2::new(200.0, 400.0));
        let mut encounter =
            Encounter::new(BossConfig::default(), 1, player).with_inventory(all_fragments());

        let err = encounter.interact_altar().unwrap_err();
        assert!(matches!(err, RuntimeError::AltarOutOfReach { .. }));
        assert_eq!(encounter.phase(), EncounterPhase::Exploration);
    }

    #[test]
    fn incomplete_offering_is_refused() {
        let mut encounter = Encounter::new(BossConfig::default(), 1, at_altar());
        encounter.inventory_mut().collect(MemoryItem::Yearbook).unwrap();

        let err = encounter.interact_altar().unwrap_err();
        assert!(matches!(err, RuntimeError::Activation(_)));
        assert!(!encounter.boss().active);
    }

    #[test]
    fn altar_is_unavailable_once_fighting() {
        let mut encounter =
            Encounter::new(BossConfig::default(), 1, at_altar()).with_inventory(all_fragments());
        encounter.interact_altar().unwrap();

        let err = encounter.interact_altar().unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::AltarUnavailable {
                phase: EncounterPhase::BossFight
            }
        ));
    }

    #[test]
    fn boss_sleeps_during_exploration() {
        let mut encounter = Encounter::new(BossConfig::default(), 1, at_altar());
        let dormant = encounter.boss().clone();

        for _ in 0..50 {
            assert!(encounter.tick(InputActions::RIGHT).is_empty());
        }
        assert_eq!(encounter.boss(), &dormant);
        assert_eq!(encounter.frame(), 50);
    }

    #[test]
    fn begin_fight_applies_overrides() {
        let mut encounter = Encounter::new(BossConfig::default(), 1, at_altar());
        encounter
            .begin_fight(Some(Vec2::new(900.0, 400.0)), Some(250.0))
            .unwrap();

        assert_eq!(encounter.boss().position, Vec2::new(900.0, 400.0));
        assert_eq!(encounter.boss().health, 100.0);
        assert_eq!(encounter.boss().ai.phase(), AiPhase::Wander);
    }

    #[test]
    fn begin_fight_refuses_a_dead_boss() {
        for health in [0.0, -3.0, f32::NAN] {
            let mut encounter = Encounter::new(BossConfig::default(), 1, at_altar());
            let err = encounter.begin_fight(None, Some(health)).unwrap_err();

            assert!(matches!(err, RuntimeError::InvalidBossHealth { .. }));
            assert_eq!(encounter.phase(), EncounterPhase::Exploration);
            assert!(!encounter.boss().active);
        }
    }

    #[test]
    fn phase_display_names_the_ending() {
        assert_eq!(
            EncounterPhase::Ending(Ending::Cocoon).to_string(),
            "the cocoon ending"
        );
    }
}
