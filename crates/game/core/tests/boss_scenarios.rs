//! End-to-end encounter scenarios against the public controller API.

use lantern_core::{
    AiPhase, AiState, AltarRequirements, BossConfig, BossController, BossEnv, BossState, Ending,
    Inventory, MemoryItem, PlayerFlags, PlayerSnapshot, RngOracle, Vec2, VineAttack, activate,
};

/// Oracle whose every chance roll fails: no stuns, no scared cancels, no
/// pain lines.
struct NeverRng;

impl RngOracle for NeverRng {
    fn next_u32(&self, _seed: u64) -> u32 {
        u32::MAX
    }
}

fn beam(position: Vec2) -> PlayerSnapshot {
    PlayerSnapshot::new(position).with_flags(
        PlayerFlags::FLASHLIGHT | PlayerFlags::HIGH_BEAM | PlayerFlags::FACING_RIGHT,
    )
}

/// Collecting every fragment and using the altar wakes the dormant boss.
#[test]
fn altar_offering_wakes_the_boss() {
    let config = BossConfig::default();
    let mut boss = BossState::inert(Vec2::new(600.0, 350.0), 100.0);
    let mut inventory = Inventory::new();

    for item in [
        MemoryItem::TrophyShard,
        MemoryItem::ToyShard,
        MemoryItem::BeltBuckle,
        MemoryItem::DiaryPage,
    ] {
        inventory.collect(item).expect("inventory has room");
    }
    assert!(
        activate(&mut boss, &inventory, &AltarRequirements::default(), &config).is_err(),
        "the yearbook is still missing"
    );
    assert!(!boss.active);

    inventory.collect(MemoryItem::Yearbook).expect("inventory has room");
    activate(&mut boss, &inventory, &AltarRequirements::default(), &config)
        .expect("all fragments offered");

    assert!(boss.active);
    assert_eq!(boss.health, 100.0);
    assert_eq!(boss.ai.phase(), AiPhase::Wander);
}

/// A crouched, motionless player in the dark is invisible at range.
#[test]
fn still_crouched_player_in_the_dark_stays_hidden() {
    let config = BossConfig::default();
    let rng = NeverRng;
    let env = BossEnv::new(&config, &rng, 1);
    let mut boss = BossState::from_config(&config);
    boss.active = true;
    boss.position = Vec2::new(800.0, 400.0);
    boss.ai = AiState::Idle { wake_in: 0 };

    let player = PlayerSnapshot::new(Vec2::new(300.0, 400.0)).with_flags(PlayerFlags::CROUCHING);
    assert_eq!(boss.position.distance(player.position), 500.0);

    for _ in 0..30 {
        let effects = BossController::step(&mut boss, &player, &env);
        assert!(!effects.player_detected);
        assert_eq!(boss.ai.phase(), AiPhase::Wander);
    }
}

/// Switching the flashlight on reveals the player wherever they stand.
#[test]
fn flashlight_reveals_the_player_immediately() {
    let config = BossConfig::default();
    let rng = NeverRng;
    let env = BossEnv::new(&config, &rng, 1);
    let mut boss = BossState::from_config(&config);
    boss.active = true;
    boss.ai = AiState::Wander { repath_in: 90 };

    let player = PlayerSnapshot::new(Vec2::new(1080.0, 400.0)).with_flags(PlayerFlags::FLASHLIGHT);

    let first = BossController::step(&mut boss, &player, &env);
    assert!(first.player_detected);
    assert_eq!(boss.ai.phase(), AiPhase::Chase);

    for _ in 0..20 {
        let effects = BossController::step(&mut boss, &player, &env);
        assert!(!effects.player_detected);
    }
}

/// Landing the beam during a windup cancels the strike with a flinch.
#[test]
fn beam_hit_interrupts_windup() {
    let config = BossConfig::default();
    let rng = NeverRng;
    let env = BossEnv::new(&config, &rng, 1);
    let mut boss = BossState::from_config(&config);
    boss.active = true;
    boss.position = Vec2::new(800.0, 400.0);
    boss.ai = AiState::Windup { strike_in: 15 };
    boss.vine = VineAttack {
        active: true,
        target: Vec2::new(520.0, 440.0),
        progress: 0.0,
    };

    let outcome = BossController::update(&boss, &beam(Vec2::new(500.0, 400.0)), &env);

    assert!(outcome.effects.boss_hit);
    assert_eq!(outcome.state.ai, AiState::Wander { repath_in: 30 });
    assert!(!outcome.state.vine.active);
    assert!(outcome.state.health < boss.health);
}

/// Sustained beam burns a weakened boss down; the ending fires exactly once.
#[test]
fn sustained_beam_kills_and_ends_once() {
    let config = BossConfig::default();
    let rng = NeverRng;
    let env = BossEnv::new(&config, &rng, 1);
    let mut boss = BossState::from_config(&config);
    boss.active = true;
    boss.health = 10.0;
    boss.position = Vec2::new(800.0, 400.0);
    boss.ai = AiState::Wander { repath_in: 0 };

    let player = beam(Vec2::new(500.0, 400.0));

    let mut endings = Vec::new();
    let mut death_tick = None;
    for tick in 0..600 {
        let effects = BossController::step(&mut boss, &player, &env);
        if let Some(ending) = effects.ending {
            endings.push(ending);
            death_tick.get_or_insert(tick);
        }
    }

    assert_eq!(endings, vec![Ending::Wither]);
    assert_eq!(boss.health, 0.0);
    let death_tick = death_tick.expect("boss died");
    assert!((195..=205).contains(&death_tick), "died at tick {death_tick}");

    let frozen = boss.clone();
    let effects = BossController::step(&mut boss, &player, &env);
    assert!(effects.is_empty());
    assert_eq!(boss, frozen);
}

/// The boss crosses the stage through a stair to reach a lit player below.
#[test]
fn chase_descends_via_nearest_stair() {
    let config = BossConfig::default();
    let rng = NeverRng;
    let env = BossEnv::new(&config, &rng, 1);
    let mut boss = BossState::from_config(&config);
    boss.active = true;
    boss.position = Vec2::new(1000.0, 220.0);
    boss.ai = AiState::Chase { attack_ready_in: 1_000 };

    let player = PlayerSnapshot::new(Vec2::new(900.0, 400.0)).with_flags(PlayerFlags::FLASHLIGHT);

    let mut max_x: f32 = boss.position.x;
    for _ in 0..600 {
        BossController::step(&mut boss, &player, &env);
        max_x = max_x.max(boss.position.x);
    }

    assert!(max_x > 1090.0, "boss should have walked to the right stair");
    assert_eq!(boss.position.y, config.geometry.floor_level_y);
    assert!((boss.position.x - 900.0).abs() <= 2.0);
}
