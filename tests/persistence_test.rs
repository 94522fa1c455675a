//! Integration test: durable state survives an engine restart
//!
//! Every mutator writes the records it touched before returning, so a new
//! engine built over the same store must see the same durable state while
//! run state starts fresh.

use nightwatch::arena::ChallengeMode;
use nightwatch::combat::EnemyKind;
use nightwatch::core::{Engine, EngineConfig, GameEvent, ManualClock, Settings};
use nightwatch::economy::ResourceKind;
use nightwatch::player::{HeroClass, UpgradeKind};
use nightwatch::session::GameStatus;
use nightwatch::tournament::TournamentStatus;
use nightwatch::utils::persistence::{keys, FileStore, MemoryStore, Store};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const START: i64 = 1_700_000_000;

fn boot(store: MemoryStore) -> Engine<ChaCha8Rng> {
    Engine::new(
        Box::new(store),
        Box::new(ManualClock::new(START)),
        ChaCha8Rng::seed_from_u64(5),
        EngineConfig::calm(),
    )
}

/// Snapshot everything the engine wrote into a fresh store.
fn copy_store(engine: &Engine<ChaCha8Rng>) -> MemoryStore {
    let mut copy = MemoryStore::new();
    for key in keys::ALL {
        if let Some(value) = engine.store().load(key) {
            copy.save(key, &value).unwrap();
        }
    }
    copy
}

#[test]
fn test_first_launch_writes_season() {
    let engine = boot(MemoryStore::new());
    assert!(engine.store().load(keys::SEASON).is_some());
    let season = engine.current_season().unwrap();
    assert_eq!(season.number, 1);
    assert_eq!(season.start, START);
}

#[test]
fn test_ledger_and_progress_survive_restart() {
    let mut engine = boot(MemoryStore::new());
    engine.add_resource(ResourceKind::LightShards, 200);
    assert_eq!(engine.purchase_upgrade(UpgradeKind::Vitality), Some(1));
    engine.new_game(HeroClass::Ranger);
    for _ in 0..3 {
        engine.record_kill(EnemyKind::Brute);
    }

    let reloaded = boot(copy_store(&engine));
    let state = reloaded.state();
    assert_eq!(state.ledger.get(ResourceKind::LightShards), 200 - 25 + 3);
    assert_eq!(state.player.upgrade_level(UpgradeKind::Vitality), 1);
    assert_eq!(state.player.max_health, 110);
    assert_eq!(state.player.kills_of(EnemyKind::Brute), 3);
    assert_eq!(state.player.hero_class, HeroClass::Ranger);

    // Run state does not survive; neither does the class lock.
    assert_eq!(reloaded.session().status, GameStatus::MainMenu);
    assert_eq!(reloaded.session().score, 0);
    assert!(!state.player.class_locked);
}

#[test]
fn test_records_and_stardust_survive_restart() {
    let mut engine = boot(MemoryStore::new());
    engine.new_game(HeroClass::Vanguard);
    for _ in 0..10 {
        engine.record_kill(EnemyKind::Juggernaut);
    }
    engine.damage_player(1_000);
    engine.advance_ms(engine.config().game_over_delay_ms);

    let reloaded = boot(copy_store(&engine));
    assert_eq!(reloaded.state().records.best_score, 5_000);
    assert_eq!(reloaded.state().records.runs_played, 1);
    // 5000 / 100 + 50 / 10
    assert_eq!(reloaded.state().ledger.get(ResourceKind::Stardust), 55);
}

#[test]
fn test_constellation_bonuses_apply_on_load() {
    let mut engine = boot(MemoryStore::new());
    engine.add_resource(ResourceKind::Stardust, 10);
    assert!(engine.unlock_node("heart_of_orion").is_some());
    assert!(engine.unlock_node("heart_of_orion").is_some());
    assert_eq!(engine.state().player.max_health, 120);

    let reloaded = boot(copy_store(&engine));
    assert_eq!(reloaded.state().constellation.level("heart_of_orion"), 2);
    assert_eq!(reloaded.state().player.max_health, 120);
    assert_eq!(reloaded.state().ledger.get(ResourceKind::Stardust), 0);
}

#[test]
fn test_arena_books_survive_restart() {
    let mut engine = boot(MemoryStore::new());
    engine.add_resource(ResourceKind::LightShards, 100);
    engine.add_friend("Mira", 120);
    engine.start_challenge("Mira", 40, ChallengeMode::ScoreRush);
    engine.forfeit_challenge();

    let reloaded = boot(copy_store(&engine));
    let state = reloaded.state();
    assert_eq!(state.arena.losses, 1);
    assert_eq!(state.battle_history.len(), 1);
    assert_eq!(state.friends.get("Mira").unwrap().losses_against, 1);
    assert_eq!(reloaded.analytics().total_battles, 1);
    assert!(reloaded.challenge().is_none());
}

#[test]
fn test_settings_survive_restart() {
    let mut engine = boot(MemoryStore::new());
    engine.update_settings(Settings {
        master_volume: 3.0,
        music_enabled: false,
        ..Settings::default()
    });
    assert_eq!(engine.settings().master_volume, 1.0);

    let reloaded = boot(copy_store(&engine));
    assert_eq!(reloaded.settings().master_volume, 1.0);
    assert!(!reloaded.settings().music_enabled);
}

#[test]
fn test_corrupt_record_falls_back_to_default() {
    let mut engine = boot(MemoryStore::new());
    engine.add_resource(ResourceKind::Wood, 30);
    engine.new_game(HeroClass::Vanguard);
    engine.record_kill(EnemyKind::Crawler);

    let mut store = copy_store(&engine);
    store.save(keys::PLAYER, "{\"health\": \"lots\"").unwrap();

    let reloaded = boot(store);
    assert_eq!(reloaded.state().ledger.get(ResourceKind::Wood), 30);
    assert_eq!(reloaded.state().player.total_kills(), 0);
    assert_eq!(reloaded.state().player.max_health, 100);
}

#[test]
fn test_missing_fields_take_defaults() {
    let mut store = MemoryStore::new();
    store.save(keys::SESSION, "{\"best_score\": 1234}").unwrap();
    store.save(keys::SETTINGS, "{\"sfx_enabled\": false}").unwrap();

    let engine = boot(store);
    assert_eq!(engine.state().records.best_score, 1234);
    assert_eq!(engine.state().records.runs_played, 0);
    assert!(!engine.settings().sfx_enabled);
    assert!(engine.settings().music_enabled);
}

#[test]
fn test_partial_tournament_record_is_inert() {
    let mut store = MemoryStore::new();
    store
        .save(keys::TOURNAMENTS, r#"{"tournaments": [{"id": "t1", "name": "old"}]}"#)
        .unwrap();
    let mut engine = boot(store);
    engine.add_resource(ResourceKind::LightShards, 50);

    let t = engine.tournament("t1").unwrap();
    assert_eq!(t.capacity, 0);
    assert_eq!(t.status, TournamentStatus::Upcoming);
    assert!(!engine.fill_tournament("t1"));
    assert!(!engine.join_tournament("t1"));
    assert!(engine.advance_tournament("t1").is_none());
    assert_eq!(engine.state().ledger.get(ResourceKind::LightShards), 50);

    // Fresh tournaments still work alongside it.
    let id = engine.create_tournament("Weekly", 10, 4).unwrap();
    assert!(engine.join_tournament(&id));
    assert!(engine.fill_tournament(&id));
}

#[test]
fn test_partial_season_record_reopens_current() {
    let mut store = MemoryStore::new();
    store
        .save(keys::SEASON, r#"{"current": {"number": 3}, "history": [{"number": 2, "status": "ended"}]}"#)
        .unwrap();
    let mut engine = boot(store);

    let season = engine.current_season().unwrap();
    assert_eq!(season.number, 3);
    assert_eq!(season.start, START);
    assert!(season.end > START);
    assert!(engine.drain_events().iter().all(|e| !matches!(e, GameEvent::SeasonEnded { .. })));

    // Default reward table applies to the stored past season.
    let reward = engine.claim_season_reward(2).unwrap();
    assert_eq!(reward.light_shards, 100);
}

#[test]
fn test_file_store_round_trip() {
    let dir = std::env::temp_dir().join(format!("nightwatch-test-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    {
        let store = FileStore::at(dir.clone()).unwrap();
        let mut engine = Engine::new(
            Box::new(store),
            Box::new(ManualClock::new(START)),
            ChaCha8Rng::seed_from_u64(1),
            EngineConfig::calm(),
        );
        engine.add_resource(ResourceKind::Food, 12);
    }
    assert!(dir.join("ledger.json").exists());

    let store = FileStore::at(dir.clone()).unwrap();
    let engine = Engine::new(
        Box::new(store),
        Box::new(ManualClock::new(START)),
        ChaCha8Rng::seed_from_u64(1),
        EngineConfig::calm(),
    );
    assert_eq!(engine.state().ledger.get(ResourceKind::Food), 12);
    let _ = std::fs::remove_dir_all(&dir);
}
