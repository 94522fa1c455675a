//! Integration test: achievement unlocks through gameplay
//!
//! Hoarder tiers from the ledger, slayer and boss-hunter tiers from kills,
//! Stargazer from the first constellation ascension. Unlocks are
//! idempotent and persist across restarts.

use nightwatch::achievements::{AchievementCategory, AchievementId, get_achievements_by_category};
use nightwatch::combat::EnemyKind;
use nightwatch::core::{Engine, EngineConfig, GameEvent, ManualClock};
use nightwatch::economy::ResourceKind;
use nightwatch::player::HeroClass;
use nightwatch::utils::persistence::{keys, MemoryStore, Store};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn engine_over(store: MemoryStore) -> Engine<ChaCha8Rng> {
    Engine::new(
        Box::new(store),
        Box::new(ManualClock::new(1_700_000_000)),
        ChaCha8Rng::seed_from_u64(9),
        EngineConfig::calm(),
    )
}

fn unlocked_in(events: &[GameEvent]) -> Vec<AchievementId> {
    events
        .iter()
        .filter_map(|e| match e {
            GameEvent::AchievementUnlocked(id) => Some(*id),
            _ => None,
        })
        .collect()
}

#[test]
fn test_hoarder_tiers_follow_ledger_total() {
    let mut engine = engine_over(MemoryStore::new());
    engine.add_resource(ResourceKind::Wood, 60);
    assert!(unlocked_in(&engine.drain_events()).is_empty());

    engine.add_resource(ResourceKind::Stone, 40);
    assert_eq!(
        unlocked_in(&engine.drain_events()),
        vec![AchievementId::HoarderI]
    );

    // Jumping past two tiers unlocks both at once.
    engine.add_resource(ResourceKind::LightShards, 10_000);
    assert_eq!(
        unlocked_in(&engine.drain_events()),
        vec![AchievementId::HoarderII, AchievementId::HoarderIII]
    );
    assert_eq!(engine.state().achievements.peak_resources_held, 10_100);
}

#[test]
fn test_spending_does_not_relock() {
    let mut engine = engine_over(MemoryStore::new());
    engine.add_resource(ResourceKind::Wood, 150);
    engine.spend_resource(ResourceKind::Wood, 150);
    engine.add_resource(ResourceKind::Wood, 150);
    let achievements = &engine.state().achievements;
    assert!(achievements.is_unlocked(AchievementId::HoarderI));
    assert_eq!(achievements.unlocked_count(), 1);
}

#[test]
fn test_slayer_after_hundred_kills() {
    let mut engine = engine_over(MemoryStore::new());
    engine.new_game(HeroClass::Vanguard);
    for _ in 0..99 {
        engine.record_kill(EnemyKind::Crawler);
    }
    assert!(!engine.state().achievements.is_unlocked(AchievementId::SlayerI));
    let progress = engine
        .state()
        .achievements
        .get_progress(AchievementId::SlayerI)
        .unwrap();
    assert_eq!(progress.current, 99);
    assert_eq!(progress.target, 100);
    engine.drain_events();

    engine.record_kill(EnemyKind::Crawler);
    assert!(unlocked_in(&engine.drain_events()).contains(&AchievementId::SlayerI));
}

#[test]
fn test_boss_kill_unlocks_boss_hunter() {
    let mut engine = engine_over(MemoryStore::new());
    engine.new_game(HeroClass::Arcanist);
    engine.spawn_boss(EnemyKind::Leviathan);
    engine.damage_boss(1_000, true);
    engine.damage_boss(1_000, false);
    assert!(engine.session().boss.is_none());

    let unlocked = unlocked_in(&engine.drain_events());
    assert!(unlocked.contains(&AchievementId::BossHunterI));
    assert_eq!(engine.state().achievements.total_bosses_defeated, 1);
    assert_eq!(engine.state().achievements.total_kills, 1);
}

#[test]
fn test_first_ascension_unlocks_stargazer() {
    let mut engine = engine_over(MemoryStore::new());
    engine.add_resource(ResourceKind::Stardust, 1_000);
    engine.drain_events();

    // Drone Bay needs Mercury's Stride, which needs Heart of Orion.
    assert!(engine.unlock_node("drone_bay").is_none());
    engine.unlock_node("heart_of_orion");
    engine.unlock_node("mercury_stride");
    let first = engine.unlock_node("drone_bay").unwrap();
    assert!(!first.ascended);
    assert!(unlocked_in(&engine.drain_events()).is_empty());

    // Max level is 1; the second purchase ascends at 25 * 1.5.
    let second = engine.unlock_node("drone_bay").unwrap();
    assert!(second.ascended);
    assert_eq!(second.cost, 37);
    let events = engine.drain_events();
    assert!(events.contains(&GameEvent::NodeAscended {
        id: "drone_bay".to_string(),
        level: 2
    }));
    assert_eq!(unlocked_in(&events), vec![AchievementId::Stargazer]);

    let third = engine.unlock_node("drone_bay").unwrap();
    assert!(third.ascended);
    assert!(unlocked_in(&engine.drain_events()).is_empty());
}

#[test]
fn test_unlocks_survive_restart() {
    let mut engine = engine_over(MemoryStore::new());
    engine.add_resource(ResourceKind::Food, 500);
    let raw = engine.store().load(keys::ACHIEVEMENTS).unwrap();

    let mut store = MemoryStore::new();
    store.save(keys::ACHIEVEMENTS, &raw).unwrap();
    let mut reloaded = engine_over(store);
    assert!(reloaded
        .state()
        .achievements
        .is_unlocked(AchievementId::HoarderI));

    reloaded.add_resource(ResourceKind::Food, 500);
    assert!(unlocked_in(&reloaded.drain_events()).is_empty());
}

#[test]
fn test_catalog_covers_every_category() {
    for category in AchievementCategory::ALL {
        assert!(!get_achievements_by_category(category).is_empty());
    }
}
