//! Integration test: wagered challenges through the engine
//!
//! Escrow, the elevated-difficulty challenge run, settlement by time-up,
//! by player death and by forfeit, friend bookkeeping and the analytics
//! snapshot refreshed after each settlement.

use nightwatch::arena::{ChallengeMode, Outcome, Title};
use nightwatch::combat::EnemyKind;
use nightwatch::core::{Engine, EngineConfig, GameEvent, ManualClock};
use nightwatch::economy::ResourceKind;
use nightwatch::player::HeroClass;
use nightwatch::session::GameStatus;
use nightwatch::utils::persistence::MemoryStore;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn engine() -> Engine<ChaCha8Rng> {
    Engine::new(
        Box::new(MemoryStore::new()),
        Box::new(ManualClock::new(1_700_000_000)),
        ChaCha8Rng::seed_from_u64(11),
        EngineConfig::calm(),
    )
}

fn funded(shards: u64) -> Engine<ChaCha8Rng> {
    let mut engine = engine();
    engine.add_resource(ResourceKind::LightShards, shards);
    engine.drain_events();
    engine
}

fn shards(engine: &Engine<ChaCha8Rng>) -> u64 {
    engine.state().ledger.get(ResourceKind::LightShards)
}

/// Tick until the active challenge settles, collecting events.
fn play_out(engine: &mut Engine<ChaCha8Rng>) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for _ in 0..300 {
        if engine.challenge().is_none() {
            break;
        }
        engine.tick();
        events.extend(engine.drain_events());
    }
    events
}

// =============================================================================
// Starting a challenge
// =============================================================================

#[test]
fn test_start_escrows_wager_and_begins_run() {
    let mut engine = funded(150);
    assert!(engine.start_challenge("Vex", 100, ChallengeMode::ScoreRush));

    assert_eq!(shards(&engine), 50);
    let challenge = engine.challenge().unwrap();
    assert_eq!(challenge.wager, 100);
    assert_eq!(challenge.opponent.name, "Vex");
    assert!((0.8..1.5).contains(&challenge.opponent.difficulty));
    assert_eq!(challenge.time_remaining(), Some(120));

    assert!(engine.is_challenge_run());
    assert_eq!(engine.session().status, GameStatus::Playing);
    assert_eq!(engine.session().wave, 5);
    assert!(engine.drain_events().contains(&GameEvent::ChallengeStarted {
        opponent: "Vex".to_string(),
        mode: ChallengeMode::ScoreRush,
    }));
}

#[test]
fn test_unaffordable_wager_is_refused() {
    let mut engine = funded(40);
    assert!(!engine.start_challenge("Vex", 100, ChallengeMode::ScoreRush));
    assert_eq!(shards(&engine), 40);
    assert!(engine.challenge().is_none());
    assert_eq!(engine.session().status, GameStatus::MainMenu);
}

#[test]
fn test_unknown_opponent_is_refused() {
    let mut engine = funded(100);
    assert!(!engine.start_challenge("Nobody", 10, ChallengeMode::ScoreRush));
    assert_eq!(shards(&engine), 100);
}

#[test]
fn test_only_one_challenge_at_a_time() {
    let mut engine = funded(300);
    assert!(engine.start_challenge("Vex", 100, ChallengeMode::SuddenDeath));
    assert!(!engine.start_challenge("Nyra", 100, ChallengeMode::SuddenDeath));
    assert_eq!(shards(&engine), 200);
}

// =============================================================================
// Settlement
// =============================================================================

#[test]
fn test_score_rush_victory_pays_pot_minus_cut() {
    let mut engine = funded(100);
    assert!(engine.start_challenge("Vex", 100, ChallengeMode::ScoreRush));
    // Far beyond anything the simulated opponent can reach in 120 seconds.
    for _ in 0..30 {
        engine.record_kill(EnemyKind::Titan);
    }
    let kill_shards = shards(&engine);
    let events = play_out(&mut engine);

    assert!(events.contains(&GameEvent::ChallengeSettled {
        outcome: Outcome::Victory,
        net_profit: 80,
    }));
    assert_eq!(shards(&engine), kill_shards + 180);
    assert!(events.contains(&GameEvent::TitleEarned(Title::FirstBlood)));

    let arena = &engine.state().arena;
    assert_eq!(arena.wins, 1);
    assert_eq!(arena.rank_points, 25);
    assert_eq!(arena.net_profit, 80);

    let record = engine.state().battle_history.records.front().unwrap();
    assert_eq!(record.outcome, Outcome::Victory);
    assert_eq!(record.payout, 180);
    assert_eq!(record.player_score, 75_000);

    // Challenge runs end without stardust or personal records.
    assert_eq!(engine.session().status, GameStatus::GameOver);
    assert!(events.contains(&GameEvent::GameOver {
        score: 75_000,
        wave: 5,
        stardust: 0,
    }));
    assert_eq!(engine.state().records.runs_played, 0);
    assert!(!engine.is_challenge_run());
}

#[test]
fn test_death_settles_as_defeat_immediately() {
    let mut engine = funded(100);
    engine.start_challenge("Nyra", 100, ChallengeMode::SuddenDeath);
    engine.drain_events();

    engine.damage_player(1_000);
    assert!(engine.challenge().is_none());
    let events = engine.drain_events();
    assert!(events.contains(&GameEvent::ChallengeSettled {
        outcome: Outcome::Defeat,
        net_profit: -100,
    }));
    assert_eq!(shards(&engine), 0);
    assert_eq!(engine.state().arena.losses, 1);
    assert_eq!(engine.state().arena.rank_points, 0);

    engine.advance_ms(engine.config().game_over_delay_ms);
    assert_eq!(engine.session().status, GameStatus::GameOver);
    assert_eq!(engine.state().ledger.get(ResourceKind::Stardust), 0);
}

#[test]
fn test_forfeit_counts_as_defeat() {
    let mut engine = funded(100);
    engine.start_challenge("Korrin", 60, ChallengeMode::ScoreRush);
    assert!(engine.forfeit_challenge());
    assert!(!engine.forfeit_challenge());

    assert_eq!(shards(&engine), 40);
    assert_eq!(engine.session().status, GameStatus::GameOver);
    let record = engine.state().battle_history.records.front().unwrap();
    assert_eq!(record.outcome, Outcome::Defeat);
    assert_eq!(record.net_profit, -60);
}

#[test]
fn test_new_game_forfeits_open_challenge() {
    let mut engine = funded(100);
    engine.start_challenge("Vex", 100, ChallengeMode::ScoreRush);
    assert!(!engine.return_to_menu());

    engine.new_game(HeroClass::Ranger);
    assert!(engine.challenge().is_none());
    assert!(!engine.is_challenge_run());
    assert_eq!(engine.session().wave, 1);
    assert_eq!(engine.state().arena.losses, 1);
}

#[test]
fn test_settlement_moves_rival_standing() {
    let mut engine = funded(100);
    let before = engine.state().season.rivals["Sable"].rank_points;
    engine.start_challenge("Sable", 50, ChallengeMode::SuddenDeath);
    engine.forfeit_challenge();

    let standing = &engine.state().season.rivals["Sable"];
    assert_eq!(standing.rank_points, before + 25);
    assert_eq!(standing.wins, 1);
}

// =============================================================================
// Friends and analytics
// =============================================================================

#[test]
fn test_friend_challenge_updates_head_to_head() {
    let mut engine = funded(100);
    assert!(engine.add_friend("Mira", 300));
    assert!(!engine.add_friend("mira", 10));
    assert!(!engine.add_friend("   ", 10));

    assert!(engine.start_challenge("Mira", 50, ChallengeMode::SuddenDeath));
    engine.forfeit_challenge();

    let friend = engine.state().friends.get("Mira").unwrap();
    assert_eq!(friend.losses_against, 1);
    assert_eq!(friend.rank_points, 325);

    assert!(engine.remove_friend("MIRA"));
    assert!(!engine.start_challenge("Mira", 10, ChallengeMode::SuddenDeath));
}

#[test]
fn test_analytics_refresh_after_each_battle() {
    let mut engine = funded(300);
    for rival in ["Vex", "Vex", "Nyra"] {
        engine.start_challenge(rival, 50, ChallengeMode::ScoreRush);
        engine.forfeit_challenge();
    }

    let analytics = engine.analytics();
    assert_eq!(analytics.total_battles, 3);
    assert_eq!(analytics.losses, 3);
    assert_eq!(analytics.win_rate, 0.0);
    assert_eq!(analytics.net_profit, -150);
    assert_eq!(analytics.worst_opponent.as_deref(), Some("Vex"));
    assert_eq!(analytics.recent_form, vec![Outcome::Defeat; 3]);
    assert_eq!(engine.state().battle_history.len(), 3);
}

#[test]
fn test_battle_history_is_capped() {
    let mut engine = Engine::new(
        Box::new(MemoryStore::new()),
        Box::new(ManualClock::new(0)),
        ChaCha8Rng::seed_from_u64(3),
        EngineConfig {
            battle_history_cap: 2,
            ..EngineConfig::calm()
        },
    );
    engine.add_resource(ResourceKind::LightShards, 100);
    for rival in ["Vex", "Nyra", "Talon"] {
        engine.start_challenge(rival, 10, ChallengeMode::ScoreRush);
        engine.forfeit_challenge();
    }
    let names: Vec<&str> = engine
        .state()
        .battle_history
        .iter()
        .map(|r| r.opponent.as_str())
        .collect();
    assert_eq!(names, vec!["Talon", "Nyra"]);
}
