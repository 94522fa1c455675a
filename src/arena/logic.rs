//! Challenge lifecycle: start, simulated opponent tick, settlement.

use super::types::*;
use crate::core::constants::*;
use crate::economy::{Ledger, ResourceKind};
use rand::Rng;
use uuid::Uuid;

/// Escrow the wager and build the challenge.
///
/// Returns `None` without touching the ledger when the player cannot cover
/// the wager.
pub fn start_challenge<R: Rng>(
    ledger: &mut Ledger,
    opponent: OpponentProfile,
    wager: u64,
    mode: ChallengeMode,
    now: i64,
    rng: &mut R,
) -> Option<ChallengeState> {
    if !ledger.consume(ResourceKind::LightShards, wager) {
        return None;
    }
    let difficulty = rng.gen_range(OPPONENT_DIFFICULTY_MIN..OPPONENT_DIFFICULTY_MAX);
    Some(ChallengeState {
        active: true,
        mode,
        opponent: OpponentSnapshot {
            name: opponent.name,
            avatar: opponent.avatar,
            score: 0,
            health: OPPONENT_MAX_HEALTH,
            difficulty,
        },
        wager,
        started_at: now,
        duration: mode.duration_seconds(),
        elapsed: 0,
    })
}

/// Advance the simulated opponent one second.
///
/// No-op on an inactive challenge. Returns why the match ended, if it did.
pub fn tick_challenge<R: Rng>(challenge: &mut ChallengeState, rng: &mut R) -> Option<ChallengeEnd> {
    if !challenge.active {
        return None;
    }
    challenge.elapsed += 1;
    match challenge.mode {
        ChallengeMode::ScoreRush => {
            let base = rng.gen::<f64>() * OPPONENT_SCORE_PER_TICK_MAX as f64;
            challenge.opponent.score += (base * challenge.opponent.difficulty) as u64;
            if rng.gen::<f64>() < OPPONENT_BONUS_CHANCE {
                challenge.opponent.score += OPPONENT_BONUS_SCORE;
            }
            if challenge.elapsed >= challenge.duration {
                return Some(ChallengeEnd::TimeUp);
            }
        }
        ChallengeMode::SuddenDeath => {
            if rng.gen::<f64>() < SUDDEN_DEATH_HIT_CHANCE {
                let hit = rng.gen_range(SUDDEN_DEATH_HIT_MIN..=SUDDEN_DEATH_HIT_MAX);
                challenge.opponent.health = challenge.opponent.health.saturating_sub(hit);
                if challenge.opponent.health == 0 {
                    return Some(ChallengeEnd::OpponentDown);
                }
            }
        }
    }
    None
}

/// Score comparison at the buzzer. Equal scores are a draw.
pub fn score_outcome(player_score: u64, opponent_score: u64) -> Outcome {
    use std::cmp::Ordering;
    match player_score.cmp(&opponent_score) {
        Ordering::Greater => Outcome::Victory,
        Ordering::Less => Outcome::Defeat,
        Ordering::Equal => Outcome::Draw,
    }
}

/// Gross payout and net profit for a settled wager.
///
/// Victory pays the pot minus the house cut; a draw refunds the wager; a
/// defeat forfeits it.
///
/// The cut rounds up, so a winner never nets more than 80% of the wager.
pub fn payout(wager: u64, outcome: Outcome) -> (u64, i64) {
    match outcome {
        Outcome::Victory => {
            let pot = u128::from(wager) * 2;
            let house_cut = (pot * u128::from(HOUSE_CUT_PERCENT)).div_ceil(100);
            let credited = u64::try_from(pot - house_cut).unwrap_or(u64::MAX);
            let net = i128::from(credited) - i128::from(wager);
            (credited, i64::try_from(net).unwrap_or(i64::MAX))
        }
        Outcome::Draw => (wager, 0),
        Outcome::Defeat => (0, i64::try_from(wager).map_or(i64::MIN, |w| -w)),
    }
}

/// Result of [`settle`].
#[derive(Debug, Clone, PartialEq)]
pub struct Settlement {
    pub record: BattleRecord,
    pub new_titles: Vec<Title>,
    /// Set when the rank tier changed.
    pub new_tier: Option<RankTier>,
}

/// Everything settlement mutates.
pub struct ArenaBooks<'a> {
    pub ledger: &'a mut Ledger,
    pub stats: &'a mut ArenaStats,
    pub history: &'a mut BattleHistory,
    pub history_cap: usize,
}

/// Close out a challenge: credit the ledger, record the battle, update
/// stats, rank and titles.
pub fn settle(
    books: ArenaBooks<'_>,
    challenge: &ChallengeState,
    outcome: Outcome,
    player_score: u64,
    now: i64,
) -> Settlement {
    let (credited, net_profit) = payout(challenge.wager, outcome);
    books.ledger.add(ResourceKind::LightShards, credited);

    let stats = books.stats;
    stats.total_battles += 1;
    stats.total_wagered = stats.total_wagered.saturating_add(challenge.wager);
    stats.net_profit = stats.net_profit.saturating_add(net_profit);
    match outcome {
        Outcome::Victory => {
            stats.wins += 1;
            stats.total_winnings = stats.total_winnings.saturating_add(credited);
            stats.current_streak += 1;
            stats.best_streak = stats.best_streak.max(stats.current_streak);
        }
        Outcome::Defeat => {
            stats.losses += 1;
            stats.current_streak = 0;
        }
        Outcome::Draw => {
            stats.draws += 1;
            stats.current_streak = 0;
        }
    }

    let before = stats.rank_points;
    stats.rank_points = (before as i64 + outcome.rank_delta()).max(0) as u32;
    let rank_delta = stats.rank_points as i64 - before as i64;

    let old_tier = stats.rank_tier;
    stats.rank_tier = RankTier::from_points(stats.rank_points);
    let new_tier = (stats.rank_tier != old_tier).then_some(stats.rank_tier);

    let mut new_titles = Vec::new();
    for title in Title::ALL {
        if title.earned(stats) && stats.titles.insert(title) {
            new_titles.push(title);
        }
    }

    let record = BattleRecord {
        id: Uuid::new_v4().to_string(),
        timestamp: now,
        opponent: challenge.opponent.name.clone(),
        mode: challenge.mode,
        outcome,
        player_score,
        opponent_score: challenge.opponent.score,
        wager: challenge.wager,
        payout: credited,
        net_profit,
        rank_delta,
    };
    books.history.push(record.clone(), books.history_cap);

    Settlement {
        record,
        new_titles,
        new_tier,
    }
}

/// Add a friend by name. Refuses blanks and duplicates.
pub fn add_friend(friends: &mut FriendList, name: &str, rank_points: u32) -> bool {
    let name = name.trim();
    if name.is_empty() || friends.get(name).is_some() {
        return false;
    }
    friends.friends.push(Friend {
        name: name.to_string(),
        rank_points,
        ..Default::default()
    });
    true
}

pub fn remove_friend(friends: &mut FriendList, name: &str) -> bool {
    let before = friends.friends.len();
    friends
        .friends
        .retain(|f| !f.name.eq_ignore_ascii_case(name));
    friends.friends.len() != before
}

/// Update the head-to-head record. Returns false if `name` is not a friend.
pub fn record_friend_result(friends: &mut FriendList, name: &str, outcome: Outcome) -> bool {
    let Some(friend) = friends.get_mut(name) else {
        return false;
    };
    match outcome {
        Outcome::Victory => {
            friend.wins_against += 1;
            friend.rank_points = friend.rank_points.saturating_sub(RANK_POINTS_VICTORY as u32);
        }
        Outcome::Defeat => {
            friend.losses_against += 1;
            friend.rank_points += RANK_POINTS_VICTORY as u32;
        }
        Outcome::Draw => friend.draws += 1,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn vex() -> OpponentProfile {
        OpponentProfile {
            name: "Vex".into(),
            avatar: "fox".into(),
        }
    }

    fn funded(amount: u64) -> Ledger {
        let mut ledger = Ledger::new();
        ledger.add(ResourceKind::LightShards, amount);
        ledger
    }

    fn settle_with(
        ledger: &mut Ledger,
        stats: &mut ArenaStats,
        history: &mut BattleHistory,
        challenge: &ChallengeState,
        outcome: Outcome,
    ) -> Settlement {
        settle(
            ArenaBooks {
                ledger,
                stats,
                history,
                history_cap: BATTLE_HISTORY_CAP,
            },
            challenge,
            outcome,
            1000,
            0,
        )
    }

    #[test]
    fn test_start_refused_without_funds() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut ledger = funded(50);
        let challenge = start_challenge(&mut ledger, vex(), 100, ChallengeMode::ScoreRush, 0, &mut rng);
        assert!(challenge.is_none());
        assert_eq!(ledger.get(ResourceKind::LightShards), 50);
    }

    #[test]
    fn test_start_escrows_and_draws_difficulty() {
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut ledger = funded(150);
            let challenge =
                start_challenge(&mut ledger, vex(), 100, ChallengeMode::SuddenDeath, 42, &mut rng).unwrap();
            assert_eq!(ledger.get(ResourceKind::LightShards), 50);
            assert!(challenge.active);
            assert_eq!(challenge.duration, 0);
            assert_eq!(challenge.opponent.health, OPPONENT_MAX_HEALTH);
            let d = challenge.opponent.difficulty;
            assert!((OPPONENT_DIFFICULTY_MIN..OPPONENT_DIFFICULTY_MAX).contains(&d));
        }
    }

    #[test]
    fn test_victory_settlement_conservation() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut ledger = funded(100);
        let mut stats = ArenaStats::default();
        let mut history = BattleHistory::new();
        let challenge = start_challenge(&mut ledger, vex(), 100, ChallengeMode::ScoreRush, 0, &mut rng).unwrap();
        assert_eq!(ledger.get(ResourceKind::LightShards), 0);

        let settlement = settle_with(&mut ledger, &mut stats, &mut history, &challenge, Outcome::Victory);
        assert_eq!(ledger.get(ResourceKind::LightShards), 180);
        assert_eq!(settlement.record.net_profit, 80);
        assert_eq!(settlement.record.payout, 180);
        assert_eq!(stats.net_profit, 80);
        assert_eq!(stats.rank_points, 25);
        assert_eq!(settlement.new_titles, vec![Title::FirstBlood]);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_house_cut_rounds_up() {
        assert_eq!(payout(100, Outcome::Victory), (180, 80));
        // 0.6 of a shard cut becomes 1.
        assert_eq!(payout(3, Outcome::Victory), (5, 2));
        assert_eq!(payout(1, Outcome::Victory), (1, 0));
        for wager in 1..=50u64 {
            let (_, net) = payout(wager, Outcome::Victory);
            assert!(net as f64 <= wager as f64 * 0.8);
        }
    }

    #[test]
    fn test_payout_extremes_do_not_wrap() {
        let (credited, net) = payout(u64::MAX, Outcome::Victory);
        assert_eq!(credited, u64::MAX);
        assert_eq!(net, 0);
        assert_eq!(payout(u64::MAX, Outcome::Defeat).1, i64::MIN);
    }

    #[test]
    fn test_defeat_forfeits_wager_and_floors_rank() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut ledger = funded(100);
        let mut stats = ArenaStats::default();
        let mut history = BattleHistory::new();
        let challenge = start_challenge(&mut ledger, vex(), 60, ChallengeMode::ScoreRush, 0, &mut rng).unwrap();

        let settlement = settle_with(&mut ledger, &mut stats, &mut history, &challenge, Outcome::Defeat);
        assert_eq!(ledger.get(ResourceKind::LightShards), 40);
        assert_eq!(settlement.record.net_profit, -60);
        assert_eq!(stats.rank_points, 0);
        assert_eq!(settlement.record.rank_delta, 0);
        assert_eq!(stats.losses, 1);
    }

    #[test]
    fn test_draw_refunds_and_resets_streak() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut ledger = funded(100);
        let mut stats = ArenaStats {
            current_streak: 3,
            best_streak: 3,
            ..Default::default()
        };
        let mut history = BattleHistory::new();
        let challenge = start_challenge(&mut ledger, vex(), 100, ChallengeMode::ScoreRush, 0, &mut rng).unwrap();

        settle_with(&mut ledger, &mut stats, &mut history, &challenge, Outcome::Draw);
        assert_eq!(ledger.get(ResourceKind::LightShards), 100);
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.best_streak, 3);
        assert_eq!(stats.draws, 1);
    }

    #[test]
    fn test_streak_titles_and_tier_change() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut ledger = funded(1000);
        let mut stats = ArenaStats::default();
        let mut history = BattleHistory::new();
        let mut tiers = Vec::new();
        for _ in 0..5 {
            let challenge = start_challenge(&mut ledger, vex(), 10, ChallengeMode::ScoreRush, 0, &mut rng).unwrap();
            let s = settle_with(&mut ledger, &mut stats, &mut history, &challenge, Outcome::Victory);
            tiers.extend(s.new_tier);
        }
        assert_eq!(stats.best_streak, 5);
        assert!(stats.titles.contains(&Title::Unstoppable));
        assert_eq!(stats.rank_points, 125);
        assert_eq!(tiers, vec![RankTier::Silver]);
    }

    #[test]
    fn test_score_rush_ends_at_duration() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let mut ledger = funded(10);
        let mut challenge = start_challenge(&mut ledger, vex(), 10, ChallengeMode::ScoreRush, 0, &mut rng).unwrap();
        let mut ended = None;
        for _ in 0..SCORE_RUSH_DURATION_SECONDS {
            assert!(ended.is_none());
            ended = tick_challenge(&mut challenge, &mut rng);
        }
        assert_eq!(ended, Some(ChallengeEnd::TimeUp));
        assert!(challenge.opponent.score > 0);
    }

    #[test]
    fn test_sudden_death_opponent_eventually_falls() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut ledger = funded(10);
        let mut challenge = start_challenge(&mut ledger, vex(), 10, ChallengeMode::SuddenDeath, 0, &mut rng).unwrap();
        let mut ended = None;
        for _ in 0..10_000 {
            ended = tick_challenge(&mut challenge, &mut rng);
            if ended.is_some() {
                break;
            }
        }
        assert_eq!(ended, Some(ChallengeEnd::OpponentDown));
        assert_eq!(challenge.opponent.health, 0);
        assert_eq!(challenge.opponent.score, 0);
    }

    #[test]
    fn test_inactive_challenge_tick_is_noop() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut ledger = funded(10);
        let mut challenge = start_challenge(&mut ledger, vex(), 10, ChallengeMode::ScoreRush, 0, &mut rng).unwrap();
        challenge.active = false;
        let before = challenge.clone();
        assert!(tick_challenge(&mut challenge, &mut rng).is_none());
        assert_eq!(challenge, before);
    }

    #[test]
    fn test_score_outcome() {
        assert_eq!(score_outcome(10, 5), Outcome::Victory);
        assert_eq!(score_outcome(5, 10), Outcome::Defeat);
        assert_eq!(score_outcome(7, 7), Outcome::Draw);
    }

    #[test]
    fn test_friends() {
        let mut friends = FriendList::default();
        assert!(add_friend(&mut friends, "Mira", 200));
        assert!(!add_friend(&mut friends, "mira", 10));
        assert!(!add_friend(&mut friends, "  ", 10));

        assert!(record_friend_result(&mut friends, "Mira", Outcome::Victory));
        assert!(record_friend_result(&mut friends, "Mira", Outcome::Defeat));
        assert!(record_friend_result(&mut friends, "Mira", Outcome::Draw));
        let mira = friends.get("Mira").unwrap();
        assert_eq!((mira.wins_against, mira.losses_against, mira.draws), (1, 1, 1));
        assert_eq!(mira.rank_points, 200);

        assert!(!record_friend_result(&mut friends, "Nobody", Outcome::Victory));
        assert!(remove_friend(&mut friends, "MIRA"));
        assert!(friends.is_empty());
    }
}
