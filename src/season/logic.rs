//! Season rollover, reward claims and leaderboard maintenance.

use super::types::*;
use crate::arena::{ArenaStats, Outcome, RankTier};
use crate::core::constants::*;
use crate::economy::{Ledger, ResourceKind};

pub fn season_length_secs(days: i64) -> i64 {
    days * 24 * 60 * 60
}

/// Open season 1 at `now` if nothing is running yet. A stored current
/// season without a usable window (end not after start) is reopened at
/// `now` under its own number. Returns true if a season was opened.
pub fn ensure_started(state: &mut SeasonState, now: i64, length_secs: i64) -> bool {
    let number = match &state.current {
        Some(season) if season.end > season.start => return false,
        Some(season) => season.number.max(1),
        None => 1,
    };
    state.current = Some(Season::new(number, now, length_secs));
    true
}

/// End every season whose end has passed and open the next back-to-back.
///
/// Returns the numbers of the seasons that ended.
pub fn check_rollover(state: &mut SeasonState, now: i64, length_secs: i64) -> Vec<u32> {
    let mut ended = Vec::new();
    if length_secs <= 0 {
        return ended;
    }
    while let Some(season) = state.current.as_mut() {
        if now < season.end {
            break;
        }
        season.status = SeasonStatus::Ended;
        let next = Season::new(season.number.saturating_add(1), season.end, length_secs);
        ended.push(season.number);
        if let Some(done) = state.current.replace(next) {
            state.history.push(done);
        }
    }
    ended
}

/// Pay the reward for an ended season at the claimant's current tier.
///
/// Only the season status gates this; nothing records that a claim was
/// made.
pub fn claim_season_reward(
    state: &SeasonState,
    number: u32,
    tier: RankTier,
    ledger: &mut Ledger,
) -> Option<SeasonReward> {
    let season = state.find(number)?;
    if season.status != SeasonStatus::Ended {
        return None;
    }
    let reward = season.reward_for(tier);
    ledger.add(ResourceKind::LightShards, reward.light_shards);
    ledger.add(ResourceKind::Stardust, reward.stardust);
    Some(reward)
}

/// Shift a rival's standing after the player played them.
pub fn record_rival_result(state: &mut SeasonState, rival: &str, outcome: Outcome) -> bool {
    let Some(standing) = state
        .rivals
        .iter_mut()
        .find(|(name, _)| name.eq_ignore_ascii_case(rival))
        .map(|(_, s)| s)
    else {
        return false;
    };
    match outcome {
        Outcome::Victory => {
            let loss = RANK_POINTS_DEFEAT.unsigned_abs() as u32;
            standing.rank_points = standing.rank_points.saturating_sub(loss);
        }
        Outcome::Defeat => {
            standing.rank_points += RANK_POINTS_VICTORY as u32;
            standing.wins += 1;
        }
        Outcome::Draw => {}
    }
    true
}

/// Rivals plus the player, by rank points, then wins, then name.
pub fn leaderboard(state: &SeasonState, stats: &ArenaStats, player_name: &str) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = state
        .rivals
        .iter()
        .map(|(name, s)| LeaderboardEntry {
            position: 0,
            name: name.clone(),
            rank_points: s.rank_points,
            tier: RankTier::from_points(s.rank_points),
            wins: s.wins,
            is_player: false,
        })
        .collect();
    entries.push(LeaderboardEntry {
        position: 0,
        name: player_name.to_string(),
        rank_points: stats.rank_points,
        tier: stats.rank_tier,
        wins: stats.wins,
        is_player: true,
    });
    entries.sort_by(|a, b| {
        b.rank_points
            .cmp(&a.rank_points)
            .then(b.wins.cmp(&a.wins))
            .then_with(|| a.name.cmp(&b.name))
    });
    for (i, entry) in entries.iter_mut().enumerate() {
        entry.position = i + 1;
    }
    entries
}
