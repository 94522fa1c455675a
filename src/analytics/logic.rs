//! Read-side summaries over battle history. Nothing here mutates.

use super::types::{AnalyticsSnapshot, RECENT_FORM_LEN};
use crate::arena::{BattleHistory, Outcome};
use std::collections::BTreeMap;

fn count(history: &BattleHistory, outcome: Outcome) -> usize {
    history.iter().filter(|r| r.outcome == outcome).count()
}

pub fn win_rate(history: &BattleHistory) -> f64 {
    if history.is_empty() {
        return 0.0;
    }
    count(history, Outcome::Victory) as f64 / history.len() as f64
}

pub fn average_score(history: &BattleHistory) -> f64 {
    if history.is_empty() {
        return 0.0;
    }
    let total: u64 = history.iter().map(|r| r.player_score).sum();
    total as f64 / history.len() as f64
}

/// Opponent with the most records of `outcome`. Ties go to the
/// alphabetically first name.
fn top_opponent(history: &BattleHistory, outcome: Outcome) -> Option<String> {
    let mut tally: BTreeMap<&str, usize> = BTreeMap::new();
    for record in history.iter().filter(|r| r.outcome == outcome) {
        *tally.entry(record.opponent.as_str()).or_default() += 1;
    }
    let mut best: Option<(&str, usize)> = None;
    for (name, n) in tally {
        if best.map_or(true, |(_, top)| n > top) {
            best = Some((name, n));
        }
    }
    best.map(|(name, _)| name.to_string())
}

pub fn best_opponent(history: &BattleHistory) -> Option<String> {
    top_opponent(history, Outcome::Victory)
}

pub fn worst_opponent(history: &BattleHistory) -> Option<String> {
    top_opponent(history, Outcome::Defeat)
}

pub fn recent_form(history: &BattleHistory) -> Vec<Outcome> {
    history
        .iter()
        .take(RECENT_FORM_LEN)
        .map(|r| r.outcome)
        .collect()
}

pub fn net_profit(history: &BattleHistory) -> i64 {
    history.iter().map(|r| r.net_profit).sum()
}

pub fn summarize(history: &BattleHistory) -> AnalyticsSnapshot {
    AnalyticsSnapshot {
        total_battles: history.len(),
        wins: count(history, Outcome::Victory),
        losses: count(history, Outcome::Defeat),
        draws: count(history, Outcome::Draw),
        win_rate: win_rate(history),
        average_score: average_score(history),
        best_opponent: best_opponent(history),
        worst_opponent: worst_opponent(history),
        recent_form: recent_form(history),
        net_profit: net_profit(history),
    }
}
