use crate::arena::Outcome;
use serde::{Deserialize, Serialize};

/// How many outcomes count as recent form.
pub const RECENT_FORM_LEN: usize = 10;

/// Derived battle summary, cached under `analytics`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsSnapshot {
    pub total_battles: usize,
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
    /// 0.0 - 1.0
    pub win_rate: f64,
    pub average_score: f64,
    /// Opponent beaten most often.
    pub best_opponent: Option<String>,
    /// Opponent lost to most often.
    pub worst_opponent: Option<String>,
    /// Newest first.
    pub recent_form: Vec<Outcome>,
    pub net_profit: i64,
}
