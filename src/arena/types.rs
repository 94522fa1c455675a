//! Arena data: challenges, battle records, stats, ranks, titles, friends.

use crate::core::constants::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeMode {
    /// Highest score when the clock runs out.
    #[default]
    ScoreRush,
    /// First to lose all health; no time limit.
    SuddenDeath,
}

impl ChallengeMode {
    /// Seconds the challenge lasts; 0 means unbounded.
    pub fn duration_seconds(&self) -> u32 {
        match self {
            ChallengeMode::ScoreRush => SCORE_RUSH_DURATION_SECONDS,
            ChallengeMode::SuddenDeath => 0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ChallengeMode::ScoreRush => "Score Rush",
            ChallengeMode::SuddenDeath => "Sudden Death",
        }
    }
}

/// Who the player is challenging, before the difficulty draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpponentProfile {
    pub name: String,
    pub avatar: String,
}

/// Simulated opponent for the lifetime of one challenge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpponentSnapshot {
    pub name: String,
    pub avatar: String,
    pub score: u64,
    pub health: u32,
    /// Drawn once at creation.
    pub difficulty: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengeState {
    pub active: bool,
    pub mode: ChallengeMode,
    pub opponent: OpponentSnapshot,
    /// Already consumed from the ledger.
    pub wager: u64,
    pub started_at: i64,
    pub duration: u32,
    pub elapsed: u32,
}

impl ChallengeState {
    pub fn time_remaining(&self) -> Option<u32> {
        if self.duration == 0 {
            None
        } else {
            Some(self.duration.saturating_sub(self.elapsed))
        }
    }
}

/// Why a challenge tick ended the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeEnd {
    TimeUp,
    OpponentDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Victory,
    Defeat,
    Draw,
}

impl Outcome {
    pub fn rank_delta(&self) -> i64 {
        match self {
            Outcome::Victory => RANK_POINTS_VICTORY,
            Outcome::Defeat => RANK_POINTS_DEFEAT,
            Outcome::Draw => 0,
        }
    }
}

/// Immutable record of one settled challenge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleRecord {
    pub id: String,
    pub timestamp: i64,
    pub opponent: String,
    pub mode: ChallengeMode,
    pub outcome: Outcome,
    pub player_score: u64,
    pub opponent_score: u64,
    pub wager: u64,
    /// Gross amount returned to the ledger.
    pub payout: u64,
    pub net_profit: i64,
    pub rank_delta: i64,
}

/// Most recent battles, newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleHistory {
    pub records: VecDeque<BattleRecord>,
}

impl BattleHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend a record, dropping the oldest beyond `cap`.
    pub fn push(&mut self, record: BattleRecord, cap: usize) {
        self.records.push_front(record);
        self.records.truncate(cap);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BattleRecord> {
        self.records.iter()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankTier {
    #[default]
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
    Legend,
}

/// Lower bound of each tier, ascending.
pub const RANK_THRESHOLDS: [(RankTier, u32); 6] = [
    (RankTier::Bronze, 0),
    (RankTier::Silver, 100),
    (RankTier::Gold, 250),
    (RankTier::Platinum, 500),
    (RankTier::Diamond, 750),
    (RankTier::Legend, 1000),
];

impl RankTier {
    pub fn from_points(points: u32) -> Self {
        RANK_THRESHOLDS
            .iter()
            .rev()
            .find(|(_, min)| points >= *min)
            .map(|(tier, _)| *tier)
            .unwrap_or_default()
    }

    pub fn name(&self) -> &'static str {
        match self {
            RankTier::Bronze => "Bronze",
            RankTier::Silver => "Silver",
            RankTier::Gold => "Gold",
            RankTier::Platinum => "Platinum",
            RankTier::Diamond => "Diamond",
            RankTier::Legend => "Legend",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Title {
    FirstBlood,
    Gladiator,
    Unstoppable,
    Tycoon,
    Champion,
}

impl Title {
    pub const ALL: [Title; 5] = [
        Title::FirstBlood,
        Title::Gladiator,
        Title::Unstoppable,
        Title::Tycoon,
        Title::Champion,
    ];

    /// Milestone predicate over cumulative stats.
    pub fn earned(&self, stats: &ArenaStats) -> bool {
        match self {
            Title::FirstBlood => stats.wins >= 1,
            Title::Gladiator => stats.wins >= 10,
            Title::Unstoppable => stats.best_streak >= 5,
            Title::Tycoon => stats.net_profit >= 10_000,
            Title::Champion => stats.wins >= 50,
        }
    }
}

/// Cumulative arena record, persisted under `arena`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaStats {
    pub total_battles: u64,
    pub wins: u64,
    pub losses: u64,
    pub draws: u64,
    pub total_wagered: u64,
    pub total_winnings: u64,
    pub net_profit: i64,
    pub current_streak: u32,
    pub best_streak: u32,
    pub rank_points: u32,
    pub rank_tier: RankTier,
    pub titles: BTreeSet<Title>,
}

impl ArenaStats {
    pub fn win_rate(&self) -> f64 {
        if self.total_battles == 0 {
            0.0
        } else {
            self.wins as f64 / self.total_battles as f64
        }
    }
}

/// A rival the player added by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Friend {
    pub name: String,
    pub rank_points: u32,
    pub wins_against: u64,
    pub losses_against: u64,
    pub draws: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FriendList {
    pub friends: Vec<Friend>,
}

impl FriendList {
    pub fn get(&self, name: &str) -> Option<&Friend> {
        self.friends.iter().find(|f| f.name.eq_ignore_ascii_case(name))
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Friend> {
        self.friends
            .iter_mut()
            .find(|f| f.name.eq_ignore_ascii_case(name))
    }

    pub fn len(&self) -> usize {
        self.friends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.friends.is_empty()
    }
}
