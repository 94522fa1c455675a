//! Seasons, tier rewards and the leaderboard.

use crate::arena::{RankTier, ROSTER};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeasonStatus {
    #[default]
    Active,
    Ended,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonReward {
    pub light_shards: u64,
    pub stardust: u64,
}

/// Reward for finishing a season at `tier`.
pub fn season_reward(tier: RankTier) -> SeasonReward {
    let (light_shards, stardust) = match tier {
        RankTier::Bronze => (100, 5),
        RankTier::Silver => (250, 10),
        RankTier::Gold => (500, 25),
        RankTier::Platinum => (1000, 50),
        RankTier::Diamond => (2000, 100),
        RankTier::Legend => (5000, 250),
    };
    SeasonReward {
        light_shards,
        stardust,
    }
}

pub fn default_reward_table() -> BTreeMap<RankTier, SeasonReward> {
    [
        RankTier::Bronze,
        RankTier::Silver,
        RankTier::Gold,
        RankTier::Platinum,
        RankTier::Diamond,
        RankTier::Legend,
    ]
    .into_iter()
    .map(|tier| (tier, season_reward(tier)))
    .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Season {
    pub number: u32,
    /// Unix seconds.
    pub start: i64,
    pub end: i64,
    pub status: SeasonStatus,
    pub rewards: BTreeMap<RankTier, SeasonReward>,
}

impl Season {
    pub fn new(number: u32, start: i64, length_secs: i64) -> Self {
        Self {
            number,
            start,
            end: start.saturating_add(length_secs),
            status: SeasonStatus::Active,
            rewards: default_reward_table(),
        }
    }

    pub fn seconds_remaining(&self, now: i64) -> i64 {
        (self.end - now).max(0)
    }

    pub fn reward_for(&self, tier: RankTier) -> SeasonReward {
        self.rewards
            .get(&tier)
            .copied()
            .unwrap_or_else(|| season_reward(tier))
    }
}

/// A simulated rival's running standing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RivalStanding {
    pub rank_points: u32,
    pub wins: u64,
}

pub fn default_rivals() -> BTreeMap<String, RivalStanding> {
    ROSTER
        .iter()
        .map(|r| {
            (
                r.name.to_string(),
                RivalStanding {
                    rank_points: r.rank_points,
                    wins: 0,
                },
            )
        })
        .collect()
}

/// Current season, past seasons and rival standings. Persisted under
/// `season`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonState {
    /// `None` until the first clock reading.
    pub current: Option<Season>,
    pub history: Vec<Season>,
    pub rivals: BTreeMap<String, RivalStanding>,
}

impl Default for SeasonState {
    fn default() -> Self {
        Self {
            current: None,
            history: Vec::new(),
            rivals: default_rivals(),
        }
    }
}

impl SeasonState {
    pub fn find(&self, number: u32) -> Option<&Season> {
        self.current
            .iter()
            .chain(self.history.iter())
            .find(|s| s.number == number)
    }

    pub fn current_number(&self) -> u32 {
        self.current.as_ref().map(|s| s.number).unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub position: usize,
    pub name: String,
    pub rank_points: u32,
    pub tier: RankTier,
    pub wins: u64,
    pub is_player: bool,
}
