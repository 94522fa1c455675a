//! Enemy classes, kill tiers and the bestiary.

use crate::core::constants::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    Crawler,
    Stalker,
    Brute,
    Juggernaut,
    Titan,
    Colossus,
    Leviathan,
}

/// Enemies that count as bosses for every payout formula.
pub const BOSS_KINDS: [EnemyKind; 3] = [EnemyKind::Titan, EnemyKind::Colossus, EnemyKind::Leviathan];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KillTier {
    Trash,
    MidTier,
    Boss,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 7] = [
        EnemyKind::Crawler,
        EnemyKind::Stalker,
        EnemyKind::Brute,
        EnemyKind::Juggernaut,
        EnemyKind::Titan,
        EnemyKind::Colossus,
        EnemyKind::Leviathan,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EnemyKind::Crawler => "Crawler",
            EnemyKind::Stalker => "Stalker",
            EnemyKind::Brute => "Brute",
            EnemyKind::Juggernaut => "Juggernaut",
            EnemyKind::Titan => "Titan",
            EnemyKind::Colossus => "Colossus",
            EnemyKind::Leviathan => "Leviathan",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|e| e.name().eq_ignore_ascii_case(name))
    }

    pub fn is_boss(&self) -> bool {
        BOSS_KINDS.contains(self)
    }

    pub fn tier(&self) -> KillTier {
        if self.is_boss() {
            KillTier::Boss
        } else if *self == EnemyKind::Juggernaut {
            KillTier::MidTier
        } else {
            KillTier::Trash
        }
    }
}

impl KillTier {
    pub fn score(&self) -> u64 {
        match self {
            KillTier::Trash => SCORE_TRASH,
            KillTier::MidTier => SCORE_MID_TIER,
            KillTier::Boss => SCORE_BOSS,
        }
    }

    pub fn shards(&self) -> u64 {
        match self {
            KillTier::Trash => SHARDS_TRASH,
            KillTier::MidTier => SHARDS_MID_TIER,
            KillTier::Boss => SHARDS_BOSS,
        }
    }
}

/// Per-class discovery flag and kill counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BestiaryEntry {
    pub discovered: bool,
    pub kills: u64,
}

/// Everything a single kill produced.
#[derive(Debug, Clone, PartialEq)]
pub struct KillReport {
    pub enemy: EnemyKind,
    pub score: u64,
    pub shards: u64,
    pub xp: u64,
    pub levelups: u32,
    pub nova_gained: u32,
    pub ultimate_gained: u32,
    pub first_sighting: bool,
    /// Missions this kill completed.
    pub missions_completed: Vec<usize>,
}
