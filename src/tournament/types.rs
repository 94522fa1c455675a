//! Tournament data: participants, bracket, placements.

use crate::core::constants::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    #[default]
    Upcoming,
    Active,
    Completed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Participant {
    pub name: String,
    /// 1 is the top seed. Assigned at activation.
    pub seed: u32,
    pub rating: u32,
    pub is_player: bool,
    pub eliminated: bool,
}

/// One pairing. Sides are indices into `Tournament::participants`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub a: usize,
    pub b: usize,
    pub winner: Option<usize>,
}

impl Match {
    pub fn new(a: usize, b: usize) -> Self {
        Self { a, b, winner: None }
    }

    pub fn involves(&self, participant: usize) -> bool {
        self.a == participant || self.b == participant
    }

    pub fn loser(&self) -> Option<usize> {
        self.winner
            .map(|w| if w == self.a { self.b } else { self.a })
    }
}

/// Single-elimination rounds, first round first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bracket {
    pub rounds: Vec<Vec<Match>>,
}

impl Bracket {
    pub fn current_round(&self) -> Option<&Vec<Match>> {
        self.rounds.last()
    }

    pub fn current_round_mut(&mut self) -> Option<&mut Vec<Match>> {
        self.rounds.last_mut()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tournament {
    pub id: String,
    pub name: String,
    pub status: TournamentStatus,
    pub entry_fee: u64,
    /// Sum of every escrowed entry fee.
    pub prize_pool: u64,
    pub capacity: usize,
    pub participants: Vec<Participant>,
    pub bracket: Bracket,
    /// Participant indices for 1st, 2nd and 3rd once completed.
    pub placements: Vec<usize>,
    pub created_at: i64,
}

impl Tournament {
    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    pub fn is_full(&self) -> bool {
        self.participants.len() >= self.capacity
    }

    /// Upcoming, with a usable capacity and a free slot. Records loaded
    /// without a capacity never accept entrants.
    pub fn accepts_entrants(&self) -> bool {
        self.status == TournamentStatus::Upcoming && valid_capacity(self.capacity) && !self.is_full()
    }

    pub fn player_index(&self) -> Option<usize> {
        self.participants.iter().position(|p| p.is_player)
    }

    pub fn has_player(&self) -> bool {
        self.player_index().is_some()
    }

    /// Prize for each placement (1st, 2nd, 3rd) out of the current pool.
    pub fn reward_table(&self) -> [u64; 3] {
        TOURNAMENT_PAYOUT_PERCENT.map(|pct| self.prize_pool.saturating_mul(pct) / 100)
    }

    /// Placement (0-based) of the player, once completed.
    pub fn player_placement(&self) -> Option<usize> {
        let player = self.player_index()?;
        self.placements.iter().position(|&p| p == player)
    }

    pub fn champion(&self) -> Option<&Participant> {
        self.placements
            .first()
            .and_then(|&i| self.participants.get(i))
    }
}

/// Every tournament the player has seen, persisted under `tournaments`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentBook {
    pub tournaments: Vec<Tournament>,
}

impl TournamentBook {
    pub fn get(&self, id: &str) -> Option<&Tournament> {
        self.tournaments.iter().find(|t| t.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Tournament> {
        self.tournaments.iter_mut().find(|t| t.id == id)
    }

    pub fn with_status(&self, status: TournamentStatus) -> impl Iterator<Item = &Tournament> {
        self.tournaments.iter().filter(move |t| t.status == status)
    }
}

/// Capacity must be a power of two inside the allowed range.
pub fn valid_capacity(capacity: usize) -> bool {
    capacity.is_power_of_two()
        && (TOURNAMENT_MIN_CAPACITY..=TOURNAMENT_MAX_CAPACITY).contains(&capacity)
}

/// Seed numbers in bracket order, so that 1 meets N, 2 meets N-1 and the
/// top two seeds can only meet in the final.
pub fn seeding_order(size: usize) -> Vec<u32> {
    let mut order = vec![1u32];
    while order.len() < size {
        let n = order.len() as u32 * 2 + 1;
        order = order.iter().flat_map(|&s| [s, n - s]).collect();
    }
    order
}
