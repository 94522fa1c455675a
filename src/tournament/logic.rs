//! Tournament lifecycle: create, join, fill, seed, advance, pay out.

use super::types::*;
use crate::core::constants::*;
use crate::economy::{Ledger, ResourceKind};
use rand::Rng;
use uuid::Uuid;

const SIMULATED_RATING_MIN: u32 = 900;
const SIMULATED_RATING_MAX: u32 = 1500;

const ENTRANT_NAMES: [&str; 12] = [
    "Ashen", "Brisk", "Cinder", "Dusk", "Ember", "Frost", "Gale", "Hollow", "Iris", "Jade",
    "Kestrel", "Lumen",
];

/// Open a new tournament. Returns its id, or `None` for a bad capacity.
pub fn create_tournament(
    book: &mut TournamentBook,
    name: &str,
    entry_fee: u64,
    capacity: usize,
    now: i64,
) -> Option<String> {
    if !valid_capacity(capacity) {
        return None;
    }
    let id = Uuid::new_v4().to_string();
    book.tournaments.push(Tournament {
        id: id.clone(),
        name: name.to_string(),
        entry_fee,
        capacity,
        created_at: now,
        ..Default::default()
    });
    Some(id)
}

/// Outcome of a successful join or fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinOutcome {
    /// The tournament filled up and its bracket was generated.
    pub activated: bool,
}

/// Enter the player, escrowing the fee into the prize pool.
///
/// Refused when the tournament is not upcoming, full, already joined, has
/// an unusable capacity, or the fee is unaffordable.
pub fn join_tournament(
    tournament: &mut Tournament,
    player_name: &str,
    rating: u32,
    ledger: &mut Ledger,
) -> Option<JoinOutcome> {
    if !tournament.accepts_entrants() || tournament.has_player() {
        return None;
    }
    if !ledger.consume(ResourceKind::LightShards, tournament.entry_fee) {
        return None;
    }
    tournament.participants.push(Participant {
        name: player_name.to_string(),
        rating,
        is_player: true,
        ..Default::default()
    });
    tournament.prize_pool = tournament.prize_pool.saturating_add(tournament.entry_fee);
    Some(JoinOutcome {
        activated: activate_if_full(tournament),
    })
}

/// Fill the remaining slots with simulated entrants. Their fees enter the
/// pool from outside the ledger.
pub fn fill_tournament<R: Rng>(tournament: &mut Tournament, rng: &mut R) -> Option<JoinOutcome> {
    if tournament.status != TournamentStatus::Upcoming || !valid_capacity(tournament.capacity) {
        return None;
    }
    let mut n = tournament.participants.len();
    while !tournament.is_full() {
        let name = format!("{} {}", ENTRANT_NAMES[n % ENTRANT_NAMES.len()], n + 1);
        tournament.participants.push(Participant {
            name,
            rating: rng.gen_range(SIMULATED_RATING_MIN..=SIMULATED_RATING_MAX),
            ..Default::default()
        });
        tournament.prize_pool = tournament.prize_pool.saturating_add(tournament.entry_fee);
        n += 1;
    }
    Some(JoinOutcome {
        activated: activate_if_full(tournament),
    })
}

fn activate_if_full(tournament: &mut Tournament) -> bool {
    if tournament.status != TournamentStatus::Upcoming
        || !valid_capacity(tournament.capacity)
        || tournament.participants.len() != tournament.capacity
    {
        return false;
    }
    seed_participants(tournament);
    tournament.bracket = build_first_round(tournament);
    tournament.status = TournamentStatus::Active;
    true
}

/// Seeds follow rating, highest first; ties keep join order.
fn seed_participants(tournament: &mut Tournament) {
    let mut order: Vec<usize> = (0..tournament.participants.len()).collect();
    order.sort_by(|&a, &b| {
        tournament.participants[b]
            .rating
            .cmp(&tournament.participants[a].rating)
    });
    for (rank, index) in order.into_iter().enumerate() {
        tournament.participants[index].seed = rank as u32 + 1;
    }
}

fn build_first_round(tournament: &Tournament) -> Bracket {
    let by_seed = |seed: u32| {
        tournament
            .participants
            .iter()
            .position(|p| p.seed == seed)
            .unwrap_or(0)
    };
    let order = seeding_order(tournament.capacity);
    let first = order
        .chunks_exact(2)
        .map(|pair| Match::new(by_seed(pair[0]), by_seed(pair[1])))
        .collect();
    Bracket { rounds: vec![first] }
}

/// Decide the player's pending match in the current round.
pub fn report_player_result(tournament: &mut Tournament, won: bool) -> bool {
    if tournament.status != TournamentStatus::Active {
        return false;
    }
    let Some(player) = tournament.player_index() else {
        return false;
    };
    let Some(round) = tournament.bracket.current_round_mut() else {
        return false;
    };
    let Some(m) = round
        .iter_mut()
        .find(|m| m.involves(player) && m.winner.is_none())
    else {
        return false;
    };
    let opponent = if m.a == player { m.b } else { m.a };
    m.winner = Some(if won { player } else { opponent });
    true
}

/// Probability that a player rated `a` beats one rated `b`.
pub fn elo_expectation(a: u32, b: u32) -> f64 {
    1.0 / (1.0 + 10f64.powf((b as f64 - a as f64) / ELO_SCALE))
}

/// What one call to [`advance_round`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundReport {
    /// 1-based index of the round just decided.
    pub round: usize,
    pub completed: bool,
    /// Prize owed to the player if the tournament just paid out.
    pub player_prize: Option<u64>,
    pub player_eliminated: bool,
}

/// Simulate every undecided non-player match in the current round and move
/// winners on. Refused while the player's own match is still pending.
pub fn advance_round<R: Rng>(tournament: &mut Tournament, rng: &mut R) -> Option<RoundReport> {
    if tournament.status != TournamentStatus::Active {
        return None;
    }
    let player = tournament.player_index();
    let ratings: Vec<u32> = tournament.participants.iter().map(|p| p.rating).collect();
    let round_number = tournament.bracket.rounds.len();
    let round = tournament.bracket.current_round_mut()?;
    if round.is_empty() {
        return None;
    }

    if round
        .iter()
        .any(|m| m.winner.is_none() && player.is_some_and(|p| m.involves(p)))
    {
        return None;
    }
    for m in round.iter_mut().filter(|m| m.winner.is_none()) {
        let rating = |i: usize| ratings.get(i).copied().unwrap_or(SIMULATED_RATING_MIN);
        let p_a = elo_expectation(rating(m.a), rating(m.b));
        m.winner = Some(if rng.gen::<f64>() < p_a { m.a } else { m.b });
    }

    let round = round.clone();
    let mut player_eliminated = false;
    for loser in round.iter().filter_map(Match::loser) {
        if let Some(entrant) = tournament.participants.get_mut(loser) {
            entrant.eliminated = true;
        }
        player_eliminated |= Some(loser) == player;
    }

    if round.len() == 1 {
        let final_match = round[0];
        let mut placements: Vec<usize> = final_match
            .winner
            .into_iter()
            .chain(final_match.loser())
            .collect();
        if let Some(third) = third_place(tournament) {
            placements.push(third);
        }
        tournament.placements = placements;
        tournament.status = TournamentStatus::Completed;
        let player_prize = tournament
            .player_placement()
            .and_then(|place| tournament.reward_table().get(place).copied());
        return Some(RoundReport {
            round: round_number,
            completed: true,
            player_prize,
            player_eliminated,
        });
    }

    let winners: Vec<usize> = round.iter().filter_map(|m| m.winner).collect();
    let next = winners
        .chunks_exact(2)
        .map(|pair| Match::new(pair[0], pair[1]))
        .collect();
    tournament.bracket.rounds.push(next);
    Some(RoundReport {
        round: round_number,
        completed: false,
        player_prize: None,
        player_eliminated,
    })
}

/// Better-seeded of the two semifinal losers.
fn third_place(tournament: &Tournament) -> Option<usize> {
    let rounds = &tournament.bracket.rounds;
    if rounds.len() < 2 {
        return None;
    }
    rounds[rounds.len() - 2]
        .iter()
        .filter_map(Match::loser)
        .min_by_key(|&i| tournament.participants.get(i).map_or(u32::MAX, |p| p.seed))
}

/// Credit a completed tournament's prize to the player.
pub fn credit_prize(ledger: &mut Ledger, prize: u64) {
    ledger.add(ResourceKind::LightShards, prize);
}
