//! The aggregate of every piece of authoritative state.

use super::config::Settings;
use crate::achievements::Achievements;
use crate::analytics::AnalyticsSnapshot;
use crate::arena::{ArenaStats, BattleHistory, ChallengeState, FriendList};
use crate::constellation::Constellation;
use crate::economy::Ledger;
use crate::player::{apply_bonuses, PlayerStats};
use crate::season::SeasonState;
use crate::session::{SessionRecords, SessionState};
use crate::tournament::TournamentBook;
use crate::utils::persistence::{keys, load_or_default, save_json, PersistenceError, Store};

/// Everything the engine owns. Durable fields map one-to-one onto
/// persistence keys; `session` and `challenge` live only in memory.
#[derive(Debug, Clone, Default)]
pub struct GameState {
    pub ledger: Ledger,
    pub player: PlayerStats,
    pub constellation: Constellation,
    pub session: SessionState,
    pub records: SessionRecords,
    pub challenge: Option<ChallengeState>,
    pub arena: ArenaStats,
    pub battle_history: BattleHistory,
    pub tournaments: TournamentBook,
    pub friends: FriendList,
    pub season: SeasonState,
    pub analytics: AnalyticsSnapshot,
    pub settings: Settings,
    pub achievements: Achievements,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read every durable key. Missing or corrupt records fall back to
    /// defaults individually.
    pub fn load(store: &dyn Store) -> Self {
        let mut constellation: Constellation = load_or_default(store, keys::CONSTELLATION);
        constellation.reconcile();

        let mut player: PlayerStats = load_or_default(store, keys::PLAYER);
        // No run survives a restart.
        player.class_locked = false;
        apply_bonuses(&mut player, &constellation);

        Self {
            ledger: load_or_default(store, keys::LEDGER),
            player,
            constellation,
            session: SessionState::new(),
            records: load_or_default(store, keys::SESSION),
            challenge: None,
            arena: load_or_default(store, keys::ARENA),
            battle_history: load_or_default(store, keys::BATTLE_HISTORY),
            tournaments: load_or_default(store, keys::TOURNAMENTS),
            friends: load_or_default(store, keys::FRIENDS),
            season: load_or_default(store, keys::SEASON),
            analytics: load_or_default(store, keys::ANALYTICS),
            settings: load_or_default(store, keys::SETTINGS),
            achievements: load_or_default(store, keys::ACHIEVEMENTS),
        }
    }

    /// Write the record stored under `key`.
    pub fn save_key(&self, store: &mut dyn Store, key: &str) -> Result<(), PersistenceError> {
        match key {
            keys::LEDGER => save_json(store, key, &self.ledger),
            keys::PLAYER => save_json(store, key, &self.player),
            keys::SESSION => save_json(store, key, &self.records),
            keys::CONSTELLATION => save_json(store, key, &self.constellation),
            keys::ARENA => save_json(store, key, &self.arena),
            keys::BATTLE_HISTORY => save_json(store, key, &self.battle_history),
            keys::TOURNAMENTS => save_json(store, key, &self.tournaments),
            keys::FRIENDS => save_json(store, key, &self.friends),
            keys::SEASON => save_json(store, key, &self.season),
            keys::ANALYTICS => save_json(store, key, &self.analytics),
            keys::SETTINGS => save_json(store, key, &self.settings),
            keys::ACHIEVEMENTS => save_json(store, key, &self.achievements),
            _ => Ok(()),
        }
    }

    pub fn save_all(&self, store: &mut dyn Store) -> Result<(), PersistenceError> {
        for key in keys::ALL {
            self.save_key(store, key)?;
        }
        Ok(())
    }
}
