//! Key/value persistence for every durable entity.
//!
//! Each entity is serialized independently as JSON under its own key. The
//! engine only sees the [`Store`] trait; [`FileStore`] writes one file per
//! key under `~/.nightwatch/`, [`MemoryStore`] backs tests and the simulator.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Storage keys, one per durable entity.
pub mod keys {
    pub const LEDGER: &str = "ledger";
    pub const PLAYER: &str = "player";
    pub const SESSION: &str = "session";
    pub const CONSTELLATION: &str = "constellation";
    pub const ARENA: &str = "arena";
    pub const BATTLE_HISTORY: &str = "battle_history";
    pub const TOURNAMENTS: &str = "tournaments";
    pub const FRIENDS: &str = "friends";
    pub const SEASON: &str = "season";
    pub const ANALYTICS: &str = "analytics";
    pub const SETTINGS: &str = "settings";
    pub const ACHIEVEMENTS: &str = "achievements";

    pub const ALL: [&str; 12] = [
        LEDGER,
        PLAYER,
        SESSION,
        CONSTELLATION,
        ARENA,
        BATTLE_HISTORY,
        TOURNAMENTS,
        FRIENDS,
        SEASON,
        ANALYTICS,
        SETTINGS,
        ACHIEVEMENTS,
    ];
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("could not determine home directory")]
    NoHomeDir,
    #[error("i/o error for key `{key}`: {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },
    #[error("stored value for key `{key}` is malformed: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not encode value for key `{key}`: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Abstract string-keyed store with synchronous get/set.
pub trait Store {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

/// In-memory store, used by tests and the headless simulator.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys written so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl Store for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One pretty-printed JSON file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Store rooted at `~/.nightwatch/`, creating it if needed.
    pub fn in_home() -> Result<Self, PersistenceError> {
        let home = dirs::home_dir().ok_or(PersistenceError::NoHomeDir)?;
        Self::at(home.join(".nightwatch"))
    }

    /// Store rooted at an explicit directory, creating it if needed.
    pub fn at(dir: PathBuf) -> Result<Self, PersistenceError> {
        fs::create_dir_all(&dir).map_err(|source| PersistenceError::Io {
            key: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Store for FileStore {
    fn load(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        fs::write(self.path_for(key), value).map_err(|source| PersistenceError::Io {
            key: key.to_string(),
            source,
        })
    }
}

/// Decode the value stored under `key`.
///
/// Returns `Ok(None)` when the key is absent (first launch).
pub fn load_json<T: DeserializeOwned>(
    store: &dyn Store,
    key: &str,
) -> Result<Option<T>, PersistenceError> {
    match store.load(key) {
        None => Ok(None),
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| PersistenceError::Decode {
                key: key.to_string(),
                source,
            }),
    }
}

/// Load `key`, falling back to `T::default()` when missing or malformed.
///
/// Malformed records are logged and treated as absent.
pub fn load_or_default<T: Default + DeserializeOwned>(store: &dyn Store, key: &str) -> T {
    match load_json(store, key) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(err) => {
            warn!(%err, "discarding corrupt record, using defaults");
            T::default()
        }
    }
}

/// Serialize `value` as pretty JSON under `key`.
pub fn save_json<T: Serialize>(
    store: &mut dyn Store,
    key: &str,
    value: &T,
) -> Result<(), PersistenceError> {
    let json = serde_json::to_string_pretty(value).map_err(|source| PersistenceError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.save(key, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct Sample {
        name: String,
        count: u32,
        flag: bool,
    }

    #[test]
    fn test_load_missing_returns_default() {
        let store = MemoryStore::new();
        let val: Sample = load_or_default(&store, "nothing_here");
        assert_eq!(val, Sample::default());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let mut store = MemoryStore::new();
        let data = Sample {
            name: "wood".to_string(),
            count: 12,
            flag: true,
        };
        save_json(&mut store, "sample", &data).unwrap();

        let loaded: Sample = load_or_default(&store, "sample");
        assert_eq!(loaded, data);
    }

    #[test]
    fn test_corrupt_record_falls_back_to_default() {
        let mut store = MemoryStore::new();
        store.save("sample", "{ not json").unwrap();

        assert!(matches!(
            load_json::<Sample>(&store, "sample"),
            Err(PersistenceError::Decode { .. })
        ));
        let loaded: Sample = load_or_default(&store, "sample");
        assert_eq!(loaded, Sample::default());
    }

    #[test]
    fn test_partial_record_defaults_missing_fields() {
        let mut store = MemoryStore::new();
        store.save("sample", r#"{ "count": 7 }"#).unwrap();

        let loaded: Sample = load_or_default(&store, "sample");
        assert_eq!(loaded.count, 7);
        assert_eq!(loaded.name, "");
        assert!(!loaded.flag);
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = std::env::temp_dir().join(format!("nightwatch-test-{}", uuid::Uuid::new_v4()));
        let mut store = FileStore::at(dir.clone()).unwrap();
        store.save("ledger", "{}").unwrap();

        assert_eq!(store.load("ledger").as_deref(), Some("{}"));
        assert!(store.path_for("ledger").ends_with("ledger.json"));
        assert!(store.load("missing").is_none());

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_keys_are_unique() {
        let mut all = keys::ALL.to_vec();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), keys::ALL.len());
    }
}
