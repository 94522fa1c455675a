//! Utility modules: build info and persistence.

pub mod build_info;
pub mod persistence;

pub use persistence::{
    keys, load_json, load_or_default, save_json, FileStore, MemoryStore, PersistenceError, Store,
};
