//! Nightwatch - progression and economy engine for a day/night survival game.
//!
//! Owns all authoritative game state: the run lifecycle, the resource
//! ledger, combat bookkeeping, the constellation meta-tree, and the
//! competitive layer (challenges, tournaments, seasons). Presentation
//! layers drive it through [`Engine`] and read events back out.

pub mod achievements;
pub mod analytics;
pub mod arena;
pub mod combat;
pub mod constellation;
pub mod core;
pub mod economy;
pub mod player;
pub mod season;
pub mod session;
pub mod tournament;
pub mod utils;

pub use crate::core::{Engine, EngineConfig, GameEvent, PresentationEvent};
