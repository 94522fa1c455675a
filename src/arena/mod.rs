//! Asynchronous PvP: wagered challenges against simulated opponents.

pub mod logic;
pub mod opponents;
pub mod types;

pub use logic::*;
pub use opponents::{find_rival, Rival, ROSTER};
pub use types::*;
