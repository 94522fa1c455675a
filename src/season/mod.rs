//! Seasonal ranking epochs and the leaderboard.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
