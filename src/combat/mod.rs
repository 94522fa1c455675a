//! Combat and kill resolution: enemy classification, bestiary and payouts.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
