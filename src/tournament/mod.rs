//! Single-elimination tournaments with escrowed entry fees.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
