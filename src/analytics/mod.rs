//! Battle-history analytics.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
