//! Constellation: the account-level skill graph funded by stardust.
//!
//! Levels persist across every run. Nodes past their max level keep
//! accepting stardust at an escalating "ascension" price.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
