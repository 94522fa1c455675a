//! Resource ledger: gatherable materials, premium shards, meta-currency and
//! faction credits.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
