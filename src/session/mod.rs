//! Run lifecycle: status machine, day/night cycle, night events and bosses.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
