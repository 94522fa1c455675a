//! Player progression: combat stats, equipment, permanent upgrades,
//! missions, XP and the nova/ultimate meters.

pub mod bonuses;
pub mod logic;
pub mod missions;
pub mod types;

pub use bonuses::apply_bonuses;
pub use logic::*;
pub use missions::{claim_mission, update_mission_progress};
pub use types::*;
