//! Meta achievement system.
//!
//! Tracks lifetime milestones across runs. Stored under the `achievements`
//! persistence key.

pub mod data;
pub mod types;

pub use data::{get_achievement_def, get_achievements_by_category, ALL_ACHIEVEMENTS};
pub use types::{AchievementCategory, AchievementId, AchievementProgress, Achievements};
