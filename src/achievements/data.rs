//! Static achievement definitions.

use super::types::{AchievementCategory, AchievementDef, AchievementId};

/// All achievement definitions in display order.
pub const ALL_ACHIEVEMENTS: &[AchievementDef] = &[
    // ═══════════════════════════════════════════════════════════════
    // ECONOMY
    // ═══════════════════════════════════════════════════════════════
    AchievementDef {
        id: AchievementId::HoarderI,
        name: "Hoarder I",
        description: "Hold 100 resources at once",
        category: AchievementCategory::Economy,
    },
    AchievementDef {
        id: AchievementId::HoarderII,
        name: "Hoarder II",
        description: "Hold 1,000 resources at once",
        category: AchievementCategory::Economy,
    },
    AchievementDef {
        id: AchievementId::HoarderIII,
        name: "Hoarder III",
        description: "Hold 10,000 resources at once",
        category: AchievementCategory::Economy,
    },
    // ═══════════════════════════════════════════════════════════════
    // COMBAT
    // ═══════════════════════════════════════════════════════════════
    AchievementDef {
        id: AchievementId::SlayerI,
        name: "Slayer I",
        description: "Defeat 100 enemies",
        category: AchievementCategory::Combat,
    },
    AchievementDef {
        id: AchievementId::SlayerII,
        name: "Slayer II",
        description: "Defeat 1,000 enemies",
        category: AchievementCategory::Combat,
    },
    AchievementDef {
        id: AchievementId::BossHunterI,
        name: "Boss Hunter I",
        description: "Defeat your first boss",
        category: AchievementCategory::Combat,
    },
    AchievementDef {
        id: AchievementId::BossHunterII,
        name: "Boss Hunter II",
        description: "Defeat 25 bosses",
        category: AchievementCategory::Combat,
    },
    // ═══════════════════════════════════════════════════════════════
    // PROGRESSION
    // ═══════════════════════════════════════════════════════════════
    AchievementDef {
        id: AchievementId::Stargazer,
        name: "Stargazer",
        description: "Ascend a constellation node past its maximum level",
        category: AchievementCategory::Progression,
    },
];

pub fn get_achievement_def(id: AchievementId) -> Option<&'static AchievementDef> {
    ALL_ACHIEVEMENTS.iter().find(|a| a.id == id)
}

pub fn get_achievements_by_category(category: AchievementCategory) -> Vec<&'static AchievementDef> {
    ALL_ACHIEVEMENTS
        .iter()
        .filter(|a| a.category == category)
        .collect()
}
