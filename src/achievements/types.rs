//! Achievement system types and data structures.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Achievement categories for organization in the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AchievementCategory {
    Economy,
    Combat,
    Progression,
}

impl AchievementCategory {
    /// All categories in display order.
    pub const ALL: [AchievementCategory; 3] = [
        AchievementCategory::Economy,
        AchievementCategory::Combat,
        AchievementCategory::Progression,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AchievementCategory::Economy => "Economy",
            AchievementCategory::Combat => "Combat",
            AchievementCategory::Progression => "Progression",
        }
    }
}

/// Unique identifier for each achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AchievementId {
    // Economy - total resources held
    HoarderI,   // 100
    HoarderII,  // 1,000
    HoarderIII, // 10,000

    // Combat - enemy kills
    SlayerI,  // 100 kills
    SlayerII, // 1,000 kills
    // Combat - boss kills
    BossHunterI,  // 1 boss
    BossHunterII, // 25 bosses

    // Progression
    Stargazer, // first ascension
}

/// Resource-holding milestones, ascending.
pub const HOARDER_TIERS: [(AchievementId, u64); 3] = [
    (AchievementId::HoarderI, 100),
    (AchievementId::HoarderII, 1_000),
    (AchievementId::HoarderIII, 10_000),
];

pub const SLAYER_TIERS: [(AchievementId, u64); 2] = [
    (AchievementId::SlayerI, 100),
    (AchievementId::SlayerII, 1_000),
];

pub const BOSS_HUNTER_TIERS: [(AchievementId, u64); 2] = [
    (AchievementId::BossHunterI, 1),
    (AchievementId::BossHunterII, 25),
];

/// Static definition of an achievement.
#[derive(Debug, Clone)]
pub struct AchievementDef {
    pub id: AchievementId,
    pub name: &'static str,
    pub description: &'static str,
    pub category: AchievementCategory,
}

/// Progress on a single achievement (for multi-stage achievements).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AchievementProgress {
    pub current: u64,
    pub target: u64,
}

/// Record of an unlocked achievement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockedAchievement {
    pub unlocked_at: i64,
}

/// Meta achievement state, persisted under the `achievements` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Achievements {
    pub unlocked: HashMap<AchievementId, UnlockedAchievement>,
    pub progress: HashMap<AchievementId, AchievementProgress>,

    // Lifetime counters across runs
    pub total_kills: u64,
    pub total_bosses_defeated: u64,
    pub peak_resources_held: u64,
}

impl Achievements {
    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.unlocked.contains_key(&id)
    }

    /// Unlock an achievement. Returns true if newly unlocked.
    pub fn unlock(&mut self, id: AchievementId, now: i64) -> bool {
        if self.is_unlocked(id) {
            return false;
        }
        self.unlocked.insert(id, UnlockedAchievement { unlocked_at: now });
        true
    }

    pub fn update_progress(&mut self, id: AchievementId, current: u64, target: u64) {
        self.progress
            .insert(id, AchievementProgress { current, target });
    }

    pub fn get_progress(&self, id: AchievementId) -> Option<&AchievementProgress> {
        self.progress.get(&id)
    }

    pub fn total_count(&self) -> usize {
        super::data::ALL_ACHIEVEMENTS.len()
    }

    pub fn unlocked_count(&self) -> usize {
        self.unlocked.len()
    }

    /// Unlock percentage (0.0 - 100.0).
    pub fn unlock_percentage(&self) -> f32 {
        let total = self.total_count();
        if total == 0 {
            return 0.0;
        }
        (self.unlocked_count() as f32 / total as f32) * 100.0
    }

    /// Walk a tier table, tracking progress and unlocking every reached tier.
    fn check_tiers(&mut self, tiers: &[(AchievementId, u64)], value: u64, now: i64) -> Vec<AchievementId> {
        let mut newly = Vec::new();
        for &(id, target) in tiers {
            if self.is_unlocked(id) {
                continue;
            }
            self.update_progress(id, value.min(target), target);
            if value >= target && self.unlock(id, now) {
                newly.push(id);
            }
        }
        newly
    }

    // =========================================================================
    // Event Handlers (called from the engine)
    // =========================================================================

    /// Re-evaluate hoarder tiers against the ledger total.
    pub fn on_resources_changed(&mut self, total_held: u64, now: i64) -> Vec<AchievementId> {
        self.peak_resources_held = self.peak_resources_held.max(total_held);
        self.check_tiers(&HOARDER_TIERS, total_held, now)
    }

    pub fn on_enemy_killed(&mut self, is_boss: bool, now: i64) -> Vec<AchievementId> {
        self.total_kills += 1;
        let mut newly = self.check_tiers(&SLAYER_TIERS, self.total_kills, now);
        if is_boss {
            self.total_bosses_defeated += 1;
            newly.extend(self.check_tiers(&BOSS_HUNTER_TIERS, self.total_bosses_defeated, now));
        }
        newly
    }

    pub fn on_ascension(&mut self, now: i64) -> Vec<AchievementId> {
        if self.unlock(AchievementId::Stargazer, now) {
            vec![AchievementId::Stargazer]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlock_is_idempotent() {
        let mut achievements = Achievements::default();
        assert!(achievements.unlock(AchievementId::Stargazer, 10));
        assert!(!achievements.unlock(AchievementId::Stargazer, 20));
        assert_eq!(achievements.unlocked[&AchievementId::Stargazer].unlocked_at, 10);
    }

    #[test]
    fn test_hoarder_tiers() {
        let mut achievements = Achievements::default();
        assert!(achievements.on_resources_changed(99, 0).is_empty());
        assert_eq!(
            achievements.get_progress(AchievementId::HoarderI),
            Some(&AchievementProgress {
                current: 99,
                target: 100
            })
        );

        let newly = achievements.on_resources_changed(1_500, 0);
        assert_eq!(newly, vec![AchievementId::HoarderI, AchievementId::HoarderII]);
        assert!(!achievements.is_unlocked(AchievementId::HoarderIII));

        // Dropping back below a tier keeps it.
        assert!(achievements.on_resources_changed(0, 0).is_empty());
        assert!(achievements.is_unlocked(AchievementId::HoarderII));
        assert_eq!(achievements.peak_resources_held, 1_500);
    }

    #[test]
    fn test_slayer_and_boss_hunter() {
        let mut achievements = Achievements::default();
        let newly = achievements.on_enemy_killed(true, 0);
        assert_eq!(newly, vec![AchievementId::BossHunterI]);

        for _ in 0..98 {
            achievements.on_enemy_killed(false, 0);
        }
        assert!(!achievements.is_unlocked(AchievementId::SlayerI));
        let newly = achievements.on_enemy_killed(false, 0);
        assert_eq!(newly, vec![AchievementId::SlayerI]);
        assert_eq!(achievements.total_kills, 100);
        assert_eq!(achievements.total_bosses_defeated, 1);
    }

    #[test]
    fn test_stargazer_once() {
        let mut achievements = Achievements::default();
        assert_eq!(achievements.on_ascension(5), vec![AchievementId::Stargazer]);
        assert!(achievements.on_ascension(6).is_empty());
    }

    #[test]
    fn test_serde_roundtrip_with_missing_fields() {
        let achievements: Achievements = serde_json::from_str(r#"{"total_kills": 7}"#).unwrap();
        assert_eq!(achievements.total_kills, 7);
        assert!(achievements.unlocked.is_empty());
    }
}
