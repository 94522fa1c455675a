//! Player progression data: stats, equipment, upgrades, missions.

use crate::combat::types::{BestiaryEntry, EnemyKind};
use crate::core::constants::*;
use crate::economy::ResourceKind;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Playable hero class, fixed once a run begins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeroClass {
    #[default]
    Vanguard,
    Ranger,
    Arcanist,
}

impl HeroClass {
    pub const ALL: [HeroClass; 3] = [HeroClass::Vanguard, HeroClass::Ranger, HeroClass::Arcanist];

    pub fn name(&self) -> &'static str {
        match self {
            HeroClass::Vanguard => "Vanguard",
            HeroClass::Ranger => "Ranger",
            HeroClass::Arcanist => "Arcanist",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }

    /// Multipliers applied while the class ultimate is active.
    pub fn ultimate_buff(&self) -> UltimateBuff {
        match self {
            HeroClass::Vanguard => UltimateBuff {
                damage: 1.25,
                speed: 1.0,
                max_health: 1.5,
            },
            HeroClass::Ranger => UltimateBuff {
                damage: 1.5,
                speed: 1.5,
                max_health: 1.0,
            },
            HeroClass::Arcanist => UltimateBuff {
                damage: 2.0,
                speed: 1.0,
                max_health: 1.0,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UltimateBuff {
    pub damage: f64,
    pub speed: f64,
    pub max_health: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponKind {
    Blade,
    Bow,
    Hammer,
    Staff,
}

impl WeaponKind {
    pub const ALL: [WeaponKind; 4] = [
        WeaponKind::Blade,
        WeaponKind::Bow,
        WeaponKind::Hammer,
        WeaponKind::Staff,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DroneKind {
    Gatherer,
    Guardian,
    Striker,
}

impl DroneKind {
    pub const ALL: [DroneKind; 3] = [DroneKind::Gatherer, DroneKind::Guardian, DroneKind::Striker];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityKind {
    OrbitalStrike,
}

/// Permanent upgrade tracks bought with light shards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeKind {
    Strength,
    Agility,
    Vitality,
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 3] = [
        UpgradeKind::Strength,
        UpgradeKind::Agility,
        UpgradeKind::Vitality,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionTask {
    Kill,
    KillBoss,
    Gather,
    SurviveNight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionReward {
    pub kind: ResourceKind,
    pub amount: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mission {
    pub title: String,
    pub task: MissionTask,
    pub goal: u64,
    pub progress: u64,
    pub completed: bool,
    /// Only ever true when `completed` is true.
    pub claimed: bool,
    pub reward: MissionReward,
}

impl Mission {
    pub fn new(title: &str, task: MissionTask, goal: u64, reward: MissionReward) -> Self {
        Self {
            title: title.to_string(),
            task,
            goal,
            progress: 0,
            completed: false,
            claimed: false,
            reward,
        }
    }
}

pub fn default_missions() -> Vec<Mission> {
    vec![
        Mission::new(
            "Cull the Horde",
            MissionTask::Kill,
            25,
            MissionReward {
                kind: ResourceKind::LightShards,
                amount: 10,
            },
        ),
        Mission::new(
            "Stockpile",
            MissionTask::Gather,
            50,
            MissionReward {
                kind: ResourceKind::Stardust,
                amount: 5,
            },
        ),
        Mission::new(
            "Titan Slayer",
            MissionTask::KillBoss,
            1,
            MissionReward {
                kind: ResourceKind::TitanCredits,
                amount: 20,
            },
        ),
        Mission::new(
            "Long Night",
            MissionTask::SurviveNight,
            3,
            MissionReward {
                kind: ResourceKind::LightShards,
                amount: 15,
            },
        ),
    ]
}

/// Stats captured at ultimate activation, restored on expiry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatSnapshot {
    pub max_health: u32,
    pub attack_damage: u32,
    pub speed: f64,
}

/// Durable player state plus the effective combat stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerStats {
    pub health: u32,
    pub max_health: u32,
    pub attack_damage: u32,
    pub speed: f64,
    pub nova_multiplier: f64,
    pub weapons: BTreeMap<WeaponKind, u8>,
    pub equipped_weapon: WeaponKind,
    pub owned_drones: BTreeSet<DroneKind>,
    pub active_drones: BTreeSet<DroneKind>,
    pub abilities: BTreeSet<AbilityKind>,
    pub skin: String,
    pub owned_skins: BTreeSet<String>,
    pub upgrades: BTreeMap<UpgradeKind, u32>,
    pub hero_class: HeroClass,
    pub class_locked: bool,
    pub missions: Vec<Mission>,
    pub level: u32,
    pub xp: u64,
    pub temperature: u32,
    pub nova_charge: u32,
    pub ultimate_charge: u32,
    pub bestiary: BTreeMap<EnemyKind, BestiaryEntry>,
    /// Pre-buff stats while an ultimate is running (transient).
    #[serde(skip)]
    pub ultimate_snapshot: Option<StatSnapshot>,
}

impl Default for PlayerStats {
    fn default() -> Self {
        let mut weapons = BTreeMap::new();
        for weapon in WeaponKind::ALL {
            weapons.insert(weapon, 0);
        }
        weapons.insert(WeaponKind::Blade, 1);

        let mut owned_skins = BTreeSet::new();
        owned_skins.insert(DEFAULT_SKIN.to_string());

        Self {
            health: BASE_MAX_HEALTH,
            max_health: BASE_MAX_HEALTH,
            attack_damage: BASE_ATTACK_DAMAGE,
            speed: BASE_SPEED,
            nova_multiplier: BASE_NOVA_MULTIPLIER,
            weapons,
            equipped_weapon: WeaponKind::Blade,
            owned_drones: BTreeSet::new(),
            active_drones: BTreeSet::new(),
            abilities: BTreeSet::new(),
            skin: DEFAULT_SKIN.to_string(),
            owned_skins,
            upgrades: BTreeMap::new(),
            hero_class: HeroClass::default(),
            class_locked: false,
            missions: default_missions(),
            level: 1,
            xp: 0,
            temperature: TEMPERATURE_MAX,
            nova_charge: 0,
            ultimate_charge: 0,
            bestiary: BTreeMap::new(),
            ultimate_snapshot: None,
        }
    }
}

impl PlayerStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upgrade_level(&self, kind: UpgradeKind) -> u32 {
        self.upgrades.get(&kind).copied().unwrap_or(0)
    }

    pub fn weapon_level(&self, weapon: WeaponKind) -> u8 {
        self.weapons.get(&weapon).copied().unwrap_or(0)
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn ultimate_active(&self) -> bool {
        self.ultimate_snapshot.is_some()
    }

    pub fn snapshot(&self) -> StatSnapshot {
        StatSnapshot {
            max_health: self.max_health,
            attack_damage: self.attack_damage,
            speed: self.speed,
        }
    }

    /// Damage of one hit with the equipped weapon.
    pub fn hit_damage(&self) -> u32 {
        let level = self.weapon_level(self.equipped_weapon).max(1);
        let mult = 1.0 + WEAPON_DAMAGE_PER_LEVEL * (level - 1) as f64;
        (self.attack_damage as f64 * mult).round() as u32
    }

    pub fn kills_of(&self, enemy: EnemyKind) -> u64 {
        self.bestiary.get(&enemy).map(|e| e.kills).unwrap_or(0)
    }

    pub fn total_kills(&self) -> u64 {
        self.bestiary.values().map(|e| e.kills).sum()
    }
}
