//! Constellation node catalog and persistent tree state.

use crate::player::types::{AbilityKind, DroneKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// What a node grants per level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectType {
    MaxHealth,
    Damage,
    Speed,
    NovaRecharge,
    UnlockDrone(DroneKind),
    UnlockAbility(AbilityKind),
}

/// One star in the constellation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstellationNode {
    pub id: String,
    pub name: String,
    pub description: String,
    pub base_cost: u64,
    pub max_level: u32,
    /// May exceed `max_level` through ascension.
    pub current_level: u32,
    pub effect: EffectType,
    pub effect_value: f64,
    pub prerequisites: Vec<String>,
    /// Layout position, presentation only.
    pub position: (f32, f32),
}

impl Default for ConstellationNode {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            description: String::new(),
            base_cost: 0,
            max_level: 1,
            current_level: 0,
            effect: EffectType::MaxHealth,
            effect_value: 0.0,
            prerequisites: Vec::new(),
            position: (0.0, 0.0),
        }
    }
}

impl ConstellationNode {
    pub fn is_unlocked(&self) -> bool {
        self.current_level > 0
    }

    pub fn is_ascended(&self) -> bool {
        self.current_level > self.max_level
    }

    /// Total magnitude contributed at the current level.
    pub fn contribution(&self) -> f64 {
        self.effect_value * self.current_level as f64
    }
}

struct NodeDef {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    base_cost: u64,
    max_level: u32,
    effect: EffectType,
    effect_value: f64,
    prerequisites: &'static [&'static str],
    position: (f32, f32),
}

const CATALOG: [NodeDef; 8] = [
    NodeDef {
        id: "heart_of_orion",
        name: "Heart of Orion",
        description: "+10 max health per level.",
        base_cost: 5,
        max_level: 5,
        effect: EffectType::MaxHealth,
        effect_value: 10.0,
        prerequisites: &[],
        position: (0.0, 0.0),
    },
    NodeDef {
        id: "ares_edge",
        name: "Ares' Edge",
        description: "+2 attack damage per level.",
        base_cost: 5,
        max_level: 5,
        effect: EffectType::Damage,
        effect_value: 2.0,
        prerequisites: &[],
        position: (2.0, 0.0),
    },
    NodeDef {
        id: "mercury_stride",
        name: "Mercury's Stride",
        description: "+5% movement speed per level.",
        base_cost: 8,
        max_level: 3,
        effect: EffectType::Speed,
        effect_value: 0.05,
        prerequisites: &["heart_of_orion"],
        position: (-1.0, 1.5),
    },
    NodeDef {
        id: "nova_well",
        name: "Nova Well",
        description: "+10% nova charge gain per level.",
        base_cost: 10,
        max_level: 5,
        effect: EffectType::NovaRecharge,
        effect_value: 0.1,
        prerequisites: &["ares_edge"],
        position: (3.0, 1.5),
    },
    NodeDef {
        id: "titan_blood",
        name: "Titan Blood",
        description: "+25 max health per level.",
        base_cost: 15,
        max_level: 3,
        effect: EffectType::MaxHealth,
        effect_value: 25.0,
        prerequisites: &["heart_of_orion", "ares_edge"],
        position: (1.0, 1.5),
    },
    NodeDef {
        id: "star_forge",
        name: "Star Forge",
        description: "+5 attack damage per level.",
        base_cost: 20,
        max_level: 3,
        effect: EffectType::Damage,
        effect_value: 5.0,
        prerequisites: &["nova_well"],
        position: (3.0, 3.0),
    },
    NodeDef {
        id: "drone_bay",
        name: "Drone Bay",
        description: "Deploys a Guardian drone.",
        base_cost: 25,
        max_level: 1,
        effect: EffectType::UnlockDrone(DroneKind::Guardian),
        effect_value: 1.0,
        prerequisites: &["mercury_stride"],
        position: (-1.0, 3.0),
    },
    NodeDef {
        id: "orbital_strike",
        name: "Orbital Strike",
        description: "Unlocks the Orbital Strike ability.",
        base_cost: 40,
        max_level: 1,
        effect: EffectType::UnlockAbility(AbilityKind::OrbitalStrike),
        effect_value: 1.0,
        prerequisites: &["star_forge", "titan_blood"],
        position: (2.0, 4.5),
    },
];

impl NodeDef {
    fn to_node(&self) -> ConstellationNode {
        ConstellationNode {
            id: self.id.to_string(),
            name: self.name.to_string(),
            description: self.description.to_string(),
            base_cost: self.base_cost,
            max_level: self.max_level,
            current_level: 0,
            effect: self.effect,
            effect_value: self.effect_value,
            prerequisites: self.prerequisites.iter().map(|p| p.to_string()).collect(),
            position: self.position,
        }
    }
}

/// Summed effects of every unlocked node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectTotals {
    pub max_health: f64,
    pub damage: f64,
    pub speed: f64,
    pub nova: f64,
    pub drones: BTreeSet<DroneKind>,
    pub abilities: BTreeSet<AbilityKind>,
}

/// Persistent skill graph, survives every run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Constellation {
    pub nodes: Vec<ConstellationNode>,
}

impl Default for Constellation {
    fn default() -> Self {
        Self {
            nodes: CATALOG.iter().map(NodeDef::to_node).collect(),
        }
    }
}

impl Constellation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, id: &str) -> Option<&ConstellationNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut ConstellationNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn level(&self, id: &str) -> u32 {
        self.node(id).map(|n| n.current_level).unwrap_or(0)
    }

    /// Every prerequisite has at least one level.
    pub fn prerequisites_met(&self, id: &str) -> bool {
        match self.node(id) {
            Some(node) => node.prerequisites.iter().all(|p| self.level(p) > 0),
            None => false,
        }
    }

    pub fn unlocked_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_unlocked()).count()
    }

    /// Bring a stored tree in line with the current catalog.
    ///
    /// Catalog metadata wins, stored levels are kept, unknown ids are dropped
    /// and new catalog nodes appear at level 0.
    pub fn reconcile(&mut self) {
        let stored = std::mem::take(&mut self.nodes);
        self.nodes = CATALOG
            .iter()
            .map(|def| {
                let mut node = def.to_node();
                if let Some(old) = stored.iter().find(|n| n.id == def.id) {
                    node.current_level = old.current_level;
                }
                node
            })
            .collect();
    }

    pub fn effect_totals(&self) -> EffectTotals {
        let mut totals = EffectTotals::default();
        for node in self.nodes.iter().filter(|n| n.is_unlocked()) {
            match node.effect {
                EffectType::MaxHealth => totals.max_health += node.contribution(),
                EffectType::Damage => totals.damage += node.contribution(),
                EffectType::Speed => totals.speed += node.contribution(),
                EffectType::NovaRecharge => totals.nova += node.contribution(),
                EffectType::UnlockDrone(drone) => {
                    totals.drones.insert(drone);
                }
                EffectType::UnlockAbility(ability) => {
                    totals.abilities.insert(ability);
                }
            }
        }
        totals
    }
}
