//! Resource kinds and the fungible-currency ledger.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Every fungible currency tracked by the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Wood,
    Stone,
    LightShards,
    Food,
    TitanCores,
    Stardust,
    TitanCredits,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 7] = [
        ResourceKind::Wood,
        ResourceKind::Stone,
        ResourceKind::LightShards,
        ResourceKind::Food,
        ResourceKind::TitanCores,
        ResourceKind::Stardust,
        ResourceKind::TitanCredits,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ResourceKind::Wood => "Wood",
            ResourceKind::Stone => "Stone",
            ResourceKind::LightShards => "Light Shards",
            ResourceKind::Food => "Food",
            ResourceKind::TitanCores => "Titan Cores",
            ResourceKind::Stardust => "Stardust",
            ResourceKind::TitanCredits => "Titan Credits",
        }
    }

    /// Raw materials picked up in the world during a run.
    pub fn is_gatherable(&self) -> bool {
        matches!(
            self,
            ResourceKind::Wood | ResourceKind::Stone | ResourceKind::Food
        )
    }
}

/// Non-negative count per resource kind. Missing kinds read as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ledger {
    counts: BTreeMap<ResourceKind, u64>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: ResourceKind) -> u64 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn has(&self, kind: ResourceKind, amount: u64) -> bool {
        self.get(kind) >= amount
    }

    pub fn add(&mut self, kind: ResourceKind, amount: u64) {
        let entry = self.counts.entry(kind).or_insert(0);
        *entry = entry.saturating_add(amount);
    }

    /// Deduct `amount` only if the full amount is available.
    pub fn consume(&mut self, kind: ResourceKind, amount: u64) -> bool {
        let current = self.get(kind);
        if current < amount {
            return false;
        }
        self.counts.insert(kind, current - amount);
        true
    }

    /// Total units held across every kind.
    pub fn total(&self) -> u64 {
        self.counts.values().fold(0, |total, n| total.saturating_add(*n))
    }

    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, u64)> + '_ {
        ResourceKind::ALL.iter().map(move |k| (*k, self.get(*k)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ledger_is_empty() {
        let ledger = Ledger::new();
        for kind in ResourceKind::ALL {
            assert_eq!(ledger.get(kind), 0);
        }
        assert_eq!(ledger.total(), 0);
    }

    #[test]
    fn test_gather_and_craft_scenario() {
        let mut ledger = Ledger::new();
        ledger.add(ResourceKind::Wood, 10);
        assert_eq!(ledger.get(ResourceKind::Wood), 10);

        assert!(!ledger.consume(ResourceKind::Wood, 12));
        assert_eq!(ledger.get(ResourceKind::Wood), 10);

        assert!(ledger.consume(ResourceKind::Wood, 10));
        assert_eq!(ledger.get(ResourceKind::Wood), 0);
    }

    #[test]
    fn test_consume_is_exact_or_nothing() {
        let mut ledger = Ledger::new();
        ledger.add(ResourceKind::Stone, 7);

        let ops = [3u64, 5, 4, 0, 1, 9];
        for n in ops {
            let before = ledger.get(ResourceKind::Stone);
            let ok = ledger.consume(ResourceKind::Stone, n);
            let after = ledger.get(ResourceKind::Stone);
            if ok {
                assert_eq!(after, before - n);
            } else {
                assert_eq!(after, before);
                assert!(before < n);
            }
        }
    }

    #[test]
    fn test_total_counts_every_kind() {
        let mut ledger = Ledger::new();
        ledger.add(ResourceKind::Wood, 5);
        ledger.add(ResourceKind::Stardust, 3);
        ledger.add(ResourceKind::TitanCredits, 2);
        assert_eq!(ledger.total(), 10);
    }

    #[test]
    fn test_total_saturates_at_max() {
        let mut ledger = Ledger::new();
        ledger.add(ResourceKind::Wood, u64::MAX);
        ledger.add(ResourceKind::Wood, 1);
        ledger.add(ResourceKind::Stone, 1);
        assert_eq!(ledger.get(ResourceKind::Wood), u64::MAX);
        assert_eq!(ledger.total(), u64::MAX);
    }

    #[test]
    fn test_ledger_json_uses_snake_case_keys() {
        let mut ledger = Ledger::new();
        ledger.add(ResourceKind::LightShards, 4);
        let json = serde_json::to_string(&ledger).unwrap();
        assert!(json.contains("light_shards"));

        let loaded: Ledger = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.get(ResourceKind::LightShards), 4);
    }

    #[test]
    fn test_gatherable_kinds() {
        assert!(ResourceKind::Wood.is_gatherable());
        assert!(ResourceKind::Food.is_gatherable());
        assert!(!ResourceKind::Stardust.is_gatherable());
        assert!(!ResourceKind::LightShards.is_gatherable());
    }
}
