//! Node pricing, unlocking and stardust conversion.

use super::types::{Constellation, ConstellationNode};
use crate::core::constants::{
    ASCENSION_COST_RATIO, STARDUST_SCORE_DIVISOR, STARDUST_SHARD_DIVISOR,
};
use crate::economy::{Ledger, ResourceKind};

/// Result of a successful unlock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnlockOutcome {
    pub new_level: u32,
    pub cost: u64,
    /// The node went past its normal max level with this purchase.
    pub ascended: bool,
}

/// Stardust price of the next level of `node`.
///
/// Flat base cost below max level, then `base * 1.5^(level - max + 1)`.
pub fn node_cost(node: &ConstellationNode) -> u64 {
    if node.current_level < node.max_level {
        return node.base_cost;
    }
    let steps = (node.current_level - node.max_level + 1) as i32;
    (node.base_cost as f64 * ASCENSION_COST_RATIO.powi(steps)).floor() as u64
}

/// Check whether the next level of `id` is purchasable right now.
pub fn can_unlock(tree: &Constellation, id: &str, stardust: u64) -> bool {
    match tree.node(id) {
        Some(node) => tree.prerequisites_met(id) && stardust >= node_cost(node),
        None => false,
    }
}

/// Buy the next level of `id`, spending stardust from the ledger.
///
/// Refuses without mutation when the node is unknown, a prerequisite has no
/// level yet, or stardust is short.
pub fn unlock_node(tree: &mut Constellation, id: &str, ledger: &mut Ledger) -> Option<UnlockOutcome> {
    if !tree.prerequisites_met(id) {
        return None;
    }
    let node = tree.node_mut(id)?;
    let cost = node_cost(node);
    if !ledger.consume(ResourceKind::Stardust, cost) {
        return None;
    }
    node.current_level += 1;
    Some(UnlockOutcome {
        new_level: node.current_level,
        cost,
        ascended: node.current_level > node.max_level,
    })
}

/// Stardust earned from a finished run.
pub fn convert_run_to_currency(score: u64, light_shards: u64) -> u64 {
    score / STARDUST_SCORE_DIVISOR + light_shards / STARDUST_SHARD_DIVISOR
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rich_ledger(stardust: u64) -> Ledger {
        let mut ledger = Ledger::new();
        ledger.add(ResourceKind::Stardust, stardust);
        ledger
    }

    #[test]
    fn test_base_cost_below_max() {
        let tree = Constellation::new();
        let node = tree.node("heart_of_orion").unwrap();
        assert_eq!(node_cost(node), 5);
    }

    #[test]
    fn test_unlock_success_deducts_and_levels() {
        let mut tree = Constellation::new();
        let mut ledger = rich_ledger(12);

        let out = unlock_node(&mut tree, "heart_of_orion", &mut ledger).unwrap();
        assert_eq!(out.new_level, 1);
        assert_eq!(out.cost, 5);
        assert!(!out.ascended);
        assert_eq!(ledger.get(ResourceKind::Stardust), 7);
    }

    #[test]
    fn test_unlock_insufficient_stardust_is_noop() {
        let mut tree = Constellation::new();
        let mut ledger = rich_ledger(4);

        assert!(unlock_node(&mut tree, "heart_of_orion", &mut ledger).is_none());
        assert_eq!(tree.level("heart_of_orion"), 0);
        assert_eq!(ledger.get(ResourceKind::Stardust), 4);
    }

    #[test]
    fn test_unlock_requires_every_prerequisite() {
        let mut tree = Constellation::new();
        let mut ledger = rich_ledger(1000);

        assert!(unlock_node(&mut tree, "titan_blood", &mut ledger).is_none());
        unlock_node(&mut tree, "heart_of_orion", &mut ledger).unwrap();
        assert!(unlock_node(&mut tree, "titan_blood", &mut ledger).is_none());
        unlock_node(&mut tree, "ares_edge", &mut ledger).unwrap();
        assert!(unlock_node(&mut tree, "titan_blood", &mut ledger).is_some());
        assert_eq!(ledger.get(ResourceKind::Stardust), 1000 - 5 - 5 - 15);
    }

    #[test]
    fn test_unknown_node_is_refused() {
        let mut tree = Constellation::new();
        let mut ledger = rich_ledger(1000);
        assert!(unlock_node(&mut tree, "does_not_exist", &mut ledger).is_none());
        assert_eq!(ledger.get(ResourceKind::Stardust), 1000);
    }

    #[test]
    fn test_ascension_cost_grows_geometrically() {
        let mut tree = Constellation::new();
        let mut ledger = rich_ledger(1_000_000);

        // heart_of_orion: base 5, max 5
        for _ in 0..5 {
            let out = unlock_node(&mut tree, "heart_of_orion", &mut ledger).unwrap();
            assert_eq!(out.cost, 5);
            assert!(!out.ascended);
        }

        let mut previous = 0;
        for step in 1..=8 {
            let node = tree.node("heart_of_orion").unwrap();
            let expected = (5.0 * 1.5f64.powi(step)).floor() as u64;
            assert_eq!(node_cost(node), expected);

            let out = unlock_node(&mut tree, "heart_of_orion", &mut ledger).unwrap();
            assert!(out.ascended);
            assert!(out.cost > previous, "ascension cost must strictly increase");
            previous = out.cost;
        }
        assert_eq!(tree.level("heart_of_orion"), 13);
    }

    #[test]
    fn test_can_unlock_matches_unlock() {
        let tree = Constellation::new();
        assert!(can_unlock(&tree, "ares_edge", 5));
        assert!(!can_unlock(&tree, "ares_edge", 4));
        assert!(!can_unlock(&tree, "nova_well", 100));
    }

    #[test]
    fn test_convert_run_to_currency() {
        assert_eq!(convert_run_to_currency(0, 0), 0);
        assert_eq!(convert_run_to_currency(99, 9), 0);
        assert_eq!(convert_run_to_currency(2550, 37), 25 + 3);
        assert_eq!(convert_run_to_currency(100, 10), 2);
    }
}
