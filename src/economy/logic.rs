//! Exchange rates and transmutation between resource kinds.

use super::types::{Ledger, ResourceKind};

/// Input units required per output unit, or `None` when no exchange exists.
pub fn exchange_rate(from: ResourceKind, to: ResourceKind) -> Option<f64> {
    use ResourceKind::*;
    match (from, to) {
        (Wood, Stone) => Some(2.0),
        (Stone, Wood) => Some(1.5),
        (LightShards, TitanCredits) => Some(2.0),
        (TitanCredits, LightShards) => Some(1.5),
        (Food, Wood) => Some(2.0),
        _ => None,
    }
}

/// Output units produced by spending `amount` of `from`.
pub fn transmute_yield(from: ResourceKind, to: ResourceKind, amount: u64) -> Option<u64> {
    let rate = exchange_rate(from, to)?;
    Some((amount as f64 / rate).floor() as u64)
}

/// Spend `amount` of `from` and credit the exchanged amount of `to`.
///
/// Returns the credited amount. Refuses without mutation when there is no
/// exchange for the pair, the yield rounds down to zero, or the source is
/// short.
pub fn transmute(
    ledger: &mut Ledger,
    from: ResourceKind,
    to: ResourceKind,
    amount: u64,
) -> Option<u64> {
    let produced = transmute_yield(from, to, amount)?;
    if produced == 0 {
        return None;
    }
    if !ledger.consume(from, amount) {
        return None;
    }
    ledger.add(to, produced);
    Some(produced)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transmute_wood_to_stone() {
        let mut ledger = Ledger::new();
        ledger.add(ResourceKind::Wood, 10);

        assert_eq!(
            transmute(&mut ledger, ResourceKind::Wood, ResourceKind::Stone, 10),
            Some(5)
        );
        assert_eq!(ledger.get(ResourceKind::Wood), 0);
        assert_eq!(ledger.get(ResourceKind::Stone), 5);
    }

    #[test]
    fn test_rates_are_asymmetric() {
        assert_eq!(
            transmute_yield(ResourceKind::Stone, ResourceKind::Wood, 3),
            Some(2)
        );
        assert_eq!(
            transmute_yield(ResourceKind::Wood, ResourceKind::Stone, 3),
            Some(1)
        );
    }

    #[test]
    fn test_transmute_insufficient_source_is_noop() {
        let mut ledger = Ledger::new();
        ledger.add(ResourceKind::Wood, 3);

        assert_eq!(
            transmute(&mut ledger, ResourceKind::Wood, ResourceKind::Stone, 4),
            None
        );
        assert_eq!(ledger.get(ResourceKind::Wood), 3);
        assert_eq!(ledger.get(ResourceKind::Stone), 0);
    }

    #[test]
    fn test_transmute_unknown_pair_is_noop() {
        let mut ledger = Ledger::new();
        ledger.add(ResourceKind::Stardust, 100);

        assert_eq!(
            transmute(&mut ledger, ResourceKind::Stardust, ResourceKind::Wood, 10),
            None
        );
        assert_eq!(ledger.get(ResourceKind::Stardust), 100);
    }

    #[test]
    fn test_transmute_zero_yield_is_noop() {
        let mut ledger = Ledger::new();
        ledger.add(ResourceKind::Wood, 1);

        assert_eq!(
            transmute(&mut ledger, ResourceKind::Wood, ResourceKind::Stone, 1),
            None
        );
        assert_eq!(ledger.get(ResourceKind::Wood), 1);
    }
}
