//! Integration tests for order reference resolution.

#![allow(clippy::all)]
use itch_vwap::*;

#[cfg(test)]
mod tests {
    use super::*;

    fn add(reference: u64, symbol: &str, price: u32) -> AddOrder {
        AddOrder::new(
            34_300_000_000_000,
            reference,
            Side::Sell,
            200,
            Ticker::new(symbol).unwrap(),
            Price(price),
        )
    }

    #[test]
    fn test_resolve_recorded_order() {
        let mut resolver = ReferenceResolver::new();
        resolver.record_order(OrderRecord::from(&add(10, "AAPL", 1_500_000)));
        resolver.record_order(OrderRecord::from(&add(11, "MSFT", 3_300_000)));

        assert_eq!(resolver.len(), 2);
        assert_eq!(
            resolver.resolve(10).unwrap(),
            (Ticker::new("AAPL").unwrap(), Price(1_500_000))
        );
        assert_eq!(resolver.get(11).unwrap().shares, 200);
    }

    #[test]
    fn test_unknown_reference() {
        let resolver = ReferenceResolver::new();
        assert!(resolver.is_empty());
        assert_eq!(
            resolver.resolve(404),
            Err(ItchError::UnresolvedReference { reference: 404 })
        );
    }

    #[test]
    fn test_reused_reference_overwrites() {
        let mut resolver = ReferenceResolver::new();
        resolver.record_order(OrderRecord::from(&add(10, "AAPL", 1_500_000)));
        resolver.record_order(OrderRecord::from(&add(10, "MSFT", 3_300_000)));

        assert_eq!(resolver.len(), 1);
        assert_eq!(resolver.resolve(10).unwrap().0.as_str(), "MSFT");
    }

    #[test]
    fn test_replace_inherits_stock_and_side() {
        let mut resolver = ReferenceResolver::new();
        resolver.record_order(OrderRecord::from(&add(10, "AAPL", 1_500_000)));

        let replace = OrderReplace::new(34_400_000_000_000, 10, 20, 50, Price(1_490_000));
        let record = resolver.replace(&replace).unwrap();

        assert_eq!(record.reference, 20);
        assert_eq!(record.side, Side::Sell);
        assert_eq!(record.shares, 50);
        assert_eq!(record.stock.as_str(), "AAPL");
        assert_eq!(resolver.resolve(20).unwrap().1, Price(1_490_000));

        // The original stays resolvable until evicted.
        assert!(resolver.resolve(10).is_ok());
        assert_eq!(resolver.evict(10).map(|order| order.reference), Some(10));
        assert!(resolver.resolve(10).is_err());
        assert!(resolver.evict(10).is_none());
    }

    #[test]
    fn test_replace_unknown_original() {
        let mut resolver = ReferenceResolver::new();
        let replace = OrderReplace::new(1, 10, 20, 50, Price(1));
        assert_eq!(
            resolver.replace(&replace),
            Err(ItchError::UnresolvedReference { reference: 10 })
        );
        assert!(resolver.is_empty());
    }
}
