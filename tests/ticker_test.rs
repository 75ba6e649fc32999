//! Integration tests for fixed-width stock symbols.

#![allow(clippy::all)]
use itch_vwap::{common::ItchError, ticker::*};
use std::collections::BTreeSet;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_padding() {
        let ticker = Ticker::new("AAPL").unwrap();
        assert_eq!(ticker.as_bytes(), b"AAPL    ");
        assert_eq!(ticker.as_str(), "AAPL");
        assert_eq!(ticker.to_string(), "AAPL");
        assert_eq!(format!("{:?}", ticker), "Ticker(\"AAPL\")");
    }

    #[test]
    fn test_ticker_full_width() {
        let ticker = Ticker::new("ABCDEFGH").unwrap();
        assert_eq!(ticker.as_bytes(), b"ABCDEFGH");
        assert_eq!(ticker.as_str(), "ABCDEFGH");
    }

    #[test]
    fn test_ticker_with_suffix() {
        let ticker: Ticker = "BRK.A".parse().unwrap();
        assert_eq!(ticker.as_str(), "BRK.A");
    }

    #[test]
    fn test_invalid_symbols() {
        assert!(matches!(Ticker::new(""), Err(ItchError::InvalidFieldValue(_))));
        assert!(matches!(
            Ticker::new("TOOLONGXX"),
            Err(ItchError::InvalidFieldValue(_))
        ));
        assert!(Ticker::new("A\tB").is_err());
        assert!(Ticker::from_bytes([b'A', 0, 0, 0, 0, 0, 0, 0]).is_err());
    }

    #[test]
    fn test_from_wire_bytes() {
        let ticker = Ticker::from_bytes(*b"MSFT    ").unwrap();
        assert_eq!(ticker, Ticker::new("MSFT").unwrap());
    }

    #[test]
    fn test_ticker_ordering() {
        let set: BTreeSet<Ticker> = ["MSFT", "AAPL", "ZVZZT", "AA"]
            .iter()
            .map(|s| Ticker::new(s).unwrap())
            .collect();
        let ordered: Vec<&str> = set.iter().map(|t| t.as_str()).collect();
        assert_eq!(ordered, vec!["AA", "AAPL", "MSFT", "ZVZZT"]);
    }
}
