//! Integration tests for the Trade and Broken Trade message types.
//!
//! This file contains tests for:
//! - The 44-byte non-cross trade layout.
//! - Packing and unpacking.
//! - Validation of enumerated fields.

#![allow(clippy::all)]
use itch_vwap::{common::*, ticker::Ticker, trade::*};

#[cfg(test)]
mod tests {
    use super::*;

    /// Returns a valid Trade message for testing.
    fn get_default_trade() -> Trade {
        Trade::new(
            36_000_000_000_000,           // 10:00:00
            Side::Sell,                   // side
            400,                          // shares
            Ticker::new("MSFT").unwrap(), // stock
            Price(3_301_200),             // $330.12
            555,                          // match number
        )
    }

    #[test]
    fn test_trade_size() {
        assert_eq!(get_default_trade().pack().len(), message_sizes::TRADE);
        assert_eq!(get_default_trade().pack().len(), 44);
    }

    #[test]
    fn test_trade_pack_unpack_roundtrip() {
        let original = get_default_trade();
        let packed = original.pack();
        assert_eq!(packed[0], b'P');
        assert_eq!(packed[19], b'S');
        assert_eq!(&packed[24..32], b"MSFT    ");
        assert_eq!(&packed[36..44], &555u64.to_be_bytes());

        let unpacked = Trade::unpack(&packed).unwrap();
        assert_eq!(original, unpacked);
        assert_eq!(unpacked.reference, 0);
    }

    #[test]
    fn test_trade_display() {
        let trade = get_default_trade();
        let display_str = format!("{}", trade);
        assert!(display_str.contains("stock: MSFT"));
        assert!(display_str.contains("price: 330.1200"));
    }

    #[test]
    fn test_broken_trade_roundtrip() {
        let broken = BrokenTrade::new(37_000_000_000_000, 555);
        let packed = broken.pack();
        assert_eq!(packed.len(), message_sizes::BROKEN_TRADE);
        assert_eq!(packed[0], b'B');
        assert_eq!(BrokenTrade::unpack(&packed).unwrap(), broken);
    }

    #[test]
    fn test_unpack_error_handling() {
        let packed = get_default_trade().pack();
        assert!(matches!(
            Trade::unpack(&packed[..43]),
            Err(ItchError::BufferTooSmall {
                expected: 44,
                actual: 43
            })
        ));
        assert!(matches!(
            BrokenTrade::unpack(&packed),
            Err(ItchError::InvalidMessageType(b'P'))
        ));
    }
}
