//! Integration tests for the crate-level helpers.

#![allow(clippy::all)]
use itch_vwap::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_info() {
        assert_eq!(ITCH_VERSION, "5.0");
        assert!(!LIB_VERSION.is_empty());
        assert!(BUILD_INFO.starts_with("itch-vwap v"));
        assert!(BUILD_INFO.contains(LIB_VERSION));
    }

    #[test]
    fn test_calculate_record_size() {
        assert_eq!(calculate_record_size(message_type::SYSTEM_EVENT).unwrap(), 14);
        assert_eq!(calculate_record_size(message_type::ADD_ORDER_MPID).unwrap(), 42);
        assert_eq!(calculate_record_size(message_type::NOII).unwrap(), 52);
        assert_eq!(
            calculate_record_size(b'Z'),
            Err(ItchError::InvalidMessageType(b'Z'))
        );
    }

    #[test]
    fn test_message_type_names() {
        assert_eq!(message_type_name(b'A'), Some("Add Order"));
        assert_eq!(message_type_name(b'Z'), None);
        assert_eq!(message_size(b'P'), Some(44));
    }

    #[test]
    fn test_validate_feed() {
        let feed = pack_records(&[
            SystemEvent::new(0, EventCode::StartOfMessages).into(),
            OrderDelete::new(1, 1).into(),
        ]);
        let stats = validate_feed(&feed).unwrap();
        assert_eq!(stats.messages, 2);
        assert_eq!(stats.bytes, 14 + 21);

        assert!(validate_feed(&feed[..feed.len() - 1]).is_err());
    }

    #[test]
    fn test_hourly_vwap_requires_open() {
        let feed = pack_records(&[
            Trade::new(1_000, Side::Buy, 1, Ticker::new("AAPL").unwrap(), Price(1), 1).into(),
        ]);
        let err = hourly_vwap(&feed).unwrap_err();
        assert_eq!(err.source, ItchError::NoTradingWindow { timestamp: 1_000 });
    }
}
