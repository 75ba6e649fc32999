//! Integration tests for timestamp helpers.

#![allow(clippy::all)]
use chrono::NaiveTime;
use itch_vwap::utils::*;

#[cfg(test)]
mod tests {
    use super::*;

    const MARKET_OPEN: u64 = 34_200_000_000_000;

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0), "00:00:00.000000000");
        assert_eq!(format_timestamp(MARKET_OPEN), "09:30:00.000000000");
        assert_eq!(format_timestamp(MARKET_OPEN + 1), "09:30:00.000000001");
        assert_eq!(format_timestamp(57_600_123_456_789), "16:00:00.123456789");
    }

    #[test]
    fn test_format_out_of_range() {
        assert_eq!(format_timestamp(24 * NANOS_PER_HOUR), "86400000000000ns");
        assert!(timestamp_to_time(24 * NANOS_PER_HOUR).is_none());
    }

    #[test]
    fn test_time_conversion() {
        let open = NaiveTime::from_hms_opt(9, 30, 0).unwrap();
        assert_eq!(time_to_timestamp(open), MARKET_OPEN);
        assert_eq!(timestamp_to_time(MARKET_OPEN), Some(open));

        let precise = NaiveTime::from_hms_nano_opt(15, 59, 59, 999_999_999).unwrap();
        assert_eq!(timestamp_to_time(time_to_timestamp(precise)), Some(precise));
    }

    #[test]
    fn test_u48_timestamp_encoding() {
        let bytes = timestamp_to_u48(MARKET_OPEN);
        assert_eq!(bytes, [0x1F, 0x1A, 0xCE, 0xD9, 0xF0, 0x00]);
        assert_eq!(u48_to_timestamp(bytes), MARKET_OPEN);
    }
}
