//! Integration tests for record framing and message decoding.
//!
//! This file contains tests for:
//! - Decoding every consumed message type from a framed feed.
//! - Skipping record types the engine does not consume.
//! - Malformed framing and the error offsets it reports.
//! - Restarting a decoder over the same buffer.

#![allow(clippy::all)]
use itch_vwap::utils::frame_record;
use itch_vwap::*;

#[cfg(test)]
mod tests {
    use super::*;

    const OPEN: u64 = 34_200_000_000_000;

    fn sample_messages() -> Vec<Message> {
        let aapl = Ticker::new("AAPL").unwrap();
        vec![
            SystemEvent::new(OPEN, EventCode::StartOfMarketHours).into(),
            AddOrder::new(OPEN + 1, 1, Side::Buy, 100, aapl, Price(1_500_000)).into(),
            OrderReplace::new(OPEN + 2, 1, 2, 100, Price(1_501_000)).into(),
            OrderExecuted::new(OPEN + 3, 2, 10, 7).into(),
            OrderExecutedWithPrice::new(OPEN + 4, 2, 10, 8, false, Price(1_502_000)).into(),
            OrderDelete::new(OPEN + 5, 2).into(),
            Trade::new(OPEN + 6, Side::Sell, 5, aapl, Price(1_499_000), 9).into(),
            BrokenTrade::new(OPEN + 7, 9).into(),
        ]
    }

    /// A framed stock directory record ('R'), which the engine skips.
    fn stock_directory_record() -> Vec<u8> {
        let mut body = vec![0u8; message_sizes::STOCK_DIRECTORY];
        body[0] = message_type::STOCK_DIRECTORY;
        body[11..19].copy_from_slice(b"AAPL    ");
        frame_record(&body)
    }

    #[test]
    fn test_decode_all_consumed_types() {
        let messages = sample_messages();
        let feed = pack_records(&messages);

        let decoded = unpack_records(&feed).unwrap();
        assert_eq!(decoded, messages);

        let tags: Vec<u8> = decoded.iter().map(|m| m.message_type()).collect();
        assert_eq!(tags, b"SAUECDPB".to_vec());
    }

    #[test]
    fn test_skip_unconsumed_records() {
        let mut feed = stock_directory_record();
        feed.extend(pack_records(&sample_messages()[..2]));
        feed.extend(stock_directory_record());

        let mut decoder = Decoder::new(&feed);
        let decoded: Vec<Message> = decoder.by_ref().map(|m| m.unwrap()).collect();
        assert_eq!(decoded.len(), 2);

        let stats = decoder.stats();
        assert_eq!(stats.messages, 2);
        assert_eq!(stats.skipped, 2);
        assert_eq!(stats.bytes, feed.len());
    }

    #[test]
    fn test_raw_records() {
        let feed = pack_records(&sample_messages()[..2]);
        let mut decoder = Decoder::new(&feed);

        let first = decoder.next_raw().unwrap().unwrap();
        assert_eq!(first.offset, 0);
        assert_eq!(first.length, 12);
        assert_eq!(first.tag, b'S');

        let second = decoder.next_raw().unwrap().unwrap();
        assert_eq!(second.offset, 14);
        assert_eq!(second.length, 36);
        assert_eq!(second.body.len(), 36);
        assert_eq!(decoder.record_offset(), 14);

        assert!(decoder.next_raw().is_none());
    }

    #[test]
    fn test_truncated_record() {
        let mut feed = pack_records(&sample_messages()[..1]);
        let add = sample_messages()[1].to_record();
        feed.extend_from_slice(&add[..20]);

        let mut decoder = Decoder::new(&feed);
        assert!(decoder.next().unwrap().is_ok());
        match decoder.next() {
            Some(Err(ItchError::MalformedRecord { offset, .. })) => assert_eq!(offset, 14),
            other => panic!("expected a malformed record, got {:?}", other),
        }

        // The decoder is fused after an error.
        assert!(decoder.next().is_none());
        assert_eq!(decoder.messages_decoded(), 1);
    }

    #[test]
    fn test_single_trailing_byte() {
        let mut feed = pack_records(&sample_messages()[..1]);
        feed.push(0);

        let result = unpack_records(&feed);
        assert!(matches!(
            result,
            Err(ItchError::MalformedRecord { offset: 14, .. })
        ));
    }

    #[test]
    fn test_zero_length_record() {
        let feed = [0u8, 0, b'S'];
        assert!(matches!(
            unpack_records(&feed),
            Err(ItchError::MalformedRecord { offset: 0, .. })
        ));
    }

    #[test]
    fn test_body_shorter_than_layout() {
        // A declared length of 5 cannot hold an Add Order.
        let feed = frame_record(&[b'A', 0, 0, 0, 0]);
        match unpack_records(&feed) {
            Err(ItchError::MalformedRecord { offset, reason }) => {
                assert_eq!(offset, 0);
                assert!(reason.contains("Buffer too small"), "{}", reason);
            }
            other => panic!("expected a malformed record, got {:?}", other),
        }
    }

    #[test]
    fn test_body_longer_than_layout() {
        let mut body = sample_messages()[0].pack();
        body.extend_from_slice(&[0xAA, 0xBB]);
        let mut feed = frame_record(&body);
        feed.extend(pack_records(&sample_messages()[1..2]));

        let decoded = unpack_records(&feed).unwrap();
        assert_eq!(decoded, sample_messages()[..2].to_vec());
    }

    #[test]
    fn test_reset_restarts_decoding() {
        let feed = pack_records(&sample_messages());
        let mut decoder = Decoder::new(&feed);

        let first: Vec<Message> = decoder.by_ref().map(|m| m.unwrap()).collect();
        assert!(decoder.next().is_none());

        decoder.reset();
        assert_eq!(decoder.bytes_consumed(), 0);
        let second: Vec<Message> = decoder.by_ref().map(|m| m.unwrap()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_feed() {
        let mut decoder = Decoder::new(&[]);
        assert!(decoder.next().is_none());
        assert_eq!(decoder.stats(), DecodeStats::default());
    }
}
