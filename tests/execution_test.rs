//! Integration tests for the Order Executed message types ('E' and 'C').

#![allow(clippy::all)]
use itch_vwap::{common::*, execution::*};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_executed_layout() {
        let exec = OrderExecuted::new(35_100_000_000_000, 7, 300, 9001);
        let packed = exec.pack();

        assert_eq!(packed.len(), message_sizes::ORDER_EXECUTED);
        assert_eq!(packed[0], b'E');
        assert_eq!(&packed[11..19], &7u64.to_be_bytes());
        assert_eq!(&packed[19..23], &300u32.to_be_bytes());
        assert_eq!(&packed[23..31], &9001u64.to_be_bytes());

        assert_eq!(OrderExecuted::unpack(&packed).unwrap(), exec);
    }

    #[test]
    fn test_order_executed_with_price_layout() {
        let exec = OrderExecutedWithPrice::new(35_100_000_000_000, 7, 50, 9002, true, Price(1_505_000));
        let packed = exec.pack();

        assert_eq!(packed.len(), message_sizes::ORDER_EXECUTED_WITH_PRICE);
        assert_eq!(packed[0], b'C');
        assert_eq!(packed[31], b'Y');
        assert_eq!(&packed[32..36], &1_505_000u32.to_be_bytes());

        let unpacked = OrderExecutedWithPrice::unpack(&packed).unwrap();
        assert_eq!(unpacked, exec);
        assert!(unpacked.printable);
        assert_eq!(unpacked.execution_price.as_f64(), 150.5);
    }

    #[test]
    fn test_non_printable_flag() {
        let exec = OrderExecutedWithPrice::new(1, 7, 50, 9003, false, Price(1_505_000));
        let packed = exec.pack();
        assert_eq!(packed[31], b'N');
        assert!(!OrderExecutedWithPrice::unpack(&packed).unwrap().printable);
    }

    #[test]
    fn test_invalid_printable_flag() {
        let mut packed = OrderExecutedWithPrice::new(1, 7, 50, 9003, true, Price(1)).pack();
        packed[31] = b'?';
        assert!(matches!(
            OrderExecutedWithPrice::unpack(&packed),
            Err(ItchError::InvalidFieldValue(_))
        ));
    }

    #[test]
    fn test_unpack_error_handling() {
        let packed = OrderExecuted::new(1, 1, 1, 1).pack();
        assert!(matches!(
            OrderExecuted::unpack(&packed[..30]),
            Err(ItchError::BufferTooSmall {
                expected: 31,
                actual: 30
            })
        ));

        // An 'E' body is too short to be read as a 'C'.
        assert!(OrderExecutedWithPrice::unpack(&packed).is_err());
    }
}
