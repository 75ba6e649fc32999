//! ITCH Order Executed message implementation
//!
//! Order Executed messages report that (part of) a resting order traded.
//! `E` executes at the order's own limit price and is always printable; `C`
//! carries an explicit execution price and a printable flag.

use crate::common::{check_body, message_sizes, message_type, parse_printable, ItchError, Price};
use crate::header::MessageHeader;
use crate::utils::{read_u32, read_u64};

/// Execution at the order's price (31 bytes)
///
/// | Field           | Offset | Size | Type  |
/// |-----------------|--------|------|-------|
/// | Header          | 0      | 11   |       |
/// | Reference       | 11     | 8    | `u64` |
/// | Executed Shares | 19     | 4    | `u32` |
/// | Match Number    | 23     | 8    | `u64` |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderExecuted {
    pub header: MessageHeader,
    pub reference: u64,
    pub executed_shares: u32,
    pub match_number: u64,
}

impl OrderExecuted {
    pub fn new(timestamp: u64, reference: u64, executed_shares: u32, match_number: u64) -> Self {
        Self {
            header: MessageHeader::new(message_type::ORDER_EXECUTED, timestamp),
            reference,
            executed_shares,
            match_number,
        }
    }

    pub fn pack(&self) -> [u8; message_sizes::ORDER_EXECUTED] {
        let mut out = [0u8; message_sizes::ORDER_EXECUTED];
        self.header.pack_into(&mut out);
        out[11..19].copy_from_slice(&self.reference.to_be_bytes());
        out[19..23].copy_from_slice(&self.executed_shares.to_be_bytes());
        out[23..31].copy_from_slice(&self.match_number.to_be_bytes());
        out
    }

    pub fn unpack(bytes: &[u8]) -> Result<Self, ItchError> {
        check_body(bytes, message_type::ORDER_EXECUTED, message_sizes::ORDER_EXECUTED)?;
        Ok(Self {
            header: MessageHeader::unpack(bytes)?,
            reference: read_u64(bytes, 11),
            executed_shares: read_u32(bytes, 19),
            match_number: read_u64(bytes, 23),
        })
    }

    pub fn timestamp(&self) -> u64 {
        self.header.timestamp
    }
}

/// Execution at an explicit price (36 bytes)
///
/// | Field           | Offset | Size | Type    |
/// |-----------------|--------|------|---------|
/// | Header          | 0      | 11   |         |
/// | Reference       | 11     | 8    | `u64`   |
/// | Executed Shares | 19     | 4    | `u32`   |
/// | Match Number    | 23     | 8    | `u64`   |
/// | Printable       | 31     | 1    | 'Y'/'N' |
/// | Execution Price | 32     | 4    | `Price` |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderExecutedWithPrice {
    pub header: MessageHeader,
    pub reference: u64,
    pub executed_shares: u32,
    pub match_number: u64,
    pub printable: bool,
    pub execution_price: Price,
}

impl OrderExecutedWithPrice {
    pub fn new(
        timestamp: u64,
        reference: u64,
        executed_shares: u32,
        match_number: u64,
        printable: bool,
        execution_price: Price,
    ) -> Self {
        Self {
            header: MessageHeader::new(message_type::ORDER_EXECUTED_WITH_PRICE, timestamp),
            reference,
            executed_shares,
            match_number,
            printable,
            execution_price,
        }
    }

    pub fn pack(&self) -> [u8; message_sizes::ORDER_EXECUTED_WITH_PRICE] {
        let mut out = [0u8; message_sizes::ORDER_EXECUTED_WITH_PRICE];
        self.header.pack_into(&mut out);
        out[11..19].copy_from_slice(&self.reference.to_be_bytes());
        out[19..23].copy_from_slice(&self.executed_shares.to_be_bytes());
        out[23..31].copy_from_slice(&self.match_number.to_be_bytes());
        out[31] = if self.printable { b'Y' } else { b'N' };
        out[32..36].copy_from_slice(&self.execution_price.raw().to_be_bytes());
        out
    }

    pub fn unpack(bytes: &[u8]) -> Result<Self, ItchError> {
        check_body(
            bytes,
            message_type::ORDER_EXECUTED_WITH_PRICE,
            message_sizes::ORDER_EXECUTED_WITH_PRICE,
        )?;
        Ok(Self {
            header: MessageHeader::unpack(bytes)?,
            reference: read_u64(bytes, 11),
            executed_shares: read_u32(bytes, 19),
            match_number: read_u64(bytes, 23),
            printable: parse_printable(bytes[31])?,
            execution_price: Price(read_u32(bytes, 32)),
        })
    }

    pub fn timestamp(&self) -> u64 {
        self.header.timestamp
    }
}
