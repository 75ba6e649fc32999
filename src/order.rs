//! ITCH order modification messages
//!
//! Order Delete (`D`) and Order Replace (`U`) move an order off the book or
//! swap it for a new reference. The resolver uses them to keep the
//! reference-to-security map current.

use crate::common::{check_body, message_sizes, message_type, ItchError, Price};
use crate::header::MessageHeader;
use crate::utils::{read_u32, read_u64};

/// Order removed from the book (19 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderDelete {
    pub header: MessageHeader,
    pub reference: u64,
}

impl OrderDelete {
    pub fn new(timestamp: u64, reference: u64) -> Self {
        Self {
            header: MessageHeader::new(message_type::ORDER_DELETE, timestamp),
            reference,
        }
    }

    pub fn pack(&self) -> [u8; message_sizes::ORDER_DELETE] {
        let mut out = [0u8; message_sizes::ORDER_DELETE];
        self.header.pack_into(&mut out);
        out[11..19].copy_from_slice(&self.reference.to_be_bytes());
        out
    }

    pub fn unpack(bytes: &[u8]) -> Result<Self, ItchError> {
        check_body(bytes, message_type::ORDER_DELETE, message_sizes::ORDER_DELETE)?;
        Ok(Self {
            header: MessageHeader::unpack(bytes)?,
            reference: read_u64(bytes, 11),
        })
    }

    pub fn timestamp(&self) -> u64 {
        self.header.timestamp
    }
}

/// Order cancel-replace (35 bytes)
///
/// | Field              | Offset | Size | Type    |
/// |--------------------|--------|------|---------|
/// | Header             | 0      | 11   |         |
/// | Original Reference | 11     | 8    | `u64`   |
/// | New Reference      | 19     | 8    | `u64`   |
/// | Shares             | 27     | 4    | `u32`   |
/// | Price              | 31     | 4    | `Price` |
///
/// The replacement keeps the original order's side and stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderReplace {
    pub header: MessageHeader,
    pub original_reference: u64,
    pub new_reference: u64,
    pub shares: u32,
    pub price: Price,
}

impl OrderReplace {
    pub fn new(
        timestamp: u64,
        original_reference: u64,
        new_reference: u64,
        shares: u32,
        price: Price,
    ) -> Self {
        Self {
            header: MessageHeader::new(message_type::ORDER_REPLACE, timestamp),
            original_reference,
            new_reference,
            shares,
            price,
        }
    }

    pub fn pack(&self) -> [u8; message_sizes::ORDER_REPLACE] {
        let mut out = [0u8; message_sizes::ORDER_REPLACE];
        self.header.pack_into(&mut out);
        out[11..19].copy_from_slice(&self.original_reference.to_be_bytes());
        out[19..27].copy_from_slice(&self.new_reference.to_be_bytes());
        out[27..31].copy_from_slice(&self.shares.to_be_bytes());
        out[31..35].copy_from_slice(&self.price.raw().to_be_bytes());
        out
    }

    pub fn unpack(bytes: &[u8]) -> Result<Self, ItchError> {
        check_body(bytes, message_type::ORDER_REPLACE, message_sizes::ORDER_REPLACE)?;
        Ok(Self {
            header: MessageHeader::unpack(bytes)?,
            original_reference: read_u64(bytes, 11),
            new_reference: read_u64(bytes, 19),
            shares: read_u32(bytes, 27),
            price: Price(read_u32(bytes, 31)),
        })
    }

    pub fn timestamp(&self) -> u64 {
        self.header.timestamp
    }
}
