//! ITCH Trade message implementation
//!
//! Trade messages (`P`) report executions against non-displayed orders. They
//! name their own stock and price, so they need no order lookup. Broken Trade
//! messages (`B`) void an earlier execution by match number.

use crate::common::{check_body, message_sizes, message_type, ItchError, Price, Side};
use crate::header::MessageHeader;
use crate::ticker::Ticker;
use crate::utils::{read_u32, read_u64};

/// Non-cross trade (44 bytes)
///
/// | Field        | Offset | Size | Type     | Description                   |
/// |--------------|--------|------|----------|-------------------------------|
/// | Header       | 0      | 11   |          | Tag 'P'                       |
/// | Reference    | 11     | 8    | `u64`    | Always 0 on the live feed     |
/// | Side         | 19     | 1    | `Side`   | Side of the non-displayed order |
/// | Shares       | 20     | 4    | `u32`    | Executed shares               |
/// | Stock        | 24     | 8    | `Ticker` | Space-padded symbol           |
/// | Price        | 32     | 4    | `Price`  | Execution price               |
/// | Match Number | 36     | 8    | `u64`    | Unique execution identifier   |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trade {
    pub header: MessageHeader,
    pub reference: u64,
    pub side: Side,
    pub shares: u32,
    pub stock: Ticker,
    pub price: Price,
    pub match_number: u64,
}

impl Trade {
    pub fn new(
        timestamp: u64,
        side: Side,
        shares: u32,
        stock: Ticker,
        price: Price,
        match_number: u64,
    ) -> Self {
        Self {
            header: MessageHeader::new(message_type::TRADE, timestamp),
            reference: 0,
            side,
            shares,
            stock,
            price,
            match_number,
        }
    }

    /// Pack Trade into its 44-byte wire layout.
    pub fn pack(&self) -> [u8; message_sizes::TRADE] {
        let mut out = [0u8; message_sizes::TRADE];
        self.header.pack_into(&mut out);
        out[11..19].copy_from_slice(&self.reference.to_be_bytes());
        out[19] = self.side as u8;
        out[20..24].copy_from_slice(&self.shares.to_be_bytes());
        out[24..32].copy_from_slice(self.stock.as_bytes());
        out[32..36].copy_from_slice(&self.price.raw().to_be_bytes());
        out[36..44].copy_from_slice(&self.match_number.to_be_bytes());
        out
    }

    /// Unpack Trade from a message body.
    pub fn unpack(bytes: &[u8]) -> Result<Self, ItchError> {
        check_body(bytes, message_type::TRADE, message_sizes::TRADE)?;
        Ok(Self {
            header: MessageHeader::unpack(bytes)?,
            reference: read_u64(bytes, 11),
            side: Side::try_from(bytes[19])?,
            shares: read_u32(bytes, 20),
            stock: Ticker::read(bytes, 24)?,
            price: Price(read_u32(bytes, 32)),
            match_number: read_u64(bytes, 36),
        })
    }

    pub fn timestamp(&self) -> u64 {
        self.header.timestamp
    }
}

/// Broken trade (19 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrokenTrade {
    pub header: MessageHeader,
    pub match_number: u64,
}

impl BrokenTrade {
    pub fn new(timestamp: u64, match_number: u64) -> Self {
        Self {
            header: MessageHeader::new(message_type::BROKEN_TRADE, timestamp),
            match_number,
        }
    }

    pub fn pack(&self) -> [u8; message_sizes::BROKEN_TRADE] {
        let mut out = [0u8; message_sizes::BROKEN_TRADE];
        self.header.pack_into(&mut out);
        out[11..19].copy_from_slice(&self.match_number.to_be_bytes());
        out
    }

    pub fn unpack(bytes: &[u8]) -> Result<Self, ItchError> {
        check_body(bytes, message_type::BROKEN_TRADE, message_sizes::BROKEN_TRADE)?;
        Ok(Self {
            header: MessageHeader::unpack(bytes)?,
            match_number: read_u64(bytes, 11),
        })
    }

    pub fn timestamp(&self) -> u64 {
        self.header.timestamp
    }
}

// =============================================================================
// DISPLAY IMPLEMENTATIONS
// =============================================================================

impl core::fmt::Display for Trade {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Trade {{ stock: {}, price: {}, shares: {}, match: {}, side: {:?} }}",
            self.stock, self.price, self.shares, self.match_number, self.side
        )
    }
}
