//! Common types, enums, and constants used across ITCH 5.0 messages
//!
//! This module defines the foundational types that are shared between different
//! message types, ensuring consistency and type safety for the decoder and the
//! aggregation engine built on top of it.

use thiserror::Error;

// =============================================================================
// MESSAGE TYPE CONSTANTS
// =============================================================================

/// ITCH 5.0 message type codes (ASCII)
pub mod message_type {
    /// System Event ('S')
    pub const SYSTEM_EVENT: u8 = b'S';
    /// Stock Directory ('R')
    pub const STOCK_DIRECTORY: u8 = b'R';
    /// Stock Trading Action ('H')
    pub const STOCK_TRADING_ACTION: u8 = b'H';
    /// Reg SHO Short Sale Price Test ('Y')
    pub const REG_SHO: u8 = b'Y';
    /// Market Participant Position ('L')
    pub const MARKET_PARTICIPANT_POSITION: u8 = b'L';
    /// MWCB Decline Level ('V')
    pub const MWCB_DECLINE_LEVEL: u8 = b'V';
    /// MWCB Status ('W')
    pub const MWCB_STATUS: u8 = b'W';
    /// IPO Quoting Period Update ('K')
    pub const IPO_QUOTING_PERIOD: u8 = b'K';
    /// LULD Auction Collar ('J')
    pub const LULD_AUCTION_COLLAR: u8 = b'J';
    /// Operational Halt ('h')
    pub const OPERATIONAL_HALT: u8 = b'h';
    /// Add Order, no MPID attribution ('A')
    pub const ADD_ORDER: u8 = b'A';
    /// Add Order with MPID attribution ('F')
    pub const ADD_ORDER_MPID: u8 = b'F';
    /// Order Executed ('E')
    pub const ORDER_EXECUTED: u8 = b'E';
    /// Order Executed with Price ('C')
    pub const ORDER_EXECUTED_WITH_PRICE: u8 = b'C';
    /// Order Cancel ('X')
    pub const ORDER_CANCEL: u8 = b'X';
    /// Order Delete ('D')
    pub const ORDER_DELETE: u8 = b'D';
    /// Order Replace ('U')
    pub const ORDER_REPLACE: u8 = b'U';
    /// Trade, non-cross ('P')
    pub const TRADE: u8 = b'P';
    /// Cross Trade ('Q')
    pub const CROSS_TRADE: u8 = b'Q';
    /// Broken Trade ('B')
    pub const BROKEN_TRADE: u8 = b'B';
    /// Net Order Imbalance Indicator ('I')
    pub const NOII: u8 = b'I';
    /// Retail Price Improvement Indicator ('N')
    pub const RPII: u8 = b'N';
}

/// Message size constants in bytes.
///
/// Sizes count the type tag but not the 2-byte length prefix, so they match the
/// length prefix of a well-formed record.
pub mod message_sizes {
    /// Length prefix preceding every record
    pub const LENGTH_PREFIX: usize = 2;
    /// Common header: tag, stock locate, tracking number, timestamp
    pub const HEADER: usize = 11;
    /// Fixed-width stock symbol
    pub const STOCK: usize = 8;
    pub const SYSTEM_EVENT: usize = 12;
    pub const STOCK_DIRECTORY: usize = 39;
    pub const STOCK_TRADING_ACTION: usize = 25;
    pub const REG_SHO: usize = 20;
    pub const MARKET_PARTICIPANT_POSITION: usize = 26;
    pub const MWCB_DECLINE_LEVEL: usize = 35;
    pub const MWCB_STATUS: usize = 12;
    pub const IPO_QUOTING_PERIOD: usize = 28;
    pub const LULD_AUCTION_COLLAR: usize = 35;
    pub const OPERATIONAL_HALT: usize = 21;
    pub const ADD_ORDER: usize = 36;
    pub const ADD_ORDER_MPID: usize = 40;
    pub const ORDER_EXECUTED: usize = 31;
    pub const ORDER_EXECUTED_WITH_PRICE: usize = 36;
    pub const ORDER_CANCEL: usize = 23;
    pub const ORDER_DELETE: usize = 19;
    pub const ORDER_REPLACE: usize = 35;
    pub const TRADE: usize = 44;
    pub const CROSS_TRADE: usize = 40;
    pub const BROKEN_TRADE: usize = 19;
    pub const NOII: usize = 50;
    pub const RPII: usize = 20;
}

/// Fixed-point scale of ITCH 4-byte prices (four implied decimal places)
pub const PRICE_SCALE: u32 = 10_000;

// =============================================================================
// TRADING ENUMS
// =============================================================================

/// Buy/sell indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Side {
    /// Buy order ('B')
    Buy = b'B',
    /// Sell order ('S')
    Sell = b'S',
}

impl Default for Side {
    fn default() -> Self {
        Side::Buy
    }
}

impl TryFrom<u8> for Side {
    type Error = ItchError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            b'B' => Ok(Side::Buy),
            b'S' => Ok(Side::Sell),
            other => Err(ItchError::InvalidFieldValue(format!(
                "side must be 'B' or 'S', got {:#04X}",
                other
            ))),
        }
    }
}

/// System event codes carried by 'S' messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EventCode {
    /// First message of the day ('O')
    StartOfMessages = b'O',
    /// System hours begin ('S')
    StartOfSystemHours = b'S',
    /// Market hours begin, regular trading opens ('Q')
    StartOfMarketHours = b'Q',
    /// Market hours end, regular trading closes ('M')
    EndOfMarketHours = b'M',
    /// System hours end ('E')
    EndOfSystemHours = b'E',
    /// Last message of the day ('C')
    EndOfMessages = b'C',
}

impl EventCode {
    pub fn as_char(&self) -> char {
        *self as u8 as char
    }
}

impl TryFrom<u8> for EventCode {
    type Error = ItchError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            b'O' => Ok(EventCode::StartOfMessages),
            b'S' => Ok(EventCode::StartOfSystemHours),
            b'Q' => Ok(EventCode::StartOfMarketHours),
            b'M' => Ok(EventCode::EndOfMarketHours),
            b'E' => Ok(EventCode::EndOfSystemHours),
            b'C' => Ok(EventCode::EndOfMessages),
            other => Err(ItchError::InvalidFieldValue(format!(
                "unknown system event code {:#04X}",
                other
            ))),
        }
    }
}

/// Fixed-point ITCH price (4 decimal places)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(pub u32);

impl Price {
    /// Price in currency units.
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / PRICE_SCALE as f64
    }

    /// Raw scaled integer as carried on the wire.
    pub fn raw(&self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{:04}", self.0 / PRICE_SCALE, self.0 % PRICE_SCALE)
    }
}

// =============================================================================
// ERROR HANDLING
// =============================================================================

/// Error type for decoding and aggregation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ItchError {
    /// A record could not be framed or interpreted. Terminal for the pass.
    #[error("Malformed record at byte offset {offset}: {reason}")]
    MalformedRecord {
        /// Offset of the record's length prefix.
        offset: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// An execution refers to an order that was never added.
    #[error("Unresolved order reference {reference}")]
    UnresolvedReference {
        /// The order reference number that could not be resolved.
        reference: u64,
    },

    /// An execution arrived before the market opened.
    #[error("No trading window open for execution at timestamp {timestamp}")]
    NoTradingWindow {
        /// Execution timestamp, nanoseconds since midnight.
        timestamp: u64,
    },

    /// A buffer is too small for the message being unpacked.
    #[error("Buffer too small: expected {expected}, got {actual}")]
    BufferTooSmall {
        /// The expected size of the buffer.
        expected: usize,
        /// The actual size of the buffer.
        actual: usize,
    },

    /// Unpacking was asked for a tag the message does not carry.
    #[error("Invalid message type: {0:#04X}")]
    InvalidMessageType(u8),

    /// A field holds a value outside its defined domain.
    #[error("Invalid field value: {0}")]
    InvalidFieldValue(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

// =============================================================================
// UTILITY FUNCTIONS
// =============================================================================

/// Expected size of a record with the given tag, if the tag is an ITCH 5.0 message.
pub fn message_size(msg_type: u8) -> Option<usize> {
    use message_type::*;
    let size = match msg_type {
        SYSTEM_EVENT => message_sizes::SYSTEM_EVENT,
        STOCK_DIRECTORY => message_sizes::STOCK_DIRECTORY,
        STOCK_TRADING_ACTION => message_sizes::STOCK_TRADING_ACTION,
        REG_SHO => message_sizes::REG_SHO,
        MARKET_PARTICIPANT_POSITION => message_sizes::MARKET_PARTICIPANT_POSITION,
        MWCB_DECLINE_LEVEL => message_sizes::MWCB_DECLINE_LEVEL,
        MWCB_STATUS => message_sizes::MWCB_STATUS,
        IPO_QUOTING_PERIOD => message_sizes::IPO_QUOTING_PERIOD,
        LULD_AUCTION_COLLAR => message_sizes::LULD_AUCTION_COLLAR,
        OPERATIONAL_HALT => message_sizes::OPERATIONAL_HALT,
        ADD_ORDER => message_sizes::ADD_ORDER,
        ADD_ORDER_MPID => message_sizes::ADD_ORDER_MPID,
        ORDER_EXECUTED => message_sizes::ORDER_EXECUTED,
        ORDER_EXECUTED_WITH_PRICE => message_sizes::ORDER_EXECUTED_WITH_PRICE,
        ORDER_CANCEL => message_sizes::ORDER_CANCEL,
        ORDER_DELETE => message_sizes::ORDER_DELETE,
        ORDER_REPLACE => message_sizes::ORDER_REPLACE,
        TRADE => message_sizes::TRADE,
        CROSS_TRADE => message_sizes::CROSS_TRADE,
        BROKEN_TRADE => message_sizes::BROKEN_TRADE,
        NOII => message_sizes::NOII,
        RPII => message_sizes::RPII,
        _ => return None,
    };
    Some(size)
}

/// Human-readable name of a message type, for diagnostics.
pub fn message_type_name(msg_type: u8) -> Option<&'static str> {
    use message_type::*;
    let name = match msg_type {
        SYSTEM_EVENT => "System Event",
        STOCK_DIRECTORY => "Stock Directory",
        STOCK_TRADING_ACTION => "Stock Trading Action",
        REG_SHO => "Reg SHO Restriction",
        MARKET_PARTICIPANT_POSITION => "Market Participant Position",
        MWCB_DECLINE_LEVEL => "MWCB Decline Level",
        MWCB_STATUS => "MWCB Status",
        IPO_QUOTING_PERIOD => "IPO Quoting Period Update",
        LULD_AUCTION_COLLAR => "LULD Auction Collar",
        OPERATIONAL_HALT => "Operational Halt",
        ADD_ORDER => "Add Order",
        ADD_ORDER_MPID => "Add Order with MPID",
        ORDER_EXECUTED => "Order Executed",
        ORDER_EXECUTED_WITH_PRICE => "Order Executed with Price",
        ORDER_CANCEL => "Order Cancel",
        ORDER_DELETE => "Order Delete",
        ORDER_REPLACE => "Order Replace",
        TRADE => "Trade",
        CROSS_TRADE => "Cross Trade",
        BROKEN_TRADE => "Broken Trade",
        NOII => "NOII",
        RPII => "RPII",
        _ => return None,
    };
    Some(name)
}

/// Check that `bytes` is at least `expected` long and starts with `tag`.
pub(crate) fn check_body(bytes: &[u8], tag: u8, expected: usize) -> Result<(), ItchError> {
    if bytes.len() < expected {
        return Err(ItchError::BufferTooSmall {
            expected,
            actual: bytes.len(),
        });
    }
    if bytes[0] != tag {
        return Err(ItchError::InvalidMessageType(bytes[0]));
    }
    Ok(())
}

/// Parse the printable flag of an execution ('Y' or 'N').
pub fn parse_printable(byte: u8) -> Result<bool, ItchError> {
    match byte {
        b'Y' => Ok(true),
        b'N' => Ok(false),
        other => Err(ItchError::InvalidFieldValue(format!(
            "printable must be 'Y' or 'N', got {:#04X}",
            other
        ))),
    }
}
