//! ITCH System Event message implementation
//!
//! System Event messages (`S`) signal market- or data-feed-wide events such as
//! the start and end of regular market hours. They define the trading window
//! the VWAP buckets are laid over.

use crate::common::{check_body, message_sizes, message_type, EventCode, ItchError};
use crate::header::MessageHeader;

/// System event (12 bytes)
///
/// | Field      | Offset | Size | Type        |
/// |------------|--------|------|-------------|
/// | Header     | 0      | 11   | header      |
/// | Event Code | 11     | 1    | `EventCode` |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemEvent {
    pub header: MessageHeader,
    pub event_code: EventCode,
}

impl SystemEvent {
    pub fn new(timestamp: u64, event_code: EventCode) -> Self {
        Self {
            header: MessageHeader::new(message_type::SYSTEM_EVENT, timestamp),
            event_code,
        }
    }

    /// Pack into the 12-byte wire layout.
    pub fn pack(&self) -> [u8; message_sizes::SYSTEM_EVENT] {
        let mut out = [0u8; message_sizes::SYSTEM_EVENT];
        self.header.pack_into(&mut out);
        out[11] = self.event_code as u8;
        out
    }

    /// Unpack from a message body starting at the type tag.
    pub fn unpack(bytes: &[u8]) -> Result<Self, ItchError> {
        check_body(bytes, message_type::SYSTEM_EVENT, message_sizes::SYSTEM_EVENT)?;
        Ok(Self {
            header: MessageHeader::unpack(bytes)?,
            event_code: EventCode::try_from(bytes[11])?,
        })
    }

    pub fn timestamp(&self) -> u64 {
        self.header.timestamp
    }

    /// True for the start-of-market-hours event.
    pub fn is_market_open(&self) -> bool {
        self.event_code == EventCode::StartOfMarketHours
    }

    /// True for the end-of-market-hours event.
    pub fn is_market_close(&self) -> bool {
        self.event_code == EventCode::EndOfMarketHours
    }
}

impl core::fmt::Display for SystemEvent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "SystemEvent {{ code: '{}', timestamp: {} }}",
            self.event_code.as_char(),
            self.header.timestamp
        )
    }
}
