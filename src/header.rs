//! ITCH 5.0 common message header
//!
//! Every ITCH message starts with the same 11 bytes: the type tag, the stock
//! locate code, the tracking number and a 48-bit timestamp. This module
//! implements that prefix; the message modules append their own fields.

use crate::common::{message_sizes, message_size, ItchError};
use crate::utils::{read_u16, read_u48, timestamp_to_u48};

/// Common ITCH message header (11 bytes)
///
/// | Field           | Offset | Size | Type  | Description                         |
/// |-----------------|--------|------|-------|-------------------------------------|
/// | Message Type    | 0      | 1    | `u8`  | ASCII message type                  |
/// | Stock Locate    | 1      | 2    | `u16` | Locate code, 0 for market-wide      |
/// | Tracking Number | 3      | 2    | `u16` | Nasdaq internal tracking number     |
/// | Timestamp       | 5      | 6    | `u48` | Nanoseconds since midnight          |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MessageHeader {
    /// u8: ASCII message type
    pub message_type: u8,
    /// u16: stock locate code
    pub stock_locate: u16,
    /// u16: tracking number
    pub tracking_number: u16,
    /// u48: nanoseconds since midnight
    pub timestamp: u64,
}

impl MessageHeader {
    /// Create a header with zero locate and tracking numbers.
    ///
    /// # Arguments
    /// * `message_type` - ASCII character for the message type
    /// * `timestamp` - Nanoseconds since midnight (truncated to 48 bits on packing)
    pub fn new(message_type: u8, timestamp: u64) -> Self {
        Self {
            message_type,
            stock_locate: 0,
            tracking_number: 0,
            timestamp,
        }
    }

    /// Create a header, rejecting message types that are not part of ITCH 5.0.
    pub fn new_validated(message_type: u8, timestamp: u64) -> Result<Self, ItchError> {
        if message_size(message_type).is_none() {
            return Err(ItchError::InvalidMessageType(message_type));
        }
        Ok(Self::new(message_type, timestamp))
    }

    /// Set the stock locate code.
    pub fn with_locate(mut self, stock_locate: u16) -> Self {
        self.stock_locate = stock_locate;
        self
    }

    /// Write the header into the first 11 bytes of `out`.
    ///
    /// # Panics
    /// Panics if `out` is shorter than the header.
    pub fn pack_into(&self, out: &mut [u8]) {
        out[0] = self.message_type;
        out[1..3].copy_from_slice(&self.stock_locate.to_be_bytes());
        out[3..5].copy_from_slice(&self.tracking_number.to_be_bytes());
        out[5..11].copy_from_slice(&timestamp_to_u48(self.timestamp));
    }

    /// Pack the header on its own.
    pub fn pack(&self) -> [u8; message_sizes::HEADER] {
        let mut out = [0u8; message_sizes::HEADER];
        self.pack_into(&mut out);
        out
    }

    /// Unpack the header from the start of a message body.
    ///
    /// # Arguments
    /// * `bytes` - Message body, starting at the type tag
    ///
    /// # Returns
    /// The header, or `BufferTooSmall` if fewer than 11 bytes are available
    pub fn unpack(bytes: &[u8]) -> Result<Self, ItchError> {
        if bytes.len() < message_sizes::HEADER {
            return Err(ItchError::BufferTooSmall {
                expected: message_sizes::HEADER,
                actual: bytes.len(),
            });
        }

        Ok(Self {
            message_type: bytes[0],
            stock_locate: read_u16(bytes, 1),
            tracking_number: read_u16(bytes, 3),
            timestamp: read_u48(bytes, 5),
        })
    }

    /// Get message type as character
    pub fn message_type_char(&self) -> char {
        self.message_type as char
    }
}

// =============================================================================
// DISPLAY IMPLEMENTATIONS
// =============================================================================

impl core::fmt::Display for MessageHeader {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "MessageHeader {{ type: '{}', locate: {}, tracking: {}, timestamp: {} }}",
            self.message_type_char(),
            self.stock_locate,
            self.tracking_number,
            self.timestamp
        )
    }
}
