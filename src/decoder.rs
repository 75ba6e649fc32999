//! Record framing and message decoding
//!
//! An ITCH file is a flat sequence of records, each a 2-byte big-endian length
//! followed by that many bytes of message body. [`Decoder`] walks a byte buffer
//! record by record and yields a typed [`Message`] for every tag the VWAP
//! engine consumes. Other tags are skipped over by their declared length.
//!
//! The decoder borrows the buffer and never copies it; `reset` rewinds it to the
//! first record so the same buffer can be decoded again.

use crate::add_order::AddOrder;
use crate::common::{message_sizes, message_type, message_type_name, ItchError};
use crate::execution::{OrderExecuted, OrderExecutedWithPrice};
use crate::header::MessageHeader;
use crate::order::{OrderDelete, OrderReplace};
use crate::system_event::SystemEvent;
use crate::trade::{BrokenTrade, Trade};
use crate::utils::{frame_record, read_u16};
use log::trace;

// =============================================================================
// MESSAGES
// =============================================================================

/// A decoded ITCH message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    SystemEvent(SystemEvent),
    AddOrder(AddOrder),
    OrderExecuted(OrderExecuted),
    OrderExecutedWithPrice(OrderExecutedWithPrice),
    OrderDelete(OrderDelete),
    OrderReplace(OrderReplace),
    Trade(Trade),
    BrokenTrade(BrokenTrade),
}

impl Message {
    /// Decode a message body (starting at the type tag).
    ///
    /// # Returns
    /// `Ok(None)` for tags the engine does not consume, `Ok(Some(_))` for a
    /// decoded message, or an error if a consumed tag's body is malformed.
    pub fn unpack(body: &[u8]) -> Result<Option<Self>, ItchError> {
        let tag = match body.first() {
            Some(tag) => *tag,
            None => {
                return Err(ItchError::BufferTooSmall {
                    expected: 1,
                    actual: 0,
                })
            }
        };

        let message = match tag {
            message_type::SYSTEM_EVENT => Message::SystemEvent(SystemEvent::unpack(body)?),
            message_type::ADD_ORDER | message_type::ADD_ORDER_MPID => {
                Message::AddOrder(AddOrder::unpack(body)?)
            }
            message_type::ORDER_EXECUTED => Message::OrderExecuted(OrderExecuted::unpack(body)?),
            message_type::ORDER_EXECUTED_WITH_PRICE => {
                Message::OrderExecutedWithPrice(OrderExecutedWithPrice::unpack(body)?)
            }
            message_type::ORDER_DELETE => Message::OrderDelete(OrderDelete::unpack(body)?),
            message_type::ORDER_REPLACE => Message::OrderReplace(OrderReplace::unpack(body)?),
            message_type::TRADE => Message::Trade(Trade::unpack(body)?),
            message_type::BROKEN_TRADE => Message::BrokenTrade(BrokenTrade::unpack(body)?),
            _ => return Ok(None),
        };
        Ok(Some(message))
    }

    /// Pack the message body in wire layout.
    pub fn pack(&self) -> Vec<u8> {
        match self {
            Message::SystemEvent(m) => m.pack().to_vec(),
            Message::AddOrder(m) => m.pack(),
            Message::OrderExecuted(m) => m.pack().to_vec(),
            Message::OrderExecutedWithPrice(m) => m.pack().to_vec(),
            Message::OrderDelete(m) => m.pack().to_vec(),
            Message::OrderReplace(m) => m.pack().to_vec(),
            Message::Trade(m) => m.pack().to_vec(),
            Message::BrokenTrade(m) => m.pack().to_vec(),
        }
    }

    /// Pack the message as a length-prefixed record.
    pub fn to_record(&self) -> Vec<u8> {
        frame_record(&self.pack())
    }

    pub fn header(&self) -> &MessageHeader {
        match self {
            Message::SystemEvent(m) => &m.header,
            Message::AddOrder(m) => &m.header,
            Message::OrderExecuted(m) => &m.header,
            Message::OrderExecutedWithPrice(m) => &m.header,
            Message::OrderDelete(m) => &m.header,
            Message::OrderReplace(m) => &m.header,
            Message::Trade(m) => &m.header,
            Message::BrokenTrade(m) => &m.header,
        }
    }

    pub fn timestamp(&self) -> u64 {
        self.header().timestamp
    }

    pub fn message_type(&self) -> u8 {
        self.header().message_type
    }
}

macro_rules! impl_from_message {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Message {
                fn from(message: $variant) -> Self {
                    Message::$variant(message)
                }
            }
        )*
    };
}

impl_from_message!(
    SystemEvent,
    AddOrder,
    OrderExecuted,
    OrderExecutedWithPrice,
    OrderDelete,
    OrderReplace,
    Trade,
    BrokenTrade
);

// =============================================================================
// RAW RECORDS
// =============================================================================

/// An undecoded record: its position, declared length, tag and body bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawRecord<'a> {
    /// Byte offset of the record's length prefix.
    pub offset: usize,
    /// Declared body length.
    pub length: u16,
    /// Message type tag (first body byte).
    pub tag: u8,
    /// Body bytes, starting at the tag.
    pub body: &'a [u8],
}

// =============================================================================
// DECODER
// =============================================================================

/// Diagnostic counters of a decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeStats {
    /// Messages decoded into a [`Message`].
    pub messages: u64,
    /// Records skipped because their tag is not consumed.
    pub skipped: u64,
    /// Bytes consumed, including length prefixes.
    pub bytes: usize,
}

/// Lazy, restartable decoder over an ITCH byte buffer
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    buf: &'a [u8],
    offset: usize,
    record_offset: usize,
    stats: DecodeStats,
    failed: bool,
}

impl<'a> Decoder<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            offset: 0,
            record_offset: 0,
            stats: DecodeStats::default(),
            failed: false,
        }
    }

    /// Rewind to the first record and clear the counters.
    pub fn reset(&mut self) {
        self.offset = 0;
        self.record_offset = 0;
        self.stats = DecodeStats::default();
        self.failed = false;
    }

    /// Frame the next record without interpreting its body.
    ///
    /// # Returns
    /// `None` at the end of the buffer, or `MalformedRecord` if the remaining
    /// bytes cannot hold the length prefix or the declared body.
    pub fn next_raw(&mut self) -> Option<Result<RawRecord<'a>, ItchError>> {
        if self.failed || self.offset >= self.buf.len() {
            return None;
        }

        let offset = self.offset;
        let remaining = self.buf.len() - offset;
        if remaining < message_sizes::LENGTH_PREFIX {
            return Some(Err(self.fail(offset, format!(
                "{} trailing byte(s) cannot hold a length prefix",
                remaining
            ))));
        }

        let length = read_u16(self.buf, offset);
        if length == 0 {
            return Some(Err(self.fail(offset, "zero-length record".to_string())));
        }

        let available = remaining - message_sizes::LENGTH_PREFIX;
        if available < length as usize {
            return Some(Err(self.fail(offset, format!(
                "declared length {} exceeds {} remaining byte(s)",
                length, available
            ))));
        }

        let start = offset + message_sizes::LENGTH_PREFIX;
        let body = &self.buf[start..start + length as usize];
        self.record_offset = offset;
        self.offset = start + length as usize;
        self.stats.bytes = self.offset;

        Some(Ok(RawRecord {
            offset,
            length,
            tag: body[0],
            body,
        }))
    }

    /// Offset of the length prefix of the most recently framed record.
    pub fn record_offset(&self) -> usize {
        self.record_offset
    }

    /// Messages decoded so far.
    pub fn messages_decoded(&self) -> u64 {
        self.stats.messages
    }

    /// Bytes consumed so far.
    pub fn bytes_consumed(&self) -> usize {
        self.stats.bytes
    }

    pub fn stats(&self) -> DecodeStats {
        self.stats
    }

    fn fail(&mut self, offset: usize, reason: String) -> ItchError {
        self.failed = true;
        ItchError::MalformedRecord { offset, reason }
    }
}

impl<'a> Iterator for Decoder<'a> {
    type Item = Result<Message, ItchError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let raw = match self.next_raw()? {
                Ok(raw) => raw,
                Err(err) => return Some(Err(err)),
            };

            match Message::unpack(raw.body) {
                Ok(Some(message)) => {
                    self.stats.messages += 1;
                    return Some(Ok(message));
                }
                Ok(None) => {
                    self.stats.skipped += 1;
                    trace!(
                        "Skipping {} record '{}' ({} bytes) at offset {}",
                        message_type_name(raw.tag).unwrap_or("unknown"),
                        raw.tag as char,
                        raw.length,
                        raw.offset
                    );
                }
                Err(err) => return Some(Err(self.fail(raw.offset, err.to_string()))),
            }
        }
    }
}

impl core::iter::FusedIterator for Decoder<'_> {}

// =============================================================================
// BATCH OPERATIONS
// =============================================================================

/// Pack multiple messages into a single feed buffer.
pub fn pack_records(messages: &[Message]) -> Vec<u8> {
    let mut buffer = Vec::new();
    for message in messages {
        buffer.extend_from_slice(&message.to_record());
    }
    buffer
}

/// Decode every message of a buffer, stopping at the first error.
pub fn unpack_records(bytes: &[u8]) -> Result<Vec<Message>, ItchError> {
    Decoder::new(bytes).collect()
}
