//! Stock symbol handling
//!
//! ITCH carries symbols as 8-byte, right space-padded ASCII fields. [`Ticker`]
//! keeps the raw field so it can be used as a cheap, ordered map key, and trims
//! the padding only for display and serialization.

use crate::common::{message_sizes, ItchError};
use serde::{Serialize, Serializer};

/// Fixed-width, space-padded stock symbol (8 bytes)
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticker([u8; message_sizes::STOCK]);

impl Ticker {
    /// Create a ticker from a symbol of 1 to 8 printable ASCII characters.
    ///
    /// # Arguments
    /// * `symbol` - Symbol without padding, e.g. `"AAPL"`
    ///
    /// # Returns
    /// The padded ticker, or `InvalidFieldValue` if the symbol is empty, too long
    /// or not printable ASCII.
    pub fn new(symbol: &str) -> Result<Self, ItchError> {
        let bytes = symbol.as_bytes();
        if bytes.is_empty() || bytes.len() > message_sizes::STOCK {
            return Err(ItchError::InvalidFieldValue(format!(
                "symbol must be 1-{} characters, got {:?}",
                message_sizes::STOCK,
                symbol
            )));
        }
        let mut raw = [b' '; message_sizes::STOCK];
        raw[..bytes.len()].copy_from_slice(bytes);
        Self::from_bytes(raw)
    }

    /// Interpret a raw 8-byte stock field.
    pub fn from_bytes(raw: [u8; message_sizes::STOCK]) -> Result<Self, ItchError> {
        if !raw.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
            return Err(ItchError::InvalidFieldValue(format!(
                "stock field is not printable ASCII: {:?}",
                raw
            )));
        }
        Ok(Self(raw))
    }

    /// Read the stock field at `offset` of a message body.
    pub(crate) fn read(bytes: &[u8], offset: usize) -> Result<Self, ItchError> {
        let mut raw = [0u8; message_sizes::STOCK];
        raw.copy_from_slice(&bytes[offset..offset + message_sizes::STOCK]);
        Self::from_bytes(raw)
    }

    /// The raw, padded field as carried on the wire.
    pub fn as_bytes(&self) -> &[u8; message_sizes::STOCK] {
        &self.0
    }

    /// The symbol with trailing padding removed.
    pub fn as_str(&self) -> &str {
        // Validated as ASCII on construction.
        core::str::from_utf8(&self.0)
            .unwrap_or_default()
            .trim_end_matches(' ')
    }
}

impl core::fmt::Display for Ticker {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::fmt::Debug for Ticker {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Ticker({:?})", self.as_str())
    }
}

impl core::str::FromStr for Ticker {
    type Err = ItchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ticker::new(s)
    }
}

impl Serialize for Ticker {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
