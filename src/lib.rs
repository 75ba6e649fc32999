//! Nasdaq TotalView-ITCH 5.0 decoding and hourly VWAP
//!
//! Decodes a recorded ITCH 5.0 feed message by message and derives, for every
//! stock, the volume-weighted average price of each trading hour between the
//! market open and close.
//!
//! # Features
//! - `cli`: (Default) Builds the `itch_vwap` binary and its logger.
//!
//! # Quick Start
//!
//! ```rust
//! use itch_vwap::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let open = 9 * NANOS_PER_HOUR + 30 * 60 * 1_000_000_000;
//! let aapl = Ticker::new("AAPL")?;
//!
//! let feed = pack_records(&[
//!     SystemEvent::new(open, EventCode::StartOfMarketHours).into(),
//!     AddOrder::new(open + 60_000_000_000, 1, Side::Buy, 100, aapl, Price(1_500_000)).into(),
//!     OrderExecutedWithPrice::new(open + 900_000_000_000, 1, 50, 1, true, Price(1_505_000)).into(),
//! ]);
//!
//! let rows = hourly_vwap(&feed)?;
//! assert_eq!(rows.len(), 1);
//! assert_eq!(rows[0].hour, 0);
//! assert_eq!(rows[0].vwap, 150.5);
//! # Ok(())
//! # }
//! ```

#![warn(missing_debug_implementations)]
#![allow(clippy::all)]

// =============================================================================
// MODULE DECLARATIONS
// =============================================================================

/// Add Order messages ('A', 'F')
pub mod add_order;
/// Common types, enums, and constants used across all message types
pub mod common;
/// Pass configuration and environment overrides
pub mod config;
/// Record framing and message decoding
pub mod decoder;
/// Order Executed messages ('E', 'C')
pub mod execution;
/// Common 11-byte message header
pub mod header;
/// Order Delete and Order Replace messages ('D', 'U')
pub mod order;
/// Message dispatch over one feed
pub mod pipeline;
/// CSV report writer
pub mod report;
/// Order reference resolution
pub mod resolver;
/// System Event messages ('S')
pub mod system_event;
/// Fixed-width stock symbols
pub mod ticker;
/// Trade and Broken Trade messages ('P', 'B')
pub mod trade;
/// Big-endian helpers and timestamp formatting
pub mod utils;
/// Hourly VWAP accumulation
pub mod vwap;
/// Trading-hour window tracking
pub mod window;

// Re-export public API
pub use crate::add_order::*;
pub use crate::common::*;
pub use crate::config::*;
pub use crate::decoder::*;
pub use crate::execution::*;
pub use crate::header::*;
pub use crate::order::*;
pub use crate::pipeline::*;
pub use crate::report::{write_report, write_report_file, ReportError, ReportLayout};
pub use crate::resolver::*;
pub use crate::system_event::*;
pub use crate::ticker::*;
pub use crate::trade::*;
pub use crate::utils::{format_timestamp, NANOS_PER_HOUR};
pub use crate::vwap::*;
pub use crate::window::*;

// =============================================================================
// LIBRARY VERSION AND METADATA
// =============================================================================

/// ITCH protocol version decoded by this crate
pub const ITCH_VERSION: &str = "5.0";

/// Library version
pub const LIB_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build information
pub const BUILD_INFO: &str = concat!(
    "itch-vwap v", env!("CARGO_PKG_VERSION"),
    " (TotalView-ITCH 5.0)"
);

// =============================================================================
// CONVENIENCE FUNCTIONS
// =============================================================================

/// Calculate the framed size of a record with the given tag
///
/// # Arguments
/// * `msg_type` - ASCII message type code
///
/// # Returns
/// Length prefix plus body size, or `InvalidMessageType` for an unknown tag
///
/// # Example
/// ```rust
/// use itch_vwap::*;
///
/// let size = calculate_record_size(message_type::ADD_ORDER).unwrap();
/// assert_eq!(size, 2 + 36);
/// ```
pub fn calculate_record_size(msg_type: u8) -> Result<usize, ItchError> {
    message_size(msg_type)
        .map(|size| message_sizes::LENGTH_PREFIX + size)
        .ok_or(ItchError::InvalidMessageType(msg_type))
}

/// Walk a whole buffer and check that every record frames and decodes
///
/// # Returns
/// Decoder counters, or the first decode error
///
/// # Example
/// ```rust
/// use itch_vwap::*;
///
/// let feed = pack_records(&[SystemEvent::new(0, EventCode::StartOfMessages).into()]);
/// let stats = validate_feed(&feed).unwrap();
/// assert_eq!(stats.messages, 1);
/// assert_eq!(stats.bytes, 14);
/// ```
pub fn validate_feed(bytes: &[u8]) -> Result<DecodeStats, ItchError> {
    let mut decoder = Decoder::new(bytes);
    for message in decoder.by_ref() {
        message?;
    }
    Ok(decoder.stats())
}

/// Run one pass with the default configuration and return the rows.
pub fn hourly_vwap(bytes: &[u8]) -> Result<Vec<VwapRow>, PassError> {
    VwapPass::new(PassConfig::default())
        .run(bytes)
        .map(|output| output.rows)
}
