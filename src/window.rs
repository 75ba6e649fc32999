//! Trading-hour window tracking
//!
//! Buckets are laid over regular market hours: bucket 0 covers the first hour
//! after the start-of-market-hours event, each following bucket starts where the
//! previous one ended, and the bucket holding the end-of-market-hours event is
//! cut short at the close. Bounds are `(start, end]`.

use crate::common::{EventCode, ItchError};
use crate::system_event::SystemEvent;
use crate::utils::{format_timestamp, NANOS_PER_HOUR};
use log::{debug, info, warn};

/// One trading-hour window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowBucket {
    /// 0 for the first hour after the open.
    pub index: u32,
    /// Exclusive lower bound, nanoseconds since midnight.
    pub start: u64,
    /// Inclusive upper bound, nanoseconds since midnight.
    pub end: u64,
    /// Set on the bucket that ends at the market close.
    pub closing: bool,
}

impl WindowBucket {
    /// True if `timestamp` falls in `(start, end]`.
    pub fn contains(&self, timestamp: u64) -> bool {
        timestamp > self.start && timestamp <= self.end
    }

    pub fn duration(&self) -> u64 {
        self.end - self.start
    }
}

impl core::fmt::Display for WindowBucket {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "hour {} ({}, {}]",
            self.index,
            format_timestamp(self.start),
            format_timestamp(self.end)
        )
    }
}

/// Derives bucket boundaries from system events and detects rollover
#[derive(Debug)]
pub struct WindowTracker {
    window_nanos: u64,
    trading_start: Option<u64>,
    market_close: Option<u64>,
    active: Option<WindowBucket>,
}

impl Default for WindowTracker {
    fn default() -> Self {
        Self::new(NANOS_PER_HOUR)
    }
}

impl WindowTracker {
    /// Create a tracker with windows of `window_nanos` nanoseconds.
    pub fn new(window_nanos: u64) -> Self {
        Self {
            window_nanos: window_nanos.max(1),
            trading_start: None,
            market_close: None,
            active: None,
        }
    }

    /// Consume a system event.
    ///
    /// # Returns
    /// Buckets closed by the event, in order. Only the market close can close
    /// buckets: every full hour before the close timestamp is closed and the
    /// bucket containing the close becomes the closing bucket.
    pub fn on_system_event(&mut self, event: &SystemEvent) -> Vec<WindowBucket> {
        let timestamp = event.timestamp();
        match event.event_code {
            EventCode::StartOfMarketHours => {
                self.open(timestamp);
                Vec::new()
            }
            EventCode::EndOfMarketHours => self.close(timestamp),
            other => {
                debug!("System event '{}' at {}", other.as_char(), format_timestamp(timestamp));
                Vec::new()
            }
        }
    }

    fn open(&mut self, timestamp: u64) {
        if self.trading_start.is_some() {
            warn!(
                "Ignoring repeated start of market hours at {}",
                format_timestamp(timestamp)
            );
            return;
        }
        info!("Trading starts at {}", format_timestamp(timestamp));
        self.trading_start = Some(timestamp);
        self.active = Some(WindowBucket {
            index: 0,
            start: timestamp,
            end: timestamp.saturating_add(self.window_nanos),
            closing: false,
        });
    }

    fn close(&mut self, timestamp: u64) -> Vec<WindowBucket> {
        if self.market_close.is_some() {
            warn!(
                "Ignoring repeated end of market hours at {}",
                format_timestamp(timestamp)
            );
            return Vec::new();
        }
        info!("Trading ends at {}", format_timestamp(timestamp));
        self.market_close = Some(timestamp);

        let closed = match self.advance_to(timestamp) {
            Ok(closed) => closed,
            Err(_) => {
                warn!("Market closed without a start of market hours");
                return Vec::new();
            }
        };
        if let Some(active) = self.active.as_mut() {
            // A close stamped at or before the bucket start leaves the bounds as they are.
            if timestamp > active.start {
                active.end = timestamp;
            }
            active.closing = true;
        }
        closed
    }

    /// Roll the active bucket forward until it holds `timestamp`.
    ///
    /// Timestamps at or before the active bucket's end belong to it, including
    /// out-of-order ones; buckets are never revisited. The closing bucket never
    /// rolls over.
    ///
    /// # Returns
    /// The buckets closed on the way, oldest first, or `NoTradingWindow` before
    /// the market has opened.
    pub fn advance_to(&mut self, timestamp: u64) -> Result<Vec<WindowBucket>, ItchError> {
        let window_nanos = self.window_nanos;
        let active = self
            .active
            .as_mut()
            .ok_or(ItchError::NoTradingWindow { timestamp })?;

        let mut closed = Vec::new();
        while timestamp > active.end && !active.closing {
            closed.push(*active);
            let start = active.end;
            *active = WindowBucket {
                index: active.index + 1,
                start,
                end: start.saturating_add(window_nanos),
                closing: false,
            };
        }
        Ok(closed)
    }

    /// True once the close is known and `timestamp` lies beyond it.
    pub fn is_after_close(&self, timestamp: u64) -> bool {
        matches!(self.market_close, Some(close) if timestamp > close)
    }

    /// Take the active bucket for final flushing. The tracker holds no
    /// bucket afterwards.
    pub fn close_active(&mut self) -> Option<WindowBucket> {
        self.active.take()
    }

    pub fn active(&self) -> Option<&WindowBucket> {
        self.active.as_ref()
    }

    pub fn trading_start(&self) -> Option<u64> {
        self.trading_start
    }

    pub fn market_close(&self) -> Option<u64> {
        self.market_close
    }

    pub fn window_nanos(&self) -> u64 {
        self.window_nanos
    }
}
