//! The processing pass
//!
//! [`VwapPass`] owns the resolver, window tracker and accumulator for one walk
//! over a feed and routes every decoded message to them. It runs to completion
//! or stops at the first terminal error; nothing is shared between passes.

use crate::common::{EventCode, ItchError};
use crate::config::{PassConfig, PreMarketPolicy, UnresolvedPolicy};
use crate::decoder::{Decoder, Message};
use crate::resolver::{OrderRecord, ReferenceResolver};
use crate::utils::format_timestamp;
use crate::vwap::{ExecutionRecord, VwapAccumulator, VwapRow};
use crate::window::WindowTracker;
use log::{debug, info, warn};
use thiserror::Error;

/// Whether the pass keeps reading after a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// Counters for one pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PassStats {
    pub messages: u64,
    pub skipped_records: u64,
    pub bytes: usize,
    pub orders: u64,
    pub executions: u64,
    pub folded: u64,
    pub non_printable: u64,
    pub out_of_order: u64,
    pub unresolved_skipped: u64,
    pub pre_market_skipped: u64,
    pub after_close: u64,
    pub duplicates: u64,
    pub broken_trades: u64,
    pub evicted: u64,
}

/// Result of a completed pass
#[derive(Debug, Clone, PartialEq)]
pub struct PassOutput {
    pub rows: Vec<VwapRow>,
    pub stats: PassStats,
}

/// A terminal failure, with the rows flushed before it
#[derive(Error, Debug, Clone, PartialEq)]
#[error("pass halted at message {message_index} (byte offset {byte_offset}): {source}")]
pub struct PassError {
    pub source: ItchError,
    /// 0-based index of the decoded message that failed, or of the next one
    /// for decode errors.
    pub message_index: u64,
    pub byte_offset: usize,
    /// Rows of buckets closed before the failure; the open bucket is dropped.
    pub flushed: Vec<VwapRow>,
}

/// One pass over an ITCH feed
#[derive(Debug)]
pub struct VwapPass {
    config: PassConfig,
    resolver: ReferenceResolver,
    tracker: WindowTracker,
    accumulator: VwapAccumulator,
    stats: PassStats,
    last_timestamp: Option<u64>,
}

impl VwapPass {
    pub fn new(config: PassConfig) -> Self {
        let tracker = WindowTracker::new(config.window_nanos);
        Self {
            config,
            resolver: ReferenceResolver::new(),
            tracker,
            accumulator: VwapAccumulator::new(),
            stats: PassStats::default(),
            last_timestamp: None,
        }
    }

    /// Decode `bytes` and compute hourly VWAPs.
    ///
    /// # Returns
    /// All rows in bucket order, or the first terminal error together with the
    /// rows flushed before it.
    pub fn run(mut self, bytes: &[u8]) -> Result<PassOutput, PassError> {
        self.config.validate().map_err(|err| self.halt(err, 0))?;

        let mut decoder = Decoder::new(bytes);
        while let Some(next) = decoder.next() {
            let message = match next {
                Ok(message) => message,
                Err(err) => {
                    let offset = match &err {
                        ItchError::MalformedRecord { offset, .. } => *offset,
                        _ => decoder.bytes_consumed(),
                    };
                    return Err(self.halt(err, offset));
                }
            };
            match self.dispatch(&message) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Stop) => break,
                Err(err) => return Err(self.halt(err, decoder.record_offset())),
            }
        }

        let decoded = decoder.stats();
        self.stats.skipped_records = decoded.skipped;
        self.stats.bytes = decoded.bytes;
        Ok(self.finish())
    }

    /// Route one message to the component that consumes it.
    pub fn dispatch(&mut self, message: &Message) -> Result<Flow, ItchError> {
        self.stats.messages += 1;
        self.check_order(message.timestamp());

        match message {
            Message::SystemEvent(event) => {
                for bucket in self.tracker.on_system_event(event) {
                    self.accumulator.flush_bucket(&bucket);
                }
                if event.event_code == EventCode::EndOfMarketHours && self.config.stop_at_close {
                    return Ok(Flow::Stop);
                }
            }
            Message::AddOrder(order) => {
                self.stats.orders += 1;
                self.resolver.record_order(OrderRecord::from(order));
            }
            Message::OrderReplace(replace) => {
                match self.resolver.replace(replace) {
                    Ok(_) => self.stats.orders += 1,
                    Err(err) => return self.unresolved(err).map(|_| Flow::Continue),
                }
                if self.config.evict_closed_orders {
                    self.evict(replace.original_reference);
                }
            }
            Message::OrderDelete(delete) => {
                if self.config.evict_closed_orders {
                    self.evict(delete.reference);
                }
            }
            Message::OrderExecuted(exec) => {
                let (stock, price) = match self.resolver.resolve(exec.reference) {
                    Ok(resolved) => resolved,
                    Err(err) => return self.unresolved(err).map(|_| Flow::Continue),
                };
                self.fold(ExecutionRecord {
                    timestamp: exec.timestamp(),
                    reference: exec.reference,
                    stock,
                    shares: exec.executed_shares,
                    price,
                    match_number: exec.match_number,
                    printable: true,
                })?;
            }
            Message::OrderExecutedWithPrice(exec) => {
                // Resolved even when non-printable so a dangling reference is still caught.
                let (stock, _) = match self.resolver.resolve(exec.reference) {
                    Ok(resolved) => resolved,
                    Err(err) => return self.unresolved(err).map(|_| Flow::Continue),
                };
                self.fold(ExecutionRecord {
                    timestamp: exec.timestamp(),
                    reference: exec.reference,
                    stock,
                    shares: exec.executed_shares,
                    price: exec.execution_price,
                    match_number: exec.match_number,
                    printable: exec.printable,
                })?;
            }
            Message::Trade(trade) => {
                self.fold(ExecutionRecord {
                    timestamp: trade.timestamp(),
                    reference: trade.reference,
                    stock: trade.stock,
                    shares: trade.shares,
                    price: trade.price,
                    match_number: trade.match_number,
                    printable: true,
                })?;
            }
            Message::BrokenTrade(broken) => {
                if self.accumulator.break_trade(broken.match_number) {
                    debug!("Backed out broken trade {}", broken.match_number);
                }
            }
        }
        Ok(Flow::Continue)
    }

    /// Flush the final bucket and hand back the rows.
    pub fn finish(mut self) -> PassOutput {
        self.accumulator.finalize_all(&mut self.tracker);
        let fold = self.accumulator.stats();
        self.stats.folded = fold.folded;
        self.stats.non_printable = fold.non_printable;
        self.stats.after_close = fold.after_close;
        self.stats.duplicates = fold.duplicates;
        self.stats.broken_trades = fold.broken;

        info!(
            "Pass complete: {} messages, {} executions, {} rows",
            self.stats.messages,
            self.stats.executions,
            self.accumulator.rows().len()
        );
        PassOutput {
            rows: self.accumulator.into_rows(),
            stats: self.stats,
        }
    }

    pub fn resolver(&self) -> &ReferenceResolver {
        &self.resolver
    }

    pub fn tracker(&self) -> &WindowTracker {
        &self.tracker
    }

    pub fn accumulator(&self) -> &VwapAccumulator {
        &self.accumulator
    }

    pub fn stats(&self) -> &PassStats {
        &self.stats
    }

    fn fold(&mut self, execution: ExecutionRecord) -> Result<(), ItchError> {
        self.stats.executions += 1;
        match self.accumulator.fold(&mut self.tracker, &execution) {
            Err(ItchError::NoTradingWindow { timestamp })
                if self.config.pre_market == PreMarketPolicy::Skip =>
            {
                debug!(
                    "Skipping {} execution {} before the open at {}",
                    execution.stock,
                    execution.match_number,
                    format_timestamp(timestamp)
                );
                self.stats.pre_market_skipped += 1;
                Ok(())
            }
            other => other,
        }
    }

    fn unresolved(&mut self, err: ItchError) -> Result<(), ItchError> {
        match self.config.unresolved {
            UnresolvedPolicy::Fail => Err(err),
            UnresolvedPolicy::Skip => {
                warn!("{}, skipped", err);
                self.stats.unresolved_skipped += 1;
                Ok(())
            }
        }
    }

    fn evict(&mut self, reference: u64) {
        if self.resolver.evict(reference).is_some() {
            self.stats.evicted += 1;
        }
    }

    fn check_order(&mut self, timestamp: u64) {
        if let Some(last) = self.last_timestamp {
            if timestamp < last {
                warn!(
                    "Out-of-order timestamp {} after {}",
                    format_timestamp(timestamp),
                    format_timestamp(last)
                );
                self.stats.out_of_order += 1;
            }
        }
        self.last_timestamp = Some(timestamp);
    }

    fn halt(&self, source: ItchError, byte_offset: usize) -> PassError {
        // Decode errors fail before the message is counted, dispatch errors after.
        let message_index = match &source {
            ItchError::MalformedRecord { .. } => self.stats.messages,
            _ => self.stats.messages.saturating_sub(1),
        };
        PassError {
            source,
            message_index,
            byte_offset,
            flushed: self.accumulator.rows().to_vec(),
        }
    }
}
