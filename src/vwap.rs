//! Hourly VWAP accumulation
//!
//! The accumulator keeps one [`VwapTally`] per stock for the active window.
//! Before each execution is folded the window tracker is advanced to the
//! execution's timestamp; every bucket that closes on the way is flushed into
//! [`VwapRow`]s and the tallies start over.

use crate::common::{ItchError, Price, PRICE_SCALE};
use crate::ticker::Ticker;
use crate::window::{WindowBucket, WindowTracker};
use log::{debug, info, warn};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Running notional and volume of one stock in one window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VwapTally {
    /// Σ(shares × scaled price)
    pub notional: u128,
    /// Σ(shares)
    pub volume: u64,
}

impl VwapTally {
    pub fn add(&mut self, shares: u32, price: Price) {
        self.notional += shares as u128 * price.raw() as u128;
        self.volume += shares as u64;
    }

    pub fn remove(&mut self, shares: u32, price: Price) {
        self.notional = self.notional.saturating_sub(shares as u128 * price.raw() as u128);
        self.volume = self.volume.saturating_sub(shares as u64);
    }

    /// VWAP in price units, or `None` without volume.
    pub fn vwap(&self) -> Option<f64> {
        if self.volume == 0 {
            return None;
        }
        Some(self.notional as f64 / self.volume as f64 / PRICE_SCALE as f64)
    }
}

/// One output row: the VWAP of a stock over one trading hour
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VwapRow {
    /// Bucket index, 0 for the first hour after the open.
    pub hour: u32,
    pub stock: Ticker,
    pub vwap: f64,
    pub volume: u64,
    pub window_start: u64,
    pub window_end: u64,
}

/// An execution resolved to its stock and price, ready to fold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionRecord {
    pub timestamp: u64,
    /// Order reference, 0 for trades against non-displayed orders.
    pub reference: u64,
    pub stock: Ticker,
    pub shares: u32,
    pub price: Price,
    pub match_number: u64,
    pub printable: bool,
}

/// A folded execution, remembered for the active window only.
#[derive(Debug, Clone, Copy)]
struct LedgerEntry {
    stock: Ticker,
    shares: u32,
    price: Price,
    printable: bool,
}

/// Execution counters of an accumulator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FoldStats {
    pub folded: u64,
    pub non_printable: u64,
    pub after_close: u64,
    pub duplicates: u64,
    pub broken: u64,
}

/// Per-window VWAP engine
#[derive(Debug, Default)]
pub struct VwapAccumulator {
    tallies: BTreeMap<Ticker, VwapTally>,
    ledger: HashMap<u64, LedgerEntry>,
    rows: Vec<VwapRow>,
    stats: FoldStats,
}

impl VwapAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one execution into the active window.
    ///
    /// Advances `tracker` to `timestamp` first and flushes the buckets that
    /// close. Non-printable executions move the window but are not tallied;
    /// executions after the market close are counted and dropped.
    ///
    /// # Returns
    /// `NoTradingWindow` if the market has not opened yet.
    pub fn fold(
        &mut self,
        tracker: &mut WindowTracker,
        execution: &ExecutionRecord,
    ) -> Result<(), ItchError> {
        let ExecutionRecord {
            timestamp,
            stock,
            shares,
            price,
            match_number,
            printable,
            ..
        } = *execution;

        for bucket in tracker.advance_to(timestamp)? {
            self.flush_bucket(&bucket);
        }

        if tracker.is_after_close(timestamp) {
            debug!("Dropping {} execution {} after the close", stock, match_number);
            self.stats.after_close += 1;
            return Ok(());
        }

        if self.ledger.contains_key(&match_number) {
            warn!("Duplicate match number {} for {}, not folded", match_number, stock);
            self.stats.duplicates += 1;
            return Ok(());
        }
        self.ledger.insert(
            match_number,
            LedgerEntry {
                stock,
                shares,
                price,
                printable,
            },
        );

        if !printable {
            self.stats.non_printable += 1;
            return Ok(());
        }

        self.tallies.entry(stock).or_default().add(shares, price);
        self.stats.folded += 1;
        Ok(())
    }

    /// Back a broken execution out of the active window.
    ///
    /// # Returns
    /// `true` if the match was found in the active window.
    pub fn break_trade(&mut self, match_number: u64) -> bool {
        let entry = match self.ledger.remove(&match_number) {
            Some(entry) => entry,
            None => {
                warn!(
                    "Broken trade {} is not in the active window, already reported",
                    match_number
                );
                return false;
            }
        };

        self.stats.broken += 1;
        if entry.printable {
            if let Some(tally) = self.tallies.get_mut(&entry.stock) {
                tally.remove(entry.shares, entry.price);
                if tally.volume == 0 {
                    self.tallies.remove(&entry.stock);
                }
            }
        }
        true
    }

    /// Finalize the tallies of a closed bucket and reset them.
    ///
    /// Emits one row per stock with volume, sorted by stock. A bucket without
    /// executions emits nothing.
    pub fn flush_bucket(&mut self, bucket: &WindowBucket) {
        let tallies = core::mem::take(&mut self.tallies);
        self.ledger.clear();

        let before = self.rows.len();
        for (stock, tally) in tallies {
            if let Some(vwap) = tally.vwap() {
                self.rows.push(VwapRow {
                    hour: bucket.index,
                    stock,
                    vwap,
                    volume: tally.volume,
                    window_start: bucket.start,
                    window_end: bucket.end,
                });
            }
        }
        info!(
            "VWAP for {} calculated: {} stock(s)",
            bucket,
            self.rows.len() - before
        );
    }

    /// Close and flush the final bucket at the end of the feed.
    pub fn finalize_all(&mut self, tracker: &mut WindowTracker) {
        if let Some(bucket) = tracker.close_active() {
            self.flush_bucket(&bucket);
        }
    }

    /// Tally of a stock in the active window.
    pub fn tally(&self, stock: &Ticker) -> Option<&VwapTally> {
        self.tallies.get(stock)
    }

    /// Rows flushed so far.
    pub fn rows(&self) -> &[VwapRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<VwapRow> {
        self.rows
    }

    pub fn stats(&self) -> FoldStats {
        self.stats
    }
}
