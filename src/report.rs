//! CSV report writer
//!
//! Two layouts are supported. The long layout writes one line per row. The wide
//! layout pivots rows into one line per stock with a `VWAP<n>` column per
//! trading hour, leaving a cell empty when the stock did not trade that hour.

use crate::utils::format_timestamp;
use crate::vwap::VwapRow;
use csv::Writer;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Report errors
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// CSV layout of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportLayout {
    /// `hour,stock,vwap,volume,window_start,window_end`
    #[default]
    Long,
    /// `stock,VWAP1,...,VWAPn`
    Wide,
}

#[derive(Debug, Serialize)]
struct LongRecord<'a> {
    hour: u32,
    stock: &'a str,
    vwap: f64,
    volume: u64,
    window_start: String,
    window_end: String,
}

/// Write rows to `writer` in the given layout.
pub fn write_report<W: io::Write>(
    writer: W,
    rows: &[VwapRow],
    layout: ReportLayout,
) -> Result<(), ReportError> {
    let mut csv = Writer::from_writer(writer);
    match layout {
        ReportLayout::Long => write_long(&mut csv, rows)?,
        ReportLayout::Wide => write_wide(&mut csv, rows)?,
    }
    csv.flush()?;
    Ok(())
}

/// Write rows to a file, replacing it if it exists.
pub fn write_report_file<P: AsRef<Path>>(
    path: P,
    rows: &[VwapRow],
    layout: ReportLayout,
) -> Result<(), ReportError> {
    let file = std::fs::File::create(path)?;
    write_report(io::BufWriter::new(file), rows, layout)
}

fn write_long<W: io::Write>(csv: &mut Writer<W>, rows: &[VwapRow]) -> Result<(), ReportError> {
    if rows.is_empty() {
        csv.write_record([
            "hour",
            "stock",
            "vwap",
            "volume",
            "window_start",
            "window_end",
        ])?;
        return Ok(());
    }
    for row in rows {
        csv.serialize(LongRecord {
            hour: row.hour,
            stock: row.stock.as_str(),
            vwap: row.vwap,
            volume: row.volume,
            window_start: format_timestamp(row.window_start),
            window_end: format_timestamp(row.window_end),
        })?;
    }
    Ok(())
}

fn write_wide<W: io::Write>(csv: &mut Writer<W>, rows: &[VwapRow]) -> Result<(), ReportError> {
    let hours = rows.iter().map(|row| row.hour as usize + 1).max().unwrap_or(0);

    let mut header = Vec::with_capacity(hours + 1);
    header.push("stock".to_string());
    header.extend((1..=hours).map(|hour| format!("VWAP{}", hour)));
    csv.write_record(&header)?;

    let mut by_stock: BTreeMap<&str, Vec<Option<f64>>> = BTreeMap::new();
    for row in rows {
        let cells = by_stock
            .entry(row.stock.as_str())
            .or_insert_with(|| vec![None; hours]);
        cells[row.hour as usize] = Some(row.vwap);
    }

    for (stock, cells) in by_stock {
        let mut record = Vec::with_capacity(hours + 1);
        record.push(stock.to_string());
        record.extend(
            cells
                .into_iter()
                .map(|cell| cell.map(|vwap| vwap.to_string()).unwrap_or_default()),
        );
        csv.write_record(&record)?;
    }
    Ok(())
}
