//! Hourly VWAP report for an ITCH 5.0 file
//!
//! Usage: `itch_vwap <input> [output] [--wide]`
//!
//! The output defaults to `<input>.csv`. Pass options come from the
//! `ITCH_VWAP_*` environment variables and logging from `RUST_LOG`.

use itch_vwap::{write_report_file, PassConfig, ReportLayout, VwapPass, BUILD_INFO};
use log::{error, info};
use std::process::ExitCode;

fn parse_args() -> Result<(String, String, ReportLayout), String> {
    let mut layout = ReportLayout::Long;
    let mut positional = Vec::new();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--wide" => layout = ReportLayout::Wide,
            "--long" => layout = ReportLayout::Long,
            flag if flag.starts_with("--") => return Err(format!("unknown option {}", flag)),
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let input = positional
        .next()
        .ok_or_else(|| "usage: itch_vwap <input> [output] [--wide]".to_string())?;
    let output = positional
        .next()
        .unwrap_or_else(|| format!("{}.csv", input));
    Ok((input, output, layout))
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (input, output, layout) = parse_args()?;
    let config = PassConfig::from_env()?;
    info!("{}", BUILD_INFO);
    info!("Reading {}", input);

    let bytes = std::fs::read(&input)?;
    let result = VwapPass::new(config).run(&bytes)?;
    info!(
        "{} messages decoded, {} records skipped, {} out-of-order timestamps",
        result.stats.messages, result.stats.skipped_records, result.stats.out_of_order
    );

    write_report_file(&output, &result.rows, layout)?;
    info!("The results were stored in {}", output);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
