//! Integration tests for the CSV report writer.

#![allow(clippy::all)]
use itch_vwap::*;

#[cfg(test)]
mod tests {
    use super::*;

    const OPEN: u64 = 34_200_000_000_000;
    const HOUR: u64 = NANOS_PER_HOUR;

    fn row(hour: u32, symbol: &str, vwap: f64, volume: u64) -> VwapRow {
        VwapRow {
            hour,
            stock: Ticker::new(symbol).unwrap(),
            vwap,
            volume,
            window_start: OPEN + hour as u64 * HOUR,
            window_end: OPEN + (hour as u64 + 1) * HOUR,
        }
    }

    fn render(rows: &[VwapRow], layout: ReportLayout) -> String {
        let mut out = Vec::new();
        write_report(&mut out, rows, layout).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_long_layout() {
        let rows = [row(0, "AAPL", 150.5, 50), row(0, "MSFT", 330.25, 10)];
        let csv = render(&rows, ReportLayout::Long);

        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "hour,stock,vwap,volume,window_start,window_end");
        assert_eq!(lines[1], "0,AAPL,150.5,50,09:30:00.000000000,10:30:00.000000000");
        assert_eq!(lines[2], "0,MSFT,330.25,10,09:30:00.000000000,10:30:00.000000000");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_long_layout_empty() {
        let csv = render(&[], ReportLayout::default());
        assert_eq!(csv, "hour,stock,vwap,volume,window_start,window_end\n");
    }

    #[test]
    fn test_wide_layout() {
        let rows = [
            row(0, "MSFT", 330.25, 10),
            row(1, "AAPL", 150.5, 50),
            row(2, "MSFT", 331.5, 10),
        ];
        let csv = render(&rows, ReportLayout::Wide);

        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines, vec!["stock,VWAP1,VWAP2,VWAP3", "AAPL,,150.5,", "MSFT,330.25,,331.5"]);
    }

    #[test]
    fn test_wide_layout_empty() {
        assert_eq!(render(&[], ReportLayout::Wide), "stock\n");
    }

    #[test]
    fn test_write_report_file() {
        let path = std::env::temp_dir().join(format!("itch_vwap_report_{}.csv", std::process::id()));
        write_report_file(&path, &[row(0, "AAPL", 150.5, 50)], ReportLayout::Long).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(contents.contains("0,AAPL,150.5,50"));
    }

    #[test]
    fn test_write_report_file_bad_path() {
        let result = write_report_file(
            "/nonexistent-dir/report.csv",
            &[row(0, "AAPL", 150.5, 50)],
            ReportLayout::Long,
        );
        assert!(matches!(result, Err(ReportError::Io(_))));
    }
}
