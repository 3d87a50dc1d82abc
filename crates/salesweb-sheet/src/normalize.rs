//! Row normalization: turn raw rows into `Transaction`s

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::SheetError;
use crate::header::locate_header;
use crate::types::{Cell, ColumnMap, Extraction, HeaderLabels, Row, Transaction};

/// Leading numeric literal, the part a lenient float parser would consume
static NUMERIC_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)").expect("valid regex")
});

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Locate the header and normalize every row below it
pub fn extract(rows: &[Row], labels: &HeaderLabels) -> Result<Extraction, SheetError> {
    let columns = locate_header(rows, labels)?;
    let body = &rows[columns.header_index + 1..];

    let transactions: Vec<Transaction> = body
        .iter()
        .filter_map(|row| normalize_row(row, &columns))
        .collect();
    let dropped_rows = body.len() - transactions.len();

    log::debug!(
        "Header at row {}, {} transactions, {} rows dropped",
        columns.header_index + 1,
        transactions.len(),
        dropped_rows
    );

    Ok(Extraction {
        transactions,
        header_row: columns.header_index + 1,
        dropped_rows,
    })
}

/// Normalize one data row; `None` when date, time or amount is unusable
pub fn normalize_row(row: &Row, columns: &ColumnMap) -> Option<Transaction> {
    let cell = |index: usize| row.get(index).unwrap_or(&Cell::Empty);

    let date = match cell(columns.date) {
        Cell::Text(s) => s.trim().to_string(),
        _ => String::new(),
    };

    let time = match cell(columns.time) {
        Cell::Number(v) => fractional_day_to_time(*v),
        Cell::Text(s) => s.trim().to_string(),
        _ => String::new(),
    };

    let amount = match cell(columns.amount) {
        Cell::Number(v) => *v,
        Cell::Text(s) => parse_amount_text(s),
        Cell::Empty => f64::NAN,
        Cell::Bool(_) => 0.0,
    };

    if date.is_empty() || time.is_empty() || amount.is_nan() {
        return None;
    }

    Some(Transaction { date, time, amount })
}

/// Convert a spreadsheet fractional-day value to `HH:MM:SS`
///
/// Only the fractional part is used, so a full date-time serial yields its
/// time of day. Rounding up to 60 seconds carries into the minutes.
pub fn fractional_day_to_time(value: f64) -> String {
    let fraction = value.rem_euclid(1.0);
    let total_minutes = fraction * 24.0 * 60.0;
    let hours = (total_minutes / 60.0).floor() as i64;
    let minutes = (total_minutes % 60.0).floor() as i64;
    let seconds = ((total_minutes * 60.0) % 60.0).round() as i64;

    let total = (hours * 3600 + minutes * 60 + seconds).rem_euclid(SECONDS_PER_DAY);
    format!("{:02}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
}

/// Parse an amount written as text, e.g. `"1,234.5"`
///
/// Commas are group separators and are removed. Parsing then takes the
/// longest numeric prefix, so `"1000 VND"` is `1000`; text without one is NaN.
pub fn parse_amount_text(text: &str) -> f64 {
    let cleaned = text.replace(',', "");
    NUMERIC_PREFIX
        .find(cleaned.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels() -> HeaderLabels {
        HeaderLabels::new("Date", "Time", "Amount")
    }

    fn header() -> Row {
        vec!["Date".into(), "Time".into(), "Amount".into()]
    }

    #[test]
    fn test_fractional_day_noon() {
        assert_eq!(fractional_day_to_time(0.5), "12:00:00");
        assert_eq!(fractional_day_to_time(0.0), "00:00:00");
        assert_eq!(fractional_day_to_time(0.75), "18:00:00");
    }

    #[test]
    fn test_fractional_day_matches_formula() {
        // 08:30:15 = 30615 seconds
        let value = 30615.0 / 86400.0;
        assert_eq!(fractional_day_to_time(value), "08:30:15");

        for step in 0..1000 {
            let t = step as f64 / 1000.0;
            let total_minutes = t * 24.0 * 60.0;
            let h = (total_minutes / 60.0).floor() as i64;
            let m = (total_minutes % 60.0).floor() as i64;
            let s = ((total_minutes * 60.0) % 60.0).round() as i64;
            if s < 60 {
                assert_eq!(fractional_day_to_time(t), format!("{:02}:{:02}:{:02}", h, m, s));
            }
        }
    }

    #[test]
    fn test_fractional_day_seconds_carry() {
        // Just below 12:01:00; seconds round up to 60
        let value = (12.0 * 3600.0 + 59.6) / 86400.0;
        assert_eq!(fractional_day_to_time(value), "12:01:00");
        // Just below midnight wraps to the start of the day
        assert_eq!(fractional_day_to_time(0.999_999_9), "00:00:00");
    }

    #[test]
    fn test_fractional_day_uses_time_part_of_serial() {
        // 2024-01-01 12:00 as an Excel serial
        assert_eq!(fractional_day_to_time(45292.5), "12:00:00");
    }

    #[test]
    fn test_parse_amount_text() {
        assert_eq!(parse_amount_text("1,234.5"), 1234.5);
        assert_eq!(parse_amount_text("1,000"), 1000.0);
        assert_eq!(parse_amount_text("  250 "), 250.0);
        assert_eq!(parse_amount_text("1000 VND"), 1000.0);
        assert_eq!(parse_amount_text("-5.5"), -5.5);
        assert_eq!(parse_amount_text(".5"), 0.5);
        assert_eq!(parse_amount_text("1e3"), 1000.0);
        assert!(parse_amount_text("").is_nan());
        assert!(parse_amount_text("abc").is_nan());
        assert!(parse_amount_text("VND 1000").is_nan());
    }

    #[test]
    fn test_normalize_row_numeric_and_text_cells() {
        let columns = ColumnMap { header_index: 0, date: 0, time: 1, amount: 2 };

        let row: Row = vec![" 01/01/2024 ".into(), Cell::Number(0.5), "1,000".into()];
        assert_eq!(
            normalize_row(&row, &columns),
            Some(Transaction {
                date: "01/01/2024".to_string(),
                time: "12:00:00".to_string(),
                amount: 1000.0,
            })
        );

        let row: Row = vec!["01/01/2024".into(), " 13:00:00 ".into(), Cell::Number(2000.0)];
        let tx = normalize_row(&row, &columns).unwrap();
        assert_eq!(tx.time, "13:00:00");
        assert_eq!(tx.amount, 2000.0);
    }

    #[test]
    fn test_normalize_row_drops_incomplete_rows() {
        let columns = ColumnMap { header_index: 0, date: 0, time: 1, amount: 2 };

        // Numeric date
        let row: Row = vec![Cell::Number(45292.0), "13:00:00".into(), Cell::Number(1.0)];
        assert!(normalize_row(&row, &columns).is_none());
        // Blank time
        let row: Row = vec!["01/01/2024".into(), "  ".into(), Cell::Number(1.0)];
        assert!(normalize_row(&row, &columns).is_none());
        // Unparseable amount
        let row: Row = vec!["01/01/2024".into(), "13:00:00".into(), "n/a".into()];
        assert!(normalize_row(&row, &columns).is_none());
        // Short row
        let row: Row = vec!["01/01/2024".into()];
        assert!(normalize_row(&row, &columns).is_none());
    }

    #[test]
    fn test_normalize_row_bool_amount_is_zero() {
        let columns = ColumnMap { header_index: 0, date: 0, time: 1, amount: 2 };
        let row: Row = vec!["01/01/2024".into(), "13:00:00".into(), Cell::Bool(true)];
        assert_eq!(normalize_row(&row, &columns).unwrap().amount, 0.0);
    }

    #[test]
    fn test_extract_counts_dropped_rows() {
        let rows = vec![
            vec!["Report".into(), Cell::Empty, Cell::Empty],
            header(),
            vec!["01/01/2024".into(), Cell::Number(0.5), "1,000".into()],
            vec![Cell::Empty, Cell::Empty, Cell::Empty],
            vec!["01/01/2024".into(), "13:00:00".into(), Cell::Number(2000.0)],
            vec!["Tổng".into(), Cell::Empty, Cell::Number(3000.0)],
        ];
        let extraction = extract(&rows, &labels()).unwrap();
        assert_eq!(extraction.header_row, 2);
        assert_eq!(extraction.transactions.len(), 2);
        assert_eq!(extraction.dropped_rows, 2);
    }

    #[test]
    fn test_extract_without_header_fails() {
        let rows = vec![
            vec!["Date".into(), "Time".into()],
            vec!["01/01/2024".into(), Cell::Number(0.5)],
        ];
        assert!(matches!(
            extract(&rows, &labels()),
            Err(SheetError::MissingHeader { .. })
        ));
    }

    #[test]
    fn test_extract_header_only() {
        let extraction = extract(&[header()], &labels()).unwrap();
        assert!(extraction.transactions.is_empty());
        assert_eq!(extraction.dropped_rows, 0);
    }
}
