//! Time-window filtering of extracted sales rows

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use salesweb_sheet::Transaction;

use crate::error::{CoreError, CoreResult};
use crate::reports::FilterResult;

/// Formats of the window bounds, built from the chosen date and `HH:MM` times
pub const WINDOW_FORMATS: &[&str] = &["%d/%m/%Y %H:%M", "%d/%m/%Y %H:%M:%S"];

/// Formats tried, in order, on `"{date} {time}"` of a sheet row
///
/// Each format is followed by its variant without seconds.
pub const TRANSACTION_FORMATS: &[&str] = &[
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d/%m/%Y %I:%M:%S %p",
    "%d/%m/%Y %I:%M %p",
];

/// Half-open interval `[start, end)` on one day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeWindow {
    /// Build the window from the selected date and `HH:MM` start and end times
    pub fn new(date: &str, start: &str, end: &str) -> CoreResult<Self> {
        let parse = |time: &str| {
            parse_first(&format!("{} {}", date.trim(), time.trim()), WINDOW_FORMATS)
                .ok_or(CoreError::InvalidTimeWindow)
        };

        Ok(Self {
            start: parse(start)?,
            end: parse(end)?,
        })
    }

    pub fn contains(&self, instant: &NaiveDateTime) -> bool {
        self.start <= *instant && *instant < self.end
    }
}

/// Parse the instant of a sheet row; first matching format wins
pub fn parse_transaction_instant(date: &str, time: &str) -> Option<NaiveDateTime> {
    parse_first(&format!("{} {}", date, time), TRANSACTION_FORMATS)
}

fn parse_first(text: &str, formats: &[&str]) -> Option<NaiveDateTime> {
    formats
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
}

/// Select the rows inside the window, ordered by time of day, with their total
///
/// Rows whose instant cannot be parsed never match. Equal times keep their
/// input order.
pub fn filter_transactions(transactions: &[Transaction], window: &TimeWindow) -> FilterResult {
    let mut matched: Vec<(NaiveDateTime, &Transaction)> = transactions
        .iter()
        .filter_map(|tx| parse_transaction_instant(&tx.date, &tx.time).map(|instant| (instant, tx)))
        .filter(|(instant, _)| window.contains(instant))
        .collect();

    matched.sort_by_key(|(instant, _)| instant.time());

    let transactions: Vec<Transaction> = matched.into_iter().map(|(_, tx)| tx.clone()).collect();
    let total = transactions.iter().map(|tx| tx.amount).sum();

    FilterResult { transactions, total }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(date: &str, time: &str, amount: f64) -> Transaction {
        Transaction {
            date: date.to_string(),
            time: time.to_string(),
            amount,
        }
    }

    #[test]
    fn test_window_rejects_invalid_input() {
        assert!(matches!(
            TimeWindow::new("2024-01-01", "12:00", "14:00"),
            Err(CoreError::InvalidTimeWindow)
        ));
        assert!(matches!(
            TimeWindow::new("01/01/2024", "25:00", "14:00"),
            Err(CoreError::InvalidTimeWindow)
        ));
        assert!(matches!(
            TimeWindow::new("01/01/2024", "12:00", ""),
            Err(CoreError::InvalidTimeWindow)
        ));
    }

    #[test]
    fn test_parse_transaction_instant_formats() {
        let instant = parse_transaction_instant("01/01/2024", "13:05:09").unwrap();
        assert_eq!(instant.to_string(), "2024-01-01 13:05:09");

        let instant = parse_transaction_instant("01/01/2024", "01:05:09 PM").unwrap();
        assert_eq!(instant.to_string(), "2024-01-01 13:05:09");

        let instant = parse_transaction_instant("01/01/2024", "13:05").unwrap();
        assert_eq!(instant.to_string(), "2024-01-01 13:05:00");

        let instant = parse_transaction_instant("01/01/2024", "01:05 PM").unwrap();
        assert_eq!(instant.to_string(), "2024-01-01 13:05:00");

        assert!(parse_transaction_instant("2024-01-01", "13:05:09").is_none());
    }

    #[test]
    fn test_rows_without_seconds_match() {
        let window = TimeWindow::new("01/01/2024", "12:00", "14:00").unwrap();
        let rows = vec![
            tx("01/01/2024", "12:30", 500.0),
            tx("01/01/2024", "13:00:00", 2000.0),
        ];
        let result = filter_transactions(&rows, &window);
        assert_eq!(result.transactions.len(), 2);
        assert_eq!(result.total, 2500.0);
    }

    #[test]
    fn test_window_bounds_with_seconds() {
        let window = TimeWindow::new("01/01/2024", "12:00:00", "14:00").unwrap();
        assert_eq!(window.start.to_string(), "2024-01-01 12:00:00");
        assert_eq!(window.end.to_string(), "2024-01-01 14:00:00");
    }

    #[test]
    fn test_boundaries_half_open() {
        let window = TimeWindow::new("01/01/2024", "12:00", "14:00").unwrap();
        let rows = vec![
            tx("01/01/2024", "11:59:59", 1.0),
            tx("01/01/2024", "12:00:00", 10.0),
            tx("01/01/2024", "13:59:59", 100.0),
            tx("01/01/2024", "14:00:00", 1000.0),
        ];
        let result = filter_transactions(&rows, &window);
        assert_eq!(result.transactions.len(), 2);
        assert_eq!(result.total, 110.0);
    }

    #[test]
    fn test_other_dates_excluded() {
        let window = TimeWindow::new("01/01/2024", "00:00", "23:59").unwrap();
        let rows = vec![
            tx("01/01/2024", "08:00:00", 5.0),
            tx("02/01/2024", "08:00:00", 7.0),
        ];
        let result = filter_transactions(&rows, &window);
        assert_eq!(result.transactions, vec![rows[0].clone()]);
    }

    #[test]
    fn test_sorted_by_time_of_day_stable() {
        let window = TimeWindow::new("01/01/2024", "08:00", "18:00").unwrap();
        let rows = vec![
            tx("01/01/2024", "15:00:00", 1.0),
            tx("01/01/2024", "09:00:00", 2.0),
            tx("01/01/2024", "15:00:00", 3.0),
            tx("01/01/2024", "02:00:00 PM", 4.0),
        ];
        let result = filter_transactions(&rows, &window);
        let amounts: Vec<f64> = result.transactions.iter().map(|t| t.amount).collect();
        assert_eq!(amounts, vec![2.0, 4.0, 1.0, 3.0]);
    }

    #[test]
    fn test_unparseable_rows_never_match() {
        let window = TimeWindow::new("01/01/2024", "00:00", "23:59").unwrap();
        let rows = vec![tx("01/01/2024", "noon", 5.0), tx("1 Jan", "12:00:00", 5.0)];
        let result = filter_transactions(&rows, &window);
        assert!(result.transactions.is_empty());
        assert_eq!(result.total, 0.0);
    }

    #[test]
    fn test_empty_window_matches_nothing() {
        let window = TimeWindow::new("01/01/2024", "14:00", "12:00").unwrap();
        let rows = vec![tx("01/01/2024", "13:00:00", 5.0)];
        assert!(filter_transactions(&rows, &window).transactions.is_empty());
    }

    #[test]
    fn test_filter_idempotent() {
        let window = TimeWindow::new("01/01/2024", "12:00", "14:00").unwrap();
        let rows = vec![
            tx("01/01/2024", "13:00:00", 2000.0),
            tx("01/01/2024", "12:00:00", 1000.0),
            tx("01/01/2024", "15:00:00", 9.0),
        ];
        let first = filter_transactions(&rows, &window);
        let second = filter_transactions(&rows, &window);
        assert_eq!(first, second);

        let again = filter_transactions(&first.transactions, &window);
        assert_eq!(again, first);
    }
}
