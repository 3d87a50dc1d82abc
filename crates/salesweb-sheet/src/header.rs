//! Header row lookup
//!
//! The data table can start anywhere in the sheet (report exports usually
//! carry a title block), so the header is located by content: the first row
//! holding all three labels wins.

use crate::error::SheetError;
use crate::types::{ColumnMap, HeaderLabels, Row};

/// Find the header row and resolve the column of each field
pub fn locate_header(rows: &[Row], labels: &HeaderLabels) -> Result<ColumnMap, SheetError> {
    let header_index = rows
        .iter()
        .position(|row| {
            labels
                .all()
                .iter()
                .all(|label| row.iter().any(|cell| cell.matches_label(label)))
        })
        .ok_or_else(|| SheetError::MissingHeader {
            expected: labels.all().join(", "),
        })?;

    let header = &rows[header_index];
    let column_of = |label: &str| {
        header
            .iter()
            .position(|cell| cell.matches_label(label))
            .ok_or(SheetError::InternalError)
    };

    Ok(ColumnMap {
        header_index,
        date: column_of(&labels.date)?,
        time: column_of(&labels.time)?,
        amount: column_of(&labels.amount)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(|c| Cell::from(*c)).collect()
    }

    #[test]
    fn test_header_found_after_title_block() {
        let rows = vec![
            row(&["BÁO CÁO DOANH SỐ", "", ""]),
            row(&["", "", ""]),
            row(&["STT", "Ngày", "Giờ", "Thành tiền (VNĐ)"]),
            row(&["1", "01/01/2024", "08:00:00", "1000"]),
        ];
        let map = locate_header(&rows, &HeaderLabels::default()).unwrap();
        assert_eq!(map.header_index, 2);
        assert_eq!(map.date, 1);
        assert_eq!(map.time, 2);
        assert_eq!(map.amount, 3);
    }

    #[test]
    fn test_columns_follow_header_order() {
        let rows = vec![row(&["Amount", "Date", "Time"])];
        let labels = HeaderLabels::new("Date", "Time", "Amount");
        let map = locate_header(&rows, &labels).unwrap();
        assert_eq!((map.date, map.time, map.amount), (1, 2, 0));
    }

    #[test]
    fn test_first_occurrence_of_duplicate_label() {
        let rows = vec![row(&["Date", "Time", "Amount", "Amount"])];
        let labels = HeaderLabels::new("Date", "Time", "Amount");
        assert_eq!(locate_header(&rows, &labels).unwrap().amount, 2);
    }

    #[test]
    fn test_missing_label_is_format_error() {
        let rows = vec![row(&["Date", "Time", "Total"]), row(&["01/01/2024", "12:00:00", "5"])];
        let labels = HeaderLabels::new("Date", "Time", "Amount");
        match locate_header(&rows, &labels) {
            Err(SheetError::MissingHeader { expected }) => assert_eq!(expected, "Date, Time, Amount"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_labels_must_match_exactly() {
        // Numeric and padded cells do not count as labels
        let rows = vec![vec![
            Cell::from(" Date"),
            Cell::from("Time"),
            Cell::Number(0.0),
        ]];
        let labels = HeaderLabels::new("Date", "Time", "Amount");
        assert!(locate_header(&rows, &labels).is_err());
    }

    #[test]
    fn test_labels_spread_over_rows_do_not_match() {
        let rows = vec![row(&["Date", "Time"]), row(&["Amount"])];
        let labels = HeaderLabels::new("Date", "Time", "Amount");
        assert!(locate_header(&rows, &labels).is_err());
    }
}
