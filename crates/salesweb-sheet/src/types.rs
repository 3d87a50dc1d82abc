//! Basic types shared by the decoder and the row extractor

use serde::{Deserialize, Serialize};

/// One decoded spreadsheet value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Number(f64),
    Bool(bool),
    Empty,
}

impl Cell {
    /// Text content, if this is a text cell
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Check whether the cell holds exactly the given label
    pub fn matches_label(&self, label: &str) -> bool {
        self.as_text() == Some(label)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

/// A position-addressed spreadsheet line
pub type Row = Vec<Cell>;

/// The first sheet of a workbook
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecodedSheet {
    /// Sheet name as stored in the workbook
    pub name: String,
    /// Rows, every row padded to the sheet width
    pub rows: Vec<Row>,
}

/// Header labels that identify the data columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderLabels {
    pub date: String,
    pub time: String,
    pub amount: String,
}

impl HeaderLabels {
    pub fn new(date: impl Into<String>, time: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            time: time.into(),
            amount: amount.into(),
        }
    }

    /// All labels in column order (date, time, amount)
    pub fn all(&self) -> [&str; 3] {
        [&self.date, &self.time, &self.amount]
    }
}

impl Default for HeaderLabels {
    fn default() -> Self {
        Self::new("Ngày", "Giờ", "Thành tiền (VNĐ)")
    }
}

/// Column positions resolved from the header row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMap {
    /// Index of the header row within the decoded rows (0-based)
    pub header_index: usize,
    pub date: usize,
    pub time: usize,
    pub amount: usize,
}

/// A sales line extracted from the sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Calendar date as written in the sheet (e.g. `01/01/2024`)
    pub date: String,
    /// Time of day, `HH:MM:SS` for numeric cells, verbatim for text cells
    pub time: String,
    pub amount: f64,
}

/// Result of running extraction over a decoded sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
    pub transactions: Vec<Transaction>,
    /// 1-indexed row number of the header within the sheet
    pub header_row: usize,
    /// Rows after the header that did not yield a transaction
    pub dropped_rows: usize,
}
