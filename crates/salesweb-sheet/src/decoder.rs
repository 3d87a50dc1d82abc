//! Workbook decoding via calamine

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};

use crate::error::SheetError;
use crate::types::{Cell, DecodedSheet, Row};

/// Decode the first sheet of an `.xlsx` workbook held in memory
///
/// Rows are anchored at cell A1: leading blank rows and columns that the
/// workbook leaves out of its used range are filled with `Cell::Empty`, and
/// every row is padded to the sheet width.
pub fn decode_xlsx(bytes: &[u8]) -> Result<DecodedSheet, SheetError> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).map_err(|e| SheetError::Unreadable {
        message: e.to_string(),
    })?;

    let name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(SheetError::NoSheets)?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(SheetError::NoSheets)?
        .map_err(|e| SheetError::Unreadable {
            message: e.to_string(),
        })?;

    let (row_offset, col_offset) = range
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));
    let width = col_offset + range.width();

    let mut rows: Vec<Row> = Vec::with_capacity(row_offset + range.height());
    rows.extend((0..row_offset).map(|_| vec![Cell::Empty; width]));

    for data_row in range.rows() {
        let mut row: Row = Vec::with_capacity(width);
        row.extend((0..col_offset).map(|_| Cell::Empty));
        row.extend(data_row.iter().map(to_cell));
        row.resize(width, Cell::Empty);
        rows.push(row);
    }

    log::debug!("Decoded sheet '{}': {} rows x {} columns", name, rows.len(), width);

    Ok(DecodedSheet { name, rows })
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Int(v) => Cell::Number(*v as f64),
        Data::Float(v) => Cell::Number(*v),
        Data::DateTime(v) => Cell::Number(v.as_f64()),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Bool(b) => Cell::Bool(*b),
        Data::Error(_) | Data::Empty => Cell::Empty,
    }
}
