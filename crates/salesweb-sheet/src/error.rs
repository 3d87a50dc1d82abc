//! Error types for salesweb-sheet

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Cannot read workbook: {message}")]
    Unreadable { message: String },

    #[error("Workbook contains no sheets")]
    NoSheets,

    #[error("Header row not found, expected columns: {expected}")]
    MissingHeader { expected: String },

    #[error("Internal error")]
    InternalError,
}
