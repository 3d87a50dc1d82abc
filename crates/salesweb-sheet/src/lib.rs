//! Spreadsheet decoding and transaction extraction
//!
//! Reads the first sheet of an `.xlsx` workbook and turns the rows under the
//! date / time / amount header into `Transaction`s.

use async_trait::async_trait;
use std::sync::Arc;

pub mod decoder;
pub mod error;
pub mod header;
pub mod normalize;
pub mod types;

pub use decoder::decode_xlsx;
pub use error::SheetError;
pub use header::locate_header;
pub use normalize::{extract, fractional_day_to_time, normalize_row, parse_amount_text};

// Re-export commonly used types
pub use types::{Cell, ColumnMap, DecodedSheet, Extraction, HeaderLabels, Row, Transaction};

// ==================== Decoder Trait ====================

/// Decoder reference type
pub type DecoderRef = Arc<dyn SheetDecoder>;

/// Trait for workbook decoders
#[async_trait]
pub trait SheetDecoder: Send + Sync {
    /// Decode workbook bytes into the rows of the first sheet
    async fn decode(&self, bytes: Vec<u8>) -> Result<DecodedSheet, SheetError>;
}

/// Default decoder: calamine on the blocking thread pool
#[derive(Debug, Default)]
pub struct DefaultSheetDecoder;

#[async_trait]
impl SheetDecoder for DefaultSheetDecoder {
    async fn decode(&self, bytes: Vec<u8>) -> Result<DecodedSheet, SheetError> {
        tokio::task::spawn_blocking(move || decode_xlsx(&bytes))
            .await
            .map_err(|e| {
                log::error!("Workbook decode task failed: {}", e);
                SheetError::InternalError
            })?
    }
}
