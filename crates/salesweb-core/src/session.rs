//! Upload session: the extracted rows of the current workbook and the last filter result

use serde::{Deserialize, Serialize};

use salesweb_config::{SheetConfig, UploadConfig};
use salesweb_sheet::{extract, HeaderLabels, Row, SheetDecoder, Transaction};

use crate::error::{CoreError, CoreResult};
use crate::reports::{distinct_dates, FilterResult, UploadSummary};
use crate::time::{filter_transactions, TimeWindow};

/// Filter form values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterInput {
    pub date: String,
    pub start_time: String,
    pub end_time: String,
}

/// State derived from one successfully ingested workbook
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestSession {
    pub file_name: String,
    pub transactions: Vec<Transaction>,
    pub unique_dates: Vec<String>,
    pub dropped_rows: usize,
    /// 1-indexed
    pub header_row: usize,
    /// Last successful filter, with the values that produced it
    pub result: Option<FilterResult>,
    pub last_filter: Option<FilterInput>,
}

impl IngestSession {
    /// Build a session from decoded rows
    pub fn from_rows(file_name: &str, rows: &[Row], labels: &HeaderLabels) -> CoreResult<Self> {
        let extraction = extract(rows, labels)?;
        let unique_dates = distinct_dates(&extraction.transactions);

        Ok(Self {
            file_name: file_name.to_string(),
            transactions: extraction.transactions,
            unique_dates,
            dropped_rows: extraction.dropped_rows,
            header_row: extraction.header_row,
            result: None,
            last_filter: None,
        })
    }

    /// The date to filter on: the chosen one, or the only date in the sheet
    pub fn effective_date(&self, date: &str) -> Option<String> {
        let date = date.trim();
        if !date.is_empty() {
            return Some(date.to_string());
        }
        match self.unique_dates.as_slice() {
            [only] => Some(only.clone()),
            _ => None,
        }
    }

    /// Filter the rows by `[start, end)` on the chosen date
    ///
    /// On failure the previous result is kept.
    pub fn run_filter(&mut self, input: &FilterInput) -> CoreResult<&FilterResult> {
        if input.start_time.trim().is_empty() {
            return Err(CoreError::ValidationError {
                field: "start_time".to_string(),
                message: "Bắt buộc chọn giờ bắt đầu".to_string(),
            });
        }
        if input.end_time.trim().is_empty() {
            return Err(CoreError::ValidationError {
                field: "end_time".to_string(),
                message: "Bắt buộc chọn giờ kết thúc".to_string(),
            });
        }

        let date = self.effective_date(&input.date).ok_or(CoreError::DateNotSelected)?;
        let window = TimeWindow::new(&date, &input.start_time, &input.end_time)?;
        let result = filter_transactions(&self.transactions, &window);

        log::info!(
            "Filtered {} on {} {}-{}: {} rows, total {}",
            self.file_name,
            date,
            input.start_time,
            input.end_time,
            result.transactions.len(),
            result.total
        );

        self.last_filter = Some(FilterInput {
            date,
            start_time: input.start_time.trim().to_string(),
            end_time: input.end_time.trim().to_string(),
        });
        Ok(self.result.insert(result))
    }

    pub fn summary(&self) -> UploadSummary {
        UploadSummary {
            file_name: self.file_name.clone(),
            transaction_count: self.transactions.len(),
            unique_dates: self.unique_dates.clone(),
            header_row: self.header_row,
            dropped_rows: self.dropped_rows,
            result: self.result.clone(),
        }
    }
}

/// Header labels configured for the sheet
pub fn header_labels(config: &SheetConfig) -> HeaderLabels {
    HeaderLabels::new(
        config.date_label.as_str(),
        config.time_label.as_str(),
        config.amount_label.as_str(),
    )
}

/// Check the extension, decode the workbook and extract its rows
pub async fn ingest(
    decoder: &dyn SheetDecoder,
    upload: &UploadConfig,
    sheet: &SheetConfig,
    file_name: &str,
    bytes: Vec<u8>,
) -> CoreResult<IngestSession> {
    if !upload.accepts(file_name) {
        return Err(CoreError::UnsupportedFile {
            file_name: file_name.to_string(),
        });
    }

    let decoded = decoder.decode(bytes).await?;
    let session = IngestSession::from_rows(file_name, &decoded.rows, &header_labels(sheet))?;

    log::info!(
        "Ingested {} (sheet '{}'): header at row {}, {} transactions, {} rows dropped, {} dates",
        file_name,
        decoded.name,
        session.header_row,
        session.transactions.len(),
        session.dropped_rows,
        session.unique_dates.len()
    );

    Ok(session)
}
