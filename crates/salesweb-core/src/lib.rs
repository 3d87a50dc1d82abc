//! Core sales logic for salesweb
//!
//! Two tools share this crate: the sales report (upload a workbook, filter
//! its rows by a time window) and the pump transaction records (an
//! in-memory list with create and update).

pub mod error;
pub mod form;
pub mod models;
pub mod reports;
pub mod session;
pub mod store;
pub mod time;

pub use error::{
    CoreError, CoreResult, DefaultErrorLogger, ErrorCode, ErrorContext, ErrorDetails,
    ErrorLogger, ErrorSeverity, FieldErrors,
};
pub use form::{form_changed, parse_datetime_input, parse_decimal, RecordForm};
pub use models::{compute_revenue, is_changed, pump_label, RecordDraft, TransactionRecord};
pub use reports::{distinct_dates, format_amount, format_money, FilterResult, UploadSummary};
pub use session::{header_labels, ingest, FilterInput, IngestSession};
pub use store::TransactionStore;
pub use time::{filter_transactions, parse_transaction_instant, TimeWindow};

use salesweb_config::RecordsConfig;

/// Create the record store for a fresh process
pub fn new_store(config: &RecordsConfig) -> TransactionStore {
    if config.seed_sample {
        TransactionStore::seeded()
    } else {
        TransactionStore::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_store_seeding() {
        let config = RecordsConfig::default();
        assert_eq!(new_store(&config).len(), 1);

        let config = RecordsConfig {
            seed_sample: false,
            ..RecordsConfig::default()
        };
        assert!(new_store(&config).is_empty());
    }
}
