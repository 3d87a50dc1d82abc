//! Report structures and aggregation helpers

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use salesweb_config::CurrencyConfig;
use salesweb_sheet::Transaction;

/// Rows selected by a time-window filter and their summed amount
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterResult {
    pub transactions: Vec<Transaction>,
    pub total: f64,
}

impl FilterResult {
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

/// Distinct date values in order of first appearance
pub fn distinct_dates(transactions: &[Transaction]) -> Vec<String> {
    let mut seen = HashSet::new();
    transactions
        .iter()
        .filter(|tx| seen.insert(tx.date.as_str()))
        .map(|tx| tx.date.clone())
        .collect()
}

/// Format an amount with the configured separators, e.g. `3.000`
pub fn format_amount(value: f64, currency: &CurrencyConfig) -> String {
    salesweb_utils::format_number(
        value,
        &currency.thousands_separator,
        &currency.decimal_separator,
        currency.decimal_places as usize,
    )
}

/// Format an amount followed by the currency code, e.g. `3.000 VND`
pub fn format_money(value: f64, currency: &CurrencyConfig) -> String {
    format!("{} {}", format_amount(value, currency), currency.code)
}

/// Summary of the current upload for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadSummary {
    pub file_name: String,
    pub transaction_count: usize,
    pub unique_dates: Vec<String>,
    pub header_row: usize,
    pub dropped_rows: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<FilterResult>,
}
