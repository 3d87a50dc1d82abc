//! Core data models for pump transaction records

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Display format of a record timestamp (e.g. `07/10/2024 17:25:02`)
pub const DISPLAY_DATETIME_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Value format of an HTML `datetime-local` input
pub const INPUT_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A recorded fuel sale at one pump
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Store-assigned identifier, starting at 1
    pub id: u64,
    /// Moment of the sale
    pub datetime: NaiveDateTime,
    /// Litres sold
    pub quantity: f64,
    /// Pump identifier (e.g. "1")
    pub pump: String,
    /// Sale value, `quantity × unit_price`
    pub revenue: f64,
    /// Price per litre
    pub unit_price: f64,
}

impl TransactionRecord {
    /// Build a record from form values
    pub fn from_draft(id: u64, draft: RecordDraft) -> Self {
        Self {
            id,
            datetime: draft.datetime,
            quantity: draft.quantity,
            pump: draft.pump,
            revenue: draft.revenue,
            unit_price: draft.unit_price,
        }
    }

    /// The form values of this record
    pub fn draft(&self) -> RecordDraft {
        RecordDraft {
            datetime: self.datetime,
            quantity: self.quantity,
            pump: self.pump.clone(),
            revenue: self.revenue,
            unit_price: self.unit_price,
        }
    }

    pub fn datetime_display(&self) -> String {
        self.datetime.format(DISPLAY_DATETIME_FORMAT).to_string()
    }

    pub fn datetime_input(&self) -> String {
        self.datetime.format(INPUT_DATETIME_FORMAT).to_string()
    }

    /// Pump label as shown in the list, e.g. "Trụ 1"
    pub fn pump_label(&self) -> String {
        pump_label(&self.pump)
    }

    /// The sample record a fresh store starts with
    pub fn sample() -> Self {
        let datetime = NaiveDate::from_ymd_opt(2024, 10, 7)
            .and_then(|d| d.and_hms_opt(17, 25, 2))
            .unwrap_or_default();
        Self {
            id: 1,
            datetime,
            quantity: 3.03,
            pump: "1".to_string(),
            revenue: 60000.0,
            unit_price: 19800.0,
        }
    }
}

/// Record values without an id, as submitted by the record form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordDraft {
    pub datetime: NaiveDateTime,
    pub quantity: f64,
    pub pump: String,
    pub revenue: f64,
    pub unit_price: f64,
}

impl RecordDraft {
    /// Create a draft, deriving revenue from quantity and unit price
    pub fn new(datetime: NaiveDateTime, quantity: f64, pump: impl Into<String>, unit_price: f64) -> Self {
        Self {
            datetime,
            quantity,
            pump: pump.into(),
            revenue: compute_revenue(Some(quantity), Some(unit_price)),
            unit_price,
        }
    }
}

/// Revenue of a sale: `quantity × unit_price` when both are known, otherwise 0
pub fn compute_revenue(quantity: Option<f64>, unit_price: Option<f64>) -> f64 {
    match (quantity, unit_price) {
        (Some(q), Some(p)) if q.is_finite() && p.is_finite() => q * p,
        _ => 0.0,
    }
}

/// Whether the form values differ from the snapshot taken when editing began
pub fn is_changed(snapshot: &RecordDraft, current: &RecordDraft) -> bool {
    snapshot != current
}

pub fn pump_label(pump: &str) -> String {
    format!("Trụ {}", pump)
}
