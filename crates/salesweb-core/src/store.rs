//! In-memory store of pump transaction records

use crate::error::{CoreError, CoreResult};
use crate::models::{RecordDraft, TransactionRecord};

/// Ordered list of records; records are appended or replaced, never removed
#[derive(Debug, Clone, Default)]
pub struct TransactionStore {
    records: Vec<TransactionRecord>,
}

impl TransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding the sample record
    pub fn seeded() -> Self {
        Self {
            records: vec![TransactionRecord::sample()],
        }
    }

    /// Append a record; its id is one more than the largest id, or 1
    pub fn create(&mut self, draft: RecordDraft) -> TransactionRecord {
        let id = self.records.iter().map(|r| r.id).max().map_or(1, |max| max + 1);
        let record = TransactionRecord::from_draft(id, draft);
        log::info!(
            "Created record #{} (pump {}, revenue {})",
            record.id,
            record.pump,
            record.revenue
        );
        self.records.push(record.clone());
        record
    }

    /// Replace the record with the given id, keeping its id and position
    pub fn update(&mut self, id: u64, draft: RecordDraft) -> CoreResult<TransactionRecord> {
        let slot = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(CoreError::RecordNotFound { id })?;
        *slot = TransactionRecord::from_draft(id, draft);
        log::info!("Updated record #{}", id);
        Ok(slot.clone())
    }

    pub fn get(&self, id: u64) -> Option<&TransactionRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn list(&self) -> &[TransactionRecord] {
        &self.records
    }

    /// Sum of the revenue of all records
    pub fn total_revenue(&self) -> f64 {
        self.records.iter().map(|r| r.revenue).sum()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
