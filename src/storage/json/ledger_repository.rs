//! # JSON Ledger Repository
//!
//! Persists the closed-month ledger as a single JSON snapshot
//! (`closed_months.json`): one array of records in close order. The array
//! order *is* the ledger order; records are never re-sorted by calendar
//! date, and deleting a record must leave every other record byte-for-byte
//! as it was (the cumulative column is only rewritten by an explicit
//! recompute).

use anyhow::Result;
use log::debug;

use crate::domain::models::closed_month::ClosedMonthRecord;
use crate::storage::traits::LedgerStorage;

use super::connection::JsonConnection;

/// JSON-snapshot closed-month ledger repository
#[derive(Clone)]
pub struct LedgerRepository {
    connection: JsonConnection,
}

impl LedgerRepository {
    /// Create a new ledger repository
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }

    fn read_records(&self) -> Result<Vec<ClosedMonthRecord>> {
        let path = self.connection.closed_months_file_path();
        match self.connection.read_snapshot(&path)? {
            Some(contents) => Ok(serde_json::from_str(&contents)?),
            None => Ok(Vec::new()),
        }
    }

    fn write_records(&self, records: &[ClosedMonthRecord]) -> Result<()> {
        let contents = serde_json::to_string_pretty(records)?;
        self.connection
            .write_snapshot(&self.connection.closed_months_file_path(), &contents)
    }
}

impl LedgerStorage for LedgerRepository {
    fn list_records(&self) -> Result<Vec<ClosedMonthRecord>> {
        self.read_records()
    }

    fn last_record(&self) -> Result<Option<ClosedMonthRecord>> {
        Ok(self.read_records()?.into_iter().last())
    }

    fn append_record(&self, record: &ClosedMonthRecord) -> Result<()> {
        let mut records = self.read_records()?;
        records.push(record.clone());
        self.write_records(&records)?;
        debug!(
            "Appended ledger record {} for {} (cumulative {:.2})",
            record.id,
            record.label(),
            record.cumulative
        );
        Ok(())
    }

    fn delete_record(&self, record_id: u64) -> Result<bool> {
        let mut records = self.read_records()?;
        let original_len = records.len();
        records.retain(|record| record.id != record_id);

        if records.len() == original_len {
            return Ok(false);
        }
        self.write_records(&records)?;
        Ok(true)
    }

    fn replace_records(&self, records: &[ClosedMonthRecord]) -> Result<()> {
        self.write_records(records)
    }
}
