//! # JSON Fixed-Expense Repository
//!
//! Persists the global fixed-expense registry as a single JSON snapshot
//! (`fixed_expenses.json`): one array of entries in insertion order. The
//! registry is global, not keyed by month; the aggregator charges every
//! registered expense to whichever month it is computing.

use anyhow::Result;
use log::debug;

use crate::domain::models::entry::Entry;
use crate::storage::traits::FixedExpenseStorage;

use super::connection::JsonConnection;

/// JSON-snapshot fixed-expense repository
#[derive(Clone)]
pub struct FixedExpenseRepository {
    connection: JsonConnection,
}

impl FixedExpenseRepository {
    /// Create a new fixed-expense repository
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }

    fn read_registry(&self) -> Result<Vec<Entry>> {
        let path = self.connection.fixed_expenses_file_path();
        match self.connection.read_snapshot(&path)? {
            Some(contents) => Ok(serde_json::from_str(&contents)?),
            None => Ok(Vec::new()),
        }
    }

    fn write_registry(&self, entries: &[Entry]) -> Result<()> {
        let contents = serde_json::to_string_pretty(entries)?;
        self.connection
            .write_snapshot(&self.connection.fixed_expenses_file_path(), &contents)
    }
}

impl FixedExpenseStorage for FixedExpenseRepository {
    fn list_fixed_expenses(&self) -> Result<Vec<Entry>> {
        self.read_registry()
    }

    fn append_fixed_expense(&self, entry: &Entry) -> Result<()> {
        let mut entries = self.read_registry()?;
        entries.push(entry.clone());
        self.write_registry(&entries)?;
        debug!("Appended fixed expense {} ({})", entry.id, entry.description);
        Ok(())
    }

    fn update_fixed_expense_note(&self, entry_id: u64, note: Option<String>) -> Result<bool> {
        let mut entries = self.read_registry()?;
        match entries.iter_mut().find(|entry| entry.id == entry_id) {
            Some(entry) => {
                entry.note = note;
                self.write_registry(&entries)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete_fixed_expense(&self, entry_id: u64) -> Result<bool> {
        let mut entries = self.read_registry()?;
        let original_len = entries.len();
        entries.retain(|entry| entry.id != entry_id);

        if entries.len() == original_len {
            return Ok(false);
        }
        self.write_registry(&entries)?;
        Ok(true)
    }

    fn replace_fixed_expenses(&self, entries: &[Entry]) -> Result<()> {
        self.write_registry(entries)
    }
}
