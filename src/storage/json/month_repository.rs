//! # JSON Month Repository
//!
//! Persists the per-month entry database as a single JSON snapshot
//! (`months.json`). Every mutation reads the whole snapshot, applies the
//! change in memory, and writes the whole snapshot back atomically.
//!
//! ## File Format
//!
//! One JSON object keyed by the `"{year}_{month0}"` form:
//! ```json
//! {
//!   "2025_0": {
//!     "income": [{"id": 1736000000000, "description": "Salary", "amount": 5000.0}],
//!     "monthly_expense": [],
//!     "savings": []
//!   }
//! }
//! ```

use anyhow::Result;
use log::debug;

use crate::domain::models::entry::{BucketKind, Entry};
use crate::domain::models::month::{MonthBucket, MonthDatabase, MonthKey};
use crate::storage::traits::MonthStorage;

use super::connection::JsonConnection;

/// JSON-snapshot month repository
#[derive(Clone)]
pub struct MonthRepository {
    connection: JsonConnection,
}

impl MonthRepository {
    /// Create a new month repository
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }

    /// Read the full month database from disk, or an empty one when the
    /// snapshot file does not exist yet.
    fn read_database(&self) -> Result<MonthDatabase> {
        let path = self.connection.months_file_path();
        match self.connection.read_snapshot(&path)? {
            Some(contents) => Ok(serde_json::from_str(&contents)?),
            None => Ok(MonthDatabase::new()),
        }
    }

    /// Write the full month database back to disk.
    fn write_database(&self, database: &MonthDatabase) -> Result<()> {
        let contents = serde_json::to_string_pretty(database)?;
        self.connection
            .write_snapshot(&self.connection.months_file_path(), &contents)
    }
}

impl MonthStorage for MonthRepository {
    fn get_bucket(&self, key: &MonthKey) -> Result<MonthBucket> {
        let database = self.read_database()?;
        Ok(database.bucket(key).cloned().unwrap_or_default())
    }

    fn append_entry(&self, key: &MonthKey, kind: BucketKind, entry: &Entry) -> Result<()> {
        let mut database = self.read_database()?;
        database.bucket_mut(key).entries_mut(kind).push(entry.clone());
        self.write_database(&database)?;
        debug!("Appended {} entry {} to {}", kind.label(), entry.id, key);
        Ok(())
    }

    fn update_entry_note(
        &self,
        key: &MonthKey,
        kind: BucketKind,
        entry_id: u64,
        note: Option<String>,
    ) -> Result<bool> {
        let mut database = self.read_database()?;
        // bucket_mut on an unseen key only touches the in-memory copy; when
        // the entry is not found nothing is written back.
        let entries = database.bucket_mut(key).entries_mut(kind);
        match entries.iter_mut().find(|entry| entry.id == entry_id) {
            Some(entry) => {
                entry.note = note;
                self.write_database(&database)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete_entry(&self, key: &MonthKey, kind: BucketKind, entry_id: u64) -> Result<bool> {
        let mut database = self.read_database()?;
        let entries = database.bucket_mut(key).entries_mut(kind);
        let original_len = entries.len();
        entries.retain(|entry| entry.id != entry_id);

        if entries.len() == original_len {
            return Ok(false);
        }
        // The bucket stays in the database even when its last entry goes.
        self.write_database(&database)?;
        Ok(true)
    }

    fn load_database(&self) -> Result<MonthDatabase> {
        self.read_database()
    }

    fn replace_database(&self, database: &MonthDatabase) -> Result<()> {
        self.write_database(database)
    }
}
