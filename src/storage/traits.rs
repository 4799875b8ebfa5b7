//! Storage traits for the budget tracker.
//!
//! These traits define the interface between the domain layer and
//! the underlying storage implementation, allowing the snapshot format
//! to change without touching business logic.

use anyhow::Result;

use crate::domain::models::closed_month::ClosedMonthRecord;
use crate::domain::models::entry::{BucketKind, Entry};
use crate::domain::models::month::{MonthBucket, MonthDatabase, MonthKey};

/// Trait defining the interface for per-month entry storage.
///
/// One bucket per month key; a bucket comes into existence on first write
/// and survives even when its last entry is deleted.
pub trait MonthStorage: Send + Sync {
    /// Bucket for the key, or an empty bucket when none was ever written.
    /// Reading never creates storage for the key.
    fn get_bucket(&self, key: &MonthKey) -> Result<MonthBucket>;

    /// Append an entry to one list of the key's bucket, creating the bucket
    /// when absent, and persist the updated database.
    fn append_entry(&self, key: &MonthKey, kind: BucketKind, entry: &Entry) -> Result<()>;

    /// Replace the note of the entry with the given id.
    /// Returns false when no such entry exists in that list.
    fn update_entry_note(
        &self,
        key: &MonthKey,
        kind: BucketKind,
        entry_id: u64,
        note: Option<String>,
    ) -> Result<bool>;

    /// Remove the entry with the given id from one list.
    /// Returns false when no such entry exists; the bucket itself is kept.
    fn delete_entry(&self, key: &MonthKey, kind: BucketKind, entry_id: u64) -> Result<bool>;

    /// Full snapshot of the persisted database (for export).
    fn load_database(&self) -> Result<MonthDatabase>;

    /// Overwrite the persisted database with a new snapshot (for import).
    fn replace_database(&self, database: &MonthDatabase) -> Result<()>;
}

/// Trait defining the interface for the global fixed-expense registry.
///
/// A single ordered list of recurring expenses applied to every month.
pub trait FixedExpenseStorage: Send + Sync {
    /// All registered fixed expenses in insertion order.
    fn list_fixed_expenses(&self) -> Result<Vec<Entry>>;

    /// Append a fixed expense and persist the updated registry.
    fn append_fixed_expense(&self, entry: &Entry) -> Result<()>;

    /// Replace the note of the fixed expense with the given id.
    /// Returns false when no such expense exists.
    fn update_fixed_expense_note(&self, entry_id: u64, note: Option<String>) -> Result<bool>;

    /// Remove the fixed expense with the given id.
    /// Returns false when no such expense exists.
    fn delete_fixed_expense(&self, entry_id: u64) -> Result<bool>;

    /// Overwrite the registry with a new snapshot (for import).
    fn replace_fixed_expenses(&self, entries: &[Entry]) -> Result<()>;
}

/// Trait defining the interface for the closed-month ledger.
///
/// Records are stored in append order and never re-sorted.
pub trait LedgerStorage: Send + Sync {
    /// All closed-month records in append order.
    fn list_records(&self) -> Result<Vec<ClosedMonthRecord>>;

    /// Most recently appended record, if the ledger is non-empty.
    fn last_record(&self) -> Result<Option<ClosedMonthRecord>>;

    /// Append a record and persist the updated ledger.
    fn append_record(&self, record: &ClosedMonthRecord) -> Result<()>;

    /// Remove the record with the given id, leaving every other record
    /// untouched (stored cumulative values included).
    /// Returns false when no such record exists.
    fn delete_record(&self, record_id: u64) -> Result<bool>;

    /// Overwrite the ledger with a new snapshot (import or explicit
    /// cumulative recompute).
    fn replace_records(&self, records: &[ClosedMonthRecord]) -> Result<()>;
}

/// Trait defining the interface for storage connections
///
/// This trait abstracts away the concrete connection type and provides
/// factory methods for creating repositories. The domain layer works with
/// any storage backend through it.
pub trait Connection: Send + Sync + Clone {
    /// The type of MonthStorage this connection creates
    type MonthRepository: MonthStorage + Clone;

    /// The type of FixedExpenseStorage this connection creates
    type FixedExpenseRepository: FixedExpenseStorage + Clone;

    /// The type of LedgerStorage this connection creates
    type LedgerRepository: LedgerStorage + Clone;

    /// Create a new month repository for this connection
    fn create_month_repository(&self) -> Self::MonthRepository;

    /// Create a new fixed-expense repository for this connection
    fn create_fixed_expense_repository(&self) -> Self::FixedExpenseRepository;

    /// Create a new ledger repository for this connection
    fn create_ledger_repository(&self) -> Self::LedgerRepository;
}
