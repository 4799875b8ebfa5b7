//! # Monthly Budget Tracker
//!
//! A personal budget tracker built around calendar months. Each month has
//! three entry lists (income, expenses, savings transfers); a global
//! registry of fixed expenses is charged to every month; totals are always
//! derived fresh from live data; and finished months are finalized into an
//! append-ordered ledger that tracks a running cumulative balance.
//!
//! State persists as whole-file JSON snapshots in a data directory and can
//! be exported to (and restored from) a single backup document. This crate
//! is the full application core; any UI is a thin rendering layer over
//! [`Budget`].
//!
//! ## Layering
//!
//! - [`domain`]: business logic as services over storage traits
//! - [`storage`]: the JSON snapshot implementation of those traits
//! - [`Budget`]: the owned application state wiring everything together

use anyhow::Result;
use log::warn;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

pub mod domain;
pub mod storage;

// Re-export commonly used types
pub use domain::commands;
pub use domain::models::{
    BackupDocument, BucketKind, ClosedMonthRecord, Entry, MonthBucket, MonthDatabase, MonthKey,
};
pub use domain::{
    AggregateService, BackupService, BudgetError, EntryService, FixedExpenseService,
    LedgerService, MonthlyAggregate,
};
pub use storage::json::{StoreMeta, DATA_FORMAT_VERSION};
pub use storage::JsonConnection;

use domain::commands::backup::{ImportBackupCommand, ImportBackupResult};
use domain::models::IdGenerator;
use storage::json::MetaRepository;

/// The application state: owns every service, the storage connection, and
/// the id source.
///
/// Construct one at startup with [`Budget::open`] (or
/// [`Budget::open_default`]); every mutation persists before returning, so
/// there is no separate save step and no cached totals to invalidate.
pub struct Budget {
    pub entry_service: EntryService<JsonConnection>,
    pub fixed_expense_service: FixedExpenseService<JsonConnection>,
    pub aggregate_service: AggregateService,
    pub ledger_service: LedgerService<JsonConnection>,
    pub backup_service: BackupService<JsonConnection>,
    meta_repository: MetaRepository,
    id_generator: IdGenerator,
}

impl Budget {
    /// Open (or initialize) a budget store rooted at the given directory.
    pub fn open<P: AsRef<Path>>(data_directory: P) -> Result<Self> {
        let connection = Arc::new(JsonConnection::new(data_directory)?);
        Self::with_connection(connection)
    }

    /// Open the budget store in the default data directory
    /// (`~/Documents/Monthly Budget`).
    pub fn open_default() -> Result<Self> {
        let connection = Arc::new(JsonConnection::new_default()?);
        Self::with_connection(connection)
    }

    fn with_connection(connection: Arc<JsonConnection>) -> Result<Self> {
        let meta_repository = MetaRepository::new((*connection).clone());
        let meta = meta_repository.load_or_create()?;
        if meta.data_format_version != DATA_FORMAT_VERSION {
            warn!(
                "Store has data format version {}, this build expects {}",
                meta.data_format_version, DATA_FORMAT_VERSION
            );
        }

        // Initialize all services over one shared id source
        let id_generator = IdGenerator::new();
        let aggregate_service = AggregateService::new();
        let entry_service = EntryService::new(connection.clone(), id_generator.clone());
        let fixed_expense_service =
            FixedExpenseService::new(connection.clone(), id_generator.clone());
        let ledger_service = LedgerService::new(
            connection.clone(),
            entry_service.clone(),
            fixed_expense_service.clone(),
            aggregate_service.clone(),
            id_generator.clone(),
        );
        let backup_service = BackupService::new(connection);

        let budget = Budget {
            entry_service,
            fixed_expense_service,
            aggregate_service,
            ledger_service,
            backup_service,
            meta_repository,
            id_generator,
        };
        budget.seed_id_generator()?;
        Ok(budget)
    }

    /// Floor the id generator past every id already on disk, so ids stay
    /// unique across restarts and after imports.
    fn seed_id_generator(&self) -> Result<()> {
        if let Some(max_id) = self.backup_service.current_document()?.max_id() {
            self.id_generator.observe(max_id);
        }
        Ok(())
    }

    /// Derived totals for one month, recomputed from live data.
    pub fn get_aggregate(&self, key: &MonthKey) -> Result<MonthlyAggregate> {
        let bucket = self.entry_service.get_bucket(key)?;
        let fixed_expenses = self.fixed_expense_service.list_fixed_expenses()?;
        Ok(self
            .aggregate_service
            .compute_aggregate(&bucket, &fixed_expenses))
    }

    /// Expense totals for one month grouped by description, fixed and
    /// monthly combined.
    pub fn get_category_breakdown(&self, key: &MonthKey) -> Result<BTreeMap<String, f64>> {
        let bucket = self.entry_service.get_bucket(key)?;
        let fixed_expenses = self.fixed_expense_service.list_fixed_expenses()?;
        Ok(self
            .aggregate_service
            .category_breakdown(&bucket, &fixed_expenses))
    }

    /// One list of a month's bucket, in insertion order.
    pub fn list_entries(&self, key: &MonthKey, kind: BucketKind) -> Result<Vec<Entry>> {
        self.entry_service.list_entries(key, kind)
    }

    /// All registered fixed expenses in insertion order.
    pub fn list_fixed_expenses(&self) -> Result<Vec<Entry>> {
        self.fixed_expense_service.list_fixed_expenses()
    }

    /// All closed-month records in close order.
    pub fn list_closed_records(&self) -> Result<Vec<ClosedMonthRecord>> {
        self.ledger_service.list_records()
    }

    /// Replace all persisted state from a backup document, then refresh the
    /// id floor and stamp the store metadata.
    pub fn import_backup(&self, command: ImportBackupCommand) -> Result<ImportBackupResult> {
        let result = self.backup_service.import(command)?;
        // Imported ids may lie ahead of the in-memory floor.
        self.seed_id_generator()?;
        self.meta_repository.touch()?;
        Ok(result)
    }

    /// Store metadata (format version, created/updated timestamps).
    pub fn store_meta(&self) -> Result<StoreMeta> {
        self.meta_repository.load_or_create()
    }
}
