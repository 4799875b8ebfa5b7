/// Test utilities module for automatic cleanup and consistent test infrastructure
///
/// This module provides RAII-based cleanup that guarantees test data is removed
/// even if tests panic or fail.
use anyhow::Result;
use tempfile::TempDir;

use crate::domain::models::closed_month::ClosedMonthRecord;
use crate::domain::models::entry::Entry;

use super::connection::JsonConnection;
use super::fixed_expense_repository::FixedExpenseRepository;
use super::ledger_repository::LedgerRepository;
use super::meta_repository::MetaRepository;
use super::month_repository::MonthRepository;

/// Test environment that provides a temporary directory and connection
/// that will be automatically cleaned up when the environment is dropped,
/// even if tests panic or fail.
pub struct TestEnvironment {
    pub connection: JsonConnection,
    /// Base directory path for manual inspection if needed
    pub base_path: std::path::PathBuf,
    _temp_dir: TempDir, // Keep alive to prevent cleanup
}

impl TestEnvironment {
    /// Create a new test environment with a temporary directory
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let connection = JsonConnection::new(temp_dir.path())?;
        Ok(Self {
            connection,
            base_path: temp_dir.path().to_path_buf(),
            _temp_dir: temp_dir,
        })
    }
}

/// Test helper that provides repository instances for a test environment
pub struct TestHelper {
    pub env: TestEnvironment,
    pub month_repo: MonthRepository,
    pub fixed_expense_repo: FixedExpenseRepository,
    pub ledger_repo: LedgerRepository,
    pub meta_repo: MetaRepository,
}

impl TestHelper {
    /// Create a new test helper with a fresh environment
    pub fn new() -> Result<Self> {
        let env = TestEnvironment::new()?;
        let month_repo = MonthRepository::new(env.connection.clone());
        let fixed_expense_repo = FixedExpenseRepository::new(env.connection.clone());
        let ledger_repo = LedgerRepository::new(env.connection.clone());
        let meta_repo = MetaRepository::new(env.connection.clone());

        Ok(Self {
            env,
            month_repo,
            fixed_expense_repo,
            ledger_repo,
            meta_repo,
        })
    }
}

/// Build a valid entry for tests without going through an id generator.
pub fn sample_entry(id: u64, description: &str, amount: f64) -> Entry {
    Entry::new(id, description, amount, None).unwrap()
}

/// Build a ledger record with the derived columns filled in directly.
pub fn sample_record(
    id: u64,
    year: i32,
    month_name: &str,
    saved_this_month: f64,
    cumulative: f64,
) -> ClosedMonthRecord {
    ClosedMonthRecord {
        id,
        year,
        month_name: month_name.to_string(),
        income: saved_this_month.max(0.0),
        expense: (-saved_this_month).max(0.0),
        saved_this_month,
        cumulative,
    }
}
