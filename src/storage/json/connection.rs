use anyhow::Result;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::storage::json::{FixedExpenseRepository, LedgerRepository, MonthRepository};
use crate::storage::traits::Connection;

/// JsonConnection manages the data directory and the snapshot file paths
/// shared by the repositories.
#[derive(Clone)]
pub struct JsonConnection {
    base_directory: PathBuf,
}

impl JsonConnection {
    /// Open a connection rooted at the given directory, creating the
    /// directory if it doesn't exist.
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Open a connection in the default data directory.
    /// This uses ~/Documents/Monthly Budget, falling back to the home
    /// directory when no Documents folder is available.
    pub fn new_default() -> Result<Self> {
        let parent_dir = match dirs::document_dir() {
            Some(docs_dir) => docs_dir,
            None => dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?,
        };

        let data_dir = parent_dir.join("Monthly Budget");
        info!("Using default data directory: {}", data_dir.display());
        Self::new(data_dir)
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Path of the month database snapshot.
    pub fn months_file_path(&self) -> PathBuf {
        self.base_directory.join("months.json")
    }

    /// Path of the fixed-expense registry snapshot.
    pub fn fixed_expenses_file_path(&self) -> PathBuf {
        self.base_directory.join("fixed_expenses.json")
    }

    /// Path of the closed-month ledger snapshot.
    pub fn closed_months_file_path(&self) -> PathBuf {
        self.base_directory.join("closed_months.json")
    }

    /// Path of the store metadata file.
    pub fn meta_file_path(&self) -> PathBuf {
        self.base_directory.join("store.yaml")
    }

    /// Read a snapshot file, or None when it hasn't been written yet.
    pub(crate) fn read_snapshot(&self, path: &Path) -> Result<Option<String>> {
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    /// Write a snapshot atomically: temp file in the same directory, then
    /// rename over the target so a crash never leaves a half-written file.
    pub(crate) fn write_snapshot(&self, path: &Path, contents: &str) -> Result<()> {
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, contents)?;
        fs::rename(&temp_path, path)?;
        Ok(())
    }
}

impl Connection for JsonConnection {
    type MonthRepository = MonthRepository;
    type FixedExpenseRepository = FixedExpenseRepository;
    type LedgerRepository = LedgerRepository;

    fn create_month_repository(&self) -> MonthRepository {
        MonthRepository::new(self.clone())
    }

    fn create_fixed_expense_repository(&self) -> FixedExpenseRepository {
        FixedExpenseRepository::new(self.clone())
    }

    fn create_ledger_repository(&self) -> LedgerRepository {
        LedgerRepository::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("budget").join("data");
        assert!(!nested.exists());

        let connection = JsonConnection::new(&nested).unwrap();
        assert!(nested.exists());
        assert_eq!(connection.base_directory(), nested.as_path());
    }

    #[test]
    fn test_snapshot_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();
        let path = connection.months_file_path();

        assert_eq!(connection.read_snapshot(&path).unwrap(), None);
        connection.write_snapshot(&path, "{}").unwrap();
        assert_eq!(
            connection.read_snapshot(&path).unwrap(),
            Some("{}".to_string())
        );
    }

    #[test]
    fn test_snapshot_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();
        let path = connection.closed_months_file_path();

        connection.write_snapshot(&path, "[]").unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
    }
}
