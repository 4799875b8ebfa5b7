//! # JSON Storage Module
//!
//! File-based storage implementation persisting each collection as one
//! complete JSON snapshot, plus a small YAML metadata file.
//!
//! ## Features
//!
//! - Whole-file snapshot per collection (`months.json`, `fixed_expenses.json`,
//!   `closed_months.json`)
//! - Every mutation is read-modify-write over the full snapshot
//! - Atomic file writes with temp files
//! - Same storage traits as any alternative backend would implement
//!
//! ## Directory Layout
//!
//! ```text
//! Monthly Budget/
//! ├── store.yaml
//! ├── months.json
//! ├── fixed_expenses.json
//! └── closed_months.json
//! ```

pub mod connection;
pub mod fixed_expense_repository;
pub mod ledger_repository;
pub mod meta_repository;
pub mod month_repository;

#[cfg(test)]
pub mod test_utils;

pub use connection::JsonConnection;
pub use fixed_expense_repository::FixedExpenseRepository;
pub use ledger_repository::LedgerRepository;
pub use meta_repository::{MetaRepository, StoreMeta, DATA_FORMAT_VERSION};
pub use month_repository::MonthRepository;
