//! # Domain Module
//!
//! Contains all business logic for the monthly budget tracker.
//!
//! This module encapsulates the core business rules, entities, and services
//! that define how budget months are modeled, aggregated, and finalized. It
//! operates independently of any UI framework or storage mechanism.
//!
//! ## Module Organization
//!
//! - **entry_service**: Per-month income/expense/savings entry operations
//! - **fixed_expense_service**: The global recurring-expense registry
//! - **aggregate_service**: Pure monthly totals and category breakdowns
//! - **ledger_service**: Closing months into the append-ordered ledger
//! - **backup_service**: JSON backup export/import and ledger CSV rendering
//!
//! ## Core Concepts
//!
//! - **Entry**: A single income, expense, or savings record
//! - **Month Bucket**: The three entry lists belonging to one month
//! - **Fixed Expense**: A recurring cost charged to every month
//! - **Closed Month**: A finalized month's captured totals in the ledger
//! - **Cumulative Balance**: Running sum of monthly savings in close order
//!
//! ## Business Rules
//!
//! - Entries must have non-empty descriptions and finite non-negative amounts
//! - Aggregates are always recomputed from live data, never cached
//! - Closing a month is permitted at any time, even twice or with no entries
//! - The ledger keeps close order; deletes never rewrite other records
//! - Deleting or re-noting an unknown id is a silent no-op, not an error

pub mod aggregate_service;
pub mod backup_service;
pub mod commands;
pub mod entry_service;
pub mod errors;
pub mod fixed_expense_service;
pub mod ledger_service;
pub mod models;

pub use aggregate_service::{AggregateService, MonthlyAggregate};
pub use backup_service::BackupService;
pub use entry_service::EntryService;
pub use errors::BudgetError;
pub use fixed_expense_service::FixedExpenseService;
pub use ledger_service::LedgerService;
