//! # Storage Module
//!
//! Handles all data persistence for the budget tracker.
//!
//! This module abstracts away the specific storage implementation and
//! provides a consistent interface for persisting and retrieving data. The
//! implementation can be swapped out (a database, a different file format)
//! without affecting the domain logic or any UI layer.
//!
//! ## Key Responsibilities
//!
//! - **Data Persistence**: Saving the month database, fixed-expense registry,
//!   and closed-month ledger to disk
//! - **Data Retrieval**: Loading stored snapshots back into memory
//! - **Storage Abstraction**: One trait per collection, independent of backend
//! - **Connection Management**: Locating the data directory and file paths
//!
//! ## Current Implementation
//!
//! - **Primary Storage**: Whole-file JSON snapshots with atomic writes
//! - **Metadata**: A YAML file stamping the data format version
//!
//! ## Design Principles
//!
//! - **Repository Pattern**: Clean separation between domain and data access
//! - **Interface Segregation**: Focused traits for specific data operations
//! - **Dependency Inversion**: Domain depends on storage abstractions, not
//!   implementations

pub mod json;
pub mod traits;

pub use json::JsonConnection;
pub use traits::{Connection, FixedExpenseStorage, LedgerStorage, MonthStorage};
