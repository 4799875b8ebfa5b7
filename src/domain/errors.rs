//! Typed error kinds surfaced by the domain services.
//!
//! Deleting or re-noting an id that no longer exists is deliberately *not* an
//! error: those operations report a `deleted`/`updated` flag in their result
//! instead, matching the forgiving behavior users expect from repeated
//! clicks. Only conditions a caller must handle differently get a variant.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BudgetError {
    /// Entry description was empty or whitespace-only.
    #[error("description must not be empty")]
    EmptyDescription,

    /// Entry amount was negative, NaN, or infinite.
    #[error("amount must be a finite non-negative number, got {0}")]
    InvalidAmount(f64),

    /// Backup document was unreadable or missing a required top-level key.
    #[error("malformed backup document: {0}")]
    MalformedBackup(String),
}
