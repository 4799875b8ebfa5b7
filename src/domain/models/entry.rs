//! Core entry model shared by month buckets and the fixed-expense registry.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::domain::errors::BudgetError;

/// Which of the three per-month entry lists an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BucketKind {
    Income,
    MonthlyExpense,
    Savings,
}

impl BucketKind {
    /// Short label used in log messages.
    pub fn label(&self) -> &'static str {
        match self {
            BucketKind::Income => "income",
            BucketKind::MonthlyExpense => "monthly expense",
            BucketKind::Savings => "savings",
        }
    }
}

/// A single income, expense, or savings record.
///
/// Description and amount are immutable after creation; only the note can be
/// edited in place. Anything else is changed by delete plus re-add.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: u64,
    pub description: String,
    pub amount: f64,
    #[serde(default)]
    pub note: Option<String>,
}

impl Entry {
    /// Validating constructor. Rejects blank descriptions and amounts that
    /// are negative or not finite. Descriptions and notes are trimmed, and a
    /// note that trims to nothing becomes `None`.
    pub fn new(
        id: u64,
        description: &str,
        amount: f64,
        note: Option<String>,
    ) -> Result<Self, BudgetError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(BudgetError::EmptyDescription);
        }
        if !amount.is_finite() || amount < 0.0 {
            return Err(BudgetError::InvalidAmount(amount));
        }
        Ok(Self {
            id,
            description: description.to_string(),
            amount,
            note: normalize_note(note),
        })
    }
}

/// Trim a note and drop it entirely when nothing remains.
pub fn normalize_note(note: Option<String>) -> Option<String> {
    note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())
}

/// Monotonic id source owned by the application state.
///
/// Ids are seeded from the epoch-millisecond clock so they roughly sort by
/// creation time, but each call is bumped past the previously issued id, so
/// ids stay unique even when several entries are created within the same
/// millisecond. Cloning shares the underlying counter.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last_issued: Arc<Mutex<u64>>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next id: current epoch milliseconds, or one past the last
    /// issued id when the clock has not advanced.
    pub fn next_id(&self) -> u64 {
        let now_millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards")
            .as_millis() as u64;
        let mut last_issued = self.last_issued.lock().unwrap();
        let id = now_millis.max(*last_issued + 1);
        *last_issued = id;
        id
    }

    /// Raise the floor so future ids land above an id seen elsewhere, e.g.
    /// ids loaded from disk at startup or brought in by an import.
    pub fn observe(&self, id: u64) {
        let mut last_issued = self.last_issued.lock().unwrap();
        if id > *last_issued {
            *last_issued = id;
        }
    }
}
