//! Model for a finalized month in the ledger.

use serde::{Deserialize, Serialize};

/// Snapshot of one month's totals, captured at the moment the month was
/// closed.
///
/// `cumulative` is the running sum of `saved_this_month` in ledger append
/// order. The ledger is never re-sorted by calendar date, so closing months
/// out of order produces a cumulative sequence in close order, and deleting
/// a record leaves the stored values of every other record untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosedMonthRecord {
    pub id: u64,
    pub year: i32,
    pub month_name: String,
    pub income: f64,
    pub expense: f64,
    pub saved_this_month: f64,
    pub cumulative: f64,
}

impl ClosedMonthRecord {
    /// Display label, e.g. "March 2025".
    pub fn label(&self) -> String {
        format!("{} {}", self.month_name, self.year)
    }
}
