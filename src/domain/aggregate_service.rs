//! Monthly aggregation logic.
//!
//! Pure derivations over one month's bucket plus the fixed-expense registry.
//! Nothing here is cached or persisted; callers recompute whenever inputs
//! may have changed, which keeps totals impossible to get stale.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::models::entry::Entry;
use crate::domain::models::month::MonthBucket;

/// Derived totals for one month.
///
/// `potential_savings` is what the month leaves over before the user moves
/// anything into savings; `balance` is what remains spendable after the
/// amounts they actually moved (`manual_savings`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAggregate {
    pub income_total: f64,
    pub expense_total: f64,
    pub potential_savings: f64,
    pub manual_savings: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, Default)]
pub struct AggregateService;

impl AggregateService {
    pub fn new() -> Self {
        Self
    }

    /// Compute the five derived totals for a month.
    ///
    /// Fixed expenses count toward `expense_total` exactly like the month's
    /// own expense entries; savings entries are *transfers*, so they reduce
    /// the balance but are not expenses.
    pub fn compute_aggregate(
        &self,
        bucket: &MonthBucket,
        fixed_expenses: &[Entry],
    ) -> MonthlyAggregate {
        let income_total = sum(&bucket.income);
        let expense_total = sum(fixed_expenses) + sum(&bucket.monthly_expense);
        let manual_savings = sum(&bucket.savings);
        let potential_savings = income_total - expense_total;
        let balance = potential_savings - manual_savings;

        MonthlyAggregate {
            income_total,
            expense_total,
            potential_savings,
            manual_savings,
            balance,
        }
    }

    /// Expense totals grouped by description, fixed and monthly combined.
    /// Entries sharing a description are summed into one category.
    pub fn category_breakdown(
        &self,
        bucket: &MonthBucket,
        fixed_expenses: &[Entry],
    ) -> BTreeMap<String, f64> {
        let mut breakdown = BTreeMap::new();
        for entry in fixed_expenses.iter().chain(&bucket.monthly_expense) {
            *breakdown.entry(entry.description.clone()).or_insert(0.0) += entry.amount;
        }
        breakdown
    }
}

fn sum(entries: &[Entry]) -> f64 {
    entries.iter().map(|entry| entry.amount).sum()
}
