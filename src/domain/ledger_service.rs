//! Closed-month ledger management.
//!
//! Closing a month snapshots its freshly recomputed totals into an
//! append-ordered ledger and extends the running cumulative balance.
//! Records keep whatever cumulative value they were written with: deleting
//! a record deliberately does not rewrite its successors, and only the
//! explicit recompute operation replays the running total.

use anyhow::Result;
use log::{debug, info, warn};
use std::sync::Arc;

use crate::domain::aggregate_service::AggregateService;
use crate::domain::commands::ledger::{
    CloseMonthCommand, CloseMonthResult, DeleteRecordCommand, DeleteRecordResult,
    RecomputeLedgerResult,
};
use crate::domain::entry_service::EntryService;
use crate::domain::fixed_expense_service::FixedExpenseService;
use crate::domain::models::closed_month::ClosedMonthRecord;
use crate::domain::models::entry::IdGenerator;
use crate::domain::models::month::MonthKey;
use crate::storage::traits::{Connection, LedgerStorage};

/// Tolerance when comparing stored against replayed cumulative values.
/// Allows for small floating point differences.
const CUMULATIVE_EPSILON: f64 = 0.001;

#[derive(Clone)]
pub struct LedgerService<C: Connection> {
    ledger_repository: C::LedgerRepository,
    entry_service: EntryService<C>,
    fixed_expense_service: FixedExpenseService<C>,
    aggregate_service: AggregateService,
    id_generator: IdGenerator,
}

impl<C: Connection> LedgerService<C> {
    pub fn new(
        connection: Arc<C>,
        entry_service: EntryService<C>,
        fixed_expense_service: FixedExpenseService<C>,
        aggregate_service: AggregateService,
        id_generator: IdGenerator,
    ) -> Self {
        let ledger_repository = connection.create_ledger_repository();
        Self {
            ledger_repository,
            entry_service,
            fixed_expense_service,
            aggregate_service,
            id_generator,
        }
    }

    /// Finalize a month: recompute its totals from live data and append a
    /// record carrying the new running cumulative.
    ///
    /// `saved_this_month` is income minus expenses. Manual savings entries
    /// are transfers, not spending, so they do not change it. Closing is
    /// permitted for any month, empty or already closed; closing twice
    /// appends a second record.
    pub fn close_month(&self, command: CloseMonthCommand) -> Result<CloseMonthResult> {
        let key = command.month_key;

        if self.is_month_closed(&key)? {
            warn!("{} was already closed; appending another record", key);
        }

        let bucket = self.entry_service.get_bucket(&key)?;
        let fixed_expenses = self.fixed_expense_service.list_fixed_expenses()?;
        let aggregate = self.aggregate_service.compute_aggregate(&bucket, &fixed_expenses);

        let saved_this_month = aggregate.income_total - aggregate.expense_total;
        let previous_cumulative = self
            .ledger_repository
            .last_record()?
            .map(|record| record.cumulative)
            .unwrap_or(0.0);
        let cumulative = previous_cumulative + saved_this_month;

        let record = ClosedMonthRecord {
            id: self.id_generator.next_id(),
            year: key.year,
            month_name: key.month_name().to_string(),
            income: aggregate.income_total,
            expense: aggregate.expense_total,
            saved_this_month,
            cumulative,
        };
        self.ledger_repository.append_record(&record)?;

        info!(
            "Closed {}: income {:.2}, expenses {:.2}, saved {:.2}, cumulative {:.2}",
            key, record.income, record.expense, saved_this_month, cumulative
        );
        let success_message = format!("Closed {}: saved {:.2} this month", key, saved_this_month);
        Ok(CloseMonthResult {
            record,
            success_message,
        })
    }

    /// Remove a record by id. Unknown ids are a no-op. The stored
    /// cumulative values of every other record are left as they are; run
    /// `recompute_cumulative` afterwards if a consistent column is wanted.
    pub fn delete_record(&self, command: DeleteRecordCommand) -> Result<DeleteRecordResult> {
        let deleted = self.ledger_repository.delete_record(command.record_id)?;

        if deleted {
            info!("Deleted ledger record {}", command.record_id);
        } else {
            warn!("Delete of ledger record {} found nothing", command.record_id);
        }
        Ok(DeleteRecordResult { deleted })
    }

    /// All closed-month records in close order.
    pub fn list_records(&self) -> Result<Vec<ClosedMonthRecord>> {
        self.ledger_repository.list_records()
    }

    /// Whether at least one record for this month exists. Callers use this
    /// to flag repeat closes; closing itself never refuses.
    pub fn is_month_closed(&self, key: &MonthKey) -> Result<bool> {
        let records = self.ledger_repository.list_records()?;
        Ok(records
            .iter()
            .any(|record| record.year == key.year && record.month_name == key.month_name()))
    }

    /// Replay `saved_this_month` over the ledger in append order and
    /// rewrite the cumulative column.
    ///
    /// The algorithm:
    /// 1. Walk the records in stored (close) order, never re-sorting
    /// 2. Keep a running total of `saved_this_month`
    /// 3. Overwrite each record's cumulative with the running total
    /// 4. Persist the full ledger once at the end
    pub fn recompute_cumulative(&self) -> Result<RecomputeLedgerResult> {
        let mut records = self.ledger_repository.list_records()?;

        if records.is_empty() {
            info!("Ledger is empty, no cumulative recompute needed");
            return Ok(RecomputeLedgerResult {
                updated_count: 0,
                record_count: 0,
                success_message: "Ledger is empty".to_string(),
            });
        }

        let mut running_total = 0.0;
        let mut updated_count = 0;

        for record in &mut records {
            running_total += record.saved_this_month;
            if (record.cumulative - running_total).abs() > CUMULATIVE_EPSILON {
                debug!(
                    "Record {} ({}): cumulative {:.2} -> {:.2}",
                    record.id,
                    record.label(),
                    record.cumulative,
                    running_total
                );
                updated_count += 1;
            }
            record.cumulative = running_total;
        }

        self.ledger_repository.replace_records(&records)?;

        info!(
            "Recomputed cumulative balances: {} of {} records updated",
            updated_count,
            records.len()
        );
        Ok(RecomputeLedgerResult {
            updated_count,
            record_count: records.len(),
            success_message: format!(
                "Recomputed cumulative balances for {} records ({} updated)",
                records.len(),
                updated_count
            ),
        })
    }

    /// Check the cumulative column against a replay of the ledger, without
    /// modifying anything. Returns one message per inconsistent record.
    pub fn validate_cumulative(&self) -> Result<Vec<String>> {
        let records = self.ledger_repository.list_records()?;
        let mut errors = Vec::new();
        let mut running_total = 0.0;

        for record in &records {
            running_total += record.saved_this_month;
            if (record.cumulative - running_total).abs() > CUMULATIVE_EPSILON {
                let error = format!(
                    "Record {} ({}): stored cumulative {:.2} but replay gives {:.2}",
                    record.id,
                    record.label(),
                    record.cumulative,
                    running_total
                );
                warn!("{}", error);
                errors.push(error);
            }
        }

        if errors.is_empty() {
            info!("All {} ledger records have consistent cumulatives", records.len());
        } else {
            warn!(
                "Found {} inconsistent cumulatives in {} ledger records",
                errors.len(),
                records.len()
            );
        }
        Ok(errors)
    }
}
