//! Fixed-expense registry domain logic.
//!
//! Fixed expenses are recurring costs (rent, subscriptions) registered once
//! and charged to every month the aggregator computes. The registry is
//! global: it is not keyed by month and has no month-specific overrides.

use anyhow::Result;
use log::{info, warn};
use std::sync::Arc;

use crate::domain::commands::fixed_expenses::{
    AddFixedExpenseCommand, DeleteFixedExpenseCommand, DeleteFixedExpenseResult,
    UpdateFixedExpenseNoteCommand, UpdateFixedExpenseNoteResult,
};
use crate::domain::models::entry::{normalize_note, Entry, IdGenerator};
use crate::storage::traits::{Connection, FixedExpenseStorage};

#[derive(Clone)]
pub struct FixedExpenseService<C: Connection> {
    fixed_expense_repository: C::FixedExpenseRepository,
    id_generator: IdGenerator,
}

impl<C: Connection> FixedExpenseService<C> {
    pub fn new(connection: Arc<C>, id_generator: IdGenerator) -> Self {
        let fixed_expense_repository = connection.create_fixed_expense_repository();
        Self {
            fixed_expense_repository,
            id_generator,
        }
    }

    /// Validate and register a recurring expense. Takes effect for every
    /// month immediately, including months already begun.
    pub fn add_fixed_expense(&self, command: AddFixedExpenseCommand) -> Result<Entry> {
        let entry = Entry::new(
            self.id_generator.next_id(),
            &command.description,
            command.amount,
            command.note,
        )?;

        self.fixed_expense_repository.append_fixed_expense(&entry)?;
        info!(
            "Registered fixed expense '{}' ({:.2})",
            entry.description, entry.amount
        );
        Ok(entry)
    }

    /// Remove a recurring expense by id. Takes effect for every month that
    /// has not been closed; already-closed records keep their captured
    /// totals. Unknown ids are a no-op.
    pub fn delete_fixed_expense(
        &self,
        command: DeleteFixedExpenseCommand,
    ) -> Result<DeleteFixedExpenseResult> {
        let deleted = self
            .fixed_expense_repository
            .delete_fixed_expense(command.entry_id)?;

        if deleted {
            info!("Deleted fixed expense {}", command.entry_id);
        } else {
            warn!("Delete of fixed expense {} found nothing", command.entry_id);
        }
        Ok(DeleteFixedExpenseResult { deleted })
    }

    /// Replace a recurring expense's note. Unknown ids are a no-op.
    pub fn update_note(
        &self,
        command: UpdateFixedExpenseNoteCommand,
    ) -> Result<UpdateFixedExpenseNoteResult> {
        let note = normalize_note(command.note);
        let updated = self
            .fixed_expense_repository
            .update_fixed_expense_note(command.entry_id, note)?;

        if !updated {
            warn!(
                "Note update for fixed expense {} found nothing",
                command.entry_id
            );
        }
        Ok(UpdateFixedExpenseNoteResult { updated })
    }

    /// All registered fixed expenses in insertion order.
    pub fn list_fixed_expenses(&self) -> Result<Vec<Entry>> {
        self.fixed_expense_repository.list_fixed_expenses()
    }
}
