//! Entry service domain logic for the budget tracker.
//!
//! Owns the per-month income/expense/savings lists: validated creation,
//! note edits, and silent-no-op deletes. Every mutation persists the full
//! month database before returning.

use anyhow::Result;
use log::{info, warn};
use std::sync::Arc;

use crate::domain::commands::entries::{
    AddEntryCommand, DeleteEntryCommand, DeleteEntryResult, UpdateNoteCommand, UpdateNoteResult,
};
use crate::domain::models::entry::{normalize_note, BucketKind, Entry, IdGenerator};
use crate::domain::models::month::{MonthBucket, MonthKey};
use crate::storage::traits::{Connection, MonthStorage};

#[derive(Clone)]
pub struct EntryService<C: Connection> {
    month_repository: C::MonthRepository,
    id_generator: IdGenerator,
}

impl<C: Connection> EntryService<C> {
    pub fn new(connection: Arc<C>, id_generator: IdGenerator) -> Self {
        let month_repository = connection.create_month_repository();
        Self {
            month_repository,
            id_generator,
        }
    }

    /// Validate and append a new entry to one list of a month's bucket.
    ///
    /// Validation happens before anything is written; a rejected command
    /// leaves the persisted database exactly as it was.
    pub fn add_entry(&self, command: AddEntryCommand) -> Result<Entry> {
        let entry = Entry::new(
            self.id_generator.next_id(),
            &command.description,
            command.amount,
            command.note,
        )?;

        self.month_repository
            .append_entry(&command.month_key, command.kind, &entry)?;

        info!(
            "Added {} entry '{}' ({:.2}) to {}",
            command.kind.label(),
            entry.description,
            entry.amount,
            command.month_key
        );
        Ok(entry)
    }

    /// Delete an entry by id. Unknown ids (e.g. a second click on an
    /// already-deleted row) are a no-op reported through the result flag.
    pub fn delete_entry(&self, command: DeleteEntryCommand) -> Result<DeleteEntryResult> {
        let deleted = self.month_repository.delete_entry(
            &command.month_key,
            command.kind,
            command.entry_id,
        )?;

        if deleted {
            info!(
                "Deleted {} entry {} from {}",
                command.kind.label(),
                command.entry_id,
                command.month_key
            );
        } else {
            warn!(
                "Delete of {} entry {} in {} found nothing",
                command.kind.label(),
                command.entry_id,
                command.month_key
            );
        }
        Ok(DeleteEntryResult { deleted })
    }

    /// Replace an entry's note. The note is trimmed; a note that trims to
    /// nothing clears the field. Unknown ids are a no-op.
    pub fn update_note(&self, command: UpdateNoteCommand) -> Result<UpdateNoteResult> {
        let note = normalize_note(command.note);
        let updated = self.month_repository.update_entry_note(
            &command.month_key,
            command.kind,
            command.entry_id,
            note,
        )?;

        if !updated {
            warn!(
                "Note update for {} entry {} in {} found nothing",
                command.kind.label(),
                command.entry_id,
                command.month_key
            );
        }
        Ok(UpdateNoteResult { updated })
    }

    /// Full bucket for one month; empty when the month was never touched.
    pub fn get_bucket(&self, key: &MonthKey) -> Result<MonthBucket> {
        self.month_repository.get_bucket(key)
    }

    /// One list of a month's bucket, in insertion order.
    pub fn list_entries(&self, key: &MonthKey, kind: BucketKind) -> Result<Vec<Entry>> {
        Ok(self.get_bucket(key)?.entries(kind).to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::BudgetError;
    use crate::storage::json::JsonConnection;

    fn create_test_service() -> (EntryService<JsonConnection>, Arc<JsonConnection>, tempfile::TempDir)
    {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let connection = Arc::new(JsonConnection::new(temp_dir.path()).unwrap());
        let service = EntryService::new(connection.clone(), IdGenerator::new());
        (service, connection, temp_dir)
    }

    fn add_command(key: MonthKey, kind: BucketKind, description: &str, amount: f64) -> AddEntryCommand {
        AddEntryCommand {
            month_key: key,
            kind,
            description: description.to_string(),
            amount,
            note: None,
        }
    }

    #[test]
    fn test_add_entry_persists_in_order_with_increasing_ids() -> Result<()> {
        let (service, _connection, _temp_dir) = create_test_service();
        let key = MonthKey::new(2025, 0)?;

        let first = service.add_entry(add_command(key, BucketKind::Income, "Salary", 5000.0))?;
        let second = service.add_entry(add_command(key, BucketKind::Income, "Bonus", 800.0))?;
        assert!(second.id > first.id);

        let entries = service.list_entries(&key, BucketKind::Income)?;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].description, "Salary");
        assert_eq!(entries[1].description, "Bonus");
        Ok(())
    }

    #[test]
    fn test_add_entry_rejects_blank_description_without_writing() -> Result<()> {
        let (service, _connection, _temp_dir) = create_test_service();
        let key = MonthKey::new(2025, 0)?;

        let err = service
            .add_entry(add_command(key, BucketKind::Income, "   ", 10.0))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BudgetError>(),
            Some(BudgetError::EmptyDescription)
        ));

        assert!(service.get_bucket(&key)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_add_entry_rejects_bad_amounts() -> Result<()> {
        let (service, _connection, _temp_dir) = create_test_service();
        let key = MonthKey::new(2025, 0)?;

        for amount in [-1.0, f64::NAN, f64::INFINITY] {
            let err = service
                .add_entry(add_command(key, BucketKind::Savings, "Deposit", amount))
                .unwrap_err();
            assert!(matches!(
                err.downcast_ref::<BudgetError>(),
                Some(BudgetError::InvalidAmount(_))
            ));
        }
        assert!(service.get_bucket(&key)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_delete_entry_is_silent_noop_for_unknown_id() -> Result<()> {
        let (service, _connection, _temp_dir) = create_test_service();
        let key = MonthKey::new(2025, 0)?;

        let entry = service.add_entry(add_command(key, BucketKind::Savings, "Deposit", 50.0))?;

        let result = service.delete_entry(DeleteEntryCommand {
            month_key: key,
            kind: BucketKind::Savings,
            entry_id: entry.id,
        })?;
        assert!(result.deleted);

        // Second click on the same row: nothing left to delete, no error.
        let result = service.delete_entry(DeleteEntryCommand {
            month_key: key,
            kind: BucketKind::Savings,
            entry_id: entry.id,
        })?;
        assert!(!result.deleted);
        Ok(())
    }

    #[test]
    fn test_update_note_trims_and_clears() -> Result<()> {
        let (service, _connection, _temp_dir) = create_test_service();
        let key = MonthKey::new(2025, 0)?;
        let entry = service.add_entry(add_command(key, BucketKind::Income, "Salary", 5000.0))?;

        let result = service.update_note(UpdateNoteCommand {
            month_key: key,
            kind: BucketKind::Income,
            entry_id: entry.id,
            note: Some("  paid early  ".to_string()),
        })?;
        assert!(result.updated);
        assert_eq!(
            service.list_entries(&key, BucketKind::Income)?[0].note,
            Some("paid early".to_string())
        );

        // A whitespace-only note clears the field.
        service.update_note(UpdateNoteCommand {
            month_key: key,
            kind: BucketKind::Income,
            entry_id: entry.id,
            note: Some("   ".to_string()),
        })?;
        assert_eq!(service.list_entries(&key, BucketKind::Income)?[0].note, None);

        let result = service.update_note(UpdateNoteCommand {
            month_key: key,
            kind: BucketKind::Income,
            entry_id: 999,
            note: None,
        })?;
        assert!(!result.updated);
        Ok(())
    }

    #[test]
    fn test_buckets_are_independent_per_month() -> Result<()> {
        let (service, _connection, _temp_dir) = create_test_service();
        let january = MonthKey::new(2025, 0)?;
        let february = MonthKey::new(2025, 1)?;

        service.add_entry(add_command(january, BucketKind::Income, "Salary", 5000.0))?;

        assert_eq!(service.list_entries(&january, BucketKind::Income)?.len(), 1);
        assert!(service.get_bucket(&february)?.is_empty());
        Ok(())
    }
}
