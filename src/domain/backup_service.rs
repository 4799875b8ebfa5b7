//! Backup and export domain logic.
//!
//! Produces the single-document JSON backup mirroring the three persisted
//! collections, restores state from such a document, and renders the
//! closed-month ledger as CSV. File dialogs and actual disk writes are the
//! caller's concern; this service only produces content plus a suggested
//! filename.

use anyhow::Result;
use chrono::Utc;
use log::{info, warn};
use std::sync::Arc;

use crate::domain::commands::backup::{
    BackupPayload, ImportBackupCommand, ImportBackupResult, LedgerCsvExport,
};
use crate::domain::models::backup::BackupDocument;
use crate::storage::traits::{Connection, FixedExpenseStorage, LedgerStorage, MonthStorage};

#[derive(Clone)]
pub struct BackupService<C: Connection> {
    month_repository: C::MonthRepository,
    fixed_expense_repository: C::FixedExpenseRepository,
    ledger_repository: C::LedgerRepository,
}

impl<C: Connection> BackupService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            month_repository: connection.create_month_repository(),
            fixed_expense_repository: connection.create_fixed_expense_repository(),
            ledger_repository: connection.create_ledger_repository(),
        }
    }

    /// Current state of all three collections as one document. Also used at
    /// startup to learn the highest persisted id.
    pub fn current_document(&self) -> Result<BackupDocument> {
        Ok(BackupDocument {
            db: self.month_repository.load_database()?,
            fixed: self.fixed_expense_repository.list_fixed_expenses()?,
            closed: self.ledger_repository.list_records()?,
        })
    }

    /// Snapshot all three collections into one backup document with a
    /// date-stamped filename.
    pub fn export(&self) -> Result<BackupPayload> {
        let document = self.current_document()?;
        let filename = format!("budget_backup_{}.json", Utc::now().format("%Y-%m-%d"));

        info!(
            "Exported backup '{}': {} months, {} fixed expenses, {} ledger records",
            filename,
            document.db.len(),
            document.fixed.len(),
            document.closed.len()
        );
        Ok(BackupPayload { document, filename })
    }

    /// The backup document serialized to pretty JSON.
    pub fn export_json(&self) -> Result<String> {
        Ok(self.export()?.document.to_json()?)
    }

    /// Replace all persisted state with the contents of a backup document.
    ///
    /// The document is parsed and shape-checked in full before any write; a
    /// malformed document changes nothing. Asking the user to confirm the
    /// overwrite is the caller's job.
    pub fn import(&self, command: ImportBackupCommand) -> Result<ImportBackupResult> {
        let document = match BackupDocument::from_json(&command.json) {
            Ok(document) => document,
            Err(e) => {
                warn!("Rejected backup import: {}", e);
                return Err(e.into());
            }
        };

        self.month_repository.replace_database(&document.db)?;
        self.fixed_expense_repository
            .replace_fixed_expenses(&document.fixed)?;
        self.ledger_repository.replace_records(&document.closed)?;

        let result = ImportBackupResult {
            months_imported: document.db.len(),
            fixed_expenses_imported: document.fixed.len(),
            records_imported: document.closed.len(),
            success_message: format!(
                "Imported {} months, {} fixed expenses, {} ledger records",
                document.db.len(),
                document.fixed.len(),
                document.closed.len()
            ),
        };
        info!("{}", result.success_message);
        Ok(result)
    }

    /// Render the closed-month ledger as a CSV table in close order.
    pub fn export_ledger_csv(&self) -> Result<LedgerCsvExport> {
        let records = self.ledger_repository.list_records()?;

        let mut buffer = Vec::new();
        {
            let mut writer = csv::Writer::from_writer(&mut buffer);
            writer.write_record([
                "month",
                "year",
                "income",
                "expense",
                "saved_this_month",
                "cumulative",
            ])?;
            for record in &records {
                writer.write_record([
                    record.month_name.clone(),
                    record.year.to_string(),
                    format!("{:.2}", record.income),
                    format!("{:.2}", record.expense),
                    format!("{:.2}", record.saved_this_month),
                    format!("{:.2}", record.cumulative),
                ])?;
            }
            writer.flush()?;
        }
        let csv_content = String::from_utf8(buffer)?;
        let filename = format!("budget_ledger_{}.csv", Utc::now().format("%Y%m%d"));

        info!(
            "Exported ledger CSV '{}' with {} records ({} bytes)",
            filename,
            records.len(),
            csv_content.len()
        );
        Ok(LedgerCsvExport {
            csv_content,
            filename,
            record_count: records.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::BudgetError;
    use crate::domain::models::entry::BucketKind;
    use crate::domain::models::month::MonthKey;
    use crate::storage::json::test_utils::{sample_entry, sample_record, TestHelper};
    use crate::storage::json::JsonConnection;

    fn create_test_service() -> (BackupService<JsonConnection>, TestHelper) {
        let helper = TestHelper::new().unwrap();
        let service = BackupService::new(Arc::new(helper.env.connection.clone()));
        (service, helper)
    }

    fn seed_state(helper: &TestHelper) {
        let key = MonthKey::new(2025, 2).unwrap();
        helper
            .month_repo
            .append_entry(&key, BucketKind::Income, &sample_entry(1, "Salary", 5000.0))
            .unwrap();
        helper
            .fixed_expense_repo
            .append_fixed_expense(&sample_entry(2, "Rent", 1200.0))
            .unwrap();
        helper
            .ledger_repo
            .append_record(&sample_record(3, 2025, "February", 3500.0, 3500.0))
            .unwrap();
    }

    #[test]
    fn test_export_mirrors_all_three_collections() -> Result<()> {
        let (service, helper) = create_test_service();
        seed_state(&helper);

        let payload = service.export()?;
        assert_eq!(payload.document.db.len(), 1);
        assert_eq!(payload.document.fixed.len(), 1);
        assert_eq!(payload.document.closed.len(), 1);
        assert!(payload.filename.starts_with("budget_backup_"));
        assert!(payload.filename.ends_with(".json"));
        Ok(())
    }

    #[test]
    fn test_import_round_trip_restores_identical_state() -> Result<()> {
        let (service, helper) = create_test_service();
        seed_state(&helper);

        let exported = service.export_json()?;

        // Wipe into a fresh directory and import there.
        let other = TestHelper::new().unwrap();
        let other_service = BackupService::new(Arc::new(other.env.connection.clone()));
        let result = other_service.import(ImportBackupCommand { json: exported.clone() })?;
        assert_eq!(result.months_imported, 1);
        assert_eq!(result.fixed_expenses_imported, 1);
        assert_eq!(result.records_imported, 1);

        assert_eq!(other_service.export_json()?, exported);
        Ok(())
    }

    #[test]
    fn test_import_replaces_existing_state() -> Result<()> {
        let (service, helper) = create_test_service();
        seed_state(&helper);

        service.import(ImportBackupCommand {
            json: r#"{"db": {}, "fixed": [], "closed": []}"#.to_string(),
        })?;

        let payload = service.export()?;
        assert!(payload.document.db.is_empty());
        assert!(payload.document.fixed.is_empty());
        assert!(payload.document.closed.is_empty());
        Ok(())
    }

    #[test]
    fn test_malformed_import_changes_nothing() -> Result<()> {
        let (service, helper) = create_test_service();
        seed_state(&helper);
        let before = service.export_json()?;

        let err = service
            .import(ImportBackupCommand {
                json: r#"{"db": {}, "fixed": []}"#.to_string(),
            })
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BudgetError>(),
            Some(BudgetError::MalformedBackup(_))
        ));

        assert_eq!(service.export_json()?, before);
        Ok(())
    }

    #[test]
    fn test_import_accepts_null_collections_as_empty() -> Result<()> {
        let (service, helper) = create_test_service();
        seed_state(&helper);

        let result = service.import(ImportBackupCommand {
            json: r#"{"db": null, "fixed": null, "closed": null}"#.to_string(),
        })?;
        assert_eq!(result.months_imported, 0);
        assert!(service.export()?.document.fixed.is_empty());
        Ok(())
    }

    #[test]
    fn test_ledger_csv_rendering() -> Result<()> {
        let (service, helper) = create_test_service();
        helper
            .ledger_repo
            .append_record(&sample_record(1, 2025, "January", 3500.0, 3500.0))?;
        helper
            .ledger_repo
            .append_record(&sample_record(2, 2025, "February", -200.0, 3300.0))?;

        let export = service.export_ledger_csv()?;
        assert_eq!(export.record_count, 2);
        assert!(export.filename.starts_with("budget_ledger_"));
        assert!(export.filename.ends_with(".csv"));

        let mut lines = export.csv_content.lines();
        assert_eq!(
            lines.next(),
            Some("month,year,income,expense,saved_this_month,cumulative")
        );
        assert_eq!(lines.next(), Some("January,2025,3500.00,0.00,3500.00,3500.00"));
        assert_eq!(lines.next(), Some("February,2025,0.00,200.00,-200.00,3300.00"));
        Ok(())
    }

    #[test]
    fn test_ledger_csv_for_empty_ledger_is_header_only() -> Result<()> {
        let (service, _helper) = create_test_service();
        let export = service.export_ledger_csv()?;
        assert_eq!(export.record_count, 0);
        assert_eq!(
            export.csv_content.trim_end(),
            "month,year,income,expense,saved_this_month,cumulative"
        );
        Ok(())
    }
}
