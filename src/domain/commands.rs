//! Domain-level command and result types
//! These structs are used by services inside the domain layer. A rendering
//! layer (CLI, GUI, web) is responsible for mapping its own input types onto
//! these internal types.

pub mod entries {
    use crate::domain::models::entry::BucketKind;
    use crate::domain::models::month::MonthKey;

    /// Input for adding an entry to one list of a month's bucket.
    #[derive(Debug, Clone)]
    pub struct AddEntryCommand {
        pub month_key: MonthKey,
        pub kind: BucketKind,
        pub description: String,
        pub amount: f64,
        pub note: Option<String>,
    }

    /// Input for deleting an entry by id.
    #[derive(Debug, Clone)]
    pub struct DeleteEntryCommand {
        pub month_key: MonthKey,
        pub kind: BucketKind,
        pub entry_id: u64,
    }

    /// Result of a delete. An unknown id is a no-op, reported here.
    #[derive(Debug, Clone)]
    pub struct DeleteEntryResult {
        pub deleted: bool,
    }

    /// Input for replacing an entry's note.
    #[derive(Debug, Clone)]
    pub struct UpdateNoteCommand {
        pub month_key: MonthKey,
        pub kind: BucketKind,
        pub entry_id: u64,
        pub note: Option<String>,
    }

    /// Result of a note update. An unknown id is a no-op, reported here.
    #[derive(Debug, Clone)]
    pub struct UpdateNoteResult {
        pub updated: bool,
    }
}

pub mod fixed_expenses {
    /// Input for registering a recurring expense charged to every month.
    #[derive(Debug, Clone)]
    pub struct AddFixedExpenseCommand {
        pub description: String,
        pub amount: f64,
        pub note: Option<String>,
    }

    /// Input for removing a recurring expense by id.
    #[derive(Debug, Clone)]
    pub struct DeleteFixedExpenseCommand {
        pub entry_id: u64,
    }

    /// Result of a delete. An unknown id is a no-op, reported here.
    #[derive(Debug, Clone)]
    pub struct DeleteFixedExpenseResult {
        pub deleted: bool,
    }

    /// Input for replacing a recurring expense's note.
    #[derive(Debug, Clone)]
    pub struct UpdateFixedExpenseNoteCommand {
        pub entry_id: u64,
        pub note: Option<String>,
    }

    /// Result of a note update. An unknown id is a no-op, reported here.
    #[derive(Debug, Clone)]
    pub struct UpdateFixedExpenseNoteResult {
        pub updated: bool,
    }
}

pub mod ledger {
    use crate::domain::models::closed_month::ClosedMonthRecord;
    use crate::domain::models::month::MonthKey;

    /// Input for finalizing a month into the ledger.
    #[derive(Debug, Clone)]
    pub struct CloseMonthCommand {
        pub month_key: MonthKey,
    }

    /// Result of closing a month.
    #[derive(Debug, Clone)]
    pub struct CloseMonthResult {
        pub record: ClosedMonthRecord,
        pub success_message: String,
    }

    /// Input for removing a closed-month record by id.
    #[derive(Debug, Clone)]
    pub struct DeleteRecordCommand {
        pub record_id: u64,
    }

    /// Result of a record delete. An unknown id is a no-op, reported here.
    #[derive(Debug, Clone)]
    pub struct DeleteRecordResult {
        pub deleted: bool,
    }

    /// Result of explicitly recomputing the cumulative column.
    #[derive(Debug, Clone)]
    pub struct RecomputeLedgerResult {
        pub updated_count: usize,
        pub record_count: usize,
        pub success_message: String,
    }
}

pub mod backup {
    use crate::domain::models::backup::BackupDocument;

    /// A backup document paired with its suggested download filename.
    #[derive(Debug, Clone)]
    pub struct BackupPayload {
        pub document: BackupDocument,
        pub filename: String,
    }

    /// Input for importing a backup document, replacing all persisted state.
    #[derive(Debug, Clone)]
    pub struct ImportBackupCommand {
        pub json: String,
    }

    /// Result of a completed import.
    #[derive(Debug, Clone)]
    pub struct ImportBackupResult {
        pub months_imported: usize,
        pub fixed_expenses_imported: usize,
        pub records_imported: usize,
        pub success_message: String,
    }

    /// CSV rendering of the closed-month ledger.
    #[derive(Debug, Clone)]
    pub struct LedgerCsvExport {
        pub csv_content: String,
        pub filename: String,
        pub record_count: usize,
    }
}
