//! Domain models: entries, month buckets, closed-month records, backups.

pub mod backup;
pub mod closed_month;
pub mod entry;
pub mod month;

pub use backup::BackupDocument;
pub use closed_month::ClosedMonthRecord;
pub use entry::{BucketKind, Entry, IdGenerator};
pub use month::{MonthBucket, MonthDatabase, MonthKey, MONTH_NAMES};
