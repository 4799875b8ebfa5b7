//! Month keys and the per-month entry buckets they identify.

use anyhow::{anyhow, Result};
use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::entry::{BucketKind, Entry};

/// Display names indexed by zero-based month.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Composite key identifying one month's bucket.
///
/// `month0` is zero-based (0 = January, 11 = December). Domain code passes
/// this typed key around; the flat `"{year}_{month0}"` string form exists
/// only as the map key inside the persisted month database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month0: u32,
}

impl MonthKey {
    /// Build a key, rejecting month indexes outside `0..=11`.
    pub fn new(year: i32, month0: u32) -> Result<Self> {
        if month0 > 11 {
            return Err(anyhow!("month index out of range: {}", month0));
        }
        Ok(Self { year, month0 })
    }

    /// Key for the month the local clock currently falls in.
    pub fn current() -> Self {
        let now = Local::now();
        Self {
            year: now.year(),
            month0: now.month0(),
        }
    }

    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[self.month0 as usize]
    }

    /// Flat map-key form used by the persisted month database.
    pub fn storage_key(&self) -> String {
        format!("{}_{}", self.year, self.month0)
    }

    /// Parse the flat map-key form back into a typed key.
    pub fn parse_storage_key(key: &str) -> Result<Self> {
        let (year, month0) = key
            .split_once('_')
            .ok_or_else(|| anyhow!("malformed month key: {}", key))?;
        let year: i32 = year
            .parse()
            .map_err(|_| anyhow!("malformed month key: {}", key))?;
        let month0: u32 = month0
            .parse()
            .map_err(|_| anyhow!("malformed month key: {}", key))?;
        Self::new(year, month0).map_err(|_| anyhow!("malformed month key: {}", key))
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month_name(), self.year)
    }
}

/// The three entry lists belonging to one month.
///
/// Every list defaults to empty so documents written before a field existed
/// still deserialize.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthBucket {
    #[serde(default)]
    pub income: Vec<Entry>,
    #[serde(default)]
    pub monthly_expense: Vec<Entry>,
    #[serde(default)]
    pub savings: Vec<Entry>,
}

impl MonthBucket {
    pub fn entries(&self, kind: BucketKind) -> &[Entry] {
        match kind {
            BucketKind::Income => &self.income,
            BucketKind::MonthlyExpense => &self.monthly_expense,
            BucketKind::Savings => &self.savings,
        }
    }

    pub fn entries_mut(&mut self, kind: BucketKind) -> &mut Vec<Entry> {
        match kind {
            BucketKind::Income => &mut self.income,
            BucketKind::MonthlyExpense => &mut self.monthly_expense,
            BucketKind::Savings => &mut self.savings,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.income.is_empty() && self.monthly_expense.is_empty() && self.savings.is_empty()
    }
}

/// The persisted mapping from month to bucket.
///
/// Serializes as a plain JSON object keyed by the `"{year}_{month0}"` form.
/// Buckets come into existence on first write and are kept even when their
/// last entry is deleted, so a month once touched stays addressable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonthDatabase {
    months: BTreeMap<String, MonthBucket>,
}

impl MonthDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bucket for the key, if one has ever been written.
    pub fn bucket(&self, key: &MonthKey) -> Option<&MonthBucket> {
        self.months.get(&key.storage_key())
    }

    /// Bucket for the key, created empty on first access.
    pub fn bucket_mut(&mut self, key: &MonthKey) -> &mut MonthBucket {
        self.months.entry(key.storage_key()).or_default()
    }

    pub fn contains(&self, key: &MonthKey) -> bool {
        self.months.contains_key(&key.storage_key())
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// Largest entry id anywhere in the database, if any entry exists.
    pub fn max_entry_id(&self) -> Option<u64> {
        self.months
            .values()
            .flat_map(|bucket| {
                bucket
                    .income
                    .iter()
                    .chain(&bucket.monthly_expense)
                    .chain(&bucket.savings)
            })
            .map(|entry| entry.id)
            .max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_key_round_trip() {
        let key = MonthKey::new(2025, 0).unwrap();
        assert_eq!(key.storage_key(), "2025_0");
        assert_eq!(MonthKey::parse_storage_key("2025_0").unwrap(), key);
    }

    #[test]
    fn test_storage_key_december() {
        let key = MonthKey::new(2024, 11).unwrap();
        assert_eq!(key.storage_key(), "2024_11");
        assert_eq!(MonthKey::parse_storage_key("2024_11").unwrap(), key);
    }

    #[test]
    fn test_parse_storage_key_rejects_garbage() {
        assert!(MonthKey::parse_storage_key("2025").is_err());
        assert!(MonthKey::parse_storage_key("2025_x").is_err());
        assert!(MonthKey::parse_storage_key("x_3").is_err());
        assert!(MonthKey::parse_storage_key("2025_12").is_err());
    }

    #[test]
    fn test_new_rejects_out_of_range_month() {
        assert!(MonthKey::new(2025, 12).is_err());
        assert!(MonthKey::new(2025, 11).is_ok());
    }

    #[test]
    fn test_current_is_always_a_valid_key() {
        let key = MonthKey::current();
        assert!(key.month0 <= 11);
        assert_eq!(MonthKey::parse_storage_key(&key.storage_key()).unwrap(), key);
    }

    #[test]
    fn test_month_name_and_display() {
        let key = MonthKey::new(2025, 2).unwrap();
        assert_eq!(key.month_name(), "March");
        assert_eq!(key.to_string(), "March 2025");
    }

    #[test]
    fn test_bucket_mut_creates_lazily() {
        let mut database = MonthDatabase::new();
        let key = MonthKey::new(2025, 4).unwrap();
        assert!(!database.contains(&key));
        database.bucket_mut(&key);
        assert!(database.contains(&key));
        assert!(database.bucket(&key).unwrap().is_empty());
    }

    #[test]
    fn test_bucket_deserializes_with_missing_lists() {
        let bucket: MonthBucket = serde_json::from_str(r#"{"income":[]}"#).unwrap();
        assert!(bucket.monthly_expense.is_empty());
        assert!(bucket.savings.is_empty());
    }

    #[test]
    fn test_database_serializes_as_flat_object() {
        let mut database = MonthDatabase::new();
        let key = MonthKey::new(2025, 0).unwrap();
        database.bucket_mut(&key);
        let json = serde_json::to_string(&database).unwrap();
        assert!(json.starts_with(r#"{"2025_0":"#));
    }

    #[test]
    fn test_max_entry_id_spans_all_lists() {
        let mut database = MonthDatabase::new();
        let key = MonthKey::new(2025, 0).unwrap();
        let bucket = database.bucket_mut(&key);
        bucket.income.push(Entry::new(5, "Salary", 100.0, None).unwrap());
        bucket.savings.push(Entry::new(9, "Deposit", 50.0, None).unwrap());
        assert_eq!(database.max_entry_id(), Some(9));
        assert_eq!(MonthDatabase::new().max_entry_id(), None);
    }
}
