//! Backup document: the single-file export/import format.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::errors::BudgetError;

use super::closed_month::ClosedMonthRecord;
use super::entry::Entry;
use super::month::MonthDatabase;

/// One JSON document mirroring the three persisted collections.
///
/// An exported document always carries all three keys. On import the three
/// keys must be present (a document missing one is rejected as malformed),
/// but a `null` value or missing sub-collections inside them read as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackupDocument {
    pub db: MonthDatabase,
    pub fixed: Vec<Entry>,
    pub closed: Vec<ClosedMonthRecord>,
}

impl BackupDocument {
    /// Parse and shape-check a backup document without touching storage.
    pub fn from_json(json: &str) -> Result<Self, BudgetError> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| BudgetError::MalformedBackup(format!("invalid JSON: {}", e)))?;
        let object = value
            .as_object()
            .ok_or_else(|| BudgetError::MalformedBackup("top level is not an object".to_string()))?;
        for key in ["db", "fixed", "closed"] {
            if !object.contains_key(key) {
                return Err(BudgetError::MalformedBackup(format!(
                    "missing top-level key `{}`",
                    key
                )));
            }
        }
        Ok(Self {
            db: collection(object, "db")?,
            fixed: collection(object, "fixed")?,
            closed: collection(object, "closed")?,
        })
    }

    pub fn to_json(&self) -> Result<String, BudgetError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| BudgetError::MalformedBackup(format!("serialization failed: {}", e)))
    }

    /// Largest id used anywhere in the document, if it holds anything.
    /// Id generators are floored past this after a load or import.
    pub fn max_id(&self) -> Option<u64> {
        let fixed_max = self.fixed.iter().map(|entry| entry.id).max();
        let closed_max = self.closed.iter().map(|record| record.id).max();
        [self.db.max_entry_id(), fixed_max, closed_max]
            .into_iter()
            .flatten()
            .max()
    }
}

/// Read one top-level collection, treating JSON `null` as empty.
fn collection<T>(object: &Map<String, Value>, key: &str) -> Result<T, BudgetError>
where
    T: DeserializeOwned + Default,
{
    let value = object.get(key).cloned().unwrap_or(Value::Null);
    let parsed: Option<T> = serde_json::from_value(value)
        .map_err(|e| BudgetError::MalformedBackup(format!("key `{}`: {}", key, e)))?;
    Ok(parsed.unwrap_or_default())
}
