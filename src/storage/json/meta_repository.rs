//! # Store Metadata Repository
//!
//! Maintains a small YAML file `store.yaml` at the root of the data
//! directory. It stamps the snapshot files with a format version so future
//! migrations can tell what they are reading.
//!
//! ## File Structure
//!
//! ```text
//! data/
//! ├── store.yaml            ← This module manages this file
//! ├── months.json
//! ├── fixed_expenses.json
//! └── closed_months.json
//! ```
//!
//! ## YAML Format
//!
//! ```yaml
//! data_format_version: "1.0"
//! created_at: "2025-08-21T19:30:00Z"
//! updated_at: "2025-08-21T19:35:00Z"
//! ```

use anyhow::Result;
use chrono::Utc;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::connection::JsonConnection;

/// Format version written into fresh stores.
pub const DATA_FORMAT_VERSION: &str = "1.0";

/// Store metadata structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreMeta {
    /// Data format version for future migrations
    pub data_format_version: String,
    /// When the store was first created
    pub created_at: String,
    /// When the store was last replaced wholesale (e.g. by an import)
    pub updated_at: String,
}

impl Default for StoreMeta {
    fn default() -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            data_format_version: DATA_FORMAT_VERSION.to_string(),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// YAML-file store metadata repository
#[derive(Clone)]
pub struct MetaRepository {
    connection: JsonConnection,
}

impl MetaRepository {
    /// Create a new metadata repository
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }

    /// Load the metadata, creating the default file if it doesn't exist.
    pub fn load_or_create(&self) -> Result<StoreMeta> {
        let meta_path = self.connection.meta_file_path();
        match self.connection.read_snapshot(&meta_path)? {
            Some(contents) => {
                let meta: StoreMeta = serde_yaml::from_str(&contents)?;
                debug!("Loaded store metadata from {:?}", meta_path);
                Ok(meta)
            }
            None => {
                let meta = StoreMeta::default();
                self.save(&meta)?;
                info!("Created store metadata at {:?}", meta_path);
                Ok(meta)
            }
        }
    }

    /// Stamp `updated_at` with the current time.
    pub fn touch(&self) -> Result<()> {
        let mut meta = self.load_or_create()?;
        meta.updated_at = Utc::now().to_rfc3339();
        self.save(&meta)
    }

    fn save(&self, meta: &StoreMeta) -> Result<()> {
        let contents = serde_yaml::to_string(meta)?;
        self.connection
            .write_snapshot(&self.connection.meta_file_path(), &contents)
    }
}
