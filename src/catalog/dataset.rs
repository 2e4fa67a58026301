use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogError, Table};

/// Dataset entry as stored in the snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetRaw {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tables: Vec<Table>,
}

impl DatasetRaw {
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Most recent table creation time, in epoch milliseconds.
    pub fn last_updated(&self) -> Option<i64> {
        self.tables.iter().map(|table| table.created_at.epoch_millis()).max()
    }

    /// Same as [`DatasetRaw::last_updated`] but a dataset without tables is an
    /// `EmptyAggregate` error instead of `None`.
    pub fn last_updated_millis(&self, dataset: &str) -> Result<i64, CatalogError> {
        self.last_updated()
            .ok_or_else(|| CatalogError::EmptyAggregate { dataset: dataset.to_string() })
    }
}

/// Aggregated listing entry for one dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub name: String,
    pub project: String,
    pub description: String,
    pub table_count: usize,
    /// Epoch milliseconds of the newest table, `None` when the dataset has no tables
    pub last_updated: Option<i64>,
}

impl Dataset {
    pub fn from_raw(project: &str, name: &str, raw: &DatasetRaw) -> Self {
        Self {
            name: name.to_string(),
            project: project.to_string(),
            description: raw.description.clone(),
            table_count: raw.table_count(),
            last_updated: raw.last_updated(),
        }
    }
}

/// A dataset with its complete table list and owning project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetFull {
    pub name: String,
    pub project: String,
    pub description: String,
    pub tables: Vec<Table>,
}

impl DatasetFull {
    pub fn from_raw(project: &str, name: &str, raw: &DatasetRaw) -> Self {
        Self {
            name: name.to_string(),
            project: project.to_string(),
            description: raw.description.clone(),
            tables: raw.tables.clone(),
        }
    }
}
