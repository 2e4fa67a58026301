use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::catalog::{ColumnInfo, Timestamp};

/// Column name -> column metadata, in document order.
pub type TableSchema = IndexMap<String, ColumnInfo>;

/// A table entry of the catalog snapshot.
///
/// Nested fields of structured columns are stored as dotted names
/// (`address.city`) next to their parent entry (`address`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub created_at: Timestamp,
    #[serde(default)]
    pub schema: TableSchema,
}

impl Table {
    pub fn column_count(&self) -> usize {
        self.schema.len()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.schema.contains_key(name)
    }
}
