use serde::{Deserialize, Serialize};

use crate::catalog::ColumnType;

/// Declared type and optional documentation of one schema column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    #[serde(rename = "type")]
    pub ty: ColumnType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ColumnInfo {
    pub fn new(ty: ColumnType, description: Option<&str>) -> Self {
        Self {
            ty,
            description: description.map(str::to_string),
        }
    }

    /// The column description, or `placeholder` when it is missing or blank.
    pub fn description_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        match self.description.as_deref() {
            Some(text) if !text.trim().is_empty() => text,
            _ => placeholder,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_description_or_placeholder() {
        let missing = ColumnInfo::new(ColumnType::String, None);
        let blank = ColumnInfo::new(ColumnType::String, Some("   "));
        let present = ColumnInfo::new(ColumnType::String, Some("Customer name"));

        assert_eq!(missing.description_or("n/a"), "n/a");
        assert_eq!(blank.description_or("n/a"), "n/a");
        assert_eq!(present.description_or("n/a"), "Customer name");
    }

    #[test]
    fn test_deserialize_without_description() {
        let info: ColumnInfo = serde_json::from_value(json!({ "type": "STRING" })).unwrap();
        assert_eq!(info.ty, ColumnType::String);
        assert!(info.description.is_none());
    }
}
