use serde::Serialize;

use crate::{catalog::{Table, TableSchema}, views::Locale};

/// One schema row, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedColumn {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub description: String,
}

/// Flatten a column map into display rows, in schema order.
///
/// Missing or blank descriptions become the locale's placeholder.
pub fn format_schema(schema: &TableSchema, locale: Locale) -> Vec<FormattedColumn> {
    let placeholder = locale.missing_description();

    schema
        .iter()
        .map(|(name, info)| FormattedColumn {
            name: name.clone(),
            ty: info.ty.to_string(),
            description: info.description_or(placeholder).to_string(),
        })
        .collect()
}

pub fn total_columns(tables: &[Table]) -> usize {
    tables.iter().map(Table::column_count).sum()
}
