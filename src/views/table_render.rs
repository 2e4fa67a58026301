use serde::Serialize;

use crate::{
    catalog::Table,
    views::{FormattedColumn, Locale, format_schema},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRenderData {
    pub name: String,
    pub formatted_date: String,
    pub column_count: usize,
    pub schema_entries: Vec<FormattedColumn>,
}

pub fn prepare_table_for_render(table: &Table, locale: Locale) -> TableRenderData {
    let schema_entries = format_schema(&table.schema, locale);

    TableRenderData {
        name: table.name.clone(),
        formatted_date: locale.format_date(table.created_at.as_datetime()),
        column_count: schema_entries.len(),
        schema_entries,
    }
}

pub fn prepare_dataset_tables_for_render(tables: &[Table], locale: Locale) -> Vec<TableRenderData> {
    tables
        .iter()
        .map(|table| prepare_table_for_render(table, locale))
        .collect()
}
