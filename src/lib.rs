pub mod catalog;
pub use catalog::{
    CatalogConfig, CatalogDocument, CatalogError, CatalogStore, ColumnInfo, ColumnType, Dataset, DatasetFull,
    DatasetRaw, Table,
};

pub mod views;
pub use views::{FormattedColumn, Locale, StatEntry, TableRenderData};

pub mod query;
pub use query::{
    HighlightLanguage, Highlighter, SnippetLanguage, filter_redundant_nested_columns, generate_parameterized_snippet,
    generate_select_query,
};
