use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    catalog::{CatalogError, Table},
    query::{NESTED_SEPARATOR, filter_redundant_nested_columns},
};

/// Row cap appended to every generated query.
pub const DEFAULT_ROW_LIMIT: u64 = 100;

const INDENT: &str = "  ";

static PLAIN_IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid identifier pattern"));

/// Keywords that cannot appear unquoted as a column name.
const RESERVED_KEYWORDS: &[&str] = &[
    "ALL", "AND", "ANY", "ARRAY", "AS", "ASC", "ASSERT_ROWS_MODIFIED", "AT", "BETWEEN", "BY",
    "CASE", "CAST", "COLLATE", "CONTAINS", "CREATE", "CROSS", "CUBE", "CURRENT", "DEFAULT",
    "DEFINE", "DESC", "DISTINCT", "ELSE", "END", "ENUM", "ESCAPE", "EXCEPT", "EXCLUDE", "EXISTS",
    "EXTRACT", "FALSE", "FETCH", "FOLLOWING", "FOR", "FROM", "FULL", "GROUP", "GROUPING",
    "GROUPS", "HASH", "HAVING", "IF", "IGNORE", "IN", "INNER", "INTERSECT", "INTERVAL", "INTO",
    "IS", "JOIN", "LATERAL", "LEFT", "LIKE", "LIMIT", "LOOKUP", "MERGE", "NATURAL", "NEW", "NO",
    "NOT", "NULL", "NULLS", "OF", "ON", "OR", "ORDER", "OUTER", "OVER", "PARTITION", "PRECEDING",
    "PROTO", "QUALIFY", "RANGE", "RECURSIVE", "RESPECT", "RIGHT", "ROLLUP", "ROWS", "SELECT",
    "SET", "SOME", "STRUCT", "TABLESAMPLE", "THEN", "TO", "TREAT", "TRUE", "UNBOUNDED", "UNION",
    "UNNEST", "USING", "WHEN", "WHERE", "WINDOW", "WITH", "WITHIN",
];

/// Backtick-quoted `project.dataset.table` reference.
pub fn table_reference(project: &str, dataset: &str, table: &str) -> String {
    let path = format!("{project}.{dataset}.{table}");
    format!("`{}`", escape_backticks(&path))
}

fn escape_backticks(raw: &str) -> String {
    raw.replace('\\', "\\\\").replace('`', "\\`")
}

fn is_reserved(segment: &str) -> bool {
    RESERVED_KEYWORDS
        .iter()
        .any(|keyword| keyword.eq_ignore_ascii_case(segment))
}

/// Column path as it appears in a SELECT list. Each dotted segment that is a
/// reserved keyword or not a plain identifier is backtick-quoted on its own.
pub fn column_reference(column: &str) -> String {
    column
        .split(NESTED_SEPARATOR)
        .map(|segment| {
            if PLAIN_IDENTIFIER.is_match(segment) && !is_reserved(segment) {
                segment.to_string()
            } else {
                format!("`{}`", escape_backticks(segment))
            }
        })
        .collect::<Vec<_>>()
        .join(".")
}

/// Column list of a SELECT, one column per line, without the keyword itself.
pub(crate) fn projection<S: AsRef<str>>(columns: &[S]) -> String {
    let columns = filter_redundant_nested_columns(columns);
    if columns.is_empty() {
        return format!("{INDENT}*");
    }

    columns
        .iter()
        .map(|column| format!("{INDENT}{}", column_reference(column)))
        .collect::<Vec<_>>()
        .join(",\n")
}

/// Body of the query up to (not including) the LIMIT clause.
pub(crate) fn select_from<S: AsRef<str>>(project: &str, dataset: &str, table: &str, columns: &[S]) -> String {
    format!(
        "SELECT\n{}\nFROM {}",
        projection(columns),
        table_reference(project, dataset, table)
    )
}

/// Build a SELECT over `project.dataset.table`.
///
/// An empty selection reads every column. Redundant nested columns are
/// filtered out and the result is always capped with `LIMIT 100`.
pub fn generate_select_query<S: AsRef<str>>(project: &str, dataset: &str, table: &str, columns: &[S]) -> String {
    format!(
        "{}\nLIMIT {DEFAULT_ROW_LIMIT}",
        select_from(project, dataset, table, columns)
    )
}

/// Check that every selected column exists in `table`'s schema.
///
/// Query generation itself accepts any column name; callers that want to
/// reject stale selections run this first.
pub fn validate_selection<S: AsRef<str>>(table: &Table, columns: &[S]) -> Result<(), CatalogError> {
    match columns.iter().map(AsRef::as_ref).find(|column| !table.has_column(column)) {
        Some(column) => CatalogError::UnsupportedColumnSelection {
            table: table.name.clone(),
            column: column.to_string(),
        }
        .err(),
        None => Ok(()),
    }
}
