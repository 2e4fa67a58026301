use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::query::select_query::select_from;

pub const PROJECT_PLACEHOLDER: &str = "projectId";
pub const DATASET_PLACEHOLDER: &str = "datasetId";
pub const TABLE_PLACEHOLDER: &str = "tableId";

/// Name of the query parameter that carries the row limit.
pub const LIMIT_PARAMETER: &str = "limit";

/// Flavour of the generated script; they differ in how credentials are obtained.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnippetLanguage {
    /// Plain Python using application default credentials.
    #[default]
    Python,
    /// Python notebook on Colab, authenticating the interactive user.
    Colab,
}

impl Display for SnippetLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnippetLanguage::Python => f.write_str("python"),
            SnippetLanguage::Colab => f.write_str("colab"),
        }
    }
}

impl FromStr for SnippetLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "python" | "py" => Ok(SnippetLanguage::Python),
            "colab" | "notebook" => Ok(SnippetLanguage::Colab),
            other => Err(format!("unsupported snippet language '{other}'")),
        }
    }
}

/// Credential setup and client construction for `language`.
fn auth_block(language: SnippetLanguage, project: &str) -> String {
    match language {
        SnippetLanguage::Python => format!(
            r#"import google.auth
from google.api_core.exceptions import GoogleAPIError
from google.cloud import bigquery

credentials, _ = google.auth.default(
    scopes=["https://www.googleapis.com/auth/cloud-platform"]
)
client = bigquery.Client(project="{project}", credentials=credentials)"#
        ),
        SnippetLanguage::Colab => format!(
            r#"from google.api_core.exceptions import GoogleAPIError
from google.cloud import bigquery
from google.colab import auth

auth.authenticate_user()
client = bigquery.Client(project="{project}")"#
        ),
    }
}

/// Generate a ready-to-run script that runs the SELECT for the given table.
///
/// The `LIMIT` of the query is bound to the `@limit` parameter with
/// `row_limit` as its value. Missing (or blank) names are replaced with the
/// `projectId` / `datasetId` / `tableId` placeholders so the script is always
/// complete. Names and columns are inserted once and never re-scanned.
pub fn generate_parameterized_snippet<S: AsRef<str>>(
    project: Option<&str>,
    dataset: Option<&str>,
    table: Option<&str>,
    columns: &[S],
    language: SnippetLanguage,
    row_limit: u64,
) -> String {
    let project = name_or(project, PROJECT_PLACEHOLDER);
    let dataset = name_or(dataset, DATASET_PLACEHOLDER);
    let table = name_or(table, TABLE_PLACEHOLDER);

    let auth = auth_block(language, &escape_python_string(project));
    let query = escape_python_block(&format!(
        "{}\nLIMIT @{LIMIT_PARAMETER}",
        select_from(project, dataset, table, columns)
    ));

    format!(
        r#"{auth}

query = """
{query}
"""

job_config = bigquery.QueryJobConfig(
    query_parameters=[
        bigquery.ScalarQueryParameter("{LIMIT_PARAMETER}", "INT64", {row_limit}),
    ]
)

try:
    query_job = client.query(query, job_config=job_config)
    df = query_job.to_dataframe()
    print(f"Bytes processed: {{query_job.total_bytes_processed or 0:,}}")
    print(f"Bytes billed: {{query_job.total_bytes_billed or 0:,}}")
except GoogleAPIError as error:
    raise RuntimeError(f"BigQuery query failed: {{error}}") from error

df.head()
"#
    )
}

fn name_or<'a>(value: Option<&'a str>, placeholder: &'a str) -> &'a str {
    match value.map(str::trim) {
        Some(name) if !name.is_empty() => name,
        _ => placeholder,
    }
}

fn escape_python_string(raw: &str) -> String {
    raw.replace('\\', "\\\\").replace('"', "\\\"")
}

fn escape_python_block(raw: &str) -> String {
    raw.replace('\\', "\\\\").replace("\"\"\"", "\\\"\\\"\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_COLUMNS: [&str; 0] = [];

    #[test]
    fn test_python_snippet_shape() {
        let snippet = generate_parameterized_snippet(
            Some("proj"),
            Some("ds"),
            Some("tbl"),
            &["id", "name"],
            SnippetLanguage::Python,
            250,
        );

        assert!(snippet.starts_with("import google.auth\n"));
        assert!(snippet.contains("google.auth.default("));
        assert!(snippet.contains("client = bigquery.Client(project=\"proj\", credentials=credentials)"));
        assert!(snippet.contains("SELECT\n  id,\n  name\nFROM `proj.ds.tbl`\nLIMIT @limit\n\"\"\""));
        assert!(snippet.contains("bigquery.ScalarQueryParameter(\"limit\", \"INT64\", 250)"));
        assert!(snippet.contains("query_job.total_bytes_processed"));
        assert!(snippet.contains("raise RuntimeError(f\"BigQuery query failed: {error}\") from error"));
        assert!(!snippet.contains("LIMIT 100"));
        assert!(!snippet.contains("{{"));
        assert!(snippet.contains("print(f\"Bytes processed: {query_job.total_bytes_processed or 0:,}\")"));
    }

    #[test]
    fn test_brace_names_are_inserted_verbatim() {
        let snippet = generate_parameterized_snippet(
            Some("p"),
            Some("d"),
            Some("t"),
            &["{{ROW_LIMIT}}", "{query}"],
            SnippetLanguage::Python,
            7,
        );
        assert!(snippet.contains("SELECT\n  `{{ROW_LIMIT}}`,\n  `{query}`\nFROM `p.d.t`"));
        assert!(snippet.contains("bigquery.ScalarQueryParameter(\"limit\", \"INT64\", 7)"));

        let snippet = generate_parameterized_snippet(
            Some("{{QUERY}}"),
            Some("d"),
            Some("t"),
            &NO_COLUMNS,
            SnippetLanguage::Colab,
            7,
        );
        assert!(snippet.contains("client = bigquery.Client(project=\"{{QUERY}}\")"));
        assert_eq!(snippet.matches("SELECT").count(), 1);
    }

    #[test]
    fn test_colab_snippet_uses_interactive_auth() {
        let snippet = generate_parameterized_snippet(
            Some("proj"),
            Some("ds"),
            Some("tbl"),
            &NO_COLUMNS,
            SnippetLanguage::Colab,
            100,
        );

        assert!(snippet.contains("auth.authenticate_user()"));
        assert!(!snippet.contains("google.auth.default"));
        assert!(snippet.contains("SELECT\n  *\nFROM `proj.ds.tbl`"));
    }

    #[test]
    fn test_placeholders_when_names_missing() {
        let snippet = generate_parameterized_snippet(
            None,
            Some("  "),
            None,
            &NO_COLUMNS,
            SnippetLanguage::Python,
            10,
        );

        assert!(snippet.contains("project=\"projectId\""));
        assert!(snippet.contains("FROM `projectId.datasetId.tableId`"));
    }

    #[test]
    fn test_snippet_filters_nested_columns() {
        let snippet = generate_parameterized_snippet(
            Some("p"),
            Some("d"),
            Some("t"),
            &["address", "address.city"],
            SnippetLanguage::Python,
            100,
        );
        assert!(snippet.contains("SELECT\n  address\nFROM"));
        assert!(!snippet.contains("address.city"));
    }

    #[test]
    fn test_reference_backslashes_are_python_safe() {
        let snippet = generate_parameterized_snippet(
            Some("p"),
            Some("d"),
            Some("t`x"),
            &NO_COLUMNS,
            SnippetLanguage::Python,
            100,
        );
        assert!(snippet.contains("FROM `p.d.t\\\\`x`"));
    }

    #[test]
    fn test_language_parsing() {
        assert_eq!("Python".parse::<SnippetLanguage>().unwrap(), SnippetLanguage::Python);
        assert_eq!("notebook".parse::<SnippetLanguage>().unwrap(), SnippetLanguage::Colab);
        assert!("ruby".parse::<SnippetLanguage>().is_err());
    }
}
