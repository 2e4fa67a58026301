use std::path::PathBuf;

use anyhow::{Context, Result};
use catalog_site::{
    CatalogConfig, CatalogStore, HighlightLanguage, Highlighter, Locale, SnippetLanguage, generate_parameterized_snippet,
    generate_select_query,
    query::validate_selection,
    views::{dataset_detail_stats, dataset_list_stats, home_stats, prepare_dataset_tables_for_render},
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "catalog")]
#[command(about = "Browse a dataset catalog snapshot and generate query snippets")]
#[command(version)]
struct Cli {
    #[arg(long, help = "Catalog snapshot file (defaults to CATALOG_SNAPSHOT or data/catalog.json)")]
    snapshot: Option<PathBuf>,

    #[arg(long, help = "Display locale: pt-BR or en-US (defaults to CATALOG_LOCALE or pt-BR)")]
    locale: Option<Locale>,

    #[arg(short, long, help = "Verbose output")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List project keys
    Projects,
    /// List every dataset with table counts and last update
    Datasets,
    /// Show one dataset, looked up by name across projects
    Dataset { name: String },
    /// Render the tables of a dataset
    Tables { name: String },
    /// Home page and dataset list statistics
    Stats,
    /// Print the SELECT for a table
    Query {
        project: String,
        dataset: String,
        table: String,
        #[arg(short, long = "column", help = "Column to select, repeatable")]
        columns: Vec<String>,
        #[arg(long, help = "Fail when a column is not in the table schema")]
        strict: bool,
    },
    /// Print a runnable Python snippet for a table
    Snippet {
        project: Option<String>,
        dataset: Option<String>,
        table: Option<String>,
        #[arg(short, long = "column", help = "Column to select, repeatable")]
        columns: Vec<String>,
        #[arg(long, default_value_t = SnippetLanguage::Python)]
        language: SnippetLanguage,
        #[arg(long, help = "Row limit bound to @limit (defaults to CATALOG_ROW_LIMIT or 100)")]
        limit: Option<u64>,
        #[arg(long, help = "Emit highlighted HTML instead of plain text")]
        highlight: bool,
    },
}

#[derive(Serialize)]
struct DatasetPage<T: Serialize> {
    stats: Vec<catalog_site::StatEntry>,
    #[serde(flatten)]
    body: T,
}

async fn load_store(config: &CatalogConfig) -> Result<CatalogStore> {
    let store = CatalogStore::load_async(config)
        .await
        .with_context(|| format!("loading catalog snapshot {}", config.snapshot_path.display()))?;
    info!("catalog ready ({} projects)", store.project_keys().len());
    Ok(store)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut config = CatalogConfig::from_env();
    if let Some(snapshot) = cli.snapshot {
        config.snapshot_path = snapshot;
    }
    if let Some(locale) = cli.locale {
        config.locale = locale;
    }
    let locale = config.locale;

    match cli.command {
        Command::Projects => {
            let store = load_store(&config).await?;
            print_json(&store.project_keys())?;
        }
        Command::Datasets => {
            let store = load_store(&config).await?;
            let datasets = store.list_datasets();
            print_json(&DatasetPage {
                stats: dataset_list_stats(&datasets, locale),
                body: serde_json::json!({ "datasets": datasets }),
            })?;
        }
        Command::Dataset { name } => {
            let store = load_store(&config).await?;
            let dataset = store.find_dataset_by_name(&name)?;
            print_json(&DatasetPage {
                stats: dataset_detail_stats(&dataset, locale),
                body: dataset,
            })?;
        }
        Command::Tables { name } => {
            let store = load_store(&config).await?;
            let dataset = store.find_dataset_by_name(&name)?;
            print_json(&prepare_dataset_tables_for_render(&dataset.tables, locale))?;
        }
        Command::Stats => {
            let store = load_store(&config).await?;
            print_json(&home_stats(&store, locale))?;
        }
        Command::Query { project, dataset, table, columns, strict } => {
            if strict {
                let store = load_store(&config).await?;
                let schema = store.find_table(&project, &dataset, &table)?;
                validate_selection(schema, &columns)?;
            }
            println!("{}", generate_select_query(&project, &dataset, &table, &columns));
        }
        Command::Snippet { project, dataset, table, columns, language, limit, highlight } => {
            let snippet = generate_parameterized_snippet(
                project.as_deref(),
                dataset.as_deref(),
                table.as_deref(),
                &columns,
                language,
                limit.unwrap_or(config.row_limit),
            );
            if highlight {
                println!("{}", Highlighter::shared().highlight(&snippet, HighlightLanguage::Python));
            } else {
                println!("{snippet}");
            }
        }
    }

    Ok(())
}
