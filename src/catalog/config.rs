use std::{env, path::PathBuf};

use tracing::warn;

use crate::{query::DEFAULT_ROW_LIMIT, views::Locale};

pub const DEFAULT_SNAPSHOT_PATH: &str = "data/catalog.json";

/// Settings used when loading the catalog and building views from it.
///
/// - `snapshot_path` is the catalog snapshot file read by `CatalogStore::load`.
/// - `locale` drives dates, placeholders and labels of the views.
/// - `row_limit` is bound to the `@limit` parameter of generated snippets.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogConfig {
    pub snapshot_path: PathBuf,
    pub locale: Locale,
    pub row_limit: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT_PATH),
            locale: Locale::default(),
            row_limit: DEFAULT_ROW_LIMIT,
        }
    }
}

impl CatalogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from(snapshot_path: impl Into<PathBuf>, locale: Locale) -> Self {
        Self {
            snapshot_path: snapshot_path.into(),
            locale,
            ..Self::default()
        }
    }

    pub fn with_row_limit(mut self, row_limit: u64) -> Self {
        self.row_limit = row_limit;
        self
    }

    /// Read `CATALOG_SNAPSHOT`, `CATALOG_LOCALE` and `CATALOG_ROW_LIMIT`,
    /// falling back to the defaults for unset or unusable values.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(path) = env::var("CATALOG_SNAPSHOT") {
            config.snapshot_path = PathBuf::from(path);
        }

        if let Ok(raw) = env::var("CATALOG_LOCALE") {
            match raw.parse() {
                Ok(locale) => config.locale = locale,
                Err(error) => warn!("ignoring CATALOG_LOCALE: {error}"),
            }
        }

        if let Ok(raw) = env::var("CATALOG_ROW_LIMIT") {
            match raw.parse() {
                Ok(limit) => config.row_limit = limit,
                Err(_) => warn!("ignoring CATALOG_ROW_LIMIT: '{raw}' is not a row count"),
            }
        }

        config
    }
}
