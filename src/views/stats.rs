use serde::Serialize;

use crate::{
    catalog::{CatalogStore, Dataset, DatasetFull},
    views::{Locale, total_columns},
};

const NO_DATE: &str = "—";

/// A labeled figure shown in page headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatEntry {
    pub value: String,
    pub label: String,
}

impl StatEntry {
    pub fn new(value: impl ToString, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum StatLabel {
    Datasets,
    Tables,
    Projects,
    Columns,
    LastUpdated,
}

impl StatLabel {
    fn text(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (StatLabel::Datasets, Locale::PtBr) => "Conjuntos de dados",
            (StatLabel::Datasets, Locale::EnUs) => "Datasets",
            (StatLabel::Tables, Locale::PtBr) => "Tabelas",
            (StatLabel::Tables, Locale::EnUs) => "Tables",
            (StatLabel::Projects, Locale::PtBr) => "Projetos",
            (StatLabel::Projects, Locale::EnUs) => "Projects",
            (StatLabel::Columns, Locale::PtBr) => "Colunas",
            (StatLabel::Columns, Locale::EnUs) => "Columns",
            (StatLabel::LastUpdated, Locale::PtBr) => "Última atualização",
            (StatLabel::LastUpdated, Locale::EnUs) => "Last updated",
        }
    }
}

/// Home page: datasets, tables and projects in the whole catalog.
pub fn home_stats(store: &CatalogStore, locale: Locale) -> Vec<StatEntry> {
    let datasets = store.list_datasets();

    vec![
        StatEntry::new(datasets.len(), StatLabel::Datasets.text(locale)),
        StatEntry::new(CatalogStore::total_table_count(&datasets), StatLabel::Tables.text(locale)),
        StatEntry::new(store.project_keys().len(), StatLabel::Projects.text(locale)),
    ]
}

/// Dataset listing page.
pub fn dataset_list_stats(datasets: &[Dataset], locale: Locale) -> Vec<StatEntry> {
    vec![
        StatEntry::new(datasets.len(), StatLabel::Datasets.text(locale)),
        StatEntry::new(CatalogStore::total_table_count(datasets), StatLabel::Tables.text(locale)),
    ]
}

/// Dataset detail page. The last update reads `—` for a dataset without tables.
pub fn dataset_detail_stats(dataset: &DatasetFull, locale: Locale) -> Vec<StatEntry> {
    let last_updated = dataset
        .tables
        .iter()
        .map(|table| table.created_at)
        .max()
        .map(|instant| locale.format_date(instant.as_datetime()))
        .unwrap_or_else(|| NO_DATE.to_string());

    vec![
        StatEntry::new(dataset.tables.len(), StatLabel::Tables.text(locale)),
        StatEntry::new(total_columns(&dataset.tables), StatLabel::Columns.text(locale)),
        StatEntry::new(last_updated, StatLabel::LastUpdated.text(locale)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::_fixtures::fixtures::sample_store;

    fn values(stats: &[StatEntry]) -> Vec<&str> {
        stats.iter().map(|s| s.value.as_str()).collect()
    }

    #[test]
    fn test_home_stats() {
        let store = sample_store();
        let stats = home_stats(&store, Locale::PtBr);

        assert_eq!(values(&stats), vec!["4", "4", "2"]);
        assert_eq!(stats[0].label, "Conjuntos de dados");
        assert_eq!(stats[2].label, "Projetos");
    }

    #[test]
    fn test_dataset_list_stats() {
        let store = sample_store();
        let datasets = store.list_datasets();
        let stats = dataset_list_stats(&datasets[..2], Locale::EnUs);

        assert_eq!(
            stats,
            vec![StatEntry::new(2, "Datasets"), StatEntry::new(2, "Tables")]
        );
    }

    #[test]
    fn test_dataset_detail_stats() {
        let store = sample_store();
        let sales = store.find_dataset_by_name("sales").unwrap();
        let stats = dataset_detail_stats(&sales, Locale::PtBr);

        assert_eq!(values(&stats), vec!["2", "8", "20/02/2024"]);
        assert_eq!(stats[2].label, "Última atualização");
    }

    #[test]
    fn test_dataset_detail_stats_without_tables() {
        let store = sample_store();
        let inventory = store.find_dataset_by_name("inventory").unwrap();
        let stats = dataset_detail_stats(&inventory, Locale::EnUs);

        assert_eq!(values(&stats), vec!["0", "0", "—"]);
    }

    #[test]
    fn test_stats_are_deterministic() {
        let store = sample_store();
        assert_eq!(home_stats(&store, Locale::EnUs), home_stats(&store, Locale::EnUs));
    }
}
