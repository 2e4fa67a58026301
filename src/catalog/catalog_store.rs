use std::{collections::BTreeSet, io, path::Path};

use tracing::{debug, info, warn};

use crate::catalog::{
    CatalogConfig, CatalogDocument, CatalogError, Dataset, DatasetFull, DatasetRaw, NotFoundKind,
    ProjectDatasets, Table, decode_catalog_document,
};

/// Read-only view over one loaded catalog snapshot.
///
/// Construct it once (from a file or an already decoded document) and hand it
/// out by reference; nothing in it is mutated after loading.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogStore {
    document: CatalogDocument,
}

impl CatalogStore {
    pub fn new(document: CatalogDocument) -> Self {
        Self { document }
    }

    /// Load the snapshot at `config.snapshot_path`.
    pub fn load(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let path = config.snapshot_path.as_path();
        let content = std::fs::read_to_string(path).map_err(|error| read_error(path, error))?;
        Self::from_loaded_content(path, &content)
    }

    /// Async flavour of [`CatalogStore::load`], reading through `tokio::fs`.
    pub async fn load_async(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let path = config.snapshot_path.as_path();
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|error| read_error(path, error))?;
        Self::from_loaded_content(path, &content)
    }

    pub fn from_json_str(content: &str) -> Result<Self, CatalogError> {
        decode_catalog_document(content).map(Self::new)
    }

    fn from_loaded_content(path: &Path, content: &str) -> Result<Self, CatalogError> {
        let store = Self::from_json_str(content)?;
        info!(
            "loaded catalog {}: {} projects, {} datasets",
            path.display(),
            store.document.len(),
            store.document.values().map(ProjectDatasets::len).sum::<usize>()
        );
        let unknown = store.unknown_column_types();
        if !unknown.is_empty() {
            warn!("catalog {} declares unrecognized column types: {:?}", path.display(), unknown);
        }
        Ok(store)
    }

    /// Declared column types the catalog does not recognize, by name.
    pub fn unknown_column_types(&self) -> BTreeSet<String> {
        self.document
            .values()
            .flat_map(ProjectDatasets::values)
            .flat_map(|dataset| &dataset.tables)
            .flat_map(|table| table.schema.values())
            .filter(|column| column.ty.is_unknown())
            .map(|column| column.ty.to_string())
            .collect()
    }

    /// Project keys in document order.
    pub fn project_keys(&self) -> Vec<&str> {
        self.document.keys().map(String::as_str).collect()
    }

    /// Every dataset name of every project, without duplicates.
    pub fn dataset_names(&self) -> BTreeSet<String> {
        self.document
            .values()
            .flat_map(|datasets| datasets.keys().cloned())
            .collect()
    }

    /// Dataset names of a single project, in document order.
    pub fn dataset_names_in(&self, project: &str) -> Result<Vec<&str>, CatalogError> {
        let datasets = self.project(project)?;
        Ok(datasets.keys().map(String::as_str).collect())
    }

    /// Look a dataset up by name alone.
    ///
    /// Projects are searched in [`CatalogStore::project_keys`] order and the
    /// first one holding a dataset called `name` wins, even if later projects
    /// have a dataset with the same name.
    pub fn find_dataset_by_name(&self, name: &str) -> Result<DatasetFull, CatalogError> {
        let mut owners = self
            .document
            .iter()
            .filter_map(|(project, datasets)| datasets.get(name).map(|raw| (project, raw)));

        let Some((project, raw)) = owners.next() else {
            debug!("dataset '{name}' not found in any project");
            return CatalogError::NotFound(NotFoundKind::Dataset(name.to_string())).err();
        };

        let shadowed = owners.map(|(other, _)| other.as_str()).collect::<Vec<_>>();
        if !shadowed.is_empty() {
            warn!("dataset '{name}' resolved to project '{project}', shadowing {shadowed:?}");
        }

        Ok(DatasetFull::from_raw(project, name, raw))
    }

    /// Project-qualified dataset lookup.
    pub fn find_dataset(&self, project: &str, name: &str) -> Result<DatasetFull, CatalogError> {
        let raw = self.dataset_raw(project, name)?;
        Ok(DatasetFull::from_raw(project, name, raw))
    }

    pub fn find_table(&self, project: &str, dataset: &str, table: &str) -> Result<&Table, CatalogError> {
        self.dataset_raw(project, dataset)?
            .tables
            .iter()
            .find(|candidate| candidate.name == table)
            .ok_or_else(|| {
                CatalogError::NotFound(NotFoundKind::Table {
                    dataset: dataset.to_string(),
                    table: table.to_string(),
                })
            })
    }

    /// Aggregated views of every dataset, project by project.
    pub fn list_datasets(&self) -> Vec<Dataset> {
        self.document
            .iter()
            .flat_map(|(project, datasets)| {
                datasets
                    .iter()
                    .map(move |(name, raw)| Dataset::from_raw(project, name, raw))
            })
            .collect()
    }

    pub fn total_table_count(datasets: &[Dataset]) -> usize {
        datasets.iter().map(|dataset| dataset.table_count).sum()
    }

    fn project(&self, project: &str) -> Result<&ProjectDatasets, CatalogError> {
        self.document
            .get(project)
            .ok_or_else(|| CatalogError::NotFound(NotFoundKind::Project(project.to_string())))
    }

    fn dataset_raw(&self, project: &str, name: &str) -> Result<&DatasetRaw, CatalogError> {
        self.project(project)?
            .get(name)
            .ok_or_else(|| CatalogError::NotFound(NotFoundKind::Dataset(name.to_string())))
    }
}

fn read_error(path: &Path, error: io::Error) -> CatalogError {
    match error.kind() {
        io::ErrorKind::NotFound => CatalogError::NotFound(NotFoundKind::Snapshot(path.to_path_buf())),
        _ => CatalogError::Io(format!("could not read {}: {error}", path.display())),
    }
}
