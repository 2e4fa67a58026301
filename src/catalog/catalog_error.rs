use std::{fmt::Display, path::PathBuf};

/// Which decode pass of the snapshot failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStage {
    /// Outer pass: the file content must be a JSON string (or a document object)
    Outer,
    /// Inner pass: the decoded string must be a catalog document
    Inner,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotFoundKind {
    Snapshot(PathBuf),
    Project(String),
    Dataset(String),
    Table { dataset: String, table: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    NotFound(NotFoundKind),
    Io(String),
    Parse { stage: DecodeStage, message: String },
    EmptyAggregate { dataset: String },
    UnsupportedColumnSelection { table: String, column: String },
}

impl CatalogError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound(_))
    }

    pub fn err<T>(self) -> Result<T, CatalogError> {
        Err(self)
    }
}

impl Display for NotFoundKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotFoundKind::Snapshot(path) => write!(f, "catalog snapshot {}", path.display()),
            NotFoundKind::Project(name) => write!(f, "project '{name}'"),
            NotFoundKind::Dataset(name) => write!(f, "dataset '{name}'"),
            NotFoundKind::Table { dataset, table } => write!(f, "table '{table}' in dataset '{dataset}'"),
        }
    }
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::NotFound(kind) => write!(f, "NotFound: {kind}"),
            CatalogError::Io(message) => write!(f, "IoError: {message}"),
            CatalogError::Parse { stage, message } => {
                let stage = match stage {
                    DecodeStage::Outer => "outer",
                    DecodeStage::Inner => "inner",
                };
                write!(f, "ParseError ({stage} decode): {message}")
            }
            CatalogError::EmptyAggregate { dataset } => {
                write!(f, "EmptyAggregate: dataset '{dataset}' has no tables")
            }
            CatalogError::UnsupportedColumnSelection { table, column } => {
                write!(f, "UnsupportedColumnSelection: column '{column}' is not part of table '{table}'")
            }
        }
    }
}

impl std::error::Error for CatalogError {}
