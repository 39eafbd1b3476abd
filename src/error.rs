use std::path::PathBuf;
use thiserror::Error;

/// Reasons a sheet could not be turned into a [`crate::loader::Table`].
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("File '{}' not found.", .0.display())]
    NotFound(PathBuf),

    #[error("{0}")]
    Workbook(#[from] calamine::Error),

    #[error("{0}")]
    Csv(#[from] csv::Error),

    #[error("Sheet '{sheet}' not found (available: {})", .available.join(", "))]
    SheetNotFound { sheet: String, available: Vec<String> },

    #[error("Sheet contains no rows")]
    EmptyTable,

    #[error("Could not find required columns: {0:?}")]
    MissingColumns(Vec<String>),
}
