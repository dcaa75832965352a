use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading the source dataset.
///
/// All of these are fatal: the dataset is loaded once per process and a
/// failed load aborts startup. Nothing here is retried.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Dataset file not found: '{0}'")]
    FileNotFound(PathBuf),

    #[error("Failed to read CSV dataset '{0}'")]
    CsvRead(PathBuf, #[source] PolarsError),

    #[error("Required column '{column}' missing from dataset '{path}'")]
    MissingColumn { path: PathBuf, column: String },

    #[error("Failed to parse timestamp column '{column}' of dataset '{path}'")]
    TimestampParse {
        path: PathBuf,
        column: String,
        #[source]
        source: PolarsError,
    },

    #[error("Failed processing dataset frame")]
    Frame(#[from] PolarsError),
}
