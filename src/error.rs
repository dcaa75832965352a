use crate::dataset::error::DatasetError;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AqStatError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error("Failed processing DataFrame: {0}")]
    Frame(#[from] PolarsError),
}
