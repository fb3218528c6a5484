//! CSV Data Loader Module
//! Handles CSV file loading and schema checking using Polars.

use crate::data::schema::DatasetSchema;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Data file not found: {}", path.display())]
    Missing { path: PathBuf },
    #[error("Failed to load CSV {}: {source}", path.display())]
    DataLoad {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
    #[error("Dataset '{dataset}' is missing required column '{column}'")]
    Schema {
        dataset: &'static str,
        column: String,
    },
    #[error("Dataset '{dataset}' has malformed column '{column}': {reason}")]
    Malformed {
        dataset: &'static str,
        column: String,
        reason: String,
    },
}

/// Loads CSV files into DataFrames, preserving row and column order.
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file and check it against `schema`.
    ///
    /// Rows that cannot be parsed fail the whole load; nothing is skipped. Required
    /// columns are read with their declared dtypes, and short rows (null-filled by
    /// the reader) are rejected unless the column allows empty cells.
    pub fn load_csv(path: &Path, schema: &DatasetSchema) -> Result<DataFrame, LoaderError> {
        if !path.is_file() {
            return Err(LoaderError::Missing {
                path: path.to_path_buf(),
            });
        }
        let load_error = |source: PolarsError| LoaderError::DataLoad {
            path: path.to_path_buf(),
            source,
        };

        let header = LazyCsvReader::new(path)
            .with_has_header(true)
            .finish()
            .and_then(|mut lazy| lazy.collect_schema())
            .map_err(load_error)?;
        schema.check_names(header.iter_names().map(|name| name.as_str()))?;

        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .with_dtype_overwrite(Some(Arc::new(schema.dtype_overrides())))
            .finish()
            .and_then(|lazy| lazy.collect())
            .map_err(load_error)?;

        schema.check_values(&df)?;

        info!(
            dataset = schema.name,
            path = %path.display(),
            rows = df.height(),
            "loaded dataset"
        );
        Ok(df)
    }
}
