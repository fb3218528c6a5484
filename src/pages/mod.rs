//! Pages module - explicit per-page pipelines producing renderer-agnostic view models

mod gym;
mod uber;

pub use gym::{GymPage, GymView};
pub use uber::{UberPage, UberView};

use crate::data::{DeriveError, FilterError, LoaderError};
use polars::prelude::PolarsError;
use thiserror::Error;

/// Rows shown in a page's data preview unless configured otherwise.
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Errors that stop a page from rendering; surfaced to the user as-is.
#[derive(Error, Debug)]
pub enum PageError {
    #[error(transparent)]
    Load(#[from] LoaderError),
    #[error(transparent)]
    Derive(#[from] DeriveError),
    #[error(transparent)]
    Filter(#[from] FilterError),
    #[error("Aggregation failed: {0}")]
    Aggregate(#[from] PolarsError),
}
