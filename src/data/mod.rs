//! Data module - CSV loading, caching, derivation and filtering

pub mod columns;
mod cache;
mod derivation;
mod filter;
mod loader;
pub mod schema;

pub use cache::DatasetCache;
pub use derivation::{parse_timestamp, DeriveError, UberDerivation, DERIVED_COLUMNS};
pub use filter::{FilterError, UberFilter};
pub use loader::{DataLoader, LoaderError};
pub use schema::{ColumnKind, ColumnSpec, DatasetSchema, GYM_SCHEMA, UBER_SCHEMA};
