//! Dataset Cache Module
//! Memoizes prepared tables per file path so repeated renders never re-read disk.

use crate::data::loader::{DataLoader, LoaderError};
use crate::data::schema::DatasetSchema;
use polars::prelude::*;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Prepared tables keyed by file path (as given, with `.` segments and repeated
/// separators dropped; symlinks are not resolved).
///
/// Entries stay until [`DatasetCache::invalidate`] or [`DatasetCache::clear`] is
/// called, or the cache is dropped. Cached tables are shared read-only through `Arc`.
#[derive(Default)]
pub struct DatasetCache {
    entries: HashMap<PathBuf, Arc<DataFrame>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached table for `path`, loading and preparing it on first use.
    ///
    /// `prepare` runs once per load on the freshly read table (derived columns etc.).
    /// Failures are not cached.
    pub fn get_or_load<F, E>(
        &mut self,
        path: impl AsRef<Path>,
        schema: &DatasetSchema,
        prepare: F,
    ) -> Result<Arc<DataFrame>, E>
    where
        F: FnOnce(DataFrame) -> Result<DataFrame, E>,
        E: From<LoaderError>,
    {
        let key = Self::key(path.as_ref());
        if let Some(df) = self.entries.get(&key) {
            debug!(path = %key.display(), "dataset cache hit");
            return Ok(Arc::clone(df));
        }

        debug!(path = %key.display(), "dataset cache miss");
        let raw = DataLoader::load_csv(&key, schema)?;
        let prepared = Arc::new(prepare(raw)?);
        self.entries.insert(key, Arc::clone(&prepared));
        Ok(prepared)
    }

    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.entries.contains_key(&Self::key(path.as_ref()))
    }

    /// Drop the entry for `path`; returns whether one existed.
    pub fn invalidate(&mut self, path: impl AsRef<Path>) -> bool {
        self.entries.remove(&Self::key(path.as_ref())).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn key(path: &Path) -> PathBuf {
        path.components()
            .filter(|component| !matches!(component, Component::CurDir))
            .collect()
    }
}
