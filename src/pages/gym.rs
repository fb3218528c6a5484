//! Gym Exercises Page
//! Grouped frequency tables over the exercises dataset; no temporal derivation.

use crate::data::schema::{BODY_PART, EQUIPMENT, GYM_SCHEMA, LEVEL, TYPE};
use crate::data::{DatasetCache, LoaderError};
use crate::pages::{PageError, DEFAULT_PREVIEW_ROWS};
use crate::stats::{Aggregator, CrossTab, FrequencyTable, TablePreview};
use polars::prelude::*;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GymView {
    pub preview: TablePreview,
    /// Distinct body parts, the word-cloud source.
    pub body_parts: Vec<String>,
    pub body_parts_by_type: Vec<CrossTab>,
    pub levels_by_type: Vec<CrossTab>,
    pub type_counts: FrequencyTable,
    pub body_part_counts: FrequencyTable,
    pub level_counts: FrequencyTable,
    pub equipment_counts: FrequencyTable,
}

pub struct GymPage {
    data: Arc<DataFrame>,
    preview_rows: usize,
}

impl GymPage {
    pub fn open(cache: &mut DatasetCache, path: impl AsRef<Path>) -> Result<Self, PageError> {
        let data = cache.get_or_load(path, &GYM_SCHEMA, Ok::<_, LoaderError>)?;
        Ok(Self::from_table(data))
    }

    pub fn from_table(data: Arc<DataFrame>) -> Self {
        Self {
            data,
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }

    pub fn with_preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = rows;
        self
    }

    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    /// The gym page has no user controls, so rendering takes no parameters.
    pub fn render(&self) -> Result<GymView, PageError> {
        let df = self.data.as_ref();

        Ok(GymView {
            preview: Aggregator::preview(df, self.preview_rows)?,
            body_parts: Aggregator::distinct_values(df, BODY_PART)?,
            body_parts_by_type: Aggregator::cross_tabulate(df, TYPE, BODY_PART)?,
            levels_by_type: Aggregator::cross_tabulate(df, TYPE, LEVEL)?,
            type_counts: Aggregator::category_count(df, TYPE)?,
            body_part_counts: Aggregator::category_count(df, BODY_PART)?,
            level_counts: Aggregator::category_count(df, LEVEL)?,
            equipment_counts: Aggregator::category_count(df, EQUIPMENT)?,
        })
    }
}
