//! Uber Pickups Page
//! Loader -> derivation -> filter -> aggregations for the April 2014 pickups dataset.

use crate::data::schema::{BASE, UBER_SCHEMA};
use crate::data::{DatasetCache, UberDerivation, UberFilter};
use crate::pages::{PageError, DEFAULT_PREVIEW_ROWS};
use crate::stats::{
    Aggregator, FrequencyTable, GeoPoint, HourlyBucket, PeakMetrics, TablePreview,
};
use polars::prelude::*;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Everything the renderer needs to draw the pickups page for one filter selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UberView {
    pub hour_range: (u32, u32),
    pub days: Vec<String>,
    pub preview: TablePreview,
    pub pickups_by_hour: [usize; 24],
    pub pickups_by_day: FrequencyTable,
    pub hourly_series: Vec<HourlyBucket>,
    pub locations: Vec<GeoPoint>,
    pub pickups_by_base: FrequencyTable,
    pub metrics: PeakMetrics,
}

/// The pickups page bound to its cached, derived base table.
pub struct UberPage {
    data: Arc<DataFrame>,
    preview_rows: usize,
}

impl UberPage {
    /// Load (or reuse) the pickups table at `path` and derive its temporal columns.
    pub fn open(cache: &mut DatasetCache, path: impl AsRef<Path>) -> Result<Self, PageError> {
        let data = cache.get_or_load(path, &UBER_SCHEMA, |raw| {
            UberDerivation::apply(&raw).map_err(PageError::from)
        })?;
        Ok(Self::from_table(data))
    }

    /// Wrap an already derived table.
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

    /// The shared base table.
    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    /// Run the full pipeline for one filter selection.
    ///
    /// The base table is never modified; the filtered view lives only for this call.
    pub fn render(&self, filter: &UberFilter) -> Result<UberView, PageError> {
        let filtered = filter.apply(&self.data)?;
        debug!(
            base_rows = self.data.height(),
            filtered_rows = filtered.height(),
            "rendering pickups page"
        );

        Ok(UberView {
            hour_range: filter.hour_range(),
            days: filter.days().into_iter().map(String::from).collect(),
            preview: Aggregator::preview(&self.data, self.preview_rows)?,
            pickups_by_hour: Aggregator::hourly_histogram(&filtered)?,
            pickups_by_day: Aggregator::weekday_counts(&filtered)?,
            hourly_series: Aggregator::resample_hourly(&filtered)?,
            locations: Aggregator::pickup_locations(&filtered)?,
            pickups_by_base: Aggregator::category_count(&filtered, BASE)?,
            metrics: Aggregator::peak_metrics(&filtered)?,
        })
    }
}
