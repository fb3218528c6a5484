//! Aggregator Module
//! Stateless reductions over a (possibly filtered) table: category counts, cross
//! tabulations, hourly histograms and series, peak metrics.
//!
//! None of these fail on an empty table; they return empty tables, zero buckets or
//! `None` metrics instead.

use crate::data::columns::{column_labels, f64_values, i32_values, i64_values, label_of};
use crate::data::schema::{DAY_NAME, HOUR, LATITUDE, LONGITUDE, TIMESTAMP, WEEKDAY_NAMES};
use crate::stats::frequency::FrequencyTable;
use chrono::{DateTime, NaiveDateTime};
use polars::prelude::*;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Shown in place of a metric when the table has no rows.
pub const NO_DATA: &str = "N/A";

const SECONDS_PER_HOUR: i64 = 3600;

/// Category counts of `secondary` restricted to one value of `primary`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrossTab {
    pub primary: String,
    pub counts: FrequencyTable,
}

/// Number of pickups starting in one calendar hour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourlyBucket {
    pub start: NaiveDateTime,
    pub pickups: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Key metric tiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeakMetrics {
    pub total_pickups: usize,
    pub peak_hour: Option<i32>,
    pub peak_day: Option<String>,
}

impl PeakMetrics {
    pub fn peak_hour_label(&self) -> String {
        self.peak_hour
            .map(|hour| format!("{hour}:00"))
            .unwrap_or_else(|| NO_DATA.to_string())
    }

    pub fn peak_day_label(&self) -> &str {
        self.peak_day.as_deref().unwrap_or(NO_DATA)
    }
}

/// First rows of a table rendered as text cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TablePreview {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Most frequent value; ties go to the smallest value.
pub fn mode_of<T, I>(values: I) -> Option<T>
where
    T: Ord,
    I: IntoIterator<Item = T>,
{
    let mut counts: BTreeMap<T, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }

    let mut best: Option<(T, usize)> = None;
    for (value, count) in counts {
        if best.as_ref().map_or(true, |(_, top)| count > *top) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

/// Pure reductions used by the page pipelines.
pub struct Aggregator;

impl Aggregator {
    /// Row count per distinct value of `column`.
    pub fn category_count(df: &DataFrame, column: &str) -> PolarsResult<FrequencyTable> {
        Ok(FrequencyTable::from_labels(column_labels(df, column)?))
    }

    /// Distinct non-null values of `column` in order of first appearance.
    pub fn distinct_values(df: &DataFrame, column: &str) -> PolarsResult<Vec<String>> {
        let mut seen = HashSet::new();
        Ok(column_labels(df, column)?
            .into_iter()
            .flatten()
            .filter(|value| seen.insert(value.clone()))
            .collect())
    }

    /// For each distinct `primary` value, the category count of `secondary` over its rows.
    ///
    /// Rows are matched on their labels, so the primary column may be of any type.
    /// Each primary value is reduced on the rayon pool; output follows the order in
    /// which primary values first appear.
    pub fn cross_tabulate(
        df: &DataFrame,
        primary: &str,
        secondary: &str,
    ) -> PolarsResult<Vec<CrossTab>> {
        let primary_labels = column_labels(df, primary)?;
        let secondary_labels = column_labels(df, secondary)?;

        let mut seen = HashSet::new();
        let primaries: Vec<&str> = primary_labels
            .iter()
            .flatten()
            .map(String::as_str)
            .filter(|value| seen.insert(*value))
            .collect();

        Ok(primaries
            .par_iter()
            .map(|&value| {
                let matching = primary_labels
                    .iter()
                    .zip(&secondary_labels)
                    .filter(|(label, _)| label.as_deref() == Some(value))
                    .map(|(_, cell)| cell.as_deref());

                CrossTab {
                    primary: value.to_string(),
                    counts: FrequencyTable::from_labels(matching),
                }
            })
            .collect())
    }

    /// Pickups per hour of day, 24 fixed buckets.
    pub fn hourly_histogram(df: &DataFrame) -> PolarsResult<[usize; 24]> {
        let mut buckets = [0usize; 24];
        for hour in i32_values(df, HOUR)?.into_iter().flatten() {
            match usize::try_from(hour) {
                Ok(h) if h < buckets.len() => buckets[h] += 1,
                _ => {}
            }
        }
        Ok(buckets)
    }

    /// Pickups per weekday in Monday..Sunday order, zero-filled.
    pub fn weekday_counts(df: &DataFrame) -> PolarsResult<FrequencyTable> {
        Ok(Self::category_count(df, DAY_NAME)?.reindex(&WEEKDAY_NAMES))
    }

    /// Pickups per calendar hour from the first to the last pickup, empty hours included.
    pub fn resample_hourly(df: &DataFrame) -> PolarsResult<Vec<HourlyBucket>> {
        let hours: Vec<i64> = i64_values(df, TIMESTAMP)?
            .into_iter()
            .flatten()
            .map(|ts| ts.div_euclid(SECONDS_PER_HOUR))
            .collect();

        let (Some(&first), Some(&last)) = (hours.iter().min(), hours.iter().max()) else {
            return Ok(Vec::new());
        };

        let mut counts = vec![0usize; (last - first + 1) as usize];
        for hour in &hours {
            counts[(hour - first) as usize] += 1;
        }

        Ok(counts
            .into_iter()
            .enumerate()
            .filter_map(|(offset, pickups)| {
                let start = (first + offset as i64) * SECONDS_PER_HOUR;
                DateTime::from_timestamp(start, 0).map(|dt| HourlyBucket {
                    start: dt.naive_utc(),
                    pickups,
                })
            })
            .collect())
    }

    /// Total pickups, most frequent hour and most frequent day.
    pub fn peak_metrics(df: &DataFrame) -> PolarsResult<PeakMetrics> {
        let peak_hour = mode_of(i32_values(df, HOUR)?.into_iter().flatten());
        let peak_day = mode_of(column_labels(df, DAY_NAME)?.into_iter().flatten());

        Ok(PeakMetrics {
            total_pickups: df.height(),
            peak_hour,
            peak_day,
        })
    }

    /// Pickup coordinates for the map layer; rows missing either coordinate are skipped.
    pub fn pickup_locations(df: &DataFrame) -> PolarsResult<Vec<GeoPoint>> {
        let latitudes = f64_values(df, LATITUDE)?;
        let longitudes = f64_values(df, LONGITUDE)?;

        Ok(latitudes
            .into_iter()
            .zip(longitudes)
            .filter_map(|(lat, lon)| {
                Some(GeoPoint {
                    latitude: lat?,
                    longitude: lon?,
                })
            })
            .collect())
    }

    /// The first `rows` rows as text.
    pub fn preview(df: &DataFrame, rows: usize) -> PolarsResult<TablePreview> {
        let head = df.head(Some(rows));
        let columns: Vec<String> = head
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let mut cells = Vec::with_capacity(head.height());
        for i in 0..head.height() {
            let row = head
                .get_columns()
                .iter()
                .map(|col| {
                    col.as_materialized_series()
                        .get(i)
                        .map(|value| label_of(value).unwrap_or_default())
                })
                .collect::<PolarsResult<Vec<String>>>()?;
            cells.push(row);
        }

        Ok(TablePreview {
            columns,
            rows: cells,
        })
    }
}
