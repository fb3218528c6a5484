//! Uber Derivation Module
//! Adds the temporal columns (timestamp, hour, weekday, month, day name) to a raw pickup table.

use crate::data::schema::{
    weekday_name, DATE_TIME, DAY_NAME, HOUR, LAT, LATITUDE, LON, LONGITUDE, MONTH, TIMESTAMP,
    WEEKDAY,
};
use chrono::{Datelike, NaiveDateTime, Timelike};
use polars::prelude::*;
use thiserror::Error;
use tracing::debug;

/// Timestamp layouts accepted in the `Date/Time` column, tried in order.
const DATE_TIME_FORMATS: [&str; 3] = ["%m/%d/%Y %H:%M:%S", "%m/%d/%Y %H:%M", "%Y-%m-%d %H:%M:%S"];

/// Columns written by [`UberDerivation::apply`].
pub const DERIVED_COLUMNS: [&str; 5] = [TIMESTAMP, HOUR, WEEKDAY, MONTH, DAY_NAME];

#[derive(Error, Debug)]
pub enum DeriveError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Cannot parse timestamp '{value}' at row {row}")]
    Parse { row: usize, value: String },
}

/// Parse a pickup timestamp such as `4/1/2014 0:11:00`.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

/// Temporal derivation for the Uber pickups table.
pub struct UberDerivation;

impl UberDerivation {
    /// Return a copy of `df` with `Lat`/`Lon` renamed and the derived columns appended.
    ///
    /// Applying it to an already derived table replaces the derived columns, so the
    /// result is the same either way. The first unparsable timestamp aborts the
    /// derivation.
    pub fn apply(df: &DataFrame) -> Result<DataFrame, DeriveError> {
        let raw = df.column(DATE_TIME)?.as_materialized_series().str()?;

        let height = df.height();
        let mut timestamps: Vec<i64> = Vec::with_capacity(height);
        let mut hours: Vec<i32> = Vec::with_capacity(height);
        let mut weekdays: Vec<i32> = Vec::with_capacity(height);
        let mut months: Vec<i32> = Vec::with_capacity(height);
        let mut day_names: Vec<&str> = Vec::with_capacity(height);

        for (row, value) in raw.into_iter().enumerate() {
            let parsed = value
                .and_then(parse_timestamp)
                .ok_or_else(|| DeriveError::Parse {
                    row,
                    value: value.unwrap_or_default().to_string(),
                })?;

            let weekday = parsed.weekday().num_days_from_monday();
            timestamps.push(parsed.and_utc().timestamp());
            hours.push(parsed.hour() as i32);
            weekdays.push(weekday as i32);
            months.push(parsed.month() as i32);
            // num_days_from_monday is always 0..=6
            day_names.push(weekday_name(weekday).unwrap_or_default());
        }

        let mut columns: Vec<Column> = df
            .get_columns()
            .iter()
            .filter(|col| !DERIVED_COLUMNS.contains(&col.name().as_str()))
            .cloned()
            .map(|mut col| {
                let renamed = match col.name().as_str() {
                    LAT => Some(LATITUDE),
                    LON => Some(LONGITUDE),
                    _ => None,
                };
                if let Some(name) = renamed {
                    col.rename(name.into());
                }
                col
            })
            .collect();

        columns.push(Column::new(TIMESTAMP.into(), timestamps));
        columns.push(Column::new(HOUR.into(), hours));
        columns.push(Column::new(WEEKDAY.into(), weekdays));
        columns.push(Column::new(MONTH.into(), months));
        columns.push(Column::new(DAY_NAME.into(), day_names));

        let derived = DataFrame::new(columns)?;
        debug!(rows = derived.height(), "derived temporal columns");
        Ok(derived)
    }
}
