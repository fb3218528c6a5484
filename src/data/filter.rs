//! Pickup Filter Module
//! Narrows a derived pickup table by an inclusive hour range and a set of weekdays.

use crate::data::schema::{canonical_weekday, DAY_NAME, HOUR, WEEKDAY_NAMES};
use polars::prelude::*;
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::debug;

pub const LAST_HOUR: u32 = 23;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Invalid hour range {start}..={end} (expected 0 <= start <= end <= 23)")]
    HourRange { start: u32, end: u32 },
    #[error("Unknown weekday '{0}'")]
    UnknownDay(String),
}

/// Hour range and weekday selection chosen by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UberFilter {
    start_hour: u32,
    end_hour: u32,
    days: BTreeSet<&'static str>,
}

impl Default for UberFilter {
    fn default() -> Self {
        Self::all()
    }
}

impl UberFilter {
    /// Every hour of every day; applying it returns the table unchanged.
    pub fn all() -> Self {
        Self {
            start_hour: 0,
            end_hour: LAST_HOUR,
            days: WEEKDAY_NAMES.iter().copied().collect(),
        }
    }

    /// Build a filter from inclusive hour bounds and weekday names.
    ///
    /// An empty day list is accepted and selects nothing.
    pub fn new<I, S>(start_hour: u32, end_hour: u32, days: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if start_hour > end_hour || end_hour > LAST_HOUR {
            return Err(FilterError::HourRange {
                start: start_hour,
                end: end_hour,
            });
        }

        let days = days
            .into_iter()
            .map(|day| {
                canonical_weekday(day.as_ref())
                    .ok_or_else(|| FilterError::UnknownDay(day.as_ref().to_string()))
            })
            .collect::<Result<BTreeSet<_>, _>>()?;

        Ok(Self {
            start_hour,
            end_hour,
            days,
        })
    }

    pub fn hour_range(&self) -> (u32, u32) {
        (self.start_hour, self.end_hour)
    }

    /// Selected days in Monday..Sunday order.
    pub fn days(&self) -> Vec<&'static str> {
        WEEKDAY_NAMES
            .iter()
            .copied()
            .filter(|day| self.days.contains(day))
            .collect()
    }

    /// Row-level predicate.
    pub fn matches(&self, hour: i32, day_name: &str) -> bool {
        hour >= self.start_hour as i32 && hour <= self.end_hour as i32 && self.days.contains(day_name)
    }

    /// Keep the rows of `df` matching the filter, in their original order.
    pub fn apply(&self, df: &DataFrame) -> Result<DataFrame, FilterError> {
        let hours = df.column(HOUR)?.cast(&DataType::Int32)?;
        let hours = hours.as_materialized_series().i32()?;
        let names = df.column(DAY_NAME)?.as_materialized_series().str()?;

        let mask: BooleanChunked = hours
            .into_iter()
            .zip(names.into_iter())
            .map(|(hour, name)| match (hour, name) {
                (Some(hour), Some(name)) => self.matches(hour, name),
                _ => false,
            })
            .collect();

        let filtered = df.filter(&mask)?;
        debug!(
            start_hour = self.start_hour,
            end_hour = self.end_hour,
            days = self.days.len(),
            rows = filtered.height(),
            "applied pickup filter"
        );
        Ok(filtered)
    }
}
