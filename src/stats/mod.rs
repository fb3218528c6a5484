//! Stats module - Frequency tables and aggregations

mod aggregator;
mod frequency;

pub use aggregator::{
    mode_of, Aggregator, CrossTab, GeoPoint, HourlyBucket, PeakMetrics, TablePreview, NO_DATA,
};
pub use frequency::{CategoryCount, FrequencyTable};
