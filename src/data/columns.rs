//! Column Access Helpers
//! Typed and label views over DataFrame columns shared by derivation and stats.

use polars::prelude::*;

/// Render a cell as a category label; nulls have no label.
pub fn label_of(value: AnyValue<'_>) -> Option<String> {
    match value {
        AnyValue::Null => None,
        AnyValue::String(s) => Some(s.to_string()),
        other => Some(other.to_string().trim_matches('"').to_string()),
    }
}

/// Labels of every cell in `column`, in row order.
pub fn column_labels(df: &DataFrame, column: &str) -> PolarsResult<Vec<Option<String>>> {
    // Series::iter only walks single-chunk series; CSV reads come back in many chunks
    let series = df.column(column)?.as_materialized_series().rechunk();
    Ok(series.iter().map(label_of).collect())
}

/// Values of an integer column, cast to `i32`.
pub fn i32_values(df: &DataFrame, column: &str) -> PolarsResult<Vec<Option<i32>>> {
    let cast = df.column(column)?.cast(&DataType::Int32)?;
    let ca = cast.as_materialized_series().i32()?;
    Ok(ca.into_iter().collect())
}

/// Values of an integer column, cast to `i64`.
pub fn i64_values(df: &DataFrame, column: &str) -> PolarsResult<Vec<Option<i64>>> {
    let cast = df.column(column)?.cast(&DataType::Int64)?;
    let ca = cast.as_materialized_series().i64()?;
    Ok(ca.into_iter().collect())
}

/// Values of a numeric column, cast to `f64`.
pub fn f64_values(df: &DataFrame, column: &str) -> PolarsResult<Vec<Option<f64>>> {
    let cast = df.column(column)?.cast(&DataType::Float64)?;
    let ca = cast.as_materialized_series().f64()?;
    Ok(ca.into_iter().collect())
}
