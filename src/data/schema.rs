//! Dataset Schema Module
//! Column-name contracts for the two input CSV files, checked once at load time.

use crate::data::loader::LoaderError;
use polars::prelude::*;
use tracing::warn;

// Uber pickups (raw CSV columns)
pub const DATE_TIME: &str = "Date/Time";
pub const LAT: &str = "Lat";
pub const LON: &str = "Lon";
pub const BASE: &str = "Base";

// Uber pickups (derived columns)
pub const LATITUDE: &str = "latitude";
pub const LONGITUDE: &str = "longitude";
pub const TIMESTAMP: &str = "timestamp";
pub const HOUR: &str = "hour";
pub const WEEKDAY: &str = "weekday";
pub const MONTH: &str = "month";
pub const DAY_NAME: &str = "day_name";

// Gym exercises
pub const TITLE: &str = "Title";
pub const TYPE: &str = "Type";
pub const BODY_PART: &str = "BodyPart";
pub const EQUIPMENT: &str = "Equipment";
pub const LEVEL: &str = "Level";

/// Canonical weekday names, indexed by `weekday` (0 = Monday).
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Value type a CSV column must parse as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Float,
}

impl ColumnKind {
    pub fn dtype(self) -> DataType {
        match self {
            ColumnKind::Text => DataType::String,
            ColumnKind::Float => DataType::Float64,
        }
    }
}

/// One required column: its name, value type and whether empty cells are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub nullable: bool,
}

const fn filled(name: &'static str, kind: ColumnKind) -> ColumnSpec {
    ColumnSpec {
        name,
        kind,
        nullable: false,
    }
}

const fn sparse(name: &'static str, kind: ColumnKind) -> ColumnSpec {
    ColumnSpec {
        name,
        kind,
        nullable: true,
    }
}

/// Named set of columns a dataset must provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetSchema {
    pub name: &'static str,
    pub columns: &'static [ColumnSpec],
}

pub const UBER_SCHEMA: DatasetSchema = DatasetSchema {
    name: "uber",
    columns: &[
        filled(DATE_TIME, ColumnKind::Text),
        filled(LAT, ColumnKind::Float),
        filled(LON, ColumnKind::Float),
        filled(BASE, ColumnKind::Text),
    ],
};

// Equipment and Level have gaps in the published exercises file
pub const GYM_SCHEMA: DatasetSchema = DatasetSchema {
    name: "gym",
    columns: &[
        filled(TITLE, ColumnKind::Text),
        filled(TYPE, ColumnKind::Text),
        filled(BODY_PART, ColumnKind::Text),
        sparse(EQUIPMENT, ColumnKind::Text),
        sparse(LEVEL, ColumnKind::Text),
    ],
};

impl DatasetSchema {
    pub fn column_names(&self) -> impl Iterator<Item = &'static str> {
        self.columns.iter().map(|spec| spec.name)
    }

    /// Fail with `LoaderError::Schema` on the first required column absent from `present`.
    pub fn check_names<'a, I>(&self, present: I) -> Result<(), LoaderError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let present: Vec<&str> = present.into_iter().collect();

        for column in self.column_names() {
            if !present.contains(&column) {
                warn!(dataset = self.name, column, "required column missing");
                return Err(LoaderError::Schema {
                    dataset: self.name,
                    column: column.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Fail with `LoaderError::Schema` on the first required column absent from `df`.
    pub fn validate(&self, df: &DataFrame) -> Result<(), LoaderError> {
        self.check_names(df.get_column_names().into_iter().map(|name| name.as_str()))
    }

    /// Dtypes forced on the required columns while reading, so bad cells fail the read.
    pub fn dtype_overrides(&self) -> Schema {
        let mut schema = Schema::with_capacity(self.columns.len());
        for spec in self.columns {
            schema.with_column(spec.name.into(), spec.kind.dtype());
        }
        schema
    }

    /// Check a loaded frame: required columns present, of the declared type, and
    /// without empty cells unless the column allows them.
    pub fn check_values(&self, df: &DataFrame) -> Result<(), LoaderError> {
        self.validate(df)?;

        for spec in self.columns {
            let column = df.column(spec.name).map_err(|_| LoaderError::Schema {
                dataset: self.name,
                column: spec.name.to_string(),
            })?;

            let expected = spec.kind.dtype();
            if column.dtype() != &expected {
                return Err(self.malformed(
                    spec,
                    format!("expected {expected} values, found {}", column.dtype()),
                ));
            }

            let nulls = column.null_count();
            if !spec.nullable && nulls > 0 {
                return Err(self.malformed(spec, format!("{nulls} empty or missing cells")));
            }
        }
        Ok(())
    }

    fn malformed(&self, spec: &ColumnSpec, reason: String) -> LoaderError {
        warn!(dataset = self.name, column = spec.name, %reason, "malformed column");
        LoaderError::Malformed {
            dataset: self.name,
            column: spec.name.to_string(),
            reason,
        }
    }
}

/// Map a weekday index (0 = Monday) to its canonical name.
pub fn weekday_name(index: u32) -> Option<&'static str> {
    WEEKDAY_NAMES.get(index as usize).copied()
}

/// Find the canonical spelling of a weekday name, ignoring ASCII case.
pub fn canonical_weekday(name: &str) -> Option<&'static str> {
    WEEKDAY_NAMES
        .iter()
        .copied()
        .find(|canonical| canonical.eq_ignore_ascii_case(name.trim()))
}
