//! Time axis resolution.
//!
//! A log either carries the instrument clock in microsecond ticks, which is
//! converted to seconds, or it falls back to the row position as an ordinal
//! axis.

use serde::Serialize;
use strum::{AsRefStr, Display};

use super::AnalysisError;
use crate::parsers::types::{RawTable, Value};

/// Ticks per second of the instrument clock
pub const TICKS_PER_SECOND: f64 = 1_000_000.0;

/// Name of the synthetic axis column used when no clock column exists
pub const INDEX_AXIS_COLUMN: &str = "Row Index";

/// Unit of the resolved time axis, as shown in labels
#[derive(AsRefStr, Clone, Copy, Debug, Display, PartialEq, Eq, Serialize)]
pub enum TimeUnit {
    Seconds,
    Index,
}

/// The column used as x-value for filtering and plotting
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TimeAxis {
    /// Column name in the resolved table
    pub column: String,
    /// True when values were converted from microsecond ticks to seconds
    pub is_scaled_seconds: bool,
    /// True when the axis holds whole numbers only (the synthetic index)
    pub is_integer_like: bool,
}

impl TimeAxis {
    pub fn unit(&self) -> TimeUnit {
        if self.is_scaled_seconds {
            TimeUnit::Seconds
        } else {
            TimeUnit::Index
        }
    }

    /// Axis title for charts, e.g. `Time (Clock:Tick# in Seconds)`
    pub fn title(&self) -> String {
        format!("Time ({} in {})", self.column, self.unit())
    }
}

/// Output of [`resolve`]
#[derive(Clone, Debug)]
pub struct ResolvedAxis {
    /// Copy of the source table with a numeric axis column
    pub table: RawTable,
    pub axis: TimeAxis,
    /// Rows removed because their time value was not numeric
    pub dropped_rows: usize,
}

impl ResolvedAxis {
    /// Axis values of the resolved table, one per row
    pub fn times(&self) -> Vec<f64> {
        self.table
            .numeric_column(&self.axis.column)
            .into_iter()
            .flatten()
            .collect()
    }

    /// (min, max) of the axis, `None` for an empty table
    pub fn extent(&self) -> Option<(f64, f64)> {
        extent_of(&self.times())
    }
}

/// (min, max) of a slice of values, `None` when empty
pub fn extent_of(values: &[f64]) -> Option<(f64, f64)> {
    values.iter().fold(None, |acc, &v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Resolve the time axis of `table`, preferring `preferred_column`.
///
/// When the preferred column exists its values are coerced to numbers, rows
/// that fail coercion are dropped and the rest are divided by
/// [`TICKS_PER_SECOND`]. When it is absent, a synthetic [`INDEX_AXIS_COLUMN`]
/// holding each row's zero-based position is used instead.
pub fn resolve(table: &RawTable, preferred_column: &str) -> Result<ResolvedAxis, AnalysisError> {
    if !table.has_column(preferred_column) {
        tracing::warn!(
            "Column '{}' not found, using row index ('{}') as time axis",
            preferred_column,
            INDEX_AXIS_COLUMN
        );
        let index: Vec<Value> = (0..table.row_count())
            .map(|i| Value::Number(i as f64))
            .collect();
        return Ok(ResolvedAxis {
            table: table.with_column(INDEX_AXIS_COLUMN, index),
            axis: TimeAxis {
                column: INDEX_AXIS_COLUMN.to_string(),
                is_scaled_seconds: false,
                is_integer_like: true,
            },
            dropped_rows: 0,
        });
    }

    let ticks = table.numeric_column(preferred_column);
    let cleaned = table.retain_rows(|i, _| ticks[i].is_some());
    let dropped_rows = table.row_count() - cleaned.row_count();
    if dropped_rows > 0 {
        tracing::debug!(
            "Dropped {} rows with non-numeric '{}'",
            dropped_rows,
            preferred_column
        );
    }

    if cleaned.is_empty() {
        return Err(AnalysisError::NoValidTimeValues {
            column: preferred_column.to_string(),
        });
    }

    let seconds: Vec<Value> = ticks
        .into_iter()
        .flatten()
        .map(|t| Value::Number(t / TICKS_PER_SECOND))
        .collect();

    tracing::info!("Time axis: '{}' (in seconds)", preferred_column);

    Ok(ResolvedAxis {
        table: cleaned.with_column(preferred_column, seconds),
        axis: TimeAxis {
            column: preferred_column.to_string(),
            is_scaled_seconds: true,
            is_integer_like: false,
        },
        dropped_rows,
    })
}
