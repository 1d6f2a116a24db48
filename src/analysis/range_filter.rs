//! Time range filtering and range-selection hints.

use serde::Serialize;

use super::time_axis::TimeAxis;
use crate::parsers::types::RawTable;

/// Smallest step offered for a scaled-seconds axis
pub const MIN_SECONDS_STEP: f64 = 0.001;

/// Step used when no better step can be derived
pub const FALLBACK_STEP: f64 = 0.01;

/// Inclusive bounds on the time axis
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TimeRange {
    pub start: f64,
    pub end: f64,
}

impl TimeRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// A range with `start > end` selects nothing
    pub fn is_valid(&self) -> bool {
        self.start <= self.end
    }

    #[inline]
    pub fn contains(&self, t: f64) -> bool {
        t >= self.start && t <= self.end
    }

    /// Clamp both bounds into `[min, max]`
    pub fn clamped(&self, min: f64, max: f64) -> Self {
        Self {
            start: self.start.clamp(min, max),
            end: self.end.clamp(min, max),
        }
    }
}

/// Keep the rows whose `axis_column` value lies within `range` (inclusive),
/// in their original order.
///
/// An invalid range (`start > end`) yields an empty table with the same
/// columns. Rows without a numeric axis value never match.
pub fn filter_range(table: &RawTable, axis_column: &str, range: TimeRange) -> RawTable {
    if !range.is_valid() {
        return table.empty_like();
    }
    let times = table.numeric_column(axis_column);
    if times.is_empty() {
        return table.empty_like();
    }
    table.retain_rows(|i, _| times[i].is_some_and(|t| range.contains(t)))
}

/// Presentation parameters for range inputs over an axis
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RangeHints {
    /// Increment for start/end inputs
    pub step: f64,
    /// Decimal digits shown for bounds
    pub precision: usize,
    /// Increment for the map scrub slider
    pub scrub_step: f64,
}

impl RangeHints {
    /// Derive hints from the axis kind and its (min, max) extent
    pub fn for_axis(axis: &TimeAxis, extent: (f64, f64)) -> Self {
        let span = extent.1 - extent.0;

        let (step, precision) = if axis.is_integer_like {
            (1.0, 0)
        } else if axis.is_scaled_seconds && span > 0.0 {
            ((span / 100.0).max(MIN_SECONDS_STEP), 3)
        } else {
            (FALLBACK_STEP, 3)
        };

        let scrub_step = if axis.is_integer_like || !axis.is_scaled_seconds {
            1.0
        } else if span > 0.0 {
            (span / 200.0).max(MIN_SECONDS_STEP)
        } else {
            step
        };

        Self {
            step,
            precision,
            scrub_step,
        }
    }

    /// Format a bound with the hinted precision
    pub fn format(&self, value: f64) -> String {
        format!("{:.*}", self.precision, value)
    }
}
