//! Data-preparation pipeline for flight logs.
//!
//! Each stage is a pure function over an immutable table:
//!
//! - [`time_axis`] resolves the time axis once per upload
//! - [`range_filter`] restricts rows to the selected time range
//! - [`shaper`] reshapes filtered rows into chart series and map samples
//! - [`nearest`] picks the map sample closest to the scrub time
//! - [`heading`] converts compass headings to map rotation angles

pub mod heading;
pub mod nearest;
pub mod range_filter;
pub mod shaper;
pub mod time_axis;

use thiserror::Error;

pub use heading::to_map_angle;
pub use nearest::nearest;
pub use range_filter::{filter_range, RangeHints, TimeRange};
pub use shaper::{group_series, to_long_format, to_map_schema, LongRow, MapSample, MapShape, PlotSeries};
pub use time_axis::{resolve, ResolvedAxis, TimeAxis, TimeUnit};

/// Errors that can occur while preparing log data
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// The chosen time column has no numeric values left after cleaning
    #[error("Time column '{column}' contains no valid values after cleaning")]
    NoValidTimeValues { column: String },

    /// Latitude and longitude were mapped to the same source column
    #[error("Latitude and longitude cannot both use column '{column}'")]
    DegenerateMapColumns { column: String },

    /// A required column is not present in the table
    #[error("Missing required column: {column}")]
    MissingColumn { column: String },
}
