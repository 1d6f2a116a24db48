//! Reshaping filtered rows for the chart and map renderers.
//!
//! Charts take long-format `(time, parameter, value)` rows, one line per
//! parameter over a shared time axis. Maps take [`MapSample`]s with a fixed
//! `time`/`latitude`/`longitude`/`heading` schema regardless of the source
//! column names.

use serde::Serialize;

use super::AnalysisError;
use crate::parsers::types::RawTable;

/// One long-format chart row
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LongRow {
    pub time: f64,
    pub parameter: String,
    /// Numeric value, `None` when the cell is missing or not a number
    pub value: Option<f64>,
}

/// The points of one parameter, in table order, without missing values
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlotSeries {
    pub parameter: String,
    pub points: Vec<[f64; 2]>,
}

/// One position fix for the map
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MapSample {
    pub time: f64,
    pub latitude: f64,
    pub longitude: f64,
    /// Compass heading in degrees, absent when missing or not selected
    pub heading: Option<f64>,
}

/// Output of [`to_map_schema`]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MapShape {
    pub samples: Vec<MapSample>,
    /// Rows removed for a missing or non-numeric position (or time)
    pub dropped_rows: usize,
}

/// Melt `parameters` into long format.
///
/// Rows are visited in table order and each row emits one entry per
/// parameter in selection order. A parameter that is not a column yields
/// missing values. Rows without a numeric time are skipped.
pub fn to_long_format(table: &RawTable, time_column: &str, parameters: &[String]) -> Vec<LongRow> {
    let times = table.numeric_column(time_column);
    let columns: Vec<Vec<Option<f64>>> = parameters
        .iter()
        .map(|p| table.numeric_column(p))
        .collect();

    let mut rows = Vec::with_capacity(times.len() * parameters.len());
    for (i, time) in times.iter().enumerate() {
        let Some(time) = *time else {
            continue;
        };
        for (parameter, values) in parameters.iter().zip(&columns) {
            rows.push(LongRow {
                time,
                parameter: parameter.clone(),
                value: values.get(i).copied().flatten(),
            });
        }
    }
    rows
}

/// Group long-format rows into one series per parameter, in `parameters`
/// order. Missing values are left out of that parameter's points only.
pub fn group_series(rows: &[LongRow], parameters: &[String]) -> Vec<PlotSeries> {
    parameters
        .iter()
        .map(|parameter| PlotSeries {
            parameter: parameter.clone(),
            points: rows
                .iter()
                .filter(|r| &r.parameter == parameter)
                .filter_map(|r| r.value.map(|v| [r.time, v]))
                .collect(),
        })
        .collect()
}

/// Select and rename the map fields of `table`.
///
/// Rows where latitude or longitude is missing or not numeric are dropped.
/// A missing heading, or a heading column not present in the table, leaves
/// the sample's heading empty.
pub fn to_map_schema(
    table: &RawTable,
    time_column: &str,
    lat_column: &str,
    lon_column: &str,
    yaw_column: Option<&str>,
) -> Result<MapShape, AnalysisError> {
    if lat_column == lon_column {
        return Err(AnalysisError::DegenerateMapColumns {
            column: lat_column.to_string(),
        });
    }
    for column in [time_column, lat_column, lon_column] {
        if !table.has_column(column) {
            return Err(AnalysisError::MissingColumn {
                column: column.to_string(),
            });
        }
    }

    let times = table.numeric_column(time_column);
    let lats = table.numeric_column(lat_column);
    let lons = table.numeric_column(lon_column);
    let headings = yaw_column
        .filter(|c| table.has_column(c))
        .map(|c| table.numeric_column(c));

    let samples: Vec<MapSample> = (0..table.row_count())
        .filter_map(|i| {
            Some(MapSample {
                time: times[i]?,
                latitude: lats[i]?,
                longitude: lons[i]?,
                heading: headings.as_ref().and_then(|h| h[i]),
            })
        })
        .collect();

    let dropped_rows = table.row_count() - samples.len();
    if dropped_rows > 0 {
        tracing::debug!(
            "Dropped {} rows without a valid '{}'/'{}' position",
            dropped_rows,
            lat_column,
            lon_column
        );
    }

    Ok(MapShape {
        samples,
        dropped_rows,
    })
}
