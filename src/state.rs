//! Core session state types and constants.
//!
//! A [`Session`] holds one uploaded log and its resolved time axis. All
//! interactive choices (range, plotted parameters, map columns, scrub time)
//! live in an explicit [`SessionConfig`] that is passed into every redraw,
//! and each redraw recomputes the filter and shaping stages from scratch.

use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::analysis::nearest::nearest;
use crate::analysis::range_filter::{filter_range, RangeHints, TimeRange};
use crate::analysis::shaper::{to_long_format, to_map_schema, MapSample};
use crate::analysis::time_axis::{extent_of, resolve, ResolvedAxis, TimeAxis};
use crate::analysis::AnalysisError;
use crate::normalize::{find_column, MapField};
use crate::parsers::types::{ParseError, RawTable};
use crate::parsers::TelemetryCsv;
use crate::render::scene::{ChartPanel, MapScene, ScrubState};
use crate::settings::UserSettings;

// ============================================================================
// Constants
// ============================================================================

/// Clock column holding microsecond ticks
pub const PREFERRED_TIME_COLUMN: &str = "Clock:Tick#";

pub const PREFERRED_LAT_COLUMN: &str = "GPS:Lat";

pub const PREFERRED_LON_COLUMN: &str = "GPS:Long";

/// Compass heading in degrees, 0-360
pub const PREFERRED_YAW_COLUMN: &str = "IMU_ATTI(1):yaw360:C";

/// Number of independently configurable time plots
pub const MAX_PLOT_SLOTS: usize = 3;

/// Rows shown in a raw data preview
pub const PREVIEW_ROWS: usize = 5;

/// Supported log file extensions
pub const SUPPORTED_EXTENSIONS: &[&str] = &["csv", "txt"];

/// True when `path` has one of the [`SUPPORTED_EXTENSIONS`] (any case)
pub fn is_supported_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
        .unwrap_or(false)
}

/// Decimal digits for time and value in chart tooltips
pub const CHART_TOOLTIP_PRECISION: usize = 3;

/// Decimal digits for the time in the map tooltip
pub const MAP_TIME_PRECISION: usize = 2;

/// Decimal digits for the heading in the map tooltip
pub const MAP_YAW_PRECISION: usize = 1;

pub const MAP_STYLE: &str = "mapbox://styles/mapbox/satellite-streets-v11";
pub const MAP_ZOOM: f64 = 18.0;
pub const MAP_PITCH: f64 = 45.0;
pub const MAP_BEARING: f64 = 0.0;

/// Flight path colour (RGBA)
pub const PATH_COLOR: [u8; 4] = [255, 0, 0, 180];
pub const PATH_WIDTH: f64 = 1.5;

/// Current position colour (RGBA)
pub const POINT_COLOR: [u8; 4] = [0, 255, 0, 255];
pub const POINT_RADIUS: f64 = 4.0;

pub const HEADING_GLYPH: &str = "^";
pub const HEADING_GLYPH_SIZE: f64 = 45.0;
/// Heading glyph colour (RGBA)
pub const HEADING_COLOR: [u8; 4] = [255, 0, 255, 255];

// ============================================================================
// Notices
// ============================================================================

/// Severity of a user-facing notice
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum NoticeLevel {
    #[default]
    Info,
    Warning,
    Error,
}

/// A recoverable condition surfaced to the user during a redraw
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

// ============================================================================
// Session
// ============================================================================

/// Errors that make an uploaded log unusable
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

/// Column choices for the map
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct MapColumns {
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub yaw: Option<String>,
}

/// Per-redraw configuration
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionConfig {
    /// Time range, `None` selects the whole axis
    pub range: Option<TimeRange>,
    /// Parameter selections per plot slot, `None` plots the first parameter
    pub plots: Option<Vec<Vec<String>>>,
    pub map: MapColumns,
    /// Map scrub time, `None` starts at the first sample
    pub scrub_time: Option<f64>,
}

/// Result of one redraw
#[derive(Clone, Debug, Serialize)]
pub struct Frame {
    pub source: String,
    pub axis: TimeAxis,
    /// (min, max) of the whole resolved axis
    pub extent: Option<(f64, f64)>,
    /// Range actually applied, after clamping
    pub range: Option<TimeRange>,
    pub hints: Option<RangeHints>,
    pub filtered_rows: usize,
    pub available_parameters: Vec<String>,
    pub charts: Vec<ChartPanel>,
    pub map: Option<MapScene>,
    pub notices: Vec<Notice>,
}

/// A loaded log with its resolved time axis
#[derive(Clone, Debug)]
pub struct Session {
    /// Display name for the log
    pub name: String,
    /// Path to the original file, when loaded from disk
    pub path: Option<PathBuf>,
    source: RawTable,
    resolved: ResolvedAxis,
}

impl Session {
    /// Load a log file and resolve its time axis
    pub fn open(path: &Path, time_column: &str) -> Result<Self, LoadError> {
        let table = TelemetryCsv::load(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "Unknown".to_string());
        let mut session = Self::from_table(name, table, time_column)?;
        session.path = Some(path.to_path_buf());
        Ok(session)
    }

    /// Build a session over an already parsed table
    pub fn from_table(
        name: impl Into<String>,
        table: RawTable,
        time_column: &str,
    ) -> Result<Self, AnalysisError> {
        let resolved = resolve(&table, time_column)?;
        Ok(Self {
            name: name.into(),
            path: None,
            source: table,
            resolved,
        })
    }

    /// Re-resolve the time axis from the original upload
    pub fn with_time_column(&self, time_column: &str) -> Result<Self, AnalysisError> {
        let resolved = resolve(&self.source, time_column)?;
        Ok(Self {
            name: self.name.clone(),
            path: self.path.clone(),
            source: self.source.clone(),
            resolved,
        })
    }

    /// The table as uploaded
    pub fn source(&self) -> &RawTable {
        &self.source
    }

    pub fn resolved(&self) -> &ResolvedAxis {
        &self.resolved
    }

    pub fn axis(&self) -> &TimeAxis {
        &self.resolved.axis
    }

    pub fn extent(&self) -> Option<(f64, f64)> {
        self.resolved.extent()
    }

    pub fn hints(&self) -> Option<RangeHints> {
        self.extent()
            .map(|extent| RangeHints::for_axis(&self.resolved.axis, extent))
    }

    /// Columns offered for plots and map fields: everything but the axis
    pub fn parameter_columns(&self) -> Vec<String> {
        self.resolved
            .table
            .columns()
            .iter()
            .filter(|c| **c != self.resolved.axis.column)
            .cloned()
            .collect()
    }

    /// Default map columns: the configured names when present, then known
    /// aliases, then the first (latitude) and second (longitude) candidate
    pub fn default_map_columns(&self, settings: &UserSettings) -> MapColumns {
        let candidates = self.parameter_columns();
        let pick = |preferred: &str, field: MapField| -> Option<String> {
            if candidates.iter().any(|c| c == preferred) {
                return Some(preferred.to_string());
            }
            find_column(field, &candidates).map(str::to_string)
        };

        MapColumns {
            lat: pick(&settings.lat_column, MapField::Latitude)
                .or_else(|| candidates.first().cloned()),
            lon: pick(&settings.lon_column, MapField::Longitude)
                .or_else(|| candidates.get(1).cloned()),
            yaw: pick(&settings.yaw_column, MapField::Heading),
        }
    }

    /// Configuration a fresh session starts with
    pub fn default_config(&self, settings: &UserSettings) -> SessionConfig {
        SessionConfig {
            range: None,
            plots: None,
            map: self.default_map_columns(settings),
            scrub_time: None,
        }
    }

    /// Recompute the filter and shaping stages for `config`
    pub fn redraw(&self, config: &SessionConfig) -> Frame {
        let axis = &self.resolved.axis;
        let mut notices = Vec::new();

        let extent = self.extent();
        // Only a valid range is clamped, an inverted one must stay inverted
        let range = match (config.range, extent) {
            (Some(range), Some((min, max))) if range.is_valid() => Some(range.clamped(min, max)),
            (Some(range), _) => Some(range),
            (None, Some((min, max))) => Some(TimeRange::new(min, max)),
            (None, None) => None,
        };

        let filtered = match range {
            Some(range) if !range.is_valid() => {
                notices.push(Notice::error("Start time must be before or equal to end time"));
                self.resolved.table.empty_like()
            }
            Some(range) => {
                let filtered = filter_range(&self.resolved.table, &axis.column, range);
                if filtered.is_empty() {
                    notices.push(Notice::warning("No data points in the selected time range"));
                }
                filtered
            }
            None => self.resolved.table.empty_like(),
        };

        let available_parameters: Vec<String> = if filtered.is_empty() {
            Vec::new()
        } else {
            self.parameter_columns()
        };

        let charts = self.build_charts(config, &filtered, &available_parameters, &mut notices);
        let map = self.build_map(config, &filtered, &mut notices);

        Frame {
            source: self.name.clone(),
            axis: axis.clone(),
            extent,
            range,
            hints: self.hints(),
            filtered_rows: filtered.row_count(),
            available_parameters,
            charts,
            map,
            notices,
        }
    }

    fn build_charts(
        &self,
        config: &SessionConfig,
        filtered: &RawTable,
        available: &[String],
        notices: &mut Vec<Notice>,
    ) -> Vec<ChartPanel> {
        if available.is_empty() {
            if !filtered.is_empty() {
                notices.push(Notice::info("No parameters available for time plots"));
            }
            return Vec::new();
        }

        let selections: Vec<Vec<String>> = match &config.plots {
            Some(plots) => plots.clone(),
            None => vec![available.iter().take(1).cloned().collect()],
        };
        if selections.len() > MAX_PLOT_SLOTS {
            notices.push(Notice::warning(format!(
                "Only {} plots can be configured, ignoring {} more",
                MAX_PLOT_SLOTS,
                selections.len() - MAX_PLOT_SLOTS
            )));
        }

        let axis = &self.resolved.axis;
        let mut charts = Vec::new();
        for (slot, selection) in selections.into_iter().take(MAX_PLOT_SLOTS).enumerate() {
            let plot_id = slot + 1;
            let (known, unknown): (Vec<String>, Vec<String>) =
                selection.into_iter().partition(|p| available.contains(p));
            for parameter in unknown {
                notices.push(Notice::warning(format!(
                    "Plot {}: unknown parameter '{}'",
                    plot_id, parameter
                )));
            }
            if known.is_empty() {
                continue;
            }
            let rows = to_long_format(filtered, &axis.column, &known);
            charts.push(ChartPanel::new(plot_id, axis, known, rows));
        }

        if charts.is_empty() {
            notices.push(Notice::info(
                "Select parameters for at least one time plot to display charts",
            ));
        }
        charts
    }

    fn build_map(
        &self,
        config: &SessionConfig,
        filtered: &RawTable,
        notices: &mut Vec<Notice>,
    ) -> Option<MapScene> {
        let (Some(lat), Some(lon)) = (config.map.lat.as_deref(), config.map.lon.as_deref()) else {
            notices.push(Notice::info("Select valid latitude/longitude columns for the map"));
            return None;
        };
        let yaw = config.map.yaw.as_deref();
        let axis = &self.resolved.axis;

        let shape = match to_map_schema(filtered, &axis.column, lat, lon, yaw) {
            Ok(shape) => shape,
            Err(err @ AnalysisError::DegenerateMapColumns { .. }) => {
                notices.push(Notice::error(err.to_string()));
                return None;
            }
            Err(err) => {
                notices.push(Notice::warning(format!(
                    "Required columns (time, lat, lon) not available for the map: {}",
                    err
                )));
                return None;
            }
        };

        let unit = axis.unit();
        let samples = shape.samples;
        let times: Vec<f64> = samples.iter().map(|s| s.time).collect();

        let Some((min, max)) = extent_of(&times) else {
            notices.push(Notice::warning(
                "No GPS data in the selected time range or after cleaning",
            ));
            let route = to_map_schema(&self.resolved.table, &axis.column, lat, lon, yaw).ok()?;
            let focus: &MapSample = route.samples.first()?;
            return Some(MapScene::new(&[], None, focus, unit, None));
        };

        // A single fix in range keeps the step of the whole axis
        let scrub_step = match self.hints() {
            Some(hints) if axis.is_scaled_seconds && max <= min => hints.step,
            _ => RangeHints::for_axis(axis, (min, max)).scrub_step,
        };
        let time = config
            .scrub_time
            .filter(|t| t.is_finite())
            .unwrap_or(min)
            .clamp(min, max);

        let current = nearest(&samples, time)?;
        Some(MapScene::new(
            &samples,
            Some(current),
            current,
            unit,
            Some(ScrubState {
                min,
                max,
                step: scrub_step,
                time,
            }),
        ))
    }
}
