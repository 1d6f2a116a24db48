//! Render payloads handed to chart and map renderers.

use serde::Serialize;

use crate::analysis::heading::optional_map_angle;
use crate::analysis::shaper::{group_series, LongRow, MapSample, PlotSeries};
use crate::analysis::time_axis::{TimeAxis, TimeUnit};
use crate::state::{
    CHART_TOOLTIP_PRECISION, HEADING_COLOR, HEADING_GLYPH, HEADING_GLYPH_SIZE, MAP_BEARING,
    MAP_PITCH, MAP_STYLE, MAP_TIME_PRECISION, MAP_YAW_PRECISION, MAP_ZOOM, PATH_COLOR, PATH_WIDTH,
    POINT_COLOR, POINT_RADIUS,
};

// ============================================================================
// Charts
// ============================================================================

/// Decimal digits for chart tooltips
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TooltipFormat {
    pub time_precision: usize,
    pub value_precision: usize,
}

impl Default for TooltipFormat {
    fn default() -> Self {
        Self {
            time_precision: CHART_TOOLTIP_PRECISION,
            value_precision: CHART_TOOLTIP_PRECISION,
        }
    }
}

/// One configured time plot: a line per parameter over a shared time axis
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartPanel {
    /// 1-based plot slot
    pub plot_id: usize,
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub parameters: Vec<String>,
    /// Long-format rows, keyed by (time, parameter)
    pub rows: Vec<LongRow>,
    pub series: Vec<PlotSeries>,
    pub tooltip: TooltipFormat,
}

impl ChartPanel {
    pub fn new(plot_id: usize, axis: &TimeAxis, parameters: Vec<String>, rows: Vec<LongRow>) -> Self {
        let series = group_series(&rows, &parameters);
        Self {
            plot_id,
            title: format!("Plot {}: {}", plot_id, parameters.join(", ")),
            x_title: axis.title(),
            y_title: "Value".to_string(),
            parameters,
            rows,
            series,
            tooltip: TooltipFormat::default(),
        }
    }

    /// Total plotted points across all series
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}

// ============================================================================
// Map
// ============================================================================

/// Camera placement over the basemap
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ViewState {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
    pub pitch: f64,
    pub bearing: f64,
}

/// Flight path polyline of `[longitude, latitude]` pairs in time order
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PathLayer {
    pub coordinates: Vec<[f64; 2]>,
    pub color: [u8; 4],
    pub width: f64,
}

/// Highlighted current position
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PointLayer {
    pub position: [f64; 2],
    pub color: [u8; 4],
    pub radius: f64,
}

/// Heading indicator rotated into map convention
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HeadingGlyph {
    pub position: [f64; 2],
    pub text: String,
    pub size: f64,
    pub color: [u8; 4],
    /// Rotation in degrees, 0° = east, counter-clockwise
    pub angle: f64,
}

/// Pre-formatted readout for the current position
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MapTooltip {
    pub time: String,
    pub lat: String,
    pub lon: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaw: Option<String>,
}

/// Scrub slider state over the map samples
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ScrubState {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub time: f64,
}

/// Everything a map renderer needs for one redraw
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MapScene {
    pub map_style: String,
    pub view: ViewState,
    pub path: PathLayer,
    pub marker: Option<PointLayer>,
    pub heading: Option<HeadingGlyph>,
    /// Sample nearest to the scrub time
    pub current: Option<MapSample>,
    pub tooltip: Option<MapTooltip>,
    pub scrub: Option<ScrubState>,
}

impl MapScene {
    /// Build a scene over `route`, highlighting `current` when present.
    ///
    /// The camera centres on `current`, else on `focus`.
    pub fn new(
        route: &[MapSample],
        current: Option<&MapSample>,
        focus: &MapSample,
        unit: TimeUnit,
        scrub: Option<ScrubState>,
    ) -> Self {
        let center = current.unwrap_or(focus);

        let marker = current.map(|s| PointLayer {
            position: [s.longitude, s.latitude],
            color: POINT_COLOR,
            radius: POINT_RADIUS,
        });

        let heading = current.and_then(|s| {
            optional_map_angle(s.heading).map(|angle| HeadingGlyph {
                position: [s.longitude, s.latitude],
                text: HEADING_GLYPH.to_string(),
                size: HEADING_GLYPH_SIZE,
                color: HEADING_COLOR,
                angle,
            })
        });

        let tooltip = current.map(|s| MapTooltip {
            time: format!("{:.*} {}", MAP_TIME_PRECISION, s.time, unit),
            lat: s.latitude.to_string(),
            lon: s.longitude.to_string(),
            yaw: s.heading.map(|h| format!("{:.*}°", MAP_YAW_PRECISION, h)),
        });

        Self {
            map_style: MAP_STYLE.to_string(),
            view: ViewState {
                latitude: center.latitude,
                longitude: center.longitude,
                zoom: MAP_ZOOM,
                pitch: MAP_PITCH,
                bearing: MAP_BEARING,
            },
            path: PathLayer {
                coordinates: route.iter().map(|s| [s.longitude, s.latitude]).collect(),
                color: PATH_COLOR,
                width: PATH_WIDTH,
            },
            marker,
            heading,
            current: current.cloned(),
            tooltip,
            scrub,
        }
    }
}
