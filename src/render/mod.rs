//! Renderer capability interfaces.
//!
//! A redraw produces a [`Frame`]; renderers only see the prepared charts and
//! map scene, so any implementation can be swapped in without touching the
//! pipeline stages.

pub mod json;
pub mod scene;
pub mod summary;

use thiserror::Error;

use crate::state::Frame;

pub use json::JsonRenderer;
pub use scene::{ChartPanel, MapScene};
pub use summary::SummaryRenderer;

/// Errors that can occur while rendering a frame
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to write render output: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode render output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Renders long-format series as one line per parameter
pub trait ChartRenderer {
    fn render_chart(&mut self, chart: &ChartPanel) -> Result<(), RenderError>;
}

/// Renders a polyline, a highlighted point and an optional rotated glyph on
/// a basemap
pub trait MapRenderer {
    fn render_map(&mut self, scene: &MapScene) -> Result<(), RenderError>;
}

/// Hand every chart, then the map, to `renderer`
pub fn render_frame<R>(frame: &Frame, renderer: &mut R) -> Result<(), RenderError>
where
    R: ChartRenderer + MapRenderer,
{
    for chart in &frame.charts {
        renderer.render_chart(chart)?;
    }
    if let Some(scene) = &frame.map {
        renderer.render_map(scene)?;
    }
    Ok(())
}
