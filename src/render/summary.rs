//! Plain-text renderer for terminal use.

use std::io::Write;

use super::scene::{ChartPanel, MapScene};
use super::{ChartRenderer, MapRenderer, RenderError};

/// Writes one line per chart and a short map readout
pub struct SummaryRenderer<W: Write> {
    writer: W,
}

impl<W: Write> SummaryRenderer<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ChartRenderer for SummaryRenderer<W> {
    fn render_chart(&mut self, chart: &ChartPanel) -> Result<(), RenderError> {
        writeln!(self.writer, "{}", chart.title)?;
        for series in &chart.series {
            writeln!(self.writer, "  {}: {} points", series.parameter, series.points.len())?;
        }
        Ok(())
    }
}

impl<W: Write> MapRenderer for SummaryRenderer<W> {
    fn render_map(&mut self, scene: &MapScene) -> Result<(), RenderError> {
        writeln!(self.writer, "Map: {} path points", scene.path.coordinates.len())?;
        match &scene.tooltip {
            Some(tooltip) => {
                write!(
                    self.writer,
                    "  Time: {}  Lat: {}  Lon: {}",
                    tooltip.time, tooltip.lat, tooltip.lon
                )?;
                if let Some(yaw) = &tooltip.yaw {
                    write!(self.writer, "  Yaw: {}", yaw)?;
                }
                writeln!(self.writer)?;
            }
            None => writeln!(self.writer, "  No position in the selected range")?,
        }
        Ok(())
    }
}
