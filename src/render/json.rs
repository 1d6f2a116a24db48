//! JSON render output for external chart/map front ends.

use serde_json::{json, Value};
use std::io::Write;

use super::scene::{ChartPanel, MapScene};
use super::{ChartRenderer, MapRenderer, RenderError};
use crate::state::Frame;

/// Collects chart and map payloads and writes them as one JSON document
pub struct JsonRenderer<W: Write> {
    writer: W,
    charts: Vec<Value>,
    map: Value,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            charts: Vec::new(),
            map: Value::Null,
        }
    }

    /// Write the document, with the frame's axis, range and notices, and
    /// return the writer
    pub fn finish(mut self, frame: &Frame) -> Result<W, RenderError> {
        let document = json!({
            "source": frame.source,
            "axis": frame.axis,
            "extent": frame.extent,
            "range": frame.range,
            "hints": frame.hints,
            "filtered_rows": frame.filtered_rows,
            "available_parameters": frame.available_parameters,
            "charts": self.charts,
            "map": self.map,
            "notices": frame.notices,
        });
        serde_json::to_writer_pretty(&mut self.writer, &document)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> ChartRenderer for JsonRenderer<W> {
    fn render_chart(&mut self, chart: &ChartPanel) -> Result<(), RenderError> {
        self.charts.push(serde_json::to_value(chart)?);
        Ok(())
    }
}

impl<W: Write> MapRenderer for JsonRenderer<W> {
    fn render_map(&mut self, scene: &MapScene) -> Result<(), RenderError> {
        self.map = serde_json::to_value(scene)?;
        Ok(())
    }
}
