//! Telemetry CSV reader
//!
//! Reads a header row followed by data rows into a [`RawTable`]. Cells are
//! classified in parallel once the records are split, since flight logs can
//! run to hundreds of thousands of rows with a few hundred columns each.

use csv::{ReaderBuilder, StringRecord, Trim};
use rayon::prelude::*;
use std::path::Path;

use super::types::{ParseError, Parseable, RawTable, Value};

/// Header that marks a DatCon export of a DJI flight log
const DATCON_TICK_HEADER: &str = "Clock:Tick#";

/// CSV telemetry parser
pub struct TelemetryCsv;

impl TelemetryCsv {
    /// Detect if content looks like a DatCon/DJI telemetry export
    pub fn detect(contents: &str) -> bool {
        contents
            .lines()
            .next()
            .map(|header| header.split(',').any(|h| h.trim() == DATCON_TICK_HEADER))
            .unwrap_or(false)
    }

    /// Read and parse a log file from disk
    pub fn load(path: &Path) -> Result<RawTable, ParseError> {
        let contents = std::fs::read_to_string(path)?;
        if Self::detect(&contents) {
            tracing::info!("Detected DatCon telemetry export: {}", path.display());
        }
        Self.parse(&contents)
    }
}

impl Parseable for TelemetryCsv {
    fn parse(&self, file_contents: &str) -> Result<RawTable, ParseError> {
        let contents = file_contents.trim_start_matches('\u{feff}');

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(contents.as_bytes());

        let headers = reader.headers()?.clone();
        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            return Err(ParseError::NoHeader);
        }
        let width = headers.len();

        // Phase 1: split records sequentially (the reader is a stream)
        let mut records: Vec<StringRecord> = Vec::new();
        for result in reader.records() {
            let record = result?;
            if record.len() > width {
                return Err(ParseError::RaggedRow {
                    line: record.position().map(|p| p.line()).unwrap_or(0),
                    expected: width,
                    found: record.len(),
                });
            }
            records.push(record);
        }

        // Phase 2: classify cells in parallel, order is preserved by collect
        let rows: Vec<Vec<Value>> = records
            .par_iter()
            .map(|record| record.iter().map(Value::from_cell).collect())
            .collect();

        let columns: Vec<String> = headers.iter().map(|h| h.to_string()).collect();

        tracing::info!(
            "Parsed telemetry CSV: {} columns, {} rows",
            columns.len(),
            rows.len()
        );

        Ok(RawTable::new(columns, rows))
    }
}
