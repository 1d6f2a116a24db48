//! Common test utilities shared across all test modules
//!
//! Helpers for reading the bundled flight logs, building synthetic CSV
//! input, and a few structural assertions.

#![allow(dead_code)]

use std::path::Path;

/// Read a text file, panicking with a clear message if not found.
pub fn read_example_file(file_path: &str) -> String {
    std::fs::read_to_string(file_path)
        .unwrap_or_else(|e| panic!("Failed to read example file '{}': {}", file_path, e))
}

/// Check if an example file exists
pub fn example_file_exists(file_path: &str) -> bool {
    Path::new(file_path).exists()
}

/// Bundled flight logs
pub mod example_files {
    /// DatCon-style export: 12 data rows, one without a clock tick, one
    /// without a GPS fix, one without a heading
    pub const DJI_SHORT_FLIGHT: &str = "exampleLogs/dji/short_flight.csv";
}

/// Test data generators for synthetic tests
pub mod synthetic {
    /// Build a CSV document from a header and rows of cells
    pub fn csv(header: &[&str], rows: &[Vec<String>]) -> String {
        let mut out = header.join(",");
        out.push('\n');
        for row in rows {
            out.push_str(&row.join(","));
            out.push('\n');
        }
        out
    }

    /// A straight-line flight with one row per second of clock ticks
    pub fn straight_flight(seconds: usize) -> String {
        let rows: Vec<Vec<String>> = (0..seconds)
            .map(|i| {
                vec![
                    (i * 1_000_000).to_string(),
                    format!("{:.6}", 47.0 + i as f64 * 0.0001),
                    format!("{:.6}", 8.0 + i as f64 * 0.0001),
                    format!("{}", (i * 10) % 360),
                    format!("{}", 100 + i),
                ]
            })
            .collect();
        csv(
            &["Clock:Tick#", "GPS:Lat", "GPS:Long", "IMU_ATTI(1):yaw360:C", "Alt"],
            &rows,
        )
    }
}

/// Structural assertions over pipeline output
pub mod assertions {
    use dronelog::analysis::shaper::MapSample;

    pub fn assert_monotonic(values: &[f64]) {
        for pair in values.windows(2) {
            assert!(
                pair[0] <= pair[1],
                "Values not monotonic: {} > {}",
                pair[0],
                pair[1]
            );
        }
    }

    pub fn assert_samples_complete(samples: &[MapSample]) {
        for sample in samples {
            assert!(sample.time.is_finite());
            assert!(sample.latitude.is_finite());
            assert!(sample.longitude.is_finite());
        }
    }
}
