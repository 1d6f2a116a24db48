//! Tests for the pipeline stages over synthetic tables
//!
//! Tests cover:
//! - Tick and index time axes
//! - Inclusive range filtering and input hints
//! - Nearest-sample lookup and heading conversion
//! - Long-format and map shaping

use dronelog::analysis::heading::to_map_angle;
use dronelog::analysis::nearest::nearest;
use dronelog::analysis::range_filter::{filter_range, RangeHints, TimeRange};
use dronelog::analysis::shaper::{group_series, to_long_format, to_map_schema};
use dronelog::analysis::time_axis::{resolve, TimeUnit, INDEX_AXIS_COLUMN};
use dronelog::analysis::AnalysisError;
use dronelog::parsers::{Parseable, RawTable, TelemetryCsv};

use crate::common::assertions::*;
use crate::common::synthetic;

const CLOCK: &str = "Clock:Tick#";

fn parse(csv: &str) -> RawTable {
    TelemetryCsv.parse(csv).expect("Should parse")
}

// ============================================
// Time Axis Tests
// ============================================

#[test]
fn test_ticks_become_seconds() {
    let table = parse("Clock:Tick#,Alt\n0,1\n1000000,2\n2000000,3\n");
    let resolved = resolve(&table, CLOCK).unwrap();

    assert_eq!(resolved.times(), vec![0.0, 1.0, 2.0]);
    assert!(resolved.axis.is_scaled_seconds);
    assert_eq!(resolved.axis.unit(), TimeUnit::Seconds);
    assert_eq!(resolved.axis.title(), "Time (Clock:Tick# in Seconds)");
}

#[test]
fn test_missing_clock_uses_row_index() {
    let table = parse("Alt,Speed\n5,1\n6,2\n7,3\n");
    let resolved = resolve(&table, CLOCK).unwrap();

    assert_eq!(resolved.axis.column, INDEX_AXIS_COLUMN);
    assert!(!resolved.axis.is_scaled_seconds);
    assert!(resolved.axis.is_integer_like);
    assert_eq!(resolved.times(), vec![0.0, 1.0, 2.0]);
    assert_eq!(resolved.axis.unit(), TimeUnit::Index);
}

#[test]
fn test_bad_ticks_are_dropped() {
    let table = parse("Clock:Tick#,Alt\n0,1\nabc,2\n,3\n3000000,4\n");
    let resolved = resolve(&table, CLOCK).unwrap();

    assert_eq!(resolved.times(), vec![0.0, 3.0]);
    assert_eq!(resolved.dropped_rows, 2);
}

#[test]
fn test_no_valid_ticks_is_an_error() {
    let table = parse("Clock:Tick#,Alt\nx,1\ny,2\n");
    let err = resolve(&table, CLOCK).unwrap_err();
    assert_eq!(
        err,
        AnalysisError::NoValidTimeValues {
            column: CLOCK.to_string()
        }
    );
}

// ============================================
// Range Filter Tests
// ============================================

#[test]
fn test_filter_is_inclusive() {
    let table = parse("Clock:Tick#,Alt\n0,1\n1000000,2\n2000000,3\n");
    let resolved = resolve(&table, CLOCK).unwrap();

    let filtered = filter_range(&resolved.table, CLOCK, TimeRange::new(0.5, 2.0));
    assert_eq!(filtered.row_count(), 2);
    assert_eq!(filtered.numeric_column("Alt"), vec![Some(2.0), Some(3.0)]);

    let exact = filter_range(&resolved.table, CLOCK, TimeRange::new(1.0, 1.0));
    assert_eq!(exact.row_count(), 1);
}

#[test]
fn test_filter_inverted_range_is_empty() {
    let table = parse("Clock:Tick#,Alt\n0,1\n1000000,2\n");
    let resolved = resolve(&table, CLOCK).unwrap();

    let filtered = filter_range(&resolved.table, CLOCK, TimeRange::new(2.0, 0.5));
    assert!(filtered.is_empty());
    assert_eq!(filtered.columns(), resolved.table.columns());
}

#[test]
fn test_hints_for_seconds_axis() {
    let table = parse(&synthetic::straight_flight(11));
    let resolved = resolve(&table, CLOCK).unwrap();
    let extent = resolved.extent().unwrap();
    assert_eq!(extent, (0.0, 10.0));

    let hints = RangeHints::for_axis(&resolved.axis, extent);
    assert!((hints.step - 0.1).abs() < 1e-12);
    assert_eq!(hints.precision, 3);
    assert_eq!(hints.format(1.5), "1.500");
}

#[test]
fn test_hints_for_short_and_flat_axes() {
    let table = parse("Clock:Tick#,Alt\n0,1\n10,2\n");
    let resolved = resolve(&table, CLOCK).unwrap();
    let hints = RangeHints::for_axis(&resolved.axis, resolved.extent().unwrap());
    assert_eq!(hints.step, 0.001);

    let flat = RangeHints::for_axis(&resolved.axis, (2.0, 2.0));
    assert_eq!(flat.step, 0.01);
}

#[test]
fn test_hints_for_index_axis() {
    let table = parse("Alt\n1\n2\n3\n");
    let resolved = resolve(&table, CLOCK).unwrap();
    let hints = RangeHints::for_axis(&resolved.axis, resolved.extent().unwrap());

    assert_eq!(hints.step, 1.0);
    assert_eq!(hints.precision, 0);
    assert_eq!(hints.scrub_step, 1.0);
}

// ============================================
// Nearest / Heading Tests
// ============================================

#[test]
fn test_nearest_on_resolved_flight() {
    let table = parse(&synthetic::straight_flight(3));
    let resolved = resolve(&table, CLOCK).unwrap();
    let shape = to_map_schema(
        &resolved.table,
        CLOCK,
        "GPS:Lat",
        "GPS:Long",
        Some("IMU_ATTI(1):yaw360:C"),
    )
    .unwrap();

    assert_eq!(nearest(&shape.samples, 1.2).map(|s| s.time), Some(1.0));
    assert_eq!(nearest(&shape.samples, 1.5).map(|s| s.time), Some(1.0));
    assert_eq!(nearest(&shape.samples, 99.0).map(|s| s.time), Some(2.0));
    assert!(nearest(&[], 1.0).is_none());
}

#[test]
fn test_heading_conversion() {
    assert_eq!(to_map_angle(0.0), 90.0);
    assert_eq!(to_map_angle(90.0), 0.0);
    assert_eq!(to_map_angle(180.0), -90.0);
    assert_eq!(to_map_angle(360.0), -270.0);
}

// ============================================
// Shaper Tests
// ============================================

#[test]
fn test_long_format_keys() {
    let table = parse("Clock:Tick#,Alt,Volts\n0,1,16.7\n1000000,,16.6\n");
    let resolved = resolve(&table, CLOCK).unwrap();
    let params = vec!["Alt".to_string(), "Volts".to_string()];
    let rows = to_long_format(&resolved.table, CLOCK, &params);

    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].parameter, "Alt");
    assert_eq!(rows[1].parameter, "Volts");
    assert_eq!(rows[2].time, 1.0);
    assert_eq!(rows[2].value, None);

    let series = group_series(&rows, &params);
    assert_eq!(series[0].points, vec![[0.0, 1.0]]);
    assert_eq!(series[1].points.len(), 2);
}

#[test]
fn test_map_schema_drops_incomplete_fixes() {
    let table = parse("Clock:Tick#,GPS:Lat,GPS:Long,Yaw\n0,1,2,10\n1000000,,3,20\n2000000,4,5,\n");
    let resolved = resolve(&table, CLOCK).unwrap();
    let shape = to_map_schema(&resolved.table, CLOCK, "GPS:Lat", "GPS:Long", Some("Yaw")).unwrap();

    assert_eq!(shape.samples.len(), 2);
    assert_eq!(shape.dropped_rows, 1);
    assert_eq!(shape.samples[0].heading, Some(10.0));
    assert_eq!(shape.samples[1].heading, None);
    assert_samples_complete(&shape.samples);
}

#[test]
fn test_map_schema_rejects_identical_columns() {
    let table = parse("Clock:Tick#,GPS:Lat,GPS:Long\n0,1,2\n");
    let resolved = resolve(&table, CLOCK).unwrap();
    let err = to_map_schema(&resolved.table, CLOCK, "GPS:Lat", "GPS:Lat", None).unwrap_err();
    assert!(matches!(err, AnalysisError::DegenerateMapColumns { .. }));
}

#[test]
fn test_map_schema_without_heading_column() {
    let table = parse("Clock:Tick#,GPS:Lat,GPS:Long\n0,1,2\n1000000,3,4\n");
    let resolved = resolve(&table, CLOCK).unwrap();
    let shape = to_map_schema(&resolved.table, CLOCK, "GPS:Lat", "GPS:Long", Some("Yaw")).unwrap();

    assert!(shape.samples.iter().all(|s| s.heading.is_none()));
    let times: Vec<f64> = shape.samples.iter().map(|s| s.time).collect();
    assert_monotonic(&times);
}
