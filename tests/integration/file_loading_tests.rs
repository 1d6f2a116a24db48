//! File loading integration tests
//!
//! Tests for end-to-end loading and redraws over the bundled flight log.

use dronelog::analysis::range_filter::TimeRange;
use dronelog::parsers::TelemetryCsv;
use dronelog::settings::UserSettings;
use dronelog::state::{NoticeLevel, Session, PREFERRED_TIME_COLUMN};
use std::path::Path;

use crate::common::assertions::*;
use crate::common::example_files::*;
use crate::common::read_example_file;

fn open_short_flight() -> Session {
    Session::open(Path::new(DJI_SHORT_FLIGHT), PREFERRED_TIME_COLUMN).expect("Should load")
}

// ============================================
// Loading Tests
// ============================================

#[test]
fn test_detect_datcon_export() {
    let content = read_example_file(DJI_SHORT_FLIGHT);
    assert!(TelemetryCsv::detect(&content));
    assert!(!TelemetryCsv::detect("time,lat,lon\n0,1,2\n"));
}

#[test]
fn test_load_short_flight() {
    let session = open_short_flight();

    assert_eq!(session.name, "short_flight.csv");
    assert_eq!(session.source().row_count(), 12);
    assert_eq!(session.resolved().table.row_count(), 11);
    assert_eq!(session.resolved().dropped_rows, 1);
    assert_eq!(session.extent(), Some((0.0, 5.0)));
    assert_monotonic(&session.resolved().times());
}

#[test]
fn test_short_flight_hints() {
    let hints = open_short_flight().hints().expect("Should have hints");
    assert!((hints.step - 0.05).abs() < 1e-12);
    assert!((hints.scrub_step - 0.025).abs() < 1e-12);
    assert_eq!(hints.precision, 3);
}

#[test]
fn test_short_flight_cells() {
    let session = open_short_flight();
    let table = &session.resolved().table;

    // NaN is missing, the flight mode column is text
    let volts = table.numeric_column("Battery:Volts");
    assert_eq!(volts[8], None);
    assert_eq!(volts[9], Some(16.55));
    assert!(table.numeric_column("FlyCMode").iter().all(Option::is_none));
}

#[test]
fn test_load_missing_file() {
    assert!(Session::open(Path::new("exampleLogs/dji/absent.csv"), PREFERRED_TIME_COLUMN).is_err());
}

// ============================================
// Redraw Tests
// ============================================

#[test]
fn test_short_flight_full_redraw() {
    let session = open_short_flight();
    let frame = session.redraw(&session.default_config(&UserSettings::default()));

    assert_eq!(frame.filtered_rows, 11);
    assert_eq!(frame.available_parameters.len(), 6);
    assert_eq!(frame.charts[0].parameters, vec!["GPS:Lat".to_string()]);
    assert_eq!(frame.charts[0].point_count(), 10);

    let map = frame.map.expect("Should build a map");
    assert_eq!(map.path.coordinates.len(), 10);
    assert_eq!(map.current.map(|c| c.time), Some(0.0));
    assert!(frame.notices.is_empty(), "{:?}", frame.notices);
}

#[test]
fn test_short_flight_range_and_scrub() {
    let session = open_short_flight();
    let mut config = session.default_config(&UserSettings::default());
    config.range = Some(TimeRange::new(0.5, 2.0));
    config.scrub_time = Some(1.2);
    let frame = session.redraw(&config);

    assert_eq!(frame.filtered_rows, 4);
    let map = frame.map.expect("Should build a map");
    let current = map.current.expect("Should have a current sample");
    assert_eq!(current.time, 1.0);
    let angle = map.heading.map(|h| h.angle).expect("Should have a heading");
    assert!((angle - 75.8).abs() < 1e-9);
}

#[test]
fn test_short_flight_sample_without_heading() {
    let session = open_short_flight();
    let mut config = session.default_config(&UserSettings::default());
    config.scrub_time = Some(2.5);
    let frame = session.redraw(&config);

    let map = frame.map.expect("Should build a map");
    assert_eq!(map.current.as_ref().map(|c| c.time), Some(2.5));
    assert!(map.heading.is_none());
    assert!(map.marker.is_some());
}

#[test]
fn test_short_flight_identical_map_columns() {
    let session = open_short_flight();
    let mut config = session.default_config(&UserSettings::default());
    config.map.lon = config.map.lat.clone();
    let frame = session.redraw(&config);

    assert!(frame.map.is_none());
    assert!(frame.notices.iter().any(|n| n.level == NoticeLevel::Error));
    // Charts are unaffected by map errors
    assert_eq!(frame.charts.len(), 1);
}

#[test]
fn test_short_flight_index_axis() {
    let session = Session::open(Path::new(DJI_SHORT_FLIGHT), "Clock:Missing").expect("Should load");

    assert!(!session.axis().is_scaled_seconds);
    assert_eq!(session.extent(), Some((0.0, 11.0)));
    // The tick column is an ordinary parameter on an index axis
    assert!(session
        .parameter_columns()
        .contains(&PREFERRED_TIME_COLUMN.to_string()));
}
