//! Column name normalization for map fields.
//!
//! Different exporters (DatCon, Airdata, flight controller dumps) name the
//! GPS and attitude columns differently. This module maps the known source
//! names to the logical map fields so sensible defaults can be chosen when
//! the preferred column names are not present.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;
use strum::{AsRefStr, EnumIter, IntoEnumIterator};

/// Logical fields consumed by the map
#[derive(AsRefStr, Clone, Copy, Debug, EnumIter, PartialEq, Eq, Hash)]
pub enum MapField {
    Latitude,
    Longitude,
    Heading,
}

/// Known source names for each map field, in priority order
static FIELD_ALIASES: LazyLock<HashMap<MapField, Vec<&'static str>>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    map.insert(
        MapField::Latitude,
        vec![
            "GPS:Lat",
            "GPS:Latitude",
            "OSD.latitude",
            "latitude",
            "lat",
            "GPS_Lat",
            "gps_lat",
        ],
    );

    map.insert(
        MapField::Longitude,
        vec![
            "GPS:Long",
            "GPS:Lon",
            "GPS:Longitude",
            "OSD.longitude",
            "longitude",
            "lon",
            "lng",
            "long",
            "GPS_Long",
            "GPS_Lon",
            "gps_lon",
        ],
    );

    map.insert(
        MapField::Heading,
        vec![
            "IMU_ATTI:yaw360:C",
            "IMU_ATTI:yaw360",
            "IMU_ATTI:yaw",
            "OSD.yaw",
            "heading",
            "compass_heading",
            "yaw",
        ],
    );

    map
});

/// Index suffixes such as `(1)` and unit suffixes such as `[deg]`
static DECORATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\d+\)|\[[^\]]*\]|\s+").expect("Invalid regex pattern"));

/// Canonical comparison key: lowercase without index, unit and whitespace
pub fn canonical_name(name: &str) -> String {
    DECORATION.replace_all(name, "").to_lowercase()
}

/// The logical map field a column name refers to, if any
pub fn classify_column(name: &str) -> Option<MapField> {
    let key = canonical_name(name);
    MapField::iter().find(|field| {
        FIELD_ALIASES[field]
            .iter()
            .any(|alias| canonical_name(alias) == key)
    })
}

/// Find the column best matching `field` among `columns`.
///
/// Aliases are tried in priority order, so `GPS:Lat` wins over a generic
/// `lat` column when both exist.
pub fn find_column<'a>(field: MapField, columns: &'a [String]) -> Option<&'a str> {
    let keys: Vec<String> = columns.iter().map(|c| canonical_name(c)).collect();
    FIELD_ALIASES[&field].iter().find_map(|alias| {
        let alias_key = canonical_name(alias);
        keys.iter()
            .position(|k| *k == alias_key)
            .map(|idx| columns[idx].as_str())
    })
}
