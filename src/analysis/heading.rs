//! Compass heading to map rotation.
//!
//! Compass headings are 0° at north and increase clockwise. Map glyph
//! rotation is 0° at east and increases counter-clockwise.

/// Convert a compass heading in degrees to a map rotation angle in degrees.
///
/// The result is not normalised to `[0, 360)`.
#[inline]
pub fn to_map_angle(heading_degrees: f64) -> f64 {
    90.0 - heading_degrees
}

/// Convert an optional heading; a missing heading stays missing
pub fn optional_map_angle(heading_degrees: Option<f64>) -> Option<f64> {
    heading_degrees.map(to_map_angle)
}
