//! dronelog - post-flight analysis of drone telemetry logs
//!
//! This library reads telemetry CSV exports, derives a time axis, and
//! prepares chart series and map scenes for external renderers.
//!
//! ## Module Structure
//!
//! - [`parsers`] - Telemetry CSV reading into untyped tables
//! - [`analysis`] - Pipeline stages
//!   - `time_axis` - Time axis resolution (ticks to seconds or row index)
//!   - `range_filter` - Inclusive time range filtering and input hints
//!   - `nearest` - Nearest-sample lookup for the map scrubber
//!   - `heading` - Compass heading to map rotation
//!   - `shaper` - Long-format chart rows and map samples
//! - [`normalize`] - Known names for GPS and heading columns
//! - [`state`] - Session, per-redraw configuration and constants
//! - [`render`] - Renderer interfaces and JSON/text renderers
//! - [`settings`] - User settings persistence

pub mod analysis;
pub mod normalize;
pub mod parsers;
pub mod render;
pub mod settings;
pub mod state;
