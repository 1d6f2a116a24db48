pub mod telemetry_csv;
pub mod types;

pub use telemetry_csv::TelemetryCsv;
pub use types::{ParseError, Parseable, RawTable, Value};
