use serde::Serialize;
use thiserror::Error;

/// Tokens treated as missing values when reading a log
pub const NA_TOKENS: &[&str] = &[
    "", "NA", "N/A", "NaN", "nan", "-nan", "null", "NULL", "None", "#N/A",
];

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur while reading a telemetry table
#[derive(Debug, Error)]
pub enum ParseError {
    /// Failed to read the source file
    #[error("Failed to read log file: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV reader rejected the input
    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// The input has no header row
    #[error("No columns to parse from file")]
    NoHeader,

    /// A data row has more fields than the header
    #[error("Row on line {line} has {found} fields, expected at most {expected}")]
    RaggedRow {
        line: u64,
        expected: usize,
        found: usize,
    },
}

// ============================================================================
// Values
// ============================================================================

/// A single cell as read from the log
///
/// Columns are not pre-typed: numbers are recognised at read time, and
/// everything else is kept as text so it can be shown in previews.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

impl Value {
    /// Classify a raw cell: NA tokens are missing, parseable floats are numbers
    pub fn from_cell(raw: &str) -> Self {
        let trimmed = raw.trim();
        if NA_TOKENS.contains(&trimmed) {
            return Value::Missing;
        }
        match trimmed.parse::<f64>() {
            Ok(v) if !v.is_nan() => Value::Number(v),
            Ok(_) => Value::Missing,
            Err(_) => Value::Text(trimmed.to_string()),
        }
    }

    /// Numeric coercion: text and missing cells have no numeric value
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(v) => Some(*v),
            Value::Text(_) | Value::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Number(v) => write!(f, "{}", v),
            Value::Text(s) => write!(f, "{}", s),
            Value::Missing => write!(f, "NaN"),
        }
    }
}

// ============================================================================
// RawTable
// ============================================================================

/// An uploaded log: ordered rows over a set of uniquely named columns
///
/// Every row has exactly one value per column. Derived tables (resolved,
/// filtered) are new tables; a loaded table is never mutated in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl RawTable {
    /// Build a table, making duplicate column names unique and padding
    /// short rows with missing values
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        let columns = dedupe_columns(columns);
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Value::Missing);
                row
            })
            .collect();
        Self { columns, rows }
    }

    /// An empty table sharing this table's column schema
    pub fn empty_like(&self) -> Self {
        Self {
            columns: self.columns.clone(),
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Find column index by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Value at a given row and column, if both exist
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(idx))
    }

    /// Numerically coerced values of one column, `None` where coercion fails.
    /// Returns an empty vector for unknown columns.
    pub fn numeric_column(&self, name: &str) -> Vec<Option<f64>> {
        match self.column_index(name) {
            Some(idx) => self.rows.iter().map(|row| row[idx].as_f64()).collect(),
            None => Vec::new(),
        }
    }

    /// First `n` rows as a new table
    pub fn head(&self, n: usize) -> Self {
        Self {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }

    /// Keep rows whose index satisfies `keep`, preserving order
    pub fn retain_rows<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(usize, &[Value]) -> bool,
    {
        Self {
            columns: self.columns.clone(),
            rows: self
                .rows
                .iter()
                .enumerate()
                .filter(|(i, row)| keep(*i, row))
                .map(|(_, row)| row.clone())
                .collect(),
        }
    }

    /// Copy of this table with one column's values replaced (or appended
    /// when the column does not exist). `values` must have one entry per row.
    pub fn with_column(&self, name: &str, values: Vec<Value>) -> Self {
        debug_assert_eq!(values.len(), self.rows.len());
        let mut columns = self.columns.clone();
        let idx = match self.column_index(name) {
            Some(idx) => idx,
            None => {
                columns.push(name.to_string());
                columns.len() - 1
            }
        };
        let rows = self
            .rows
            .iter()
            .zip(values)
            .map(|(row, value)| {
                let mut row = row.clone();
                if idx < row.len() {
                    row[idx] = value;
                } else {
                    row.push(value);
                }
                row
            })
            .collect();
        Self { columns, rows }
    }
}

/// Rename repeated headers to `name.1`, `name.2`, ... so names stay unique
fn dedupe_columns(columns: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(columns.len());
    for name in columns {
        if !seen.contains(&name) {
            seen.push(name);
            continue;
        }
        let mut suffix = 1;
        let renamed = loop {
            let candidate = format!("{}.{}", name, suffix);
            if !seen.contains(&candidate) {
                break candidate;
            }
            suffix += 1;
        };
        tracing::warn!("Duplicate column '{}' renamed to '{}'", name, renamed);
        seen.push(renamed);
    }
    seen
}

/// Trait for telemetry log readers
pub trait Parseable {
    fn parse(&self, data: &str) -> Result<RawTable, ParseError>;
}
