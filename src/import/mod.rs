//! Import functionality
//!
//! Turns sample data into in-memory [`Record`](crate::inference::Record)s:
//! - CSV (header row as field names, cells coerced to typed values)
//! - JSON (array of objects, single object, or newline-delimited objects)
//!
//! Importers read from strings or any `std::io::Read`; opening files is left
//! to the caller.

pub mod csv;
pub mod json;

/// Error during import
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("CSV error: {0}")]
    Csv(String),
    #[error("Row {row} has {found} fields, header has {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("JSON parse error: {0}")]
    JsonParse(String),
    #[error("Record {index} is not an object, found {found}")]
    NotAnObject { index: usize, found: &'static str },
    #[error("IO error: {0}")]
    IoError(String),
}

impl From<::csv::Error> for ImportError {
    fn from(e: ::csv::Error) -> Self {
        ImportError::Csv(e.to_string())
    }
}

impl From<serde_json::Error> for ImportError {
    fn from(e: serde_json::Error) -> Self {
        ImportError::JsonParse(e.to_string())
    }
}

impl From<std::io::Error> for ImportError {
    fn from(e: std::io::Error) -> Self {
        ImportError::IoError(e.to_string())
    }
}

// Re-export for convenience
pub use self::csv::CsvImporter;
pub use self::json::JsonImporter;
