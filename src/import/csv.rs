//! CSV importer
//!
//! Cells arrive as text; each is coerced to the narrowest value it spells,
//! the way dataframe CSV readers do, so the inference engine sees typed
//! values rather than a column of strings.

use std::io::Read;

use tracing::debug;

use super::ImportError;
use crate::inference::{Record, Value};

/// Cell spellings read as missing values
pub const DEFAULT_NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// CSV importer
#[derive(Debug, Clone)]
pub struct CsvImporter {
    delimiter: u8,
    na_values: Vec<String>,
}

impl Default for CsvImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvImporter {
    /// Comma-delimited importer with the default missing-value spellings
    pub fn new() -> Self {
        Self {
            delimiter: b',',
            na_values: DEFAULT_NA_VALUES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Set the field delimiter
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Replace the set of cell spellings treated as missing
    #[must_use]
    pub fn with_na_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.na_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Parse CSV text
    pub fn parse(&self, text: &str) -> Result<Vec<Record>, ImportError> {
        self.read(text.as_bytes())
    }

    /// Read CSV from any reader; the first row is the header
    pub fn read<R: Read>(&self, reader: R) -> Result<Vec<Record>, ImportError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .delimiter(self.delimiter)
            .flexible(true)
            .from_reader(reader);

        let headers = dedupe_headers(reader.headers()?.iter());
        let mut records = Vec::new();

        for (index, row) in reader.records().enumerate() {
            let row = row?;
            if row.len() > headers.len() {
                return Err(ImportError::RaggedRow {
                    row: index + 1,
                    found: row.len(),
                    expected: headers.len(),
                });
            }

            // Short rows are padded with missing values
            let record: Record = headers
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    let value = row.get(i).map_or(Value::Null, |cell| self.coerce(cell));
                    (name.clone(), value)
                })
                .collect();
            records.push(record);
        }

        debug!(rows = records.len(), columns = headers.len(), "Imported CSV");
        Ok(records)
    }

    /// Coerce one cell to the narrowest value it spells
    pub fn coerce(&self, cell: &str) -> Value {
        if self.na_values.iter().any(|na| na == cell) {
            return Value::Null;
        }

        let trimmed = cell.trim();
        if trimmed.eq_ignore_ascii_case("true") {
            return Value::Bool(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return Value::Bool(false);
        }
        if let Ok(i) = trimmed.parse::<i64>() {
            return Value::Int(i);
        }
        if let Ok(f) = trimmed.parse::<f64>() {
            return Value::Float(f);
        }

        Value::String(cell.to_string())
    }
}

/// Repeated header names get `.1`, `.2`, ... suffixes
fn dedupe_headers<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for name in names {
        let mut candidate = name.to_string();
        let mut n = 1;
        while seen.contains(&candidate) {
            candidate = format!("{}.{}", name, n);
            n += 1;
        }
        seen.push(candidate);
    }
    seen
}
