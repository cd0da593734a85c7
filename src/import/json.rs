//! JSON importer

use std::io::Read;

use tracing::debug;

use super::ImportError;
use crate::inference::{Record, Value};

/// JSON importer
///
/// Accepts a top-level array of objects, a single object, or a stream of
/// whitespace/newline separated objects (NDJSON).
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonImporter;

impl JsonImporter {
    pub fn new() -> Self {
        Self
    }

    /// Parse JSON text into records
    pub fn parse(&self, text: &str) -> Result<Vec<Record>, ImportError> {
        let values = serde_json::Deserializer::from_str(text)
            .into_iter::<serde_json::Value>()
            .collect::<Result<Vec<_>, _>>()?;

        let values = match <[serde_json::Value; 1]>::try_from(values) {
            Ok([serde_json::Value::Array(items)]) => items,
            Ok([single]) => vec![single],
            Err(values) => values,
        };

        let records = values
            .into_iter()
            .enumerate()
            .map(|(index, value)| match Value::from(value) {
                Value::Object(record) => Ok(record),
                other => Err(ImportError::NotAnObject {
                    index,
                    found: other.type_name(),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(records = records.len(), "Imported JSON");
        Ok(records)
    }

    /// Read JSON from any reader
    pub fn read<R: Read>(&self, mut reader: R) -> Result<Vec<Record>, ImportError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        self.parse(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_array() {
        let records = JsonImporter::new()
            .parse(r#"[{"a": 1}, {"a": 2, "b": "x"}]"#)
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["b"], Value::String("x".to_string()));
    }

    #[test]
    fn test_parse_single_object() {
        let records = JsonImporter::new().parse(r#"{"a": true}"#).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["a"], Value::Bool(true));
    }

    #[test]
    fn test_parse_ndjson() {
        let text = "{\"a\": 1}\n{\"a\": 2.5}\n\n{\"a\": null}\n";
        let records = JsonImporter::new().parse(text).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[2]["a"], Value::Null);
    }

    #[test]
    fn test_empty_input() {
        assert!(JsonImporter::new().parse("  \n").unwrap().is_empty());
        assert!(JsonImporter::new().parse("[]").unwrap().is_empty());
    }

    #[test]
    fn test_non_object_item() {
        let err = JsonImporter::new().parse(r#"[{"a": 1}, 2]"#).unwrap_err();
        assert!(matches!(
            err,
            ImportError::NotAnObject {
                index: 1,
                found: "integer"
            }
        ));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            JsonImporter::new().parse(r#"{"a": "#),
            Err(ImportError::JsonParse(_))
        ));
    }
}
