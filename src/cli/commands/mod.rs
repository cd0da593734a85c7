//! CLI command implementations

pub mod infer;
pub mod validate;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::cli::error::CliError;
use crate::import::{CsvImporter, JsonImporter};
use crate::inference::Record;

/// Sample file layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Json,
}

impl InputFormat {
    /// Guess from the file extension; JSON unless it ends in `.csv` or `.tsv`
    pub fn from_path(path: &str) -> Self {
        let extension = Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("csv") | Some("tsv") => InputFormat::Csv,
            _ => InputFormat::Json,
        }
    }
}

impl FromStr for InputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csv" => Ok(InputFormat::Csv),
            "json" => Ok(InputFormat::Json),
            other => Err(CliError::InvalidArgument(format!(
                "Unknown input format: {}",
                other
            ))),
        }
    }
}

/// Load input content from file or stdin
pub(crate) fn load_input(input: &str) -> Result<String, CliError> {
    if input == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(|e| CliError::InvalidArgument(format!("Failed to read stdin: {}", e)))?;
        Ok(content)
    } else {
        let path = PathBuf::from(input);
        std::fs::read_to_string(&path).map_err(|e| CliError::FileReadError(path, e.to_string()))
    }
}

/// Load sample records from a file or stdin
pub(crate) fn load_records(
    input: &str,
    format: Option<InputFormat>,
) -> Result<Vec<Record>, CliError> {
    let content = load_input(input)?;
    let format = format.unwrap_or_else(|| InputFormat::from_path(input));

    let records = match format {
        InputFormat::Csv => {
            let importer = if input.to_ascii_lowercase().ends_with(".tsv") {
                CsvImporter::new().with_delimiter(b'\t')
            } else {
                CsvImporter::new()
            };
            importer.parse(&content)?
        }
        InputFormat::Json => JsonImporter::new().parse(&content)?,
    };
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_format_from_path() {
        assert_eq!(InputFormat::from_path("data/sales.csv"), InputFormat::Csv);
        assert_eq!(InputFormat::from_path("data/sales.TSV"), InputFormat::Csv);
        assert_eq!(InputFormat::from_path("data/app.json"), InputFormat::Json);
        assert_eq!(InputFormat::from_path("-"), InputFormat::Json);
    }

    #[test]
    fn test_load_records_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.csv");
        std::fs::write(&path, "a,b\n1,x\n2,\n").unwrap();

        let records = load_records(path.to_str().unwrap(), None).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_load_records_missing_file() {
        assert!(matches!(
            load_records("/nonexistent/rows.json", None),
            Err(CliError::FileReadError(..))
        ));
    }
}
