//! Validate command implementation

use serde::Serialize;
use tracing::info;

use super::{InputFormat, load_input, load_records};
use crate::cli::error::CliError;
use crate::cli::output::parse_schema;
use crate::validation::{ValidationMismatch, Validator};

/// Arguments for the validate command
#[derive(Debug, Clone)]
pub struct ValidateArgs {
    /// Schema description written by `infer` (JSON or YAML)
    pub schema: String,
    /// Records to check, or `-` for stdin
    pub input: String,
    pub input_format: Option<InputFormat>,
    /// Report fields the schema does not declare
    pub strict: bool,
}

/// Mismatches of one failing record
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordFailure {
    /// Zero-based position in the input
    pub index: usize,
    pub mismatches: Vec<ValidationMismatch>,
}

/// Outcome of validating a record batch
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    pub records: usize,
    pub failures: Vec<RecordFailure>,
}

impl ValidationSummary {
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Validate records against a stored schema description
pub fn run_validate(args: &ValidateArgs) -> Result<ValidationSummary, CliError> {
    if args.schema == "-" && args.input == "-" {
        return Err(CliError::InvalidArgument(
            "Schema and input cannot both be read from stdin".to_string(),
        ));
    }

    let schema = parse_schema(&load_input(&args.schema)?)?;
    let records = load_records(&args.input, args.input_format)?;

    let validator = Validator::new(&schema).strict(args.strict);
    let failures: Vec<RecordFailure> = validator
        .validate_all(&records)
        .into_iter()
        .enumerate()
        .filter(|(_, report)| !report.is_valid())
        .map(|(index, report)| RecordFailure {
            index,
            mismatches: report.into_mismatches(),
        })
        .collect();

    info!(
        records = records.len(),
        failed = failures.len(),
        "Validated against '{}'",
        schema.name()
    );

    Ok(ValidationSummary {
        records: records.len(),
        failures,
    })
}

/// Handle the validate command; returns whether every record passed
pub fn handle_validate(args: &ValidateArgs) -> Result<bool, CliError> {
    let summary = run_validate(args)?;

    if summary.is_valid() {
        println!("Validation successful: {} records", summary.records);
    } else {
        let rendered = serde_json::to_string_pretty(&summary)
            .map_err(|e| CliError::Serialization(e.to_string()))?;
        println!("{}", rendered);
    }
    Ok(summary.is_valid())
}
