//! Infer command implementation

use std::path::PathBuf;

use tracing::info;

use super::{InputFormat, load_records};
use crate::cli::config::load_config;
use crate::cli::error::CliError;
use crate::cli::output::{SchemaFormat, format_schema};
use crate::inference::{InferenceConfig, SchemaInferrer};

/// Arguments for the infer command
#[derive(Debug, Clone)]
pub struct InferArgs {
    /// Sample file, or `-` for stdin
    pub input: String,
    /// Input layout; guessed from the extension when absent
    pub input_format: Option<InputFormat>,
    /// Model name, overriding the config file
    pub name: Option<String>,
    pub format: SchemaFormat,
    /// Inference config file (TOML, YAML or JSON)
    pub config: Option<PathBuf>,
    /// Write here instead of stdout
    pub output: Option<PathBuf>,
    /// Examine at most this many records
    pub sample_size: Option<usize>,
    /// Classify date-like strings as plain strings
    pub no_datetime: bool,
}

impl InferArgs {
    fn build_config(&self) -> Result<InferenceConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => InferenceConfig::default(),
        };
        if let Some(name) = &self.name {
            config.model_name = name.clone();
        }
        if let Some(size) = self.sample_size {
            config.sample_size = size;
        }
        if self.no_datetime {
            config.detect_datetime = false;
        }
        Ok(config)
    }
}

/// Infer a schema from sample records and return its rendering
pub fn run_infer(args: &InferArgs) -> Result<String, CliError> {
    let config = args.build_config()?;
    let records = load_records(&args.input, args.input_format)?;

    let mut inferrer = SchemaInferrer::with_config(config);
    inferrer.add_records(&records)?;
    let stats = inferrer.stats();
    let schema = inferrer.finalize()?;

    info!(
        records = stats.records_processed,
        skipped = stats.records_skipped,
        fields = stats.fields_discovered,
        "Inferred schema '{}'",
        schema.name()
    );

    format_schema(&schema, args.format)
}

/// Handle the infer command
pub fn handle_infer(args: &InferArgs) -> Result<(), CliError> {
    let rendered = run_infer(args)?;

    match &args.output {
        Some(path) => std::fs::write(path, &rendered)
            .map_err(|e| CliError::FileWriteError(path.clone(), e.to_string()))?,
        None => println!("{}", rendered),
    }
    Ok(())
}
