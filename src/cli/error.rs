//! CLI error type

use std::path::PathBuf;

use thiserror::Error;

use crate::import::ImportError;
use crate::inference::InferenceError;

/// Errors surfaced by the `smart-schema` binary
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to read {0}: {1}")]
    FileReadError(PathBuf, String),

    #[error("Failed to write {0}: {1}")]
    FileWriteError(PathBuf, String),

    #[error("Invalid config file {0}: {1}")]
    ConfigError(PathBuf, String),

    #[error("Import failed: {0}")]
    Import(#[from] ImportError),

    #[error("Inference failed: {0}")]
    Inference(#[from] InferenceError),

    #[error("Serialization failed: {0}")]
    Serialization(String),
}
