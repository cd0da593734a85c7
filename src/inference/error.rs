//! Error types for schema inference

use thiserror::Error;

use super::types::FieldShape;

/// Errors that can occur during schema inference
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InferenceError {
    /// Two shapes for the same field cannot be reconciled
    #[error("Shape conflict at '{path}': {left} vs {right}")]
    ShapeConflict {
        path: String,
        left: FieldShape,
        right: FieldShape,
    },

    /// Invalid structure (not an object at root)
    #[error("Invalid structure: expected object at root, found {0}")]
    InvalidStructure(String),

    /// Maximum depth exceeded
    #[error("Maximum nesting depth exceeded: {depth} > {max}")]
    MaxDepthExceeded { depth: usize, max: usize },

    /// No records to infer from
    #[error("No records provided for inference")]
    NoRecords,
}

impl InferenceError {
    /// Field path of a shape conflict
    pub fn conflict_path(&self) -> Option<&str> {
        match self {
            InferenceError::ShapeConflict { path, .. } => Some(path),
            _ => None,
        }
    }
}
