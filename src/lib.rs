//! Smart Schema - schema inference and validation for sample data
//!
//! Provides:
//! - Schema inference from sample records (type lattice, nested shapes, optional fields)
//! - Shard merging of inferred schemas
//! - Record validation against an inferred schema
//! - CSV and JSON record importers
//! - JSON Schema export of inferred schemas

pub mod cli;
pub mod import;
pub mod inference;
pub mod validation;

// Re-export commonly used types
pub use import::{CsvImporter, ImportError, JsonImporter};
pub use inference::{
    FieldShape, InferenceConfig, InferenceError, Kind, Record, SchemaDescription, SchemaInferrer,
    Value, infer, merge, merge_schemas,
};
pub use validation::{MismatchReason, ValidationMismatch, ValidationReport, Validator};
