//! Validation functionality
//!
//! Checks new records against an inferred
//! [`SchemaDescription`](crate::inference::SchemaDescription):
//! - Kind assignability per field (same lattice as inference)
//! - Required vs optional fields
//! - Nested objects and array elements

pub mod records;

pub use records::{MismatchReason, ValidationMismatch, ValidationReport, Validator};
