//! Record validation against an inferred schema
//!
//! Uses the same kind lattice as inference: a value is assignable to a field
//! when unifying its kind with the declared kind leaves the declared kind
//! unchanged. Every mismatch in a record is collected.

use serde::{Deserialize, Serialize};

use crate::inference::{FieldShape, Fields, Record, SchemaDescription, Value, classify};

/// Why a value did not fit its field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MismatchReason {
    /// Value kind or structure not assignable to the declared shape
    TypeMismatch,
    /// Required field absent
    Missing,
    /// Field not in the schema (strict mode only)
    Unexpected,
}

/// A single field that failed validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationMismatch {
    /// Dotted path, with `[i]` for array elements
    pub path: String,
    /// Declared shape, rendered as text
    pub expected: String,
    /// Observed kind or structure
    pub found: String,
    pub reason: MismatchReason,
}

/// Result of validating one record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    mismatches: Vec<ValidationMismatch>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.mismatches.is_empty()
    }

    pub fn mismatches(&self) -> &[ValidationMismatch] {
        &self.mismatches
    }

    pub fn into_mismatches(self) -> Vec<ValidationMismatch> {
        self.mismatches
    }

    fn push(&mut self, path: &str, expected: String, found: &str, reason: MismatchReason) {
        self.mismatches.push(ValidationMismatch {
            path: path.to_string(),
            expected,
            found: found.to_string(),
            reason,
        });
    }
}

/// Validates records against a schema description
pub struct Validator<'a> {
    schema: &'a SchemaDescription,
    strict: bool,
}

impl<'a> Validator<'a> {
    /// Create a validator; fields outside the schema are ignored
    pub fn new(schema: &'a SchemaDescription) -> Self {
        Self {
            schema,
            strict: false,
        }
    }

    /// Report fields that the schema does not declare
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Validate one record, collecting every mismatch
    pub fn validate(&self, record: &Record) -> ValidationReport {
        let mut report = ValidationReport::default();
        self.check_fields(self.schema.fields(), record, "", &mut report);
        report
    }

    /// Validate a batch; one report per record, in order
    pub fn validate_all(&self, records: &[Record]) -> Vec<ValidationReport> {
        records.iter().map(|record| self.validate(record)).collect()
    }

    fn check_fields(
        &self,
        fields: &Fields,
        record: &Record,
        path: &str,
        report: &mut ValidationReport,
    ) {
        for (name, shape) in fields {
            let field_path = join(path, name);
            match record.get(name) {
                Some(value) => self.check_value(shape, value, &field_path, report),
                None if shape.accepts_missing() => {}
                None => report.push(
                    &field_path,
                    shape.to_string(),
                    "missing",
                    MismatchReason::Missing,
                ),
            }
        }

        if self.strict {
            for (name, value) in record {
                if !fields.contains_key(name) {
                    report.push(
                        &join(path, name),
                        "undeclared".to_string(),
                        found_name(value),
                        MismatchReason::Unexpected,
                    );
                }
            }
        }
    }

    fn check_value(
        &self,
        shape: &FieldShape,
        value: &Value,
        path: &str,
        report: &mut ValidationReport,
    ) {
        if value.is_missing() {
            if !shape.accepts_missing() {
                report.push(path, shape.to_string(), "null", MismatchReason::TypeMismatch);
            }
            return;
        }

        match (shape.required(), value) {
            (FieldShape::Object(fields), Value::Object(nested)) => {
                self.check_fields(fields, nested, path, report);
            }
            (FieldShape::Array(element), Value::Array(items)) => {
                for (i, item) in items.iter().enumerate() {
                    self.check_value(element, item, &format!("{}[{}]", path, i), report);
                }
            }
            (FieldShape::Primitive(kind), scalar) if !is_composite(scalar) => {
                let observed = classify(Some(scalar));
                if !kind.accepts(observed) {
                    report.push(
                        path,
                        shape.to_string(),
                        observed.type_name(),
                        MismatchReason::TypeMismatch,
                    );
                }
            }
            (_, other) => report.push(
                path,
                shape.to_string(),
                found_name(other),
                MismatchReason::TypeMismatch,
            ),
        }
    }
}

fn is_composite(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

fn found_name(value: &Value) -> &'static str {
    match value {
        Value::Object(_) => "object",
        Value::Array(_) => "array",
        scalar => classify(Some(scalar)).type_name(),
    }
}

fn join(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", parent, name)
    }
}
