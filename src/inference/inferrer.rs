//! Schema inference engine

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::classify::classify_with;
use super::config::InferenceConfig;
use super::error::InferenceError;
use super::types::{FieldShape, Fields, Kind, SchemaDescription};
use super::unify::{check_fields, child_path, element_path, merge_fields, unify_shapes};
use super::value::{Record, Value};

/// Infer the shape of one record with default settings
///
/// Always returns an `Object` shape.
pub fn infer(record: &Record) -> Result<FieldShape, InferenceError> {
    infer_with(record, &InferenceConfig::default())
}

/// Infer the shape of one record
pub fn infer_with(record: &Record, config: &InferenceConfig) -> Result<FieldShape, InferenceError> {
    ShapeInferrer::new(config)
        .infer_record(record)
        .map(FieldShape::Object)
}

/// Walks a single record and builds its shape
struct ShapeInferrer<'a> {
    config: &'a InferenceConfig,
    max_depth_seen: usize,
}

impl<'a> ShapeInferrer<'a> {
    fn new(config: &'a InferenceConfig) -> Self {
        Self {
            config,
            max_depth_seen: 0,
        }
    }

    fn infer_record(&mut self, record: &Record) -> Result<Fields, InferenceError> {
        self.infer_fields(record, "", 1)
    }

    fn infer_fields(
        &mut self,
        record: &Record,
        path: &str,
        depth: usize,
    ) -> Result<Fields, InferenceError> {
        let mut fields = Fields::with_capacity(record.len());
        for (name, value) in record {
            let field_path = child_path(path, name);
            let shape = self.infer_value(value, &field_path, depth)?;
            fields.insert(name.clone(), shape);
        }
        Ok(fields)
    }

    fn infer_value(
        &mut self,
        value: &Value,
        path: &str,
        depth: usize,
    ) -> Result<FieldShape, InferenceError> {
        if depth > self.config.max_depth {
            return Err(InferenceError::MaxDepthExceeded {
                depth,
                max: self.config.max_depth,
            });
        }

        self.max_depth_seen = self.max_depth_seen.max(depth);

        match value {
            Value::Object(nested) => Ok(FieldShape::Object(self.infer_fields(
                nested,
                path,
                depth + 1,
            )?)),
            Value::Array(items) => {
                let item_path = element_path(path);
                let mut element: Option<FieldShape> = None;

                for item in items {
                    let shape = self.infer_value(item, &item_path, depth + 1)?;
                    element = Some(match element {
                        None => shape,
                        Some(acc) => unify_shapes(acc, shape, &item_path)?,
                    });
                }

                // Empty sequences carry Null; merging widens it later
                let element = element.unwrap_or(FieldShape::Primitive(Kind::Null));
                Ok(FieldShape::Array(Box::new(element)))
            }
            scalar => Ok(FieldShape::Primitive(classify_with(Some(scalar), self.config))),
        }
    }
}

/// Statistics from schema inference
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InferenceStats {
    /// Total records processed
    pub records_processed: usize,
    /// Records skipped (invalid JSON or past the sample size)
    pub records_skipped: usize,
    /// Total fields discovered, nested fields included
    pub fields_discovered: usize,
    /// Maximum nesting depth encountered
    pub max_depth: usize,
}

/// Incremental schema inference
///
/// Folds each added record into a running shape, so memory follows the size
/// of the schema rather than the sample.
pub struct SchemaInferrer {
    config: InferenceConfig,
    fields: Option<Fields>,
    record_count: usize,
    skipped_count: usize,
    max_depth_seen: usize,
    cutoff_logged: bool,
}

impl SchemaInferrer {
    /// Create a new schema inferrer with default configuration
    pub fn new() -> Self {
        Self::with_config(InferenceConfig::default())
    }

    /// Create a new schema inferrer with custom configuration
    pub fn with_config(config: InferenceConfig) -> Self {
        Self {
            config,
            fields: None,
            record_count: 0,
            skipped_count: 0,
            max_depth_seen: 0,
            cutoff_logged: false,
        }
    }

    /// Count a record past the sample size as skipped; true if it was
    fn skip_past_sample(&mut self) -> bool {
        if self.config.sample_size == 0 || self.record_count < self.config.sample_size {
            return false;
        }
        if !self.cutoff_logged {
            debug!(
                sample_size = self.config.sample_size,
                "Sample size reached, ignoring further records"
            );
            self.cutoff_logged = true;
        }
        self.skipped_count += 1;
        true
    }

    /// Add a single JSON string for analysis
    ///
    /// Unparsable input is counted as skipped rather than failing the run.
    pub fn add_json(&mut self, json: &str) -> Result<(), InferenceError> {
        if self.skip_past_sample() {
            return Ok(());
        }

        let value: serde_json::Value = match serde_json::from_str(json) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "Skipping unparsable JSON record");
                self.skipped_count += 1;
                return Ok(());
            }
        };

        self.add_value(&Value::from(value))
    }

    /// Add a value for analysis; the root must be an object
    pub fn add_value(&mut self, value: &Value) -> Result<(), InferenceError> {
        match value {
            Value::Object(record) => self.add_record(record),
            other => Err(InferenceError::InvalidStructure(
                other.type_name().to_string(),
            )),
        }
    }

    /// Add a record for analysis
    ///
    /// On error the inferrer is left as it was before the call.
    pub fn add_record(&mut self, record: &Record) -> Result<(), InferenceError> {
        if self.skip_past_sample() {
            return Ok(());
        }

        let mut shape_inferrer = ShapeInferrer::new(&self.config);
        let fields = shape_inferrer.infer_record(record)?;

        if let Some(acc) = &self.fields {
            check_fields(acc, &fields, "")?;
        }
        // Cannot fail once checked
        let merged = match self.fields.take() {
            None => fields,
            Some(acc) => merge_fields(acc, fields, "")?,
        };

        self.fields = Some(merged);
        self.record_count += 1;
        self.max_depth_seen = self.max_depth_seen.max(shape_inferrer.max_depth_seen);
        Ok(())
    }

    /// Add a batch of records
    pub fn add_records<'r, I>(&mut self, records: I) -> Result<(), InferenceError>
    where
        I: IntoIterator<Item = &'r Record>,
    {
        for record in records {
            self.add_record(record)?;
        }
        Ok(())
    }

    /// Get current inference statistics
    pub fn stats(&self) -> InferenceStats {
        InferenceStats {
            records_processed: self.record_count,
            records_skipped: self.skipped_count,
            fields_discovered: self.fields.as_ref().map(count_fields).unwrap_or(0),
            max_depth: self.max_depth_seen,
        }
    }

    /// Get the number of records processed
    pub fn record_count(&self) -> usize {
        self.record_count
    }

    /// Finalize inference and produce the schema description
    pub fn finalize(self) -> Result<SchemaDescription, InferenceError> {
        let Some(fields) = self.fields else {
            return Err(InferenceError::NoRecords);
        };

        debug!(
            model = %self.config.model_name,
            records = self.record_count,
            skipped = self.skipped_count,
            fields = fields.len(),
            "Schema inference finished"
        );

        Ok(SchemaDescription::new(
            self.config.model_name,
            fields,
            self.record_count,
        ))
    }
}

impl Default for SchemaInferrer {
    fn default() -> Self {
        Self::new()
    }
}

fn count_fields(fields: &Fields) -> usize {
    fields
        .values()
        .map(|shape| 1 + count_shape_fields(shape))
        .sum()
}

fn count_shape_fields(shape: &FieldShape) -> usize {
    match shape.required() {
        FieldShape::Object(nested) => count_fields(nested),
        FieldShape::Array(element) => count_shape_fields(element),
        _ => 0,
    }
}
