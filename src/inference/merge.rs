//! Schema merging
//!
//! Folds per-record shapes into one schema description, and combines
//! descriptions inferred from separate shards of a sample. Unification is
//! associative and commutative, so shards may be inferred independently.

use tracing::debug;

use super::config::InferenceConfig;
use super::error::InferenceError;
use super::inferrer::SchemaInferrer;
use super::types::{FieldShape, Fields, SchemaDescription};
use super::unify::merge_fields;
use super::value::Record;

/// Merge per-record shapes into a schema description with default settings
pub fn merge<I>(shapes: I) -> Result<SchemaDescription, InferenceError>
where
    I: IntoIterator<Item = FieldShape>,
{
    merge_with_config(shapes, &InferenceConfig::default())
}

/// Merge per-record shapes into a schema description
///
/// Every shape must be an `Object`. A field missing from at least one shape
/// becomes optional; field order is first-seen order across the sequence.
pub fn merge_with_config<I>(
    shapes: I,
    config: &InferenceConfig,
) -> Result<SchemaDescription, InferenceError>
where
    I: IntoIterator<Item = FieldShape>,
{
    let mut merged: Option<Fields> = None;
    let mut count = 0;

    for shape in shapes {
        let fields = match shape {
            FieldShape::Object(fields) => fields,
            other => return Err(InferenceError::InvalidStructure(other.to_string())),
        };
        merged = Some(match merged {
            None => fields,
            Some(acc) => merge_fields(acc, fields, "")?,
        });
        count += 1;
    }

    let fields = merged.ok_or(InferenceError::NoRecords)?;
    debug!(shapes = count, fields = fields.len(), "Merged record shapes");
    Ok(SchemaDescription::new(config.model_name.clone(), fields, count))
}

/// Merge two shard-level schema descriptions
///
/// Sample counts add up and the left name is kept.
pub fn merge_schemas(
    left: SchemaDescription,
    right: SchemaDescription,
) -> Result<SchemaDescription, InferenceError> {
    let sample_count = left.sample_count() + right.sample_count();
    let name = left.name().to_string();
    let fields = merge_fields(left.fields().clone(), right.fields().clone(), "")?;
    Ok(SchemaDescription::new(name, fields, sample_count))
}

/// Infer a schema from a slice of records in one call
pub fn infer_records(
    records: &[Record],
    config: &InferenceConfig,
) -> Result<SchemaDescription, InferenceError> {
    let mut inferrer = SchemaInferrer::with_config(config.clone());
    inferrer.add_records(records)?;
    inferrer.finalize()
}

/// Infer a schema by sharding records across the rayon pool
///
/// Shard results are reduced in record order, so the output equals
/// [`infer_records`] for the same input.
#[cfg(feature = "parallel")]
pub fn infer_records_parallel(
    records: &[Record],
    config: &InferenceConfig,
    shard_size: usize,
) -> Result<SchemaDescription, InferenceError> {
    use rayon::prelude::*;

    let records = match config.sample_size {
        0 => records,
        limit => &records[..records.len().min(limit)],
    };
    if records.is_empty() {
        return Err(InferenceError::NoRecords);
    }

    let shard_config = InferenceConfig {
        sample_size: 0,
        ..config.clone()
    };

    let shards = records
        .par_chunks(shard_size.max(1))
        .map(|chunk| infer_records(chunk, &shard_config))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(shards = shards.len(), "Reducing shard schemas");

    let mut shards = shards.into_iter();
    let first = shards.next().ok_or(InferenceError::NoRecords)?;
    shards.try_fold(first, merge_schemas)
}
