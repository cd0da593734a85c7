//! Schema inference engine for sample records
//!
//! This module infers a structural schema from sample records (CSV rows,
//! JSON objects), resolving type conflicts across the sample.
//!
//! ## Features
//!
//! - **Value classification** - Map each scalar to a [`Kind`], with NaN treated as missing
//! - **Type unification** - Widen kinds along a fixed lattice (`Int < Float < String`)
//! - **Shape inference** - Recurse into nested objects and arrays
//! - **Schema merging** - Fold record shapes into one [`SchemaDescription`], marking
//!   sometimes-missing fields optional
//! - **Shard merging** - Combine descriptions inferred from separate partitions
//!
//! ## Example
//!
//! ```rust
//! use smart_schema::inference::{FieldShape, Kind, SchemaInferrer};
//!
//! let mut inferrer = SchemaInferrer::new();
//! inferrer.add_json(r#"{"name": "Alice", "age": 30}"#)?;
//! inferrer.add_json(r#"{"name": "Bob", "age": 25.5, "email": "bob@example.com"}"#)?;
//!
//! let schema = inferrer.finalize()?;
//! assert_eq!(schema.field("age"), Some(&FieldShape::Primitive(Kind::Float)));
//! assert!(schema.field("email").unwrap().is_optional());
//! # Ok::<(), smart_schema::inference::InferenceError>(())
//! ```

mod classify;
mod config;
mod error;
mod formats;
mod inferrer;
mod merge;
mod types;
mod unify;
mod value;

pub use classify::{classify, classify_with};
pub use config::{DEFAULT_MODEL_NAME, InferenceConfig, InferenceConfigBuilder};
pub use error::InferenceError;
pub use formats::{Format, detect_format};
pub use inferrer::{InferenceStats, SchemaInferrer, infer, infer_with};
#[cfg(feature = "parallel")]
pub use merge::infer_records_parallel;
pub use merge::{infer_records, merge, merge_schemas, merge_with_config};
pub use types::{FieldShape, Fields, Kind, SchemaDescription};
pub use unify::{merge_fields, unify_shapes};
pub use value::{Record, Value, record_from_json};
