//! Configuration for schema inference

use serde::{Deserialize, Serialize};

/// Default model name for synthesized schemas
pub const DEFAULT_MODEL_NAME: &str = "Model";

/// Configuration for schema inference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InferenceConfig {
    /// Name given to the synthesized model
    pub model_name: String,

    /// Maximum number of records to sample (0 = all)
    pub sample_size: usize,

    /// Maximum nesting depth for objects and arrays
    pub max_depth: usize,

    /// Classify date/time-looking strings as `DateTime`
    pub detect_datetime: bool,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            model_name: DEFAULT_MODEL_NAME.to_string(),
            sample_size: 0, // All records
            max_depth: 64,
            detect_datetime: true,
        }
    }
}

impl InferenceConfig {
    /// Create a builder for custom configuration
    pub fn builder() -> InferenceConfigBuilder {
        InferenceConfigBuilder::default()
    }
}

/// Builder for InferenceConfig
#[derive(Debug, Default)]
pub struct InferenceConfigBuilder {
    config: InferenceConfig,
}

impl InferenceConfigBuilder {
    /// Set the model name
    pub fn model_name(mut self, name: impl Into<String>) -> Self {
        self.config.model_name = name.into();
        self
    }

    /// Set the sample size (0 = all records)
    pub fn sample_size(mut self, size: usize) -> Self {
        self.config.sample_size = size;
        self
    }

    /// Set the maximum nesting depth
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = depth;
        self
    }

    /// Enable or disable date/time detection
    pub fn detect_datetime(mut self, detect: bool) -> Self {
        self.config.detect_datetime = detect;
        self
    }

    /// Build the configuration
    pub fn build(self) -> InferenceConfig {
        self.config
    }
}
