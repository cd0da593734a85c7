//! Output formatting for CLI

use std::str::FromStr;

use crate::cli::error::CliError;
use crate::inference::SchemaDescription;

/// How an inferred schema is written out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaFormat {
    /// Schema description as JSON
    #[default]
    Json,
    /// Schema description as YAML
    Yaml,
    /// Draft 2020-12 JSON Schema
    JsonSchema,
}

impl FromStr for SchemaFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(SchemaFormat::Json),
            "yaml" => Ok(SchemaFormat::Yaml),
            "json-schema" => Ok(SchemaFormat::JsonSchema),
            other => Err(CliError::InvalidArgument(format!(
                "Unknown output format: {}",
                other
            ))),
        }
    }
}

/// Render a schema in the requested format
pub fn format_schema(schema: &SchemaDescription, format: SchemaFormat) -> Result<String, CliError> {
    let rendered = match format {
        SchemaFormat::Json => serde_json::to_string_pretty(schema).map_err(|e| e.to_string()),
        // Shapes nest enums, which YAML tags cannot express; go through a JSON tree
        SchemaFormat::Yaml => serde_json::to_value(schema)
            .map_err(|e| e.to_string())
            .and_then(|tree| serde_yaml::to_string(&tree).map_err(|e| e.to_string())),
        SchemaFormat::JsonSchema => {
            serde_json::to_string_pretty(&schema.to_json_schema()).map_err(|e| e.to_string())
        }
    };
    rendered.map_err(CliError::Serialization)
}

/// Parse a schema description previously written as JSON or YAML
pub fn parse_schema(content: &str) -> Result<SchemaDescription, CliError> {
    match serde_json::from_str(content) {
        Ok(schema) => Ok(schema),
        Err(json_err) => serde_yaml::from_str::<serde_json::Value>(content)
            .map_err(|e| e.to_string())
            .and_then(|tree| {
                serde_json::from_value::<SchemaDescription>(tree).map_err(|e| e.to_string())
            })
            .map_err(|yaml_err| {
                CliError::InvalidArgument(format!(
                    "Not a schema description (JSON: {}; YAML: {})",
                    json_err, yaml_err
                ))
            }),
    }
}
