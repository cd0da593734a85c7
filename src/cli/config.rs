//! Inference configuration files
//!
//! `--config` accepts TOML or YAML (by extension) or JSON, deserialized into
//! [`InferenceConfig`]; omitted keys keep their defaults.

use std::path::Path;

use crate::cli::error::CliError;
use crate::inference::InferenceConfig;

/// Load an inference configuration file
pub fn load_config(path: &Path) -> Result<InferenceConfig, CliError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| CliError::FileReadError(path.to_path_buf(), e.to_string()))?;
    parse_config(&content, path)
}

fn parse_config(content: &str, path: &Path) -> Result<InferenceConfig, CliError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let parsed: Result<InferenceConfig, String> = match extension.as_deref() {
        Some("toml") => toml::from_str(content).map_err(|e| e.to_string()),
        Some("yaml") | Some("yml") => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        Some("json") => serde_json::from_str(content).map_err(|e| e.to_string()),
        _ => {
            return Err(CliError::ConfigError(
                path.to_path_buf(),
                "expected a .toml, .yaml, .yml or .json file".to_string(),
            ));
        }
    };

    parsed.map_err(|e| CliError::ConfigError(path.to_path_buf(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toml() {
        let config = parse_config(
            "modelName = \"SalesRecord\"\nmaxDepth = 8\n",
            Path::new("infer.toml"),
        )
        .unwrap();
        assert_eq!(config.model_name, "SalesRecord");
        assert_eq!(config.max_depth, 8);
        assert!(config.detect_datetime);
    }

    #[test]
    fn test_parse_yaml() {
        let config = parse_config("detectDatetime: false\n", Path::new("infer.yml")).unwrap();
        assert!(!config.detect_datetime);
        assert_eq!(config.model_name, "Model");
    }

    #[test]
    fn test_unknown_extension() {
        assert!(matches!(
            parse_config("", Path::new("infer.ini")),
            Err(CliError::ConfigError(..))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"sampleSize": 50}"#).unwrap();
        assert_eq!(load_config(&path).unwrap().sample_size, 50);
    }
}
