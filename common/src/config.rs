use serde::Deserialize;
use std::{error::Error, fs, path::Path};

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    pub project_name: String,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            project_name: "customer-returns".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct WebappConfig {
    pub server_address: String,
    pub log_level: String,
}

impl Default for WebappConfig {
    fn default() -> Self {
        Self {
            server_address: "0.0.0.0:8501".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Paths of the serialized model and scaler loaded at startup.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ArtifactsConfig {
    pub model_path: String,
    pub scaler_path: String,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            model_path: "returns/artifacts/customer_return_model.json".to_string(),
            scaler_path: "returns/artifacts/scaler.json".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub common: CommonConfig,
    pub webapp: WebappConfig,
    pub artifacts: ArtifactsConfig,
}

impl Config {
    pub fn load(config_path: &str) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let contents = fs::read_to_string(config_path)?;
        let config = serde_yml::from_str(&contents)?;

        Ok(config)
    }

    /// Load the config file, falling back to built-in defaults when the file
    /// does not exist. Parse errors in an existing file are still fatal.
    pub fn load_or_default(config_path: &str) -> Result<Self, Box<dyn Error + Send + Sync>> {
        if !Path::new(config_path).exists() {
            return Ok(Self::default());
        }
        Self::load(config_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let yaml = r#"
common:
  project_name: returns-test

webapp:
  server_address: 127.0.0.1:9000
  log_level: debug

artifacts:
  model_path: /tmp/model.json
  scaler_path: /tmp/scaler.json
"#;
        let config: Config = serde_yml::from_str(yaml).unwrap();
        assert_eq!(config.common.project_name, "returns-test");
        assert_eq!(config.webapp.server_address, "127.0.0.1:9000");
        assert_eq!(config.webapp.log_level, "debug");
        assert_eq!(config.artifacts.model_path, "/tmp/model.json");
        assert_eq!(config.artifacts.scaler_path, "/tmp/scaler.json");
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let yaml = r#"
webapp:
  server_address: 127.0.0.1:9000
"#;
        let config: Config = serde_yml::from_str(yaml).unwrap();
        assert_eq!(config.webapp.server_address, "127.0.0.1:9000");
        assert_eq!(config.webapp.log_level, "info");
        assert_eq!(
            config.artifacts.model_path,
            "returns/artifacts/customer_return_model.json"
        );
    }

    #[test]
    fn load_or_default_handles_absent_file() {
        let config = Config::load_or_default("does/not/exist.yaml").unwrap();
        assert_eq!(config.webapp.server_address, "0.0.0.0:8501");
    }
}
