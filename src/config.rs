//! Configuration for choicegen.
//!
//! Settings load from environment variables with sensible defaults; CLI
//! flags override them afterwards.
//!
//! # Environment Variables
//!
//! - `CHOICEGEN_SOURCE_ROOT`: root of the component source tree - default: "zoo/src"
//! - `CHOICEGEN_OUTPUT`: path of the generated catalog - default: "zoo/choices.json"
//! - `CHOICEGEN_LOG_LEVEL`: logging level - default: "info"

use std::env;
use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_SOURCE_ROOT: &str = "zoo/src";
const DEFAULT_OUTPUT_PATH: &str = "zoo/choices.json";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Runtime configuration for a catalog generation run.
#[derive(Debug, Clone)]
pub struct ChoicegenConfig {
    /// Root directory holding one subdirectory per component category.
    pub source_root: PathBuf,

    /// Where the generated catalog is written.
    pub output_path: PathBuf,

    /// Logging level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ChoicegenConfig {
    /// Loads from `CHOICEGEN_*` environment variables, falling back to
    /// defaults for anything unset.
    fn default() -> Self {
        let source_root = env::var("CHOICEGEN_SOURCE_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_SOURCE_ROOT));

        let output_path = env::var("CHOICEGEN_OUTPUT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_OUTPUT_PATH));

        let log_level = env::var("CHOICEGEN_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        Self {
            source_root,
            output_path,
            log_level,
        }
    }
}

impl ChoicegenConfig {
    /// Checks that the paths and log level are usable before the run starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source_root.as_os_str().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Source root cannot be empty".to_string(),
            ));
        }

        if self.output_path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Output path cannot be empty".to_string(),
            ));
        }
        if self.output_path.extension().map_or(true, |ext| ext != "json") {
            return Err(ConfigError::ValidationFailed(format!(
                "Output path must end in .json, got {}",
                self.output_path.display()
            )));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }
}

impl fmt::Display for ChoicegenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Choicegen Configuration:")?;
        writeln!(f, "  Source Root: {}", self.source_root.display())?;
        writeln!(f, "  Output Path: {}", self.output_path.display())?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    /// Helper to temporarily set environment variables for testing
    struct EnvGuard {
        key: String,
        old_value: Option<String>,
    }

    impl EnvGuard {
        fn set(key: &str, value: &str) -> Self {
            let old_value = env::var(key).ok();
            env::set_var(key, value);
            Self {
                key: key.to_string(),
                old_value,
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.old_value {
                Some(v) => env::set_var(&self.key, v),
                None => env::remove_var(&self.key),
            }
        }
    }

    #[test]
    #[serial]
    fn test_default_configuration() {
        env::remove_var("CHOICEGEN_SOURCE_ROOT");
        env::remove_var("CHOICEGEN_OUTPUT");
        env::remove_var("CHOICEGEN_LOG_LEVEL");

        let config = ChoicegenConfig::default();

        assert_eq!(config.source_root, PathBuf::from(DEFAULT_SOURCE_ROOT));
        assert_eq!(config.output_path, PathBuf::from(DEFAULT_OUTPUT_PATH));
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    #[serial]
    fn test_environment_variable_parsing() {
        let _guards = vec![
            EnvGuard::set("CHOICEGEN_SOURCE_ROOT", "/data/components"),
            EnvGuard::set("CHOICEGEN_OUTPUT", "/data/out.json"),
            EnvGuard::set("CHOICEGEN_LOG_LEVEL", "DEBUG"),
        ];

        let config = ChoicegenConfig::default();

        assert_eq!(config.source_root, PathBuf::from("/data/components"));
        assert_eq!(config.output_path, PathBuf::from("/data/out.json"));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_validation_rejects_non_json_output() {
        let config = ChoicegenConfig {
            source_root: PathBuf::from("src"),
            output_path: PathBuf::from("choices.yaml"),
            log_level: "info".to_string(),
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_invalid_log_level() {
        let config = ChoicegenConfig {
            source_root: PathBuf::from("src"),
            output_path: PathBuf::from("choices.json"),
            log_level: "loud".to_string(),
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_valid_configuration_passes() {
        let config = ChoicegenConfig {
            source_root: PathBuf::from("zoo/src"),
            output_path: PathBuf::from("zoo/choices.json"),
            log_level: "info".to_string(),
        };

        assert!(config.validate().is_ok());
    }
}
