//! Configuration System
//!
//! Layered configuration for the backend client, retry policy, quality gate,
//! prompt templates, output locations and logging. Values are merged from
//! defaults, the user config file, workspace config files and environment
//! variables, then validated as a whole.

use crate::error::ApiError;
use crate::generation::GenerationConfig;
use crate::logging::LoggingConfig;
use crate::prompt::PromptConfig;
use crate::quality::QualityConfig;
use crate::topic::DEFAULT_TOPIC_FILE;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use crate::provider::BackendConfig;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub backend: BackendConfig,

    /// Retry and fallback policy
    #[serde(default)]
    pub generation: GenerationConfig,

    #[serde(default)]
    pub quality: QualityConfig,

    #[serde(default)]
    pub prompts: PromptConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where articles are written and where the topic request is read from.
/// Relative paths resolve against the workspace root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_articles_dir")]
    pub articles_dir: PathBuf,

    #[serde(default = "default_topic_file")]
    pub topic_file: PathBuf,
}

fn default_articles_dir() -> PathBuf {
    PathBuf::from("articles")
}

fn default_topic_file() -> PathBuf {
    PathBuf::from(DEFAULT_TOPIC_FILE)
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            articles_dir: default_articles_dir(),
            topic_file: default_topic_file(),
        }
    }
}

impl OutputConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.articles_dir.as_os_str().is_empty() {
            return Err("Articles directory cannot be empty".to_string());
        }
        if self.topic_file.as_os_str().is_empty() {
            return Err("Topic file cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    Backend(String),
    Generation(String),
    Quality(String),
    Output(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Backend(msg) => write!(f, "Backend: {}", msg),
            ValidationError::Generation(msg) => write!(f, "Generation: {}", msg),
            ValidationError::Quality(msg) => write!(f, "Quality: {}", msg),
            ValidationError::Output(msg) => write!(f, "Output: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl AppConfig {
    /// Validate the entire configuration, collecting every problem.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.backend.validate() {
            errors.push(ValidationError::Backend(e));
        }
        if let Err(e) = self.generation.validate() {
            errors.push(ValidationError::Generation(e));
        }
        let thresholds = self.quality.thresholds();
        if thresholds.min_chars == 0 {
            errors.push(ValidationError::Quality(
                "min_chars must be greater than zero".to_string(),
            ));
        }
        if let Err(e) = self.output.validate() {
            errors.push(ValidationError::Output(e));
        }
        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate and fold every problem into one `ConfigError`.
    pub fn ensure_valid(&self) -> Result<(), ApiError> {
        self.validate().map_err(|errors| {
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                messages.join("\n")
            ))
        })
    }

    /// Render as TOML, as written by `autoblog init`.
    pub fn to_toml(&self) -> Result<String, ApiError> {
        toml::to_string_pretty(self)
            .map_err(|e| ApiError::ConfigError(format!("Failed to serialize config: {}", e)))
    }
}
