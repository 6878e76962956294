//! Config loading facade: composes the sources in precedence order.

use super::merge::merge_policy;
use super::sources::{environment, global_file, workspace_file};
use super::AppConfig;
use crate::error::ApiError;
use config::builder::DefaultState;
use config::{ConfigBuilder, File};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads `AppConfig` from layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    ///
    /// Precedence, lowest to highest: defaults, user config file, workspace
    /// `config/config.toml`, workspace `config/{AUTOBLOG_ENV}.toml`,
    /// `AUTOBLOG_*` variables, legacy `OLLAMA_*` variables.
    pub fn load(workspace_root: &Path) -> Result<AppConfig, ApiError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let config = Self::finish(builder)?;
        debug!(workspace = %workspace_root.display(), "Configuration loaded");
        Ok(config)
    }

    /// Load configuration from one explicit file instead of the discovered ones.
    /// Environment overrides still apply.
    pub fn load_from_file(path: &Path) -> Result<AppConfig, ApiError> {
        if !path.exists() {
            return Err(ApiError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let builder = merge_policy::builder_with_defaults()?;
        let builder = builder.add_source(File::from(path).required(true));
        let config = Self::finish(builder)?;
        debug!(config_path = %path.display(), "Configuration loaded from file");
        Ok(config)
    }

    /// Load from `config_path` when given, otherwise discover for `workspace_root`.
    pub fn resolve(
        workspace_root: &Path,
        config_path: Option<&Path>,
    ) -> Result<AppConfig, ApiError> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => Self::load(workspace_root),
        }
    }

    /// Path of the user-level config file, if HOME or XDG_CONFIG_HOME is set.
    pub fn xdg_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }

    /// Path `autoblog init` writes for a workspace.
    pub fn workspace_config_path(workspace_root: &Path) -> PathBuf {
        workspace_root.join("config").join("config.toml")
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<AppConfig, ApiError> {
        let builder = environment::add_to_builder(builder)?;
        let builder = environment::add_legacy_overrides(builder)?;
        let config = builder.build()?;
        Ok(config.try_deserialize::<AppConfig>()?)
    }
}
