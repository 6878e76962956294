//! Workspace initialization: default `config/config.toml` and articles directory.

use crate::config::{AppConfig, ConfigLoader};
use crate::error::ApiError;
use crate::store::write_atomic;
use std::path::{Path, PathBuf};
use tracing::info;

/// What `init_workspace` did.
#[derive(Debug, Clone, PartialEq)]
pub struct InitSummary {
    pub config_path: PathBuf,
    pub overwritten: bool,
    pub articles_dir: PathBuf,
}

/// Default configuration rendered as TOML.
pub fn default_config_toml() -> Result<String, ApiError> {
    let body = AppConfig::default().to_toml()?;
    Ok(format!(
        "# autoblog configuration\n\
         # Environment variables AUTOBLOG_<SECTION>__<KEY> override these values.\n\n{}",
        body
    ))
}

/// Write the default config into `workspace_root`. An existing config file is
/// only replaced with `force`.
pub fn init_workspace(workspace_root: &Path, force: bool) -> Result<InitSummary, ApiError> {
    let config_path = ConfigLoader::workspace_config_path(workspace_root);
    let existed = config_path.exists();
    if existed && !force {
        return Err(ApiError::ConfigError(format!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        )));
    }

    let content = default_config_toml()?;
    write_atomic(&config_path, content.as_bytes())?;

    let articles_dir = workspace_root.join(&AppConfig::default().output.articles_dir);
    std::fs::create_dir_all(&articles_dir).map_err(crate::error::StorageError::from)?;

    info!(config_path = %config_path.display(), overwritten = existed, "Workspace initialized");
    Ok(InitSummary {
        config_path,
        overwritten: existed,
        articles_dir,
    })
}
