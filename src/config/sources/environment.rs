//! Environment variable sources: AUTOBLOG_* and the legacy OLLAMA_* variables

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Legacy variables honoured for the backend section, later entries win.
const LEGACY_OVERRIDES: [(&str, &str); 3] = [
    ("OLLAMA_URL", "backend.base_url"),
    ("OLLAMA_BASE_URL", "backend.base_url"),
    ("OLLAMA_MODEL", "backend.model"),
];

/// Add `AUTOBLOG_<SECTION>__<KEY>` variables, e.g. `AUTOBLOG_BACKEND__MODEL`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder.add_source(
        Environment::with_prefix("AUTOBLOG")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    ))
}

/// Apply legacy `OLLAMA_*` variables on top of every other layer.
pub fn add_legacy_overrides(
    mut builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    for (var, key) in LEGACY_OVERRIDES {
        if let Ok(value) = std::env::var(var) {
            if !value.trim().is_empty() {
                builder = builder.set_override(key, value)?;
            }
        }
    }
    Ok(builder)
}
