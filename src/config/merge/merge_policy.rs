//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
///
/// Only keys that later layers commonly override are seeded here; every
/// other field falls back to its serde default during deserialization.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("backend.base_url", "http://localhost:11434")?
        .set_default("backend.model", "mistral")?
        .set_default("generation.max_attempts", 3)?
        .set_default("generation.backoff_ms", 1000)?
        .set_default("generation.require_backend", false)?
        .set_default("quality.profile", "standard")?
        .set_default("output.articles_dir", "articles")
}
