//! CLI route: single route table and run context. Dispatches to domain services and presentation.

use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_generate_result_json, format_generate_result_text, format_init_preview,
    format_init_summary, format_similar_skipped, format_status_json, format_status_text,
    format_validation_json, format_validation_text,
};
use crate::cli::{command_name, uses_backend};
use crate::config::{AppConfig, ConfigLoader};
use crate::error::{ApiError, StorageError};
use crate::generation::GenerationOrchestrator;
use crate::init::{default_config_toml, init_workspace};
use crate::prompt::{PromptConfig, PromptRenderer};
use crate::provider::{backend_status, OllamaClient};
use crate::quality::{self, strip_frontmatter, StrictnessProfile};
use crate::store::{consume_topic, ArticleStore, FsArticleStore};
use crate::synthesis::synthesize;
use crate::topic::TopicRequest;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Per-invocation overrides taken from `autoblog generate` flags.
struct GenerateArgs<'a> {
    topic: Option<&'a Path>,
    model: Option<&'a str>,
    base_url: Option<&'a str>,
    max_attempts: Option<u32>,
    backoff_ms: Option<u64>,
    profile: Option<&'a str>,
    require_backend: bool,
    skip_similar: bool,
    consume_topic: bool,
    dry_run: bool,
    format: &'a str,
}

/// Runtime context for CLI execution: workspace root and loaded configuration.
/// Built from workspace path and optional config path using ConfigLoader only.
pub struct RunContext {
    workspace_root: PathBuf,
    config_path: Option<PathBuf>,
    config: AppConfig,
}

impl RunContext {
    /// Create run context from workspace root and optional config path. Uses ConfigLoader only.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = ConfigLoader::resolve(&workspace_root, config_path.as_deref())?;
        Ok(Self {
            workspace_root,
            config_path,
            config,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// Resolve a configured path against the workspace root.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workspace_root.join(path)
        }
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let started = Instant::now();
        let name = command_name(command);
        if uses_backend(command) {
            debug!(
                command = name,
                base_url = %self.config.backend.base_url,
                config_path = ?self.config_path,
                "Command uses backend"
            );
        }
        let result = self.execute_inner(command);
        let duration_ms = started.elapsed().as_millis();
        match &result {
            Ok(_) => info!(command = name, duration_ms, "Command finished"),
            Err(e) => warn!(command = name, duration_ms, error = %e, "Command failed"),
        }
        result
    }

    fn execute_inner(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Generate {
                topic,
                model,
                base_url,
                max_attempts,
                backoff_ms,
                profile,
                require_backend,
                skip_similar,
                consume_topic,
                dry_run,
                format,
            } => self.handle_generate(GenerateArgs {
                topic: topic.as_deref(),
                model: model.as_deref(),
                base_url: base_url.as_deref(),
                max_attempts: *max_attempts,
                backoff_ms: *backoff_ms,
                profile: profile.as_deref(),
                require_backend: *require_backend,
                skip_similar: *skip_similar,
                consume_topic: *consume_topic,
                dry_run: *dry_run,
                format,
            }),
            Commands::Validate {
                file,
                profile,
                format,
            } => self.handle_validate(file, profile.as_deref(), format),
            Commands::Template { topic } => {
                let topic = TopicRequest::load(&self.topic_path(topic.as_deref()))?;
                Ok(synthesize(&topic))
            }
            Commands::Status { format } => self.handle_status(format),
            Commands::Init { force, print } => {
                if *print {
                    return Ok(format_init_preview(&default_config_toml()?));
                }
                let summary = init_workspace(&self.workspace_root, *force)?;
                Ok(format_init_summary(&summary))
            }
        }
    }

    fn handle_generate(&self, args: GenerateArgs<'_>) -> Result<String, ApiError> {
        let mut config = self.config.clone();
        apply_generate_overrides(&mut config, &args)?;
        config.ensure_valid()?;

        let topic_path = self.topic_path(args.topic);
        let topic = TopicRequest::load(&topic_path)?;
        info!(
            subject = %topic.subject,
            content_type = %topic.content_type,
            "Generating article"
        );

        let store = FsArticleStore::new(self.resolve_path(&config.output.articles_dir));
        if args.skip_similar {
            let similar = store.find_similar(&topic);
            if !similar.is_empty() {
                warn!(count = similar.len(), "Similar articles exist, skipping generation");
                return format_similar_skipped(&topic.subject, &similar, args.format);
            }
        }

        let prompts = PromptRenderer::from_config(&self.resolve_prompt_paths(&config.prompts))?;
        let backend = OllamaClient::new(&config.backend)?;
        let orchestrator = GenerationOrchestrator::new(
            backend,
            prompts,
            config.quality.thresholds(),
            config.generation.clone(),
        );

        let report = async_runtime()?.block_on(orchestrator.generate(&topic))?;

        if args.dry_run {
            return Ok(report.document.body);
        }

        let saved = store.save(&report.document)?;
        if args.consume_topic {
            consume_topic(&topic_path)?;
        }

        if args.format == "json" {
            format_generate_result_json(&report, Some(&saved))
        } else {
            Ok(format_generate_result_text(&report, Some(&saved)))
        }
    }

    fn handle_validate(
        &self,
        file: &Path,
        profile: Option<&str>,
        format: &str,
    ) -> Result<String, ApiError> {
        let mut quality_config = self.config.quality.clone();
        if let Some(profile) = profile {
            quality_config.profile = parse_profile(profile)?;
        }
        let thresholds = quality_config.thresholds();

        let content = std::fs::read_to_string(file).map_err(|e| {
            ApiError::StorageError(StorageError::IoError(std::io::Error::new(
                e.kind(),
                format!("Failed to read {}: {}", file.display(), e),
            )))
        })?;
        let result = quality::validate(strip_frontmatter(&content), &thresholds);
        debug!(path = %file.display(), valid = result.valid, "Validated article file");

        if format == "json" {
            format_validation_json(file, &result, &thresholds)
        } else {
            Ok(format_validation_text(file, &result, &thresholds))
        }
    }

    fn handle_status(&self, format: &str) -> Result<String, ApiError> {
        self.config.ensure_valid()?;
        let backend = OllamaClient::new(&self.config.backend)?;
        let status = async_runtime()?.block_on(backend_status(&backend, backend.base_url()));
        if format == "json" {
            format_status_json(&status)
        } else {
            Ok(format_status_text(&status))
        }
    }

    /// Explicit `--topic` paths are taken as given; the configured default
    /// resolves against the workspace.
    fn topic_path(&self, explicit: Option<&Path>) -> PathBuf {
        match explicit {
            Some(path) => path.to_path_buf(),
            None => self.resolve_path(&self.config.output.topic_file),
        }
    }

    fn resolve_prompt_paths(&self, prompts: &PromptConfig) -> PromptConfig {
        PromptConfig {
            templates: prompts
                .templates
                .iter()
                .map(|(content_type, path)| (content_type.clone(), self.resolve_path(path)))
                .collect(),
        }
    }
}

fn parse_profile(value: &str) -> Result<StrictnessProfile, ApiError> {
    StrictnessProfile::parse(value).ok_or_else(|| {
        ApiError::ConfigError(format!(
            "Unknown quality profile '{}' (expected lenient, standard or strict)",
            value
        ))
    })
}

fn apply_generate_overrides(config: &mut AppConfig, args: &GenerateArgs<'_>) -> Result<(), ApiError> {
    if let Some(model) = args.model {
        config.backend.model = model.to_string();
    }
    if let Some(base_url) = args.base_url {
        config.backend.base_url = base_url.to_string();
    }
    if let Some(max_attempts) = args.max_attempts {
        config.generation.max_attempts = max_attempts;
    }
    if let Some(backoff_ms) = args.backoff_ms {
        config.generation.backoff_ms = backoff_ms;
    }
    if args.require_backend {
        config.generation.require_backend = true;
    }
    if let Some(profile) = args.profile {
        config.quality.profile = parse_profile(profile)?;
    }
    Ok(())
}

/// Single-threaded runtime: one topic, one request in flight at a time.
fn async_runtime() -> Result<tokio::runtime::Runtime, ApiError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| ApiError::ConfigError(format!("Failed to create async runtime: {}", e)))
}
