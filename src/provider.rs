//! Backend Client
//!
//! Capability interface over the text-generation backend (`probe`, `generate`)
//! plus the Ollama HTTP implementation. Each call is a single request: the
//! client never retries, retry policy belongs to the orchestrator.

use crate::error::ApiError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Maximum length of a diagnostic message carried by a backend error.
pub const MAX_DIAGNOSTIC_CHARS: usize = 512;

/// Fixed sampling parameters sent with every generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingOptions {
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Nucleus sampling threshold
    #[serde(default = "default_top_p")]
    pub top_p: f64,
    #[serde(default = "default_top_k")]
    pub top_k: u32,
    /// Maximum tokens to generate
    #[serde(default = "default_num_predict")]
    pub num_predict: u32,
}

fn default_temperature() -> f64 {
    0.7
}

fn default_top_p() -> f64 {
    0.9
}

fn default_top_k() -> u32 {
    40
}

fn default_num_predict() -> u32 {
    2048
}

impl Default for SamplingOptions {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            top_p: default_top_p(),
            top_k: default_top_k(),
            num_predict: default_num_predict(),
        }
    }
}

/// Backend connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the backend (default: http://localhost:11434)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model identifier passed with each generation request
    #[serde(default = "default_model")]
    pub model: String,

    /// Timeout for the availability probe, in seconds
    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,

    /// Timeout for one generation request, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default)]
    pub sampling: SamplingOptions,
}

pub fn default_base_url() -> String {
    "http://localhost:11434".to_string()
}

pub fn default_model() -> String {
    "mistral".to_string()
}

fn default_probe_timeout_secs() -> u64 {
    5
}

fn default_request_timeout_secs() -> u64 {
    600
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            probe_timeout_secs: default_probe_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            sampling: SamplingOptions::default(),
        }
    }
}

impl BackendConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(format!(
                "Base URL must start with http:// or https:// (got '{}')",
                self.base_url
            ));
        }
        if self.model.trim().is_empty() {
            return Err("Model cannot be empty".to_string());
        }
        if self.probe_timeout_secs == 0 || self.request_timeout_secs == 0 {
            return Err("Timeouts must be greater than zero".to_string());
        }
        if !(0.0..=2.0).contains(&self.sampling.temperature) {
            return Err(format!(
                "Temperature must be between 0.0 and 2.0 (got {})",
                self.sampling.temperature
            ));
        }
        if !(0.0..=1.0).contains(&self.sampling.top_p) {
            return Err(format!(
                "top_p must be between 0.0 and 1.0 (got {})",
                self.sampling.top_p
            ));
        }
        Ok(())
    }
}

/// Text-generation backend capability.
#[async_trait]
pub trait BackendClient: Send + Sync {
    /// Whether the backend is reachable and has at least one model registered.
    /// Never fails: every transport or parse problem is reported as `false`.
    async fn probe(&self) -> bool;

    /// One non-streaming completion request.
    async fn generate(&self, prompt: &str, model: &str) -> Result<String, ApiError>;

    /// Models registered with the backend
    async fn list_models(&self) -> Result<Vec<String>, ApiError>;

    fn backend_name(&self) -> &str;

    /// Model used when the caller does not name one
    fn model_name(&self) -> &str;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: &'a SamplingOptions,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

#[derive(Debug, Deserialize)]
struct ModelInfo {
    name: String,
}

/// Cut `message` to at most `max_chars` characters, marking the cut.
pub fn truncate_diagnostic(message: &str, max_chars: usize) -> String {
    if message.chars().count() <= max_chars {
        return message.to_string();
    }
    let cut: String = message.chars().take(max_chars).collect();
    format!("{}... [truncated]", cut)
}

fn diagnostic(message: String) -> String {
    truncate_diagnostic(&message, MAX_DIAGNOSTIC_CHARS)
}

// Helper function to map transport errors to ApiError
fn map_http_error(error: reqwest::Error) -> ApiError {
    if error.is_timeout() {
        ApiError::BackendRequestFailed(diagnostic(format!("Request timeout: {}", error)))
    } else if error.is_connect() {
        ApiError::BackendRequestFailed(diagnostic(format!("Connection error: {}", error)))
    } else if let Some(status) = error.status() {
        ApiError::BackendRequestFailed(diagnostic(format!(
            "Request failed with status {}: {}",
            status, error
        )))
    } else {
        ApiError::BackendError(diagnostic(format!("HTTP error: {}", error)))
    }
}

fn build_backend_http_client(config: &BackendConfig) -> Result<Client, ApiError> {
    Client::builder()
        .no_proxy()
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()
        .map_err(|e| ApiError::ConfigError(format!("Failed to create HTTP client: {}", e)))
}

/// Ollama backend client (`/api/tags`, `/api/generate`)
pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
    probe_timeout: Duration,
    request_timeout: Duration,
    sampling: SamplingOptions,
}

impl OllamaClient {
    pub fn new(config: &BackendConfig) -> Result<Self, ApiError> {
        let client = build_backend_http_client(config)?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            probe_timeout: Duration::from_secs(config.probe_timeout_secs),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
            sampling: config.sampling.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch_models(&self) -> Result<Vec<String>, ApiError> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self
            .client
            .get(&url)
            .timeout(self.probe_timeout)
            .send()
            .await
            .map_err(map_http_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ApiError::BackendRequestFailed(diagnostic(format!(
                "Failed to list models: status {} - {}",
                status, error_text
            ))));
        }

        let tags: TagsResponse = response.json().await.map_err(|e| {
            ApiError::BackendError(diagnostic(format!(
                "Failed to parse models response: {}",
                e
            )))
        })?;

        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }
}

#[async_trait]
impl BackendClient for OllamaClient {
    async fn probe(&self) -> bool {
        match self.fetch_models().await {
            Ok(models) => {
                debug!(base_url = %self.base_url, model_count = models.len(), "Backend probe succeeded");
                !models.is_empty()
            }
            Err(e) => {
                warn!(base_url = %self.base_url, error = %e, "Backend probe failed");
                false
            }
        }
    }

    async fn generate(&self, prompt: &str, model: &str) -> Result<String, ApiError> {
        let request = GenerateRequest {
            model,
            prompt,
            stream: false,
            options: &self.sampling,
        };

        let url = format!("{}/api/generate", self.base_url);
        let response = self
            .client
            .post(&url)
            .timeout(self.request_timeout)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(map_http_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ApiError::BackendRequestFailed(diagnostic(format!(
                "Request failed with status {}: {}",
                status, error_text
            ))));
        }

        let completion: GenerateResponse = response.json().await.map_err(|e| {
            ApiError::BackendError(diagnostic(format!("Failed to parse response: {}", e)))
        })?;

        if completion.response.trim().is_empty() {
            return Err(ApiError::BackendError(
                "Empty response from backend".to_string(),
            ));
        }

        Ok(completion.response)
    }

    async fn list_models(&self) -> Result<Vec<String>, ApiError> {
        self.fetch_models().await
    }

    fn backend_name(&self) -> &str {
        "ollama"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Whether `wanted` is among `available`; a bare name matches any tag of it.
pub fn model_is_available(available: &[String], wanted: &str) -> bool {
    available.iter().any(|name| {
        name == wanted
            || name
                .split_once(':')
                .map(|(base, _)| base == wanted)
                .unwrap_or(false)
    })
}

/// Backend reachability and model inventory, as shown by `autoblog status`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackendStatus {
    pub backend: String,
    pub base_url: String,
    pub model: String,
    pub reachable: bool,
    pub models: Vec<String>,
    pub model_available: bool,
    /// Why the model list could not be fetched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Query `backend` for its models and check the configured one.
pub async fn backend_status<B: BackendClient + ?Sized>(backend: &B, base_url: &str) -> BackendStatus {
    let (models, error) = match backend.list_models().await {
        Ok(models) => (models, None),
        Err(e) => (Vec::new(), Some(e.to_string())),
    };
    let model = backend.model_name().to_string();
    BackendStatus {
        backend: backend.backend_name().to_string(),
        base_url: base_url.to_string(),
        reachable: error.is_none() && !models.is_empty(),
        model_available: model_is_available(&models, &model),
        model,
        models,
        error,
    }
}

/// Scripted reply for `MockBackend`.
#[cfg(test)]
#[derive(Debug, Clone)]
pub enum MockReply {
    Text(String),
    Fail(String),
}

// Mock backend for testing
#[cfg(test)]
pub struct MockBackend {
    available: bool,
    replies: Vec<MockReply>,
    prompts: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl MockBackend {
    pub fn new(available: bool, replies: Vec<MockReply>) -> Self {
        Self {
            available,
            replies,
            prompts: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn generate_calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl BackendClient for MockBackend {
    async fn probe(&self) -> bool {
        self.available
    }

    async fn generate(&self, prompt: &str, _model: &str) -> Result<String, ApiError> {
        let mut prompts = self.prompts.lock().unwrap();
        let idx = prompts.len();
        prompts.push(prompt.to_string());
        match self.replies.get(idx) {
            Some(MockReply::Text(text)) => Ok(text.clone()),
            Some(MockReply::Fail(msg)) => Err(ApiError::BackendRequestFailed(msg.clone())),
            None => Err(ApiError::BackendError("No scripted reply".to_string())),
        }
    }

    async fn list_models(&self) -> Result<Vec<String>, ApiError> {
        Ok(if self.available {
            vec!["mock-model:latest".to_string()]
        } else {
            vec![]
        })
    }

    fn backend_name(&self) -> &str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
