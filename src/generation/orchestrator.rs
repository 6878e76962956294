//! Generation orchestrator: availability check, bounded retry, and fallback.
//!
//! One topic is processed start to finish per call with no parallel attempts.
//! The only suspension points are the probe, each `generate` call, and the
//! fixed backoff sleeps between attempts.

use crate::error::ApiError;
use crate::generation::document::{
    DocumentSource, GeneratedDocument, GenerationAttempt, GenerationReport, Provenance,
};
use crate::prompt::PromptRenderer;
use crate::provider::BackendClient;
use crate::quality::{self, QualityThresholds, ValidationResult};
use crate::synthesis;
use crate::topic::TopicRequest;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Upper bound accepted for `max_attempts`.
pub const MAX_ATTEMPT_CEILING: u32 = 10;

/// Retry and degradation policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Attempt ceiling: `generate` is called at most this many times
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Fixed delay between attempts, in milliseconds
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,

    /// Treat an unreachable backend as fatal instead of falling back
    #[serde(default)]
    pub require_backend: bool,
}

fn default_max_attempts() -> u32 {
    3
}

fn default_backoff_ms() -> u64 {
    1000
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            backoff_ms: default_backoff_ms(),
            require_backend: false,
        }
    }
}

impl GenerationConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.max_attempts == 0 || self.max_attempts > MAX_ATTEMPT_CEILING {
            return Err(format!(
                "max_attempts must be between 1 and {} (got {})",
                MAX_ATTEMPT_CEILING, self.max_attempts
            ));
        }
        Ok(())
    }

    fn backoff(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }
}

/// Orchestrator states. `Validating` and `Accepted` carry the attempt text.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationState {
    CheckingAvailability,
    Generating { attempt: u32 },
    Validating { attempt: u32, text: String },
    Retrying { attempt: u32 },
    Accepted {
        attempt: u32,
        text: String,
        validation: ValidationResult,
    },
    Exhausted,
    FallingBack,
    Done,
}

/// Most recent backend text that failed the gate.
struct LastAttempt {
    text: String,
    validation: ValidationResult,
}

/// Drives generate, validate, retry and fallback for one topic at a time.
pub struct GenerationOrchestrator<B: BackendClient> {
    backend: B,
    prompts: PromptRenderer,
    thresholds: QualityThresholds,
    config: GenerationConfig,
    model: String,
}

impl<B: BackendClient> GenerationOrchestrator<B> {
    pub fn new(
        backend: B,
        prompts: PromptRenderer,
        thresholds: QualityThresholds,
        config: GenerationConfig,
    ) -> Self {
        let model = backend.model_name().to_string();
        Self {
            backend,
            prompts,
            thresholds,
            config,
            model,
        }
    }

    /// Use `model` instead of the backend's default model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn thresholds(&self) -> &QualityThresholds {
        &self.thresholds
    }

    /// Produce exactly one document for `topic`.
    ///
    /// Fails only with `ApiError::BackendUnavailable`, and only when the probe
    /// fails while `require_backend` is set. Backend request failures and gate
    /// failures are absorbed here.
    pub async fn generate(&self, topic: &TopicRequest) -> Result<GenerationReport, ApiError> {
        let started = Instant::now();
        let max_attempts = self.config.max_attempts.max(1);
        let prompt = self.prompts.render(topic, Utc::now());

        let mut attempts: Vec<GenerationAttempt> = Vec::new();
        let mut last_attempt: Option<LastAttempt> = None;
        let mut backend_available = false;
        let mut document: Option<GeneratedDocument> = None;
        let mut state = GenerationState::CheckingAvailability;

        loop {
            debug!(state = ?state_name(&state), "Generation state");
            state = match state {
                GenerationState::CheckingAvailability => {
                    if self.backend.probe().await {
                        backend_available = true;
                        info!(
                            backend = self.backend.backend_name(),
                            model = %self.model,
                            "Backend available"
                        );
                        GenerationState::Generating { attempt: 1 }
                    } else if self.config.require_backend {
                        return Err(ApiError::BackendUnavailable(format!(
                            "{} backend did not respond or has no models registered",
                            self.backend.backend_name()
                        )));
                    } else {
                        warn!(
                            backend = self.backend.backend_name(),
                            "Backend unavailable, using template fallback"
                        );
                        GenerationState::FallingBack
                    }
                }
                GenerationState::Generating { attempt } => {
                    info!(attempt, max_attempts, subject = %topic.subject, "Requesting article");
                    match self.backend.generate(&prompt, &self.model).await {
                        Ok(text) => GenerationState::Validating { attempt, text },
                        Err(e) => {
                            warn!(attempt, max_attempts, error = %e, "Backend request failed");
                            attempts.push(GenerationAttempt::failed(attempt, e.to_string()));
                            if attempt < max_attempts {
                                self.pause().await;
                                GenerationState::Generating {
                                    attempt: attempt + 1,
                                }
                            } else {
                                GenerationState::Exhausted
                            }
                        }
                    }
                }
                GenerationState::Validating { attempt, text } => {
                    let validation = quality::validate(&text, &self.thresholds);
                    info!(
                        attempt,
                        word_count = validation.word_count,
                        section_count = validation.section_count,
                        valid = validation.valid,
                        "Validated attempt"
                    );
                    attempts.push(GenerationAttempt::produced(
                        attempt,
                        text.clone(),
                        validation.clone(),
                    ));
                    if validation.valid {
                        GenerationState::Accepted {
                            attempt,
                            text,
                            validation,
                        }
                    } else {
                        warn!(attempt, issues = ?validation.issues, "Attempt failed quality gate");
                        last_attempt = Some(LastAttempt { text, validation });
                        if attempt < max_attempts {
                            GenerationState::Retrying { attempt }
                        } else {
                            GenerationState::Exhausted
                        }
                    }
                }
                GenerationState::Retrying { attempt } => {
                    self.pause().await;
                    GenerationState::Generating {
                        attempt: attempt + 1,
                    }
                }
                GenerationState::Accepted {
                    attempt,
                    text,
                    validation,
                } => {
                    info!(attempt, word_count = validation.word_count, "Article accepted");
                    document = Some(self.backend_document(topic, text, &validation, &attempts));
                    GenerationState::Done
                }
                GenerationState::Exhausted => match last_attempt.take() {
                    Some(last) => {
                        info!(
                            confidence = last.validation.confidence_percent(),
                            "Attempts exhausted, using article with {}% confidence",
                            last.validation.confidence_percent()
                        );
                        document = Some(self.backend_document(
                            topic,
                            last.text,
                            &last.validation,
                            &attempts,
                        ));
                        GenerationState::Done
                    }
                    None => {
                        warn!(max_attempts, "No backend text produced, using template fallback");
                        GenerationState::FallingBack
                    }
                },
                GenerationState::FallingBack => {
                    document = Some(template_document(topic, &attempts));
                    GenerationState::Done
                }
                GenerationState::Done => break,
            };
        }

        let document = document.unwrap_or_else(|| template_document(topic, &attempts));
        info!(
            source = %document.source(),
            word_count = document.word_count,
            attempts = attempts.len(),
            "Generation finished"
        );
        Ok(GenerationReport {
            document,
            backend_available,
            attempts,
            duration_ms: started.elapsed().as_millis(),
        })
    }

    async fn pause(&self) {
        let delay = self.config.backoff();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    fn backend_document(
        &self,
        topic: &TopicRequest,
        body: String,
        validation: &ValidationResult,
        attempts: &[GenerationAttempt],
    ) -> GeneratedDocument {
        GeneratedDocument {
            topic: topic.clone(),
            word_count: quality::count_words(&body),
            body,
            provenance: Provenance {
                source: DocumentSource::Backend,
                model: Some(self.model.clone()),
                generated_at: Utc::now(),
            },
            confidence: Some(validation.confidence),
            attempts: attempts.len() as u32,
        }
    }
}

fn template_document(topic: &TopicRequest, attempts: &[GenerationAttempt]) -> GeneratedDocument {
    let body = synthesis::synthesize(topic);
    GeneratedDocument {
        topic: topic.clone(),
        word_count: quality::count_words(&body),
        body,
        provenance: Provenance {
            source: DocumentSource::Template,
            model: None,
            generated_at: Utc::now(),
        },
        confidence: None,
        attempts: attempts.len() as u32,
    }
}

fn state_name(state: &GenerationState) -> &'static str {
    match state {
        GenerationState::CheckingAvailability => "checking_availability",
        GenerationState::Generating { .. } => "generating",
        GenerationState::Validating { .. } => "validating",
        GenerationState::Retrying { .. } => "retrying",
        GenerationState::Accepted { .. } => "accepted",
        GenerationState::Exhausted => "exhausted",
        GenerationState::FallingBack => "falling_back",
        GenerationState::Done => "done",
    }
}
