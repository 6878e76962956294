//! Generation results: attempts, documents, and run reports.

use crate::quality::ValidationResult;
use crate::topic::TopicRequest;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a document's body came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentSource {
    Backend,
    Template,
}

impl fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentSource::Backend => f.write_str("backend"),
            DocumentSource::Template => f.write_str("template"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provenance {
    pub source: DocumentSource,
    /// Set only for backend-sourced documents
    pub model: Option<String>,
    pub generated_at: DateTime<Utc>,
}

/// One call to the backend inside a single orchestration run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationAttempt {
    /// 1-based attempt index
    pub index: u32,
    /// Text returned by the backend; `None` when the call failed
    pub text: Option<String>,
    pub error: Option<String>,
    pub validation: Option<ValidationResult>,
}

impl GenerationAttempt {
    pub fn produced(index: u32, text: String, validation: ValidationResult) -> Self {
        Self {
            index,
            text: Some(text),
            error: None,
            validation: Some(validation),
        }
    }

    pub fn failed(index: u32, error: String) -> Self {
        Self {
            index,
            text: None,
            error: Some(error),
            validation: None,
        }
    }
}

/// The value handed to the persistence step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedDocument {
    pub topic: TopicRequest,
    pub body: String,
    pub provenance: Provenance,
    pub word_count: usize,
    /// Gate confidence of the kept backend attempt; `None` for templates
    pub confidence: Option<f32>,
    /// Backend calls made while producing this document
    pub attempts: u32,
}

impl GeneratedDocument {
    pub fn source(&self) -> DocumentSource {
        self.provenance.source
    }

    /// Minutes at 200 words per minute, rounded up.
    pub fn reading_time_minutes(&self) -> usize {
        self.word_count.div_ceil(200).max(1)
    }
}

/// Everything one orchestration run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub document: GeneratedDocument,
    pub backend_available: bool,
    pub attempts: Vec<GenerationAttempt>,
    pub duration_ms: u128,
}

impl GenerationReport {
    /// Backend text kept although it never passed the gate.
    pub fn is_best_effort(&self) -> bool {
        self.document.source() == DocumentSource::Backend
            && self
                .attempts
                .last()
                .and_then(|a| a.validation.as_ref())
                .map(|v| !v.valid)
                .unwrap_or(true)
    }
}
