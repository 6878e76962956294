//! Topic requests
//!
//! A `TopicRequest` describes the article to produce. It is written by an
//! external topic selector as JSON, loaded once, validated, and then only ever
//! borrowed by the prompt renderer, the orchestrator and the template
//! synthesizer.

use crate::error::ApiError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::Path;
use tracing::debug;

/// Default topic file name written by the topic selectors.
pub const DEFAULT_TOPIC_FILE: &str = "selected-topic.json";

/// Closed set of content types understood by the prompt and template layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Article,
    News,
    Historical,
    Fun,
    Evergreen,
    Educational,
}

impl ContentType {
    pub const ALL: [ContentType; 6] = [
        ContentType::Article,
        ContentType::News,
        ContentType::Historical,
        ContentType::Fun,
        ContentType::Evergreen,
        ContentType::Educational,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Article => "article",
            ContentType::News => "news",
            ContentType::Historical => "historical",
            ContentType::Fun => "fun",
            ContentType::Evergreen => "evergreen",
            ContentType::Educational => "educational",
        }
    }

    /// Human label used in excerpts and template prose.
    pub fn label(&self) -> &'static str {
        match self {
            ContentType::Article => "Article",
            ContentType::News => "News Article",
            ContentType::Historical => "Comparative Analysis",
            ContentType::Fun => "Fun Content",
            ContentType::Evergreen => "Evergreen Guide",
            ContentType::Educational => "Educational Piece",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ApiError> {
        ContentType::ALL
            .iter()
            .copied()
            .find(|ct| ct.as_str() == value.trim().to_ascii_lowercase())
            .ok_or_else(|| {
                ApiError::ConfigError(format!(
                    "Invalid content type: {}. Must be one of article, news, historical, fun, evergreen, educational",
                    value
                ))
            })
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The article request handed to the generation pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicRequest {
    /// Article subject, e.g. "Ocean Currents"
    #[serde(rename = "topic")]
    pub subject: String,

    #[serde(rename = "type")]
    pub content_type: ContentType,

    pub tone: String,

    pub angle: String,

    #[serde(deserialize_with = "deserialize_keywords")]
    pub keywords: Vec<String>,

    /// Target length in words
    pub estimated_words: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_audience: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

/// Keywords arrive either as a JSON array or as one comma-separated string.
fn deserialize_keywords<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Keywords {
        List(Vec<String>),
        Joined(String),
    }

    let raw = match Keywords::deserialize(deserializer)? {
        Keywords::List(list) => list,
        Keywords::Joined(joined) => joined.split(',').map(str::to_string).collect(),
    };
    Ok(raw
        .into_iter()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .collect())
}

impl TopicRequest {
    /// Load and validate a topic file. Every failure is a configuration error:
    /// nothing about the topic is discovered mid-generation.
    pub fn load(path: &Path) -> Result<Self, ApiError> {
        if !path.exists() {
            return Err(ApiError::ConfigError(format!(
                "Topic file not found: {}. Run a topic selector first.",
                path.display()
            )));
        }
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ApiError::ConfigError(format!(
                "Failed to read topic file {}: {}",
                path.display(),
                e
            ))
        })?;
        let topic = Self::from_json(&raw)?;
        debug!(path = %path.display(), subject = %topic.subject, "Loaded topic request");
        Ok(topic)
    }

    pub fn from_json(raw: &str) -> Result<Self, ApiError> {
        let topic: TopicRequest = serde_json::from_str(raw)?;
        topic.validate()?;
        Ok(topic)
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        let mut missing = Vec::new();
        if self.subject.trim().is_empty() {
            missing.push("topic");
        }
        if self.tone.trim().is_empty() {
            missing.push("tone");
        }
        if self.angle.trim().is_empty() {
            missing.push("angle");
        }
        if self.keywords.is_empty() {
            missing.push("keywords");
        }
        if self.estimated_words == 0 {
            missing.push("estimatedWords");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ApiError::ConfigError(format!(
                "Topic request has empty required fields: {}",
                missing.join(", ")
            )))
        }
    }

    /// Keywords joined for prompt and frontmatter rendering.
    pub fn keyword_list(&self) -> String {
        self.keywords.join(", ")
    }

    /// Category for template prose; falls back to the first keyword.
    pub fn category_or_default(&self) -> &str {
        self.category
            .as_deref()
            .or_else(|| self.keywords.first().map(String::as_str))
            .unwrap_or("technology")
    }

    pub fn audience_or_default(&self) -> &str {
        self.target_audience
            .as_deref()
            .unwrap_or("curious readers")
    }
}
