//! Prompt rendering
//!
//! Builds the backend prompt from a topic request. Templates are plain text
//! with `{{PLACEHOLDER}}` slots; built-in templates cover every content type
//! and can be replaced per content type from configuration. Override files are
//! read when the renderer is built so a bad path fails before generation
//! starts.

use crate::error::ApiError;
use crate::topic::{ContentType, TopicRequest};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Prompt configuration: optional template file per content type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptConfig {
    /// Content type (`article`, `news`, ...) to template file path
    #[serde(default)]
    pub templates: HashMap<String, PathBuf>,
}

const ARTICLE_PROMPT: &str = "Write a comprehensive article about: {{TOPIC}}

Type: {{CONTENT_TYPE}}
Tone: {{TONE}}
Angle: {{ANGLE}}
Keywords: {{KEYWORDS}}
Target length: ~{{WORD_COUNT}} words

Requirements:
- Start with the title as a single # heading
- Engaging introduction
- 3-4 detailed sections with ## headers
- Practical insights and examples
- A final ## Conclusion section
- Professional but conversational tone

Write the article in Markdown format:
";

const NEWS_PROMPT: &str = "Write a news article about: {{TOPIC}}

Published: {{DATE}}
Tone: {{TONE}}
Angle: {{ANGLE}}
Keywords: {{KEYWORDS}}
Target length: ~{{WORD_COUNT}} words

Requirements:
- Start with the title as a single # heading
- Open with what happened and why it matters
- 3-4 sections with ## headers covering background, key developments and implications
- Cite concrete, verifiable details; avoid speculation presented as fact
- A final ## Conclusion section

Write the article in Markdown format:
";

const HISTORICAL_PROMPT: &str = "Write a comparative analysis about: {{TOPIC}}

Tone: {{TONE}}
Angle: {{ANGLE}}
Keywords: {{KEYWORDS}}
Target length: ~{{WORD_COUNT}} words

Requirements:
- Start with the title as a single # heading
- Describe how things were, how they changed, and where they stand today
- 3-4 sections with ## headers
- Draw explicit lessons from the comparison
- A final ## Conclusion section

Write the article in Markdown format:
";

const FUN_PROMPT: &str = "Write a lighthearted, entertaining piece about: {{TOPIC}}

Tone: {{TONE}}
Angle: {{ANGLE}}
Keywords: {{KEYWORDS}}
Target length: ~{{WORD_COUNT}} words

Requirements:
- Start with the title as a single # heading
- A playful introduction that hooks the reader
- 3-4 sections with ## headers, including surprising facts
- Keep it friendly and accurate
- A final ## Conclusion section

Write the article in Markdown format:
";

fn builtin_template(content_type: ContentType) -> &'static str {
    match content_type {
        ContentType::News => NEWS_PROMPT,
        ContentType::Historical => HISTORICAL_PROMPT,
        ContentType::Fun => FUN_PROMPT,
        ContentType::Article | ContentType::Evergreen | ContentType::Educational => {
            ARTICLE_PROMPT
        }
    }
}

/// Renders prompts for topic requests.
#[derive(Debug, Clone, Default)]
pub struct PromptRenderer {
    overrides: HashMap<ContentType, String>,
}

impl PromptRenderer {
    /// Renderer with built-in templates only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load override templates named in `config`.
    pub fn from_config(config: &PromptConfig) -> Result<Self, ApiError> {
        let mut overrides = HashMap::new();
        for (type_name, path) in &config.templates {
            let content_type = ContentType::parse(type_name)?;
            let template = std::fs::read_to_string(path).map_err(|e| {
                ApiError::ConfigError(format!(
                    "Failed to read prompt template for '{}' at {}: {}",
                    type_name,
                    path.display(),
                    e
                ))
            })?;
            if !template.contains("{{TOPIC}}") {
                return Err(ApiError::ConfigError(format!(
                    "Prompt template {} does not reference {{{{TOPIC}}}}",
                    path.display()
                )));
            }
            overrides.insert(content_type, template);
        }
        Ok(Self { overrides })
    }

    /// Add or replace the template for one content type.
    pub fn with_template(mut self, content_type: ContentType, template: impl Into<String>) -> Self {
        self.overrides.insert(content_type, template.into());
        self
    }

    pub fn template_for(&self, content_type: ContentType) -> &str {
        self.overrides
            .get(&content_type)
            .map(String::as_str)
            .unwrap_or_else(|| builtin_template(content_type))
    }

    /// Fill `{{NAME}}` slots in one pass; topic text is never rescanned.
    pub fn render(&self, topic: &TopicRequest, now: DateTime<Utc>) -> String {
        let template = self.template_for(topic.content_type);
        let mut out = String::with_capacity(template.len() + 256);
        let mut rest = template;
        while let Some(open) = rest.find("{{") {
            out.push_str(&rest[..open]);
            let after = &rest[open + 2..];
            let slot = after.find("}}").and_then(|close| {
                slot_value(&after[..close], topic, now).map(|value| (close, value))
            });
            match slot {
                Some((close, value)) => {
                    out.push_str(&value);
                    rest = &after[close + 2..];
                }
                None => {
                    out.push_str("{{");
                    rest = after;
                }
            }
        }
        out.push_str(rest);
        out
    }
}

fn slot_value(name: &str, topic: &TopicRequest, now: DateTime<Utc>) -> Option<String> {
    let value = match name {
        "TOPIC" => topic.subject.trim().to_string(),
        "CONTENT_TYPE" => topic.content_type.as_str().to_string(),
        "TONE" => topic.tone.trim().to_string(),
        "ANGLE" => topic.angle.trim().to_string(),
        "KEYWORDS" => topic.keyword_list(),
        "WORD_COUNT" => topic.estimated_words.to_string(),
        "CATEGORY" => topic.category_or_default().to_string(),
        "AUDIENCE" => topic.audience_or_default().to_string(),
        "DATE" => now.to_rfc3339(),
        _ => return None,
    };
    Some(value)
}
