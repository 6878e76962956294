//! Quality Gate
//!
//! Heuristic structural acceptance test for generated articles. It only checks
//! gross shape (length, `##` section count, a concluding section); it never
//! judges factual or stylistic quality.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Issue reported when text is below the character floor.
pub const TOO_SHORT_ISSUE: &str = "Content too short";

/// Confidence lost per reported issue.
const CONFIDENCE_PENALTY_PER_ISSUE: f32 = 0.2;

/// Named strictness profiles observed across deployments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StrictnessProfile {
    Lenient,
    #[default]
    Standard,
    Strict,
}

impl StrictnessProfile {
    pub const ALL: [StrictnessProfile; 3] = [
        StrictnessProfile::Lenient,
        StrictnessProfile::Standard,
        StrictnessProfile::Strict,
    ];

    pub fn thresholds(&self) -> QualityThresholds {
        match self {
            StrictnessProfile::Lenient => QualityThresholds {
                min_sections: 2,
                min_words: 200,
                min_chars: 100,
            },
            StrictnessProfile::Standard => QualityThresholds {
                min_sections: 2,
                min_words: 300,
                min_chars: 100,
            },
            StrictnessProfile::Strict => QualityThresholds {
                min_sections: 3,
                min_words: 400,
                min_chars: 100,
            },
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "lenient" => Some(StrictnessProfile::Lenient),
            "standard" => Some(StrictnessProfile::Standard),
            "strict" => Some(StrictnessProfile::Strict),
            _ => None,
        }
    }
}

impl fmt::Display for StrictnessProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StrictnessProfile::Lenient => "lenient",
            StrictnessProfile::Standard => "standard",
            StrictnessProfile::Strict => "strict",
        };
        f.write_str(name)
    }
}

/// Concrete gate thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityThresholds {
    pub min_sections: usize,
    pub min_words: usize,
    pub min_chars: usize,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        StrictnessProfile::default().thresholds()
    }
}

/// Gate configuration: a named profile with optional per-threshold overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityConfig {
    #[serde(default)]
    pub profile: StrictnessProfile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_sections: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_words: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_chars: Option<usize>,
}

impl QualityConfig {
    /// Resolve the effective thresholds.
    pub fn thresholds(&self) -> QualityThresholds {
        let base = self.profile.thresholds();
        QualityThresholds {
            min_sections: self.min_sections.unwrap_or(base.min_sections),
            min_words: self.min_words.unwrap_or(base.min_words),
            min_chars: self.min_chars.unwrap_or(base.min_chars),
        }
    }
}

/// Outcome of one gate check. `valid` is true iff `issues` is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub word_count: usize,
    pub section_count: usize,
    pub issues: Vec<String>,
    pub confidence: f32,
}

impl ValidationResult {
    fn from_issues(word_count: usize, section_count: usize, issues: Vec<String>) -> Self {
        let confidence = confidence_for(issues.len());
        Self {
            valid: issues.is_empty(),
            word_count,
            section_count,
            issues,
            confidence,
        }
    }

    /// Confidence as a whole percentage, for log and CLI messages.
    pub fn confidence_percent(&self) -> u32 {
        (self.confidence * 100.0).round() as u32
    }
}

/// `max(0, 1 - 0.2 * issue_count)`
pub fn confidence_for(issue_count: usize) -> f32 {
    (1.0 - CONFIDENCE_PENALTY_PER_ISSUE * issue_count as f32).max(0.0)
}

/// Whitespace-delimited token count.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Number of lines opening with a `##` heading marker.
pub fn count_sections(text: &str) -> usize {
    text.lines().filter(|line| line.starts_with("##")).count()
}

fn has_conclusion(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.contains("conclusion") || lower.contains("summary")
}

/// Run the gate over `text`.
pub fn validate(text: &str, thresholds: &QualityThresholds) -> ValidationResult {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.chars().count() < thresholds.min_chars {
        return ValidationResult::from_issues(0, 0, vec![TOO_SHORT_ISSUE.to_string()]);
    }

    let word_count = count_words(text);
    let section_count = count_sections(text);
    let mut issues = Vec::new();

    if section_count < thresholds.min_sections {
        issues.push(format!(
            "Only {} sections (need {}+)",
            section_count, thresholds.min_sections
        ));
    }
    if word_count < thresholds.min_words {
        issues.push(format!(
            "Only {} words (need {}+)",
            word_count, thresholds.min_words
        ));
    }
    if !has_conclusion(text) {
        issues.push("Missing conclusion/summary".to_string());
    }

    ValidationResult::from_issues(word_count, section_count, issues)
}

/// Strip a leading `---` frontmatter block, if any.
pub fn strip_frontmatter(content: &str) -> &str {
    let Some(rest) = content.strip_prefix("---\n") else {
        return content;
    };
    match rest.find("\n---") {
        Some(end) => {
            let after = &rest[end + 4..];
            after.strip_prefix('\n').unwrap_or(after)
        }
        None => content,
    }
}
