//! Validate command presentation: gate verdict text/json.

use super::shared::to_pretty_json;
use crate::error::ApiError;
use crate::quality::{QualityThresholds, ValidationResult};
use owo_colors::OwoColorize;
use serde_json::json;
use std::path::Path;

pub fn format_validation_text(
    path: &Path,
    result: &ValidationResult,
    thresholds: &QualityThresholds,
) -> String {
    let verdict = if result.valid {
        format!("{}", "PASS".green().bold())
    } else {
        format!("{}", "FAIL".red().bold())
    };
    let mut out = format!("{} {}\n", verdict, path.display());
    out.push_str(&format!(
        "  Words: {} (need {}+)\n",
        result.word_count, thresholds.min_words
    ));
    out.push_str(&format!(
        "  Sections: {} (need {}+)\n",
        result.section_count, thresholds.min_sections
    ));
    out.push_str(&format!(
        "  Confidence: {}%\n",
        result.confidence_percent()
    ));
    if !result.issues.is_empty() {
        out.push_str(&format!("\nIssues ({}):\n", result.issues.len()));
        for issue in &result.issues {
            out.push_str(&format!("  - {}\n", issue));
        }
    }
    out
}

pub fn format_validation_json(
    path: &Path,
    result: &ValidationResult,
    thresholds: &QualityThresholds,
) -> Result<String, ApiError> {
    to_pretty_json(&json!({
        "path": path.display().to_string(),
        "valid": result.valid,
        "word_count": result.word_count,
        "section_count": result.section_count,
        "issues": result.issues,
        "confidence": result.confidence,
        "thresholds": thresholds,
    }))
}
