//! Generate command presentation: run summary text/json and the skip notice.

use super::shared::{format_section_heading, to_pretty_json};
use crate::error::ApiError;
use crate::generation::{DocumentSource, GenerationReport};
use crate::store::SavedArticle;
use owo_colors::OwoColorize;
use serde_json::json;
use std::path::PathBuf;

pub fn format_generate_result_text(
    report: &GenerationReport,
    saved: Option<&SavedArticle>,
) -> String {
    let document = &report.document;
    let mut out = format!("{}\n\n", format_section_heading("Article generated"));
    out.push_str(&format!("  Topic: {}\n", document.topic.subject));
    out.push_str(&format!("  Type: {}\n", document.topic.content_type));

    let source = match document.source() {
        DocumentSource::Backend if report.is_best_effort() => {
            format!("{}", "backend (best effort)".yellow())
        }
        DocumentSource::Backend => format!("{}", "backend".green()),
        DocumentSource::Template => format!("{}", "template fallback".yellow()),
    };
    out.push_str(&format!("  Source: {}\n", source));
    if let Some(model) = &document.provenance.model {
        out.push_str(&format!("  Model: {}\n", model));
    }
    if !report.backend_available {
        out.push_str("  Backend: unreachable\n");
    }
    out.push_str(&format!(
        "  Words: {} (~{} min read)\n",
        document.word_count,
        document.reading_time_minutes()
    ));
    if let Some(confidence) = document.confidence {
        out.push_str(&format!("  Confidence: {:.0}%\n", confidence * 100.0));
    }
    out.push_str(&format!("  Attempts: {}\n", report.attempts.len()));
    for attempt in &report.attempts {
        let detail = match (&attempt.validation, &attempt.error) {
            (Some(v), _) if v.valid => "passed".to_string(),
            (Some(v), _) => format!("rejected: {}", v.issues.join("; ")),
            (None, Some(e)) => format!("failed: {}", e),
            (None, None) => "no result".to_string(),
        };
        out.push_str(&format!("    #{} {}\n", attempt.index, detail));
    }
    if let Some(saved) = saved {
        out.push_str(&format!("  Theme: {}\n", saved.theme));
        out.push_str(&format!("  Written: {}\n", saved.path.display()));
    }
    out
}

pub fn format_generate_result_json(
    report: &GenerationReport,
    saved: Option<&SavedArticle>,
) -> Result<String, ApiError> {
    let document = &report.document;
    let attempts: Vec<serde_json::Value> = report
        .attempts
        .iter()
        .map(|a| {
            json!({
                "index": a.index,
                "error": a.error,
                "validation": a.validation,
            })
        })
        .collect();
    let out = json!({
        "topic": document.topic.subject,
        "type": document.topic.content_type,
        "source": document.source(),
        "model": document.provenance.model,
        "generated_at": document.provenance.generated_at,
        "word_count": document.word_count,
        "reading_time": document.reading_time_minutes(),
        "confidence": document.confidence,
        "best_effort": report.is_best_effort(),
        "backend_available": report.backend_available,
        "attempts": attempts,
        "duration_ms": report.duration_ms,
        "path": saved.map(|s| s.path.display().to_string()),
        "theme": saved.map(|s| s.theme.clone()),
    });
    to_pretty_json(&out)
}

/// Notice printed when generation is skipped because similar articles exist.
pub fn format_similar_skipped(
    subject: &str,
    similar: &[PathBuf],
    format: &str,
) -> Result<String, ApiError> {
    if format == "json" {
        let paths: Vec<String> = similar.iter().map(|p| p.display().to_string()).collect();
        return to_pretty_json(&json!({
            "topic": subject,
            "skipped": true,
            "similar": paths,
        }));
    }
    let mut out = format!(
        "{} similar article(s) already exist for '{}', skipping generation:\n",
        similar.len(),
        subject
    );
    for path in similar {
        out.push_str(&format!("  - {}\n", path.display()));
    }
    Ok(out)
}
