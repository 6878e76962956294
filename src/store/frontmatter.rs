//! Article rendering: frontmatter metadata block, body, and footer.

use crate::generation::{DocumentSource, GeneratedDocument};
use chrono::{DateTime, Utc};

/// Visual themes the article viewer knows about.
pub const ARTICLE_THEMES: [&str; 10] = [
    "minimalist-clean",
    "neon-nights",
    "paper-ink",
    "ocean-breeze",
    "forest-calm",
    "sunset-vibes",
    "matrix-code",
    "cotton-candy",
    "industrial",
    "aurora",
];

const EXCERPT_MAX_CHARS: usize = 160;

/// Lower-case slug with every run of non-alphanumerics collapsed to `-`.
pub fn slugify(subject: &str) -> String {
    let mut slug = String::with_capacity(subject.len());
    let mut pending_dash = false;
    for c in subject.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        "article".to_string()
    } else {
        slug
    }
}

/// Theme for `subject`, stable across runs.
pub fn choose_theme(subject: &str) -> &'static str {
    let hash = blake3::hash(subject.trim().to_lowercase().as_bytes());
    let index = hash.as_bytes()[0] as usize % ARTICLE_THEMES.len();
    ARTICLE_THEMES[index]
}

/// First prose paragraph of `body`, cut to a short teaser.
pub fn excerpt(body: &str, subject: &str) -> String {
    let paragraph = body
        .split("\n\n")
        .map(str::trim)
        .find(|p| {
            !p.is_empty()
                && !p.starts_with('#')
                && !p.starts_with('*')
                && !p.starts_with('_')
                && !p.starts_with("---")
        })
        .map(|p| p.split_whitespace().collect::<Vec<_>>().join(" "));

    match paragraph {
        Some(text) if text.chars().count() > EXCERPT_MAX_CHARS => {
            let cut: String = text.chars().take(EXCERPT_MAX_CHARS).collect();
            format!("{}...", cut.trim_end())
        }
        Some(text) => text,
        None => format!("An article about {}", subject.trim()),
    }
}

/// Double-quoted scalar; JSON string syntax is valid YAML.
fn quoted(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("\"{}\"", value.replace('"', "'")))
}

/// Full article file content for `document`.
pub fn render_article(document: &GeneratedDocument, theme: &str, written_at: DateTime<Utc>) -> String {
    let topic = &document.topic;
    let keywords: Vec<String> = topic.keywords.iter().map(|k| quoted(k)).collect();

    let mut out = String::new();
    out.push_str("---\n");
    out.push_str(&format!("title: {}\n", quoted(topic.subject.trim())));
    out.push_str(&format!(
        "date: {}\n",
        quoted(&document.provenance.generated_at.to_rfc3339())
    ));
    out.push_str(&format!("topic: {}\n", quoted(topic.subject.trim())));
    out.push_str(&format!("type: {}\n", quoted(topic.content_type.as_str())));
    out.push_str(&format!("tone: {}\n", quoted(topic.tone.trim())));
    out.push_str(&format!("angle: {}\n", quoted(topic.angle.trim())));
    out.push_str(&format!("keywords: [{}]\n", keywords.join(", ")));
    out.push_str(&format!("source: {}\n", quoted(&document.source().to_string())));
    if let Some(model) = &document.provenance.model {
        out.push_str(&format!("model: {}\n", quoted(model)));
    }
    out.push_str(&format!("theme: {}\n", quoted(theme)));
    out.push_str(&format!("wordCount: {}\n", document.word_count));
    out.push_str(&format!("readingTime: {}\n", document.reading_time_minutes()));
    if let Some(confidence) = document.confidence {
        out.push_str(&format!("confidence: {:.2}\n", confidence));
    }
    out.push_str(&format!("attempts: {}\n", document.attempts));
    out.push_str(&format!(
        "excerpt: {}\n",
        quoted(&excerpt(&document.body, &topic.subject))
    ));
    out.push_str("---\n\n");

    out.push_str(document.body.trim_end());
    out.push_str("\n\n---\n\n");
    out.push_str(&format!(
        "*Generated by autoblog on {}*\n",
        written_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    match (document.source(), &document.provenance.model) {
        (DocumentSource::Backend, Some(model)) => {
            out.push_str(&format!("*Model: {}*\n", model));
        }
        _ => out.push_str("*Source: template fallback*\n"),
    }
    out
}
