//! Similar-article detection over existing article file names.

use crate::topic::TopicRequest;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Shared significant words needed before two articles count as similar.
pub const MIN_SHARED_WORDS: usize = 2;

/// Words shorter than this carry no signal ("the", "and", "how").
const MIN_WORD_LEN: usize = 4;

fn split_words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_ascii_lowercase)
}

/// Significant words of the topic subject followed by those of each keyword.
/// A word repeated across subject and keywords is kept once per occurrence.
pub fn significant_words(topic: &TopicRequest) -> Vec<String> {
    let lower_subject = topic.subject.to_lowercase();
    let mut words: Vec<String> = split_words(&lower_subject)
        .filter(|w| w.len() >= MIN_WORD_LEN)
        .collect();
    for keyword in &topic.keywords {
        words.extend(split_words(keyword).filter(|w| w.len() >= MIN_WORD_LEN));
    }
    words
}

/// Number of topic words present in `file_name`.
pub fn shared_word_count(topic_words: &[String], file_name: &str) -> usize {
    let name_words: Vec<String> = split_words(file_name).collect();
    topic_words
        .iter()
        .filter(|word| name_words.contains(word))
        .count()
}

/// Markdown files under `articles_dir` whose names share at least
/// `MIN_SHARED_WORDS` significant words with `topic`.
///
/// A missing directory yields no matches.
pub fn find_similar_articles(articles_dir: &Path, topic: &TopicRequest) -> Vec<PathBuf> {
    if !articles_dir.is_dir() {
        return Vec::new();
    }
    let topic_words = significant_words(topic);
    if topic_words.is_empty() {
        return Vec::new();
    }

    let mut similar: Vec<PathBuf> = WalkDir::new(articles_dir)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.path().extension().and_then(|e| e.to_str()) == Some("md"))
        .filter_map(|entry| {
            let stem = entry.path().file_stem()?.to_string_lossy().into_owned();
            let shared = shared_word_count(&topic_words, &stem);
            (shared >= MIN_SHARED_WORDS).then(|| {
                debug!(path = %entry.path().display(), shared, "Similar article");
                entry.into_path()
            })
        })
        .collect();
    similar.sort();
    similar
}
