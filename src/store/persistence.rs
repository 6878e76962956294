//! Filesystem article store
//!
//! Articles land in `articles/YYYY/MM/DD/YYYY-MM-DD-HH-MM-SS_{slug}.md`.
//! Each file is written to a temporary sibling first and renamed into place,
//! so an interrupted run never leaves a partial article behind.

use super::frontmatter::{choose_theme, render_article, slugify};
use super::similar::find_similar_articles;
use super::{ArticleStore, SavedArticle};
use crate::error::StorageError;
use crate::generation::GeneratedDocument;
use crate::topic::TopicRequest;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Article store rooted at an articles directory.
#[derive(Debug, Clone)]
pub struct FsArticleStore {
    articles_dir: PathBuf,
}

impl FsArticleStore {
    pub fn new(articles_dir: impl Into<PathBuf>) -> Self {
        Self {
            articles_dir: articles_dir.into(),
        }
    }

    pub fn articles_dir(&self) -> &Path {
        &self.articles_dir
    }

    /// Destination for an article about `subject` written at `now`.
    pub fn article_path(&self, subject: &str, now: DateTime<Utc>) -> PathBuf {
        self.articles_dir
            .join(now.format("%Y").to_string())
            .join(now.format("%m").to_string())
            .join(now.format("%d").to_string())
            .join(format!(
                "{}_{}.md",
                now.format("%Y-%m-%d-%H-%M-%S"),
                slugify(subject)
            ))
    }

    /// Save at an explicit time; `save` uses the current time.
    pub fn save_at(
        &self,
        document: &GeneratedDocument,
        now: DateTime<Utc>,
    ) -> Result<SavedArticle, StorageError> {
        let path = self.article_path(&document.topic.subject, now);
        let theme = choose_theme(&document.topic.subject);
        let content = render_article(document, theme, now);
        write_atomic(&path, content.as_bytes())?;
        info!(path = %path.display(), theme, "Article written");
        Ok(SavedArticle {
            path,
            theme: theme.to_string(),
            bytes: content.len(),
        })
    }
}

impl ArticleStore for FsArticleStore {
    fn save(&self, document: &GeneratedDocument) -> Result<SavedArticle, StorageError> {
        self.save_at(document, Utc::now())
    }

    fn find_similar(&self, topic: &TopicRequest) -> Vec<PathBuf> {
        find_similar_articles(&self.articles_dir, topic)
    }
}

/// Write `content` to `path` via a temporary file and rename.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<(), StorageError> {
    let parent = path
        .parent()
        .ok_or_else(|| StorageError::InvalidPath(format!("{} has no parent", path.display())))?;
    fs::create_dir_all(parent).map_err(|e| {
        StorageError::IoError(std::io::Error::new(
            e.kind(),
            format!("Failed to create directory {:?}: {}", parent, e),
        ))
    })?;

    let file_name = path
        .file_name()
        .ok_or_else(|| StorageError::InvalidPath(format!("{} has no file name", path.display())))?;
    let temp_path = parent.join(format!(".{}.tmp", file_name.to_string_lossy()));

    fs::write(&temp_path, content).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        StorageError::IoError(std::io::Error::new(
            e.kind(),
            format!("Failed to write {:?}: {}", temp_path, e),
        ))
    })?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        StorageError::IoError(std::io::Error::new(
            e.kind(),
            format!("Failed to rename temp file to {:?}: {}", path, e),
        ))
    })?;

    debug!(path = %path.display(), bytes = content.len(), "Atomic write complete");
    Ok(())
}

/// Remove the consumed topic request file. A file that is already gone is fine.
pub fn consume_topic(path: &Path) -> Result<(), StorageError> {
    match fs::remove_file(path) {
        Ok(()) => {
            info!(path = %path.display(), "Topic file consumed");
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(StorageError::IoError(e)),
    }
}
