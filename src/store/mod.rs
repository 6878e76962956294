//! Article Store
//!
//! Persists generated documents as markdown files with a frontmatter metadata
//! block, and looks up existing articles that cover a similar topic.

pub mod frontmatter;
pub mod persistence;
pub mod similar;

pub use persistence::{consume_topic, write_atomic, FsArticleStore};
pub use similar::find_similar_articles;

use crate::error::StorageError;
use crate::generation::GeneratedDocument;
use crate::topic::TopicRequest;
use serde::Serialize;
use std::path::PathBuf;

/// Location and shape of a written article.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavedArticle {
    pub path: PathBuf,
    pub theme: String,
    pub bytes: usize,
}

/// Article store interface
pub trait ArticleStore {
    fn save(&self, document: &GeneratedDocument) -> Result<SavedArticle, StorageError>;

    /// Existing articles whose names overlap with `topic`.
    fn find_similar(&self, topic: &TopicRequest) -> Vec<PathBuf>;
}
