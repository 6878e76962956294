//! Saving generated documents and scanning for similar articles.

use crate::integration::test_utils::{ocean_topic, write_topic, ScriptedBackend};
use autoblog::generation::{GenerationConfig, GenerationOrchestrator};
use autoblog::prompt::PromptRenderer;
use autoblog::quality::{self, strip_frontmatter, QualityThresholds};
use autoblog::store::{consume_topic, ArticleStore, FsArticleStore};
use std::fs;
use tempfile::TempDir;
use walkdir::WalkDir;

async fn template_report() -> autoblog::generation::GenerationReport {
    let orchestrator = GenerationOrchestrator::new(
        ScriptedBackend::new(false, vec![]),
        PromptRenderer::new(),
        QualityThresholds::default(),
        GenerationConfig::default(),
    );
    orchestrator.generate(&ocean_topic()).await.unwrap()
}

#[tokio::test]
async fn saved_fallback_article_carries_frontmatter_and_passes_gate() {
    let dir = TempDir::new().unwrap();
    let store = FsArticleStore::new(dir.path().join("articles"));
    let report = template_report().await;

    let saved = store.save(&report.document).unwrap();

    assert!(saved.path.starts_with(store.articles_dir()));
    let file_name = saved.path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(file_name.ends_with("_ocean-currents.md"), "got {}", file_name);

    let content = fs::read_to_string(&saved.path).unwrap();
    assert_eq!(content.len(), saved.bytes);
    assert!(content.starts_with("---\n"));
    assert!(content.contains("title: \"Ocean Currents\""));
    assert!(content.contains("source: \"template\""));
    assert!(content.contains(&format!("theme: \"{}\"", saved.theme)));
    assert!(!content.contains("\nmodel:"));
    assert!(content.contains("*Source: template fallback*"));

    let gate = quality::validate(strip_frontmatter(&content), &QualityThresholds::default());
    assert!(gate.valid, "{:?}", gate.issues);

    let leftovers: Vec<_> = WalkDir::new(store.articles_dir())
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[tokio::test]
async fn saved_article_is_found_by_similarity_scan() {
    let dir = TempDir::new().unwrap();
    let store = FsArticleStore::new(dir.path().join("articles"));
    assert!(store.find_similar(&ocean_topic()).is_empty());

    let report = template_report().await;
    let saved = store.save(&report.document).unwrap();

    let similar = store.find_similar(&ocean_topic());
    assert_eq!(similar, vec![saved.path]);
}

#[test]
fn consuming_topic_twice_is_harmless() {
    let dir = TempDir::new().unwrap();
    let topic_path = write_topic(dir.path());

    consume_topic(&topic_path).unwrap();
    assert!(!topic_path.exists());
    consume_topic(&topic_path).unwrap();
}
