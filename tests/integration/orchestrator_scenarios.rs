//! End-to-end orchestration runs: scripted backends and a stubbed Ollama.

use crate::integration::test_utils::{
    article, ocean_topic, topic_of, Scripted, ScriptedBackend, StubResponse, StubServer,
};
use autoblog::error::ApiError;
use autoblog::generation::{DocumentSource, GenerationConfig, GenerationOrchestrator};
use autoblog::prompt::PromptRenderer;
use autoblog::provider::OllamaClient;
use autoblog::quality::{self, QualityThresholds, StrictnessProfile};
use autoblog::topic::ContentType;

fn config(max_attempts: u32, require_backend: bool) -> GenerationConfig {
    GenerationConfig {
        max_attempts,
        backoff_ms: 0,
        require_backend,
    }
}

fn orchestrator(
    backend: ScriptedBackend,
    max_attempts: u32,
) -> GenerationOrchestrator<ScriptedBackend> {
    GenerationOrchestrator::new(
        backend,
        PromptRenderer::new(),
        QualityThresholds::default(),
        config(max_attempts, false),
    )
}

#[tokio::test]
async fn short_draft_is_retried_until_one_passes() {
    let backend = ScriptedBackend::new(
        true,
        vec![
            Scripted::Text(article(1, 150, "No wrap-up here.")),
            Scripted::Text(article(3, 450, "In conclusion, currents move heat.")),
        ],
    );
    let orchestrator = orchestrator(backend, 3);

    let report = orchestrator.generate(&ocean_topic()).await.unwrap();

    assert_eq!(report.document.source(), DocumentSource::Backend);
    assert_eq!(report.document.word_count, 450);
    assert_eq!(report.document.confidence, Some(1.0));
    assert_eq!(report.document.attempts, 2);
    assert!(report.backend_available);
    assert!(!report.is_best_effort());
    assert_eq!(orchestrator.backend().generate_calls(), 2);

    let first = report.attempts[0].validation.as_ref().unwrap();
    assert!(!first.valid);
    assert!(first
        .issues
        .iter()
        .any(|issue| issue == "Missing conclusion/summary"));
}

#[tokio::test]
async fn every_attempt_receives_the_same_prompt() {
    let backend = ScriptedBackend::new(
        true,
        vec![
            Scripted::Fail("timeout".to_string()),
            Scripted::Text("too short".to_string()),
            Scripted::Text(article(3, 400, "Summary: done.")),
        ],
    );
    let orchestrator = orchestrator(backend, 3);
    orchestrator.generate(&ocean_topic()).await.unwrap();

    let prompts = orchestrator.backend().prompts();
    assert_eq!(prompts.len(), 3);
    assert!(prompts.iter().all(|p| p == &prompts[0]));
    assert!(prompts[0].contains("Ocean Currents"));
}

#[tokio::test]
async fn unreachable_backend_yields_template_for_every_content_type() {
    for content_type in ContentType::ALL {
        let backend = ScriptedBackend::new(false, vec![]);
        let orchestrator = orchestrator(backend, 3);
        let report = orchestrator.generate(&topic_of(content_type)).await.unwrap();

        assert_eq!(report.document.source(), DocumentSource::Template);
        assert!(!report.backend_available);
        assert!(report.attempts.is_empty());
        assert_eq!(orchestrator.backend().generate_calls(), 0);
        assert!(report.document.body.starts_with("# Ocean Currents"));

        for profile in StrictnessProfile::ALL {
            let result = quality::validate(&report.document.body, &profile.thresholds());
            assert!(
                result.valid,
                "{} template failed {} gate: {:?}",
                content_type, profile, result.issues
            );
        }
    }
}

#[tokio::test]
async fn require_backend_refuses_to_fall_back() {
    let backend = ScriptedBackend::new(false, vec![]);
    let orchestrator = GenerationOrchestrator::new(
        backend,
        PromptRenderer::new(),
        QualityThresholds::default(),
        config(3, true),
    );

    let err = orchestrator.generate(&ocean_topic()).await.unwrap_err();
    assert!(matches!(err, ApiError::BackendUnavailable(_)));
    assert_eq!(orchestrator.backend().generate_calls(), 0);
}

#[tokio::test]
async fn attempts_never_exceed_configured_ceiling() {
    for max_attempts in 1..=5u32 {
        let replies = (0..10)
            .map(|_| Scripted::Text("nope".to_string()))
            .collect();
        let backend = ScriptedBackend::new(true, replies);
        let orchestrator = orchestrator(backend, max_attempts);
        let report = orchestrator.generate(&ocean_topic()).await.unwrap();

        assert_eq!(orchestrator.backend().generate_calls() as u32, max_attempts);
        assert_eq!(report.attempts.len() as u32, max_attempts);
        assert!(report.is_best_effort());
        assert_eq!(report.document.body, "nope");
    }
}

#[tokio::test]
async fn best_effort_keeps_most_recent_failing_text() {
    let backend = ScriptedBackend::new(
        true,
        vec![
            Scripted::Text(article(1, 100, "first draft")),
            Scripted::Text(article(3, 250, "In summary, close.")),
        ],
    );
    let orchestrator = orchestrator(backend, 2);
    let report = orchestrator.generate(&ocean_topic()).await.unwrap();

    assert_eq!(report.document.source(), DocumentSource::Backend);
    assert_eq!(report.document.word_count, 250);
    let confidence = report.document.confidence.unwrap();
    assert!((confidence - 0.8).abs() < 1e-6);
}

#[tokio::test]
async fn model_override_is_sent_with_each_request() {
    let backend = ScriptedBackend::new(
        true,
        vec![Scripted::Text(article(2, 320, "Conclusion reached."))],
    );
    let orchestrator = orchestrator(backend, 3).with_model("llama3:8b");
    let report = orchestrator.generate(&ocean_topic()).await.unwrap();

    assert_eq!(
        orchestrator.backend().models_requested(),
        vec!["llama3:8b".to_string()]
    );
    assert_eq!(report.document.provenance.model.as_deref(), Some("llama3:8b"));
}

#[tokio::test]
async fn ollama_pipeline_accepts_second_completion() {
    let server = StubServer::start(vec![
        StubResponse::tags(&["mistral:latest"]),
        StubResponse::status(500, "{\"error\":\"model loading\"}"),
        StubResponse::completion(&article(3, 360, "In conclusion, the sea is busy.")),
    ]);
    let client = OllamaClient::new(&server.backend_config()).unwrap();
    let orchestrator = GenerationOrchestrator::new(
        client,
        PromptRenderer::new(),
        QualityThresholds::default(),
        config(3, false),
    );

    let report = orchestrator.generate(&ocean_topic()).await.unwrap();

    assert_eq!(report.document.source(), DocumentSource::Backend);
    assert_eq!(report.document.provenance.model.as_deref(), Some("mistral"));
    assert_eq!(report.attempts.len(), 2);
    assert!(report.attempts[0].error.is_some());

    let requests = server.finish();
    let targets: Vec<&str> = requests.iter().map(|r| r.target.as_str()).collect();
    assert_eq!(
        targets,
        vec!["GET /api/tags", "POST /api/generate", "POST /api/generate"]
    );
}

#[tokio::test]
async fn ollama_pipeline_falls_back_when_no_models_registered() {
    let server = StubServer::start(vec![StubResponse::tags(&[])]);
    let client = OllamaClient::new(&server.backend_config()).unwrap();
    let orchestrator = GenerationOrchestrator::new(
        client,
        PromptRenderer::new(),
        QualityThresholds::default(),
        config(3, false),
    );

    let report = orchestrator.generate(&ocean_topic()).await.unwrap();
    assert_eq!(report.document.source(), DocumentSource::Template);
    assert_eq!(server.finish().len(), 1);
}
