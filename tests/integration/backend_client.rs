//! Ollama client behavior against a local stub server.

use crate::integration::test_utils::{StubResponse, StubServer};
use autoblog::error::ApiError;
use autoblog::provider::{backend_status, BackendClient, BackendConfig, OllamaClient};

#[tokio::test]
async fn probe_succeeds_when_models_are_listed() {
    let server = StubServer::start(vec![StubResponse::tags(&["mistral:latest"])]);
    let client = OllamaClient::new(&server.backend_config()).unwrap();

    assert!(client.probe().await);

    let requests = server.finish();
    assert_eq!(requests[0].target, "GET /api/tags");
}

#[tokio::test]
async fn probe_fails_with_empty_model_list() {
    let server = StubServer::start(vec![StubResponse::tags(&[])]);
    let client = OllamaClient::new(&server.backend_config()).unwrap();

    assert!(!client.probe().await);
    server.finish();
}

#[tokio::test]
async fn probe_fails_on_server_error() {
    let server = StubServer::start(vec![StubResponse::status(500, "{\"error\":\"boom\"}")]);
    let client = OllamaClient::new(&server.backend_config()).unwrap();

    assert!(!client.probe().await);
    server.finish();
}

#[tokio::test]
async fn probe_fails_on_malformed_body() {
    let server = StubServer::start(vec![StubResponse::ok("not json")]);
    let client = OllamaClient::new(&server.backend_config()).unwrap();

    assert!(!client.probe().await);
    server.finish();
}

#[tokio::test]
async fn probe_fails_when_nothing_listens() {
    let config = BackendConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        probe_timeout_secs: 2,
        connect_timeout_secs: 2,
        ..BackendConfig::default()
    };
    let client = OllamaClient::new(&config).unwrap();
    assert!(!client.probe().await);
}

#[tokio::test]
async fn generate_sends_non_streaming_request_with_sampling() {
    let server = StubServer::start(vec![StubResponse::completion("## Heading\n\nBody text")]);
    let client = OllamaClient::new(&server.backend_config()).unwrap();

    let text = client.generate("Write about tides", "llama3").await.unwrap();
    assert_eq!(text, "## Heading\n\nBody text");

    let requests = server.finish();
    assert_eq!(requests[0].target, "POST /api/generate");
    let body = requests[0].json();
    assert_eq!(body["model"], "llama3");
    assert_eq!(body["prompt"], "Write about tides");
    assert_eq!(body["stream"], false);
    assert_eq!(body["options"]["temperature"], 0.7);
    assert_eq!(body["options"]["top_p"], 0.9);
    assert_eq!(body["options"]["top_k"], 40);
    assert_eq!(body["options"]["num_predict"], 2048);
}

#[tokio::test]
async fn generate_reports_status_failures_with_bounded_diagnostic() {
    let noisy = "x".repeat(5000);
    let server = StubServer::start(vec![StubResponse::status(503, noisy)]);
    let client = OllamaClient::new(&server.backend_config()).unwrap();

    let err = client.generate("prompt", "mistral").await.unwrap_err();
    match &err {
        ApiError::BackendRequestFailed(message) => {
            assert!(message.contains("503"));
            assert!(message.ends_with("[truncated]"));
            assert!(message.chars().count() < 600);
        }
        other => panic!("expected BackendRequestFailed, got {:?}", other),
    }
    assert!(err.is_backend_failure());
    server.finish();
}

#[tokio::test]
async fn generate_rejects_unparseable_body() {
    let server = StubServer::start(vec![StubResponse::ok("<html>")]);
    let client = OllamaClient::new(&server.backend_config()).unwrap();

    let err = client.generate("prompt", "mistral").await.unwrap_err();
    assert!(matches!(err, ApiError::BackendError(_)));
    server.finish();
}

#[tokio::test]
async fn generate_rejects_blank_response() {
    let server = StubServer::start(vec![StubResponse::completion("   \n")]);
    let client = OllamaClient::new(&server.backend_config()).unwrap();

    let err = client.generate("prompt", "mistral").await.unwrap_err();
    assert!(matches!(err, ApiError::BackendError(_)));
    server.finish();
}

#[tokio::test]
async fn status_reports_configured_model_availability() {
    let server = StubServer::start(vec![StubResponse::tags(&[
        "mistral:latest",
        "llama3:8b",
    ])]);
    let client = OllamaClient::new(&server.backend_config()).unwrap();

    let status = backend_status(&client, client.base_url()).await;
    assert!(status.reachable);
    assert!(status.model_available);
    assert_eq!(status.backend, "ollama");
    assert_eq!(status.models.len(), 2);
    assert!(status.error.is_none());
    server.finish();
}
