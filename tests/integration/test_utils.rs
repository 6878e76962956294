//! Shared test utilities for integration tests
//!
//! A scripted in-process backend, a one-shot HTTP server that plays the part
//! of an Ollama instance, and topic/article fixtures.

use async_trait::async_trait;
use autoblog::error::ApiError;
use autoblog::provider::{BackendClient, BackendConfig};
use autoblog::topic::{ContentType, TopicRequest};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::thread::JoinHandle;

pub const OCEAN_TOPIC_JSON: &str = r#"{
  "topic": "Ocean Currents",
  "type": "article",
  "tone": "casual",
  "angle": "how heat moves around the planet",
  "keywords": ["ocean", "climate", "currents"],
  "estimatedWords": 800,
  "category": "science"
}"#;

pub fn ocean_topic() -> TopicRequest {
    TopicRequest::from_json(OCEAN_TOPIC_JSON).unwrap()
}

pub fn topic_of(content_type: ContentType) -> TopicRequest {
    let mut topic = ocean_topic();
    topic.content_type = content_type;
    topic
}

/// Write the Ocean Currents topic into `dir` and return its path.
pub fn write_topic(dir: &Path) -> PathBuf {
    let path = dir.join("selected-topic.json");
    std::fs::write(&path, OCEAN_TOPIC_JSON).unwrap();
    path
}

/// Markdown with `headings` `##` sections, exactly `words` whitespace tokens,
/// and `closing` as its final paragraph.
pub fn article(headings: usize, words: usize, closing: &str) -> String {
    let fixed = headings * 3 + closing.split_whitespace().count();
    let filler = words.saturating_sub(fixed);
    let per_section = if headings == 0 { filler } else { filler / headings };
    let mut out = String::new();
    let mut written = 0;
    for i in 0..headings.max(1) {
        if headings > 0 {
            out.push_str(&format!("## Part {}\n\n", i + 1));
        }
        let count = if i + 1 == headings.max(1) {
            filler - written
        } else {
            per_section
        };
        out.push_str(&vec!["water"; count].join(" "));
        out.push_str("\n\n");
        written += count;
    }
    out.push_str(closing);
    out.push('\n');
    out
}

/// Reply scripted for one `generate` call.
#[derive(Debug, Clone)]
pub enum Scripted {
    Text(String),
    Fail(String),
}

/// In-process backend that replays a fixed list of replies.
pub struct ScriptedBackend {
    available: bool,
    replies: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<(String, String)>>,
}

impl ScriptedBackend {
    pub fn new(available: bool, replies: Vec<Scripted>) -> Self {
        Self {
            available,
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn generate_calls(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn models_requested(&self) -> Vec<String> {
        self.requests.lock().iter().map(|(_, m)| m.clone()).collect()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.requests.lock().iter().map(|(p, _)| p.clone()).collect()
    }
}

#[async_trait]
impl BackendClient for ScriptedBackend {
    async fn probe(&self) -> bool {
        self.available
    }

    async fn generate(&self, prompt: &str, model: &str) -> Result<String, ApiError> {
        self.requests
            .lock()
            .push((prompt.to_string(), model.to_string()));
        let next = self.replies.lock().pop_front();
        match next {
            Some(Scripted::Text(text)) => Ok(text),
            Some(Scripted::Fail(msg)) => Err(ApiError::BackendRequestFailed(msg)),
            None => Err(ApiError::BackendError("script exhausted".to_string())),
        }
    }

    async fn list_models(&self) -> Result<Vec<String>, ApiError> {
        Ok(if self.available {
            vec!["scripted-model:latest".to_string()]
        } else {
            Vec::new()
        })
    }

    fn backend_name(&self) -> &str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted-model"
    }
}

/// Canned HTTP reply served by `StubServer`.
pub struct StubResponse {
    pub status: u16,
    pub body: String,
}

impl StubResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn tags(models: &[&str]) -> Self {
        let models: Vec<serde_json::Value> = models
            .iter()
            .map(|name| serde_json::json!({ "name": name }))
            .collect();
        Self::ok(serde_json::json!({ "models": models }).to_string())
    }

    pub fn completion(text: &str) -> Self {
        Self::ok(serde_json::json!({ "response": text, "done": true }).to_string())
    }
}

/// One request as received: `"METHOD /path"` and the raw body.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub target: String,
    pub body: String,
}

impl RecordedRequest {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

/// Serves each scripted response to exactly one connection, in order.
pub struct StubServer {
    base_url: String,
    handle: JoinHandle<Vec<RecordedRequest>>,
}

impl StubServer {
    pub fn start(responses: Vec<StubResponse>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let handle = std::thread::spawn(move || {
            let mut seen = Vec::new();
            for response in responses {
                let Ok((stream, _)) = listener.accept() else {
                    break;
                };
                seen.push(serve_one(stream, &response));
            }
            seen
        });
        Self { base_url, handle }
    }

    pub fn backend_config(&self) -> BackendConfig {
        BackendConfig {
            base_url: self.base_url.clone(),
            probe_timeout_secs: 5,
            request_timeout_secs: 5,
            connect_timeout_secs: 5,
            ..BackendConfig::default()
        }
    }

    /// Wait for every scripted response to be served.
    pub fn finish(self) -> Vec<RecordedRequest> {
        self.handle.join().unwrap()
    }
}

fn serve_one(stream: TcpStream, response: &StubResponse) -> RecordedRequest {
    let mut reader = BufReader::new(stream.try_clone().unwrap());
    let mut request_line = String::new();
    reader.read_line(&mut request_line).unwrap();
    let target: Vec<&str> = request_line.split_whitespace().take(2).collect();

    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap_or(0);
            }
        }
    }
    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body).unwrap();

    let reply = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        response.status,
        reason_phrase(response.status),
        response.body.len(),
        response.body
    );
    let mut stream = stream;
    stream.write_all(reply.as_bytes()).unwrap();
    stream.flush().unwrap();

    RecordedRequest {
        target: target.join(" "),
        body: String::from_utf8_lossy(&body).into_owned(),
    }
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}
