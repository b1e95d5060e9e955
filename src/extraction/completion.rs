//! Chat-completion client
//!
//! [`CompletionClient`] is the seam between the extractor and the hosted model.
//! [`OpenAiClient`] speaks the OpenAI-compatible `chat/completions` protocol; tests
//! substitute scripted clients that never touch the network.

use crate::io::configuration::ERROR_BODY_LIMIT;
use crate::io::error::CompletionError;
use crate::io::progress::ProgressFactory;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

/// One single-turn completion request
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Model identifier
    pub model: String,
    /// The single user-role message
    pub prompt: String,
}

/// Sends one prompt and returns the model's text
pub trait CompletionClient {
    /// Perform exactly one completion call
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails at any layer: transport, HTTP status,
    /// or response shape
    fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError>;
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    store: bool,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Blocking client for an OpenAI-compatible endpoint
pub struct OpenAiClient {
    client: Client,
    endpoint: String,
    api_key: String,
    progress: ProgressFactory,
}

impl OpenAiClient {
    /// Build a client; `timeout = None` waits for the response indefinitely
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed (TLS backend failure)
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Option<Duration>,
        progress: ProgressFactory,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            progress,
        })
    }
}

impl CompletionClient for OpenAiClient {
    #[instrument(skip_all, fields(model = %request.model, prompt_bytes = request.prompt.len()))]
    fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let payload = ChatRequest {
            model: &request.model,
            store: true,
            messages: [ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
        };

        let pb = self.progress.spinner("Waiting for model response");
        let sent = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send();
        pb.finish_and_clear();
        let response = sent.map_err(|source| CompletionError::Transport { source })?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|source| CompletionError::Transport { source })?;
        debug!(status = status.as_u16(), body_bytes = body.len(), "completion response");

        if !status.is_success() {
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body: truncate(&body, ERROR_BODY_LIMIT),
            });
        }

        parse_completion_body(&body)
    }
}

/// Extract the first choice's text from a `chat/completions` response body
///
/// # Errors
///
/// Returns an error if the body is not the expected JSON or holds no text
pub fn parse_completion_body(body: &str) -> Result<String, CompletionError> {
    let parsed: ChatResponse =
        serde_json::from_str(body).map_err(|e| CompletionError::Malformed {
            reason: e.to_string(),
        })?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(CompletionError::EmptyResponse)
}

fn truncate(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", text.get(..cut).unwrap_or(text)),
        None => text.to_string(),
    }
}
