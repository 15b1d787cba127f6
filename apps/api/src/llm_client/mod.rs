/// LLM Client: the single point of entry for all completion-service calls.
///
/// Handlers depend on the `CompletionService` trait, never on `LlmClient`
/// directly, so tests can substitute a deterministic stand-in.
///
/// No retries and no caching: one `complete` call is one upstream request.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned no choices")]
    NoChoices,
}

// ────────────────────────────────────────────────────────────────────────────
// Request types (vendor-neutral; serialized as the OpenAI chat schema)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub format_type: String,
}

impl ResponseFormat {
    pub fn json_object() -> Self {
        Self {
            format_type: "json_object".to_string(),
        }
    }
}

/// A single completion request: model, role-tagged messages, and sampling parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The text-completion port. Implement this to swap vendors (or to stub the
/// upstream in tests) without touching the handler.
///
/// Carried in `AppState` as `Arc<dyn CompletionService>`.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Sends one request upstream. `Ok(None)` means the service answered but
    /// the first choice carried no text content.
    async fn complete(&self, request: &CompletionRequest) -> Result<Option<String>, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// OpenAI wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// LlmClient: OpenAI Chat Completions adapter
// ────────────────────────────────────────────────────────────────────────────

/// Wraps the OpenAI Chat Completions API. The API key is injected at
/// construction and held for the process lifetime.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl LlmClient {
    pub fn new(api_key: String, base_url: &str, timeout: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl CompletionService for LlmClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<Option<String>, LlmError> {
        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Try to parse error message
            let message = serde_json::from_str::<OpenAiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await?;
        let completion: ChatCompletionResponse = serde_json::from_slice(&body)?;

        if let Some(usage) = &completion.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or(LlmError::NoChoices)?;

        Ok(choice.message.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn sample_request() -> CompletionRequest {
        CompletionRequest {
            model: "gpt-4-turbo".to_string(),
            messages: vec![
                ChatMessage::system("You are a course creator."),
                ChatMessage::user("I teach sourdough baking."),
            ],
            temperature: 0.8,
            max_tokens: 2000,
            response_format: Some(ResponseFormat::json_object()),
        }
    }

    fn client_for(server: &MockServer) -> LlmClient {
        LlmClient::new(
            "sk-test".to_string(),
            &server.base_url(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_request_serializes_openai_shape() {
        let value = serde_json::to_value(sample_request()).unwrap();
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["role"], "user");
        assert_eq!(value["response_format"]["type"], "json_object");
        assert_eq!(value["max_tokens"], 2000);
    }

    #[test]
    fn test_response_format_omitted_when_none() {
        let mut request = sample_request();
        request.response_format = None;
        let value = serde_json::to_value(request).unwrap();
        assert!(value.get("response_format").is_none());
    }

    #[test]
    fn test_trailing_slash_in_base_url_is_ignored() {
        let client = LlmClient::new(
            "k".to_string(),
            "http://localhost:9/v1/",
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(
            client.completions_url(),
            "http://localhost:9/v1/chat/completions"
        );
    }

    #[tokio::test]
    async fn test_complete_sends_request_and_returns_content() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/chat/completions")
                    .header("authorization", "Bearer sk-test")
                    .json_body_partial(
                        r#"{
                            "model": "gpt-4-turbo",
                            "temperature": 0.8,
                            "max_tokens": 2000,
                            "response_format": {"type": "json_object"},
                            "messages": [
                                {"role": "system", "content": "You are a course creator."},
                                {"role": "user", "content": "I teach sourdough baking."}
                            ]
                        }"#,
                    );
                then.status(200).json_body(json!({
                    "choices": [
                        {"index": 0, "message": {"role": "assistant", "content": "{\"course_title\":\"Crumb\"}"}}
                    ],
                    "usage": {"prompt_tokens": 120, "completion_tokens": 12, "total_tokens": 132}
                }));
            })
            .await;

        let content = client_for(&server)
            .complete(&sample_request())
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(content.as_deref(), Some("{\"course_title\":\"Crumb\"}"));
    }

    #[tokio::test]
    async fn test_null_content_is_none() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(200).json_body(json!({
                    "choices": [{"message": {"role": "assistant", "content": null}}]
                }));
            })
            .await;

        let content = client_for(&server)
            .complete(&sample_request())
            .await
            .unwrap();
        assert!(content.is_none());
    }

    #[tokio::test]
    async fn test_empty_choices_is_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(200).json_body(json!({ "choices": [] }));
            })
            .await;

        let err = client_for(&server)
            .complete(&sample_request())
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::NoChoices));
    }

    #[tokio::test]
    async fn test_api_error_message_is_extracted() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(401).json_body(json!({
                    "error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}
                }));
            })
            .await;

        let err = client_for(&server)
            .complete(&sample_request())
            .await
            .unwrap_err();
        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Incorrect API key provided");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_rate_limit_is_not_retried() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(429).body("slow down");
            })
            .await;

        let err = client_for(&server)
            .complete(&sample_request())
            .await
            .unwrap_err();

        mock.assert_hits_async(1).await;
        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message, "slow down");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_host_is_http_error() {
        let client = LlmClient::new(
            "k".to_string(),
            "http://127.0.0.1:1",
            Duration::from_secs(2),
        )
        .unwrap();
        let err = client.complete(&sample_request()).await.unwrap_err();
        assert!(matches!(err, LlmError::Http(_)));
    }
}
