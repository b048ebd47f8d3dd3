/// LLM client — the single point of entry for all Groq API calls in Screener.
///
/// ARCHITECTURAL RULE: no other module may call the Groq API directly.
/// All LLM interactions MUST go through this module (the screening pipeline
/// reaches it indirectly, through the analyze endpoint).
///
/// Model and sampling parameters are hardcoded: scoring must be as
/// deterministic as a sampling model allows, so they are not configurable.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
/// The model used for all LLM calls in Screener.
pub const MODEL: &str = "llama-3.1-8b-instant";
const TEMPERATURE: f64 = 0.3;
const MAX_TOKENS: u32 = 512;
const TOP_P: f64 = 1.0;
/// Upper bound on a single completion request. A hung provider fails the
/// in-flight request; there is no retry.
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct GroqRequest<'a> {
    model: &'a str,
    messages: Vec<GroqMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
    top_p: f64,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct GroqMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct GroqResponse {
    pub choices: Vec<Choice>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl GroqResponse {
    /// Extracts the content of the first choice, if any.
    pub fn text(&self) -> Option<&str> {
        self.choices.first().and_then(|c| c.message.content.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct GroqApiError {
    error: GroqApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GroqApiErrorBody {
    message: String,
}

/// Seam between the analyze endpoint and the model provider, so handler
/// tests can swap in a canned backend.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Runs a single-message chat completion and returns the trimmed reply.
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

/// Chat-completion client for Groq's OpenAI-compatible API.
/// One attempt per request: failures surface immediately, no backoff.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    /// Sends the prompt as a single user-role message and returns the first
    /// choice's content, trimmed.
    pub async fn call(&self, prompt: &str) -> Result<String, LlmError> {
        let request_body = GroqRequest {
            model: MODEL,
            messages: vec![GroqMessage {
                role: "user",
                content: prompt,
            }],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            top_p: TOP_P,
            stream: false,
        };

        let response = self
            .client
            .post(GROQ_API_URL)
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Prefer the structured API error message when the body carries one
            let message = serde_json::from_str::<GroqApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let completion: GroqResponse = response.json().await?;

        debug!(
            "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
            completion.usage.prompt_tokens, completion.usage.completion_tokens
        );

        let text = completion.text().ok_or(LlmError::EmptyContent)?;
        Ok(text.trim().to_string())
    }
}

#[async_trait]
impl CompletionBackend for LlmClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        self.call(prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_fixed_parameters() {
        let request = GroqRequest {
            model: MODEL,
            messages: vec![GroqMessage {
                role: "user",
                content: "hello",
            }],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            top_p: TOP_P,
            stream: false,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "llama-3.1-8b-instant");
        assert_eq!(value["temperature"], 0.3);
        assert_eq!(value["max_tokens"], 512);
        assert_eq!(value["top_p"], 1.0);
        assert_eq!(value["stream"], false);
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "hello");
    }

    #[test]
    fn test_response_text_returns_first_choice_content() {
        let json = r#"{
            "choices": [
                {"message": {"content": "  {\"score\": \"Good\"}  "}}
            ],
            "usage": {"prompt_tokens": 120, "completion_tokens": 30}
        }"#;

        let response: GroqResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), Some("  {\"score\": \"Good\"}  "));
    }

    #[test]
    fn test_response_text_none_when_no_choices() {
        let json = r#"{"choices": [], "usage": {"prompt_tokens": 1, "completion_tokens": 0}}"#;
        let response: GroqResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), None);
    }

    #[test]
    fn test_response_text_none_when_content_null() {
        let json = r#"{
            "choices": [{"message": {"content": null}}],
            "usage": {"prompt_tokens": 1, "completion_tokens": 0}
        }"#;
        let response: GroqResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), None);
    }

    #[test]
    fn test_api_error_body_parses_message() {
        let json = r#"{"error": {"message": "Invalid API Key", "type": "invalid_request_error"}}"#;
        let parsed: GroqApiError = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.error.message, "Invalid API Key");
    }
}
