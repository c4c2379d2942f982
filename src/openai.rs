//! OpenAI chat-completions client used for insight generation.
//!
//! [`TextGenerator`] is the capability seam the summarizer depends on, so
//! tests can substitute a fake. [`OpenAiGenerator`] is the real thing.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Text-generation errors.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Configuration error (missing API key, invalid settings)
    #[error("configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("network error: {0}")]
    Network(String),

    /// API error (non-2xx response, rate limit, invalid request)
    #[error("API error: {0}")]
    Api(String),

    /// Parse error (invalid JSON, unexpected response format)
    #[error("parse error: {0}")]
    Parse(String),
}

/// A collaborator that turns a prompt into prose.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError>;
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Calls the OpenAI chat-completions REST API.
///
/// The API key is an explicit constructor argument rather than process-wide
/// state. Both request and connect timeouts are bounded so a stuck upstream
/// cannot hold a serving thread indefinitely.
pub struct OpenAiGenerator {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiGenerator {
    pub fn new(api_key: String, model: Option<String>) -> Result<Self, GenerateError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| GenerateError::Config(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        })
    }

    /// Overrides the API base URL (proxies, compatible providers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        if self.api_key.is_empty() {
            return Err(GenerateError::Config("OPENAI_API_KEY not set".to_string()));
        }

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system",
                    content: "You are an expert data analyst.".to_string(),
                },
                Message {
                    role: "user",
                    content: prompt.to_string(),
                },
            ],
            temperature: 0.7,
            max_tokens: 300,
        };

        let start = std::time::Instant::now();

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "OpenAI request failed");
                GenerateError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %body, "OpenAI API error");
            return Err(GenerateError::Api(format!("status {status}: {body}")));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| GenerateError::Parse(e.to_string()))?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| GenerateError::Api("no choices in response".to_string()))?;

        debug!(
            model = %self.model,
            duration_ms = start.elapsed().as_millis(),
            "Chat completion received"
        );

        Ok(content.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_api_key_fails_before_any_request() {
        let generator = OpenAiGenerator::new(String::new(), None).unwrap();
        let err = generator.generate("hello").await.unwrap_err();
        assert!(matches!(err, GenerateError::Config(_)));
    }

    #[test]
    fn test_request_serializes_roles_and_bounds() {
        let request = ChatRequest {
            model: DEFAULT_MODEL.to_string(),
            messages: vec![Message {
                role: "system",
                content: "You are an expert data analyst.".to_string(),
            }],
            temperature: 0.7,
            max_tokens: 300,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["max_tokens"], 300);
    }
}
