//! Azure OpenAI Transport Implementation
//!
//! Sends one chat-completions request per call to an Azure OpenAI deployment.
//!
//! # Features
//!
//! - `api-key` header authentication
//! - Deterministic sampling (`temperature: 0.0`)
//! - Timeouts reported as [`LlmError::Timeout`] so the pipeline can retry them
//!
//! # Examples
//!
//! ```no_run
//! use markguard_llm::AzureChatTransport;
//! use std::time::Duration;
//!
//! let transport = AzureChatTransport::new(Duration::from_secs(120)).unwrap();
//! ```

use crate::LlmError;
use markguard_domain::traits::CompletionTransport;
use markguard_domain::EndpointRoute;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// System message sent ahead of every prompt
pub const SYSTEM_MESSAGE: &str = "You are an expert in trademark conflict assessment.";

/// Verdict used when the response carries no message content
pub const NO_EXPLANATION: &str = "No explanation provided.";

/// Chat-completions client for Azure OpenAI deployments
#[derive(Debug, Clone)]
pub struct AzureChatTransport {
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f64,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatResponse {
    fn into_content(self) -> String {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .unwrap_or_else(|| NO_EXPLANATION.to_string())
    }
}

impl AzureChatTransport {
    /// Create a transport whose client gives up on a request after `timeout`
    pub fn new(timeout: Duration) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Client(e.to_string()))?;

        Ok(Self { client })
    }

    /// Create a transport around an existing client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn map_request_error(e: reqwest::Error) -> LlmError {
    if e.is_timeout() {
        LlmError::Timeout
    } else {
        LlmError::Communication(e.to_string())
    }
}

impl CompletionTransport for AzureChatTransport {
    type Error = LlmError;

    async fn complete(&self, route: &EndpointRoute, prompt: &str) -> Result<String, LlmError> {
        let url = route.completions_url();
        let body = ChatRequest {
            model: &route.deployment,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_MESSAGE,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: 0.0,
        };

        debug!("POST {} (route {})", url, route.id);

        let response = self
            .client
            .post(&url)
            .header("api-key", &route.api_key)
            .json(&body)
            .send()
            .await
            .map_err(map_request_error)?
            .error_for_status()
            .map_err(map_request_error)?;

        let payload = response.json::<ChatResponse>().await.map_err(|e| {
            if e.is_timeout() {
                LlmError::Timeout
            } else {
                LlmError::InvalidResponse(format!("Failed to parse response: {}", e))
            }
        })?;

        Ok(payload.into_content())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let body = ChatRequest {
            model: "gpt-4o",
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_MESSAGE,
                },
                ChatMessage {
                    role: "user",
                    content: "hello",
                },
            ],
            temperature: 0.0,
        };
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["model"], "gpt-4o");
        assert_eq!(json["temperature"], 0.0);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hello");
    }

    #[test]
    fn test_content_extraction() {
        let ok: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":"Conflict Level: Low"}}]}"#)
                .unwrap();
        assert_eq!(ok.into_content(), "Conflict Level: Low");
    }

    #[test]
    fn test_missing_content_defaults() {
        for raw in [
            r#"{}"#,
            r#"{"choices":[]}"#,
            r#"{"choices":[{}]}"#,
            r#"{"choices":[{"message":{}}]}"#,
            r#"{"choices":[{"message":{"content":null}}]}"#,
        ] {
            let response: ChatResponse = serde_json::from_str(raw).unwrap();
            assert_eq!(response.into_content(), NO_EXPLANATION, "input: {}", raw);
        }
    }
}
