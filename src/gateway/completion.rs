//! Chat-completion upstream client.
//!
//! Speaks the OpenAI-compatible `/chat/completions` shape: a model
//! name, a system+user message pair, and a single choice back. The
//! same client serves assistant chat, AI summaries, and translation;
//! only the prompts differ.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::GatewayError;

/// Sampling temperature for all completion calls.
const TEMPERATURE: f64 = 0.7;
/// Upper bound on generated tokens per reply.
const MAX_TOKENS: u32 = 1000;

/// A hosted completion endpoint: one system+user exchange in, one
/// assistant message out.
#[async_trait]
pub trait CompletionApi: Send + Sync {
    async fn complete(&self, system: &str, user: &str) -> Result<String, GatewayError>;

    /// False when no credential is configured; callers surface this as
    /// a service-unavailable condition instead of a failed request.
    fn is_configured(&self) -> bool;
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Reqwest-backed [`CompletionApi`] implementation.
#[derive(Debug, Clone)]
pub struct ChatCompletionClient {
    http: reqwest::Client,
    url: String,
    model: String,
    api_key: Option<String>,
}

impl ChatCompletionClient {
    pub fn new(url: impl Into<String>, model: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
            model: model.into(),
            api_key,
        }
    }
}

#[async_trait]
impl CompletionApi for ChatCompletionClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String, GatewayError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(GatewayError::MissingCredential("completion api key"))?;

        let request = CompletionRequest {
            model: &self.model,
            messages: vec![
                WireMessage {
                    role: "system",
                    content: system,
                },
                WireMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        debug!(model = %self.model, user_chars = user.len(), "completion request");

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: CompletionResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::ResponseParsing(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| GatewayError::ResponseParsing("empty choices array".into()))
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}
