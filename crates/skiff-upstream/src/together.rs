//! Together chat-completions client (OpenAI-shaped API).

use crate::error::UpstreamError;
use crate::provider::{CompletionRequest, Provider};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

pub const API_KEY_ENV: &str = "TOGETHER_API_KEY";

const DEFAULT_BASE_URL: &str = "https://api.together.xyz/v1";
const DEFAULT_MODEL: &str = "mistralai/Mixtral-8x7B-Instruct-v0.1";

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: String,
}

pub struct TogetherProvider {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl TogetherProvider {
    pub fn new(api_key: Option<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: DEFAULT_BASE_URL.into(),
            model: DEFAULT_MODEL.into(),
            api_key: api_key.filter(|k| !k.is_empty()),
        }
    }

    pub fn from_env(timeout: Duration) -> Self {
        Self::new(std::env::var(API_KEY_ENV).ok(), timeout)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub(crate) fn build_payload(&self, request: &CompletionRequest) -> serde_json::Value {
        json!({
            "model": self.model,
            "messages": request.messages,
            "temperature": request.temperature,
            "max_tokens": request.max_tokens,
        })
    }
}

#[async_trait]
impl Provider for TogetherProvider {
    fn id(&self) -> &'static str {
        "together"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, UpstreamError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(UpstreamError::MissingApiKey(API_KEY_ENV))?;

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&self.build_payload(&request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, "together request failed");
            return Err(UpstreamError::from_status(status));
        }

        let body: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::Transport(format!("malformed response: {e}")))?;

        let text = body
            .choices
            .first()
            .map(|c| c.message.content.trim().to_string())
            .unwrap_or_default();
        if text.is_empty() {
            return Err(UpstreamError::Empty);
        }
        Ok(text)
    }
}
