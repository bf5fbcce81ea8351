//! Gemini generateContent client.

use crate::error::UpstreamError;
use crate::provider::{CompletionRequest, Provider};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

pub struct GeminiProvider {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiProvider {
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

    /// Gemini separates the system template from the conversation: a
    /// leading `system` message becomes `systemInstruction`, assistant
    /// turns map to the `model` role.
    pub(crate) fn build_payload(&self, request: &CompletionRequest) -> serde_json::Value {
        let mut system: Option<&str> = None;
        let mut contents = Vec::with_capacity(request.messages.len());
        for message in &request.messages {
            match message.role.as_str() {
                "system" if system.is_none() && contents.is_empty() => {
                    system = Some(&message.content);
                }
                "assistant" => contents.push(json!({
                    "role": "model",
                    "parts": [{ "text": message.content }],
                })),
                _ => contents.push(json!({
                    "role": "user",
                    "parts": [{ "text": message.content }],
                })),
            }
        }

        let mut payload = json!({
            "contents": contents,
            "generationConfig": {
                "temperature": request.temperature,
                "maxOutputTokens": request.max_tokens,
            },
        });
        if let Some(text) = system {
            payload["systemInstruction"] = json!({ "parts": [{ "text": text }] });
        }
        payload
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    fn id(&self) -> &'static str {
        "gemini"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, UpstreamError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(UpstreamError::MissingApiKey(API_KEY_ENV))?;

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&self.build_payload(&request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, "gemini request failed");
            return Err(UpstreamError::from_status(status));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::Transport(format!("malformed response: {e}")))?;

        let text = body
            .candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
                    .trim()
                    .to_string()
            })
            .unwrap_or_default();
        if text.is_empty() {
            return Err(UpstreamError::Empty);
        }
        Ok(text)
    }
}
