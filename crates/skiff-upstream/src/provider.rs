use crate::error::UpstreamError;
use crate::gemini::GeminiProvider;
use crate::together::TogetherProvider;
use async_trait::async_trait;
use skiff_core::config::{ProviderKind, SkiffConfig};
use skiff_core::types::ChatMessage;
use std::sync::Arc;

/// One completion request: the assembled message list plus sampling
/// options.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl CompletionRequest {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            temperature: 0.7,
            max_tokens: 2000,
        }
    }

    pub fn with_options(mut self, temperature: f32, max_tokens: u32) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }
}

/// An upstream completion API.
#[async_trait]
pub trait Provider: Send + Sync {
    fn id(&self) -> &'static str;

    /// Send one completion request and return the generated text.
    async fn complete(&self, request: CompletionRequest) -> Result<String, UpstreamError>;
}

/// Build the configured vendor's provider, reading its API key from the
/// environment. A missing key is not an error here; it surfaces per
/// request from `complete`.
pub fn provider_from_config(config: &SkiffConfig) -> Arc<dyn Provider> {
    let timeout = config.upstream_timeout();
    match config.upstream.provider {
        ProviderKind::Together => {
            let mut p = TogetherProvider::from_env(timeout);
            if let Some(model) = &config.upstream.model {
                p = p.with_model(model.clone());
            }
            Arc::new(p)
        }
        ProviderKind::Gemini => {
            let mut p = GeminiProvider::from_env(timeout);
            if let Some(model) = &config.upstream.model {
                p = p.with_model(model.clone());
            }
            Arc::new(p)
        }
    }
}
