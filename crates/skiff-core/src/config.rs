use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Upstream vendor selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Together,
    Gemini,
}

impl ProviderKind {
    /// Environment variable holding the vendor API key.
    pub fn api_key_env(&self) -> &'static str {
        match self {
            ProviderKind::Together => "TOGETHER_API_KEY",
            ProviderKind::Gemini => "GEMINI_API_KEY",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "together" => Some(ProviderKind::Together),
            "gemini" => Some(ProviderKind::Gemini),
            _ => None,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Together => write!(f, "together"),
            ProviderKind::Gemini => write!(f, "gemini"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkiffConfig {
    pub server: ServerConfig,
    pub upload: UploadConfig,
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    pub dir: PathBuf,
    /// Maximum accepted request body, in bytes.
    pub max_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    pub provider: ProviderKind,
    /// Vendor model override; each provider has its own default.
    pub model: Option<String>,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for SkiffConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".into(),
                port: 8080,
            },
            upload: UploadConfig {
                dir: PathBuf::from("uploads"),
                max_bytes: 16 * 1024 * 1024,
            },
            upstream: UpstreamConfig {
                provider: ProviderKind::Together,
                model: None,
                temperature: 0.7,
                max_output_tokens: 2000,
                timeout_secs: 30,
            },
        }
    }
}

impl SkiffConfig {
    /// Defaults overridden by `SKIFF_*` environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(host) = std::env::var("SKIFF_HOST") {
            config.server.host = host;
        }
        if let Some(port) = std::env::var("SKIFF_PORT").ok().and_then(|p| p.parse().ok()) {
            config.server.port = port;
        }
        if let Ok(dir) = std::env::var("SKIFF_UPLOAD_DIR") {
            config.upload.dir = PathBuf::from(dir);
        }
        if let Some(kind) = std::env::var("SKIFF_PROVIDER").ok().as_deref().and_then(ProviderKind::parse) {
            config.upstream.provider = kind;
        }
        if let Ok(model) = std::env::var("SKIFF_MODEL") {
            config.upstream.model = Some(model);
        }
        config
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn upstream_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.upstream.timeout_secs)
    }
}
