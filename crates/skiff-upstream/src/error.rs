use thiserror::Error;

/// Typed upstream failures. Classification is driven by status codes and
/// transport conditions, never by substring matching on response bodies.
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("upstream request timed out")]
    Timeout,
    #[error("upstream rejected the API key")]
    Auth,
    #[error("upstream quota exceeded")]
    Quota,
    #[error("upstream returned no content")]
    Empty,
    #[error("API key not configured. Please set {0} in the environment")]
    MissingApiKey(&'static str),
    #[error("upstream transport error: {0}")]
    Transport(String),
}

impl UpstreamError {
    /// Map a non-success HTTP status to a failure kind.
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        match status.as_u16() {
            401 | 403 => UpstreamError::Auth,
            429 => UpstreamError::Quota,
            _ => UpstreamError::Transport(format!("upstream returned HTTP {status}")),
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout
        } else {
            UpstreamError::Transport(err.to_string())
        }
    }
}
