use std::path::PathBuf;
use thiserror::Error;

/// Failure talking to the agents service.
///
/// The detail in here is for server-side logs only; callers of the proxy
/// get a generic error body instead.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("agents service timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    #[error("agents service request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("agents service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("agents service returned a non-JSON body: {0}")]
    InvalidBody(#[source] serde_json::Error),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout(err)
        } else {
            UpstreamError::Request(err)
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid value {value:?} for {key}")]
    InvalidEnv { key: &'static str, value: String },

    #[error("invalid placeholder pattern: {0}")]
    Pattern(#[from] regex::Error),
}
