use std::fmt;

use async_trait::async_trait;

use super::types::ToolDescriptor;

/// Errors that can occur during provider operations.
/// Variants carry enough info to determine retryability (future use).
#[derive(Debug)]
pub enum ProviderError {
    /// Provider misconfigured (missing API key, bad URL). Not retryable.
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused). Retryable.
    Network(String),
    /// API returned an error response. Retryable if status >= 500 or 429.
    Api { status: u16, message: String },
    /// Failed to parse the provider's response. Not retryable.
    Parse(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::Config(msg) => write!(f, "config error: {msg}"),
            ProviderError::Network(msg) => write!(f, "network error: {msg}"),
            ProviderError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ProviderError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Everything a provider needs to fulfill a completion request:
/// the single user-authored message, plus any discovered tool descriptors.
pub struct CompletionRequest<'a> {
    pub message: &'a str,
    pub tools: &'a [ToolDescriptor],
}

/// A constructed upstream chat backend. The resolver picks exactly one
/// implementation per call; the gateway only sees this interface.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Returns the name of the backend (for logging).
    fn name(&self) -> &str;

    /// Sends the completion request and returns the raw completion text.
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, ProviderError>;
}
