use thiserror::Error;

/// Base error type shared by the provider SDK and the invoker.
#[derive(Error, Debug)]
pub enum SdkError {
    /// The credential is missing or unusable (`status: None`), or the
    /// service rejected it (401/403).
    #[error(
        "Authentication error{}: {message}",
        .status.map(|s| format!(" (status {s})")).unwrap_or_default()
    )]
    AuthenticationError {
        status: Option<u16>,
        message: String,
    },
    #[error("Transport error: {0}")]
    TransportError(#[from] reqwest::Error),
    #[error("Model '{model}' returned no completion choices")]
    NoCompletionError { model: String },
    #[error("Rate limited (status 429): {0}")]
    RateLimited(String),
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}
