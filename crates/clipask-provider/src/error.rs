//! Error types for the clipask-provider crate.

/// Errors that can occur while talking to a chat-completion API.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// HTTP request failed, including connect errors and timeouts
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-2xx response
    #[error("API error: HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// Response carried no choices to read a reply from
    #[error("Empty response: {0}")]
    EmptyResponse(String),

    /// Invalid model specified
    #[error("Invalid model: {0}")]
    InvalidModel(String),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
