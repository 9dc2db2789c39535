//! Common types used by the transport trait and implementations.

use serde::{Deserialize, Serialize};

/// A message in wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderMessage {
    /// Message role (system, user, assistant).
    pub role: String,
    /// Plain text content.
    pub content: String,
}

impl ProviderMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// Request to a transport.
#[derive(Debug, Clone, Default)]
pub struct Request {
    /// Full conversation, pinned system message first.
    pub messages: Vec<ProviderMessage>,
    /// Ask the API to retain the completion server-side.
    pub store: bool,
}

/// Complete reply from a transport.
#[derive(Debug, Clone)]
pub struct Response {
    /// Reply text of the first choice.
    pub text: String,
    /// Model that produced the reply, as reported by the API.
    pub model: String,
    /// Stop reason.
    pub stop_reason: StopReason,
    /// Token usage.
    pub usage: Usage,
}

/// Token usage information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    /// Input tokens consumed.
    pub input_tokens: usize,
    /// Output tokens generated.
    pub output_tokens: usize,
}

/// Reason the model stopped generating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Normal end of response.
    EndTurn,
    /// Max tokens reached.
    MaxTokens,
    /// Reply withheld by the content filter.
    ContentFilter,
}

impl StopReason {
    /// Map an OpenAI `finish_reason` onto a stop reason.
    pub fn from_finish_reason(reason: Option<&str>) -> Self {
        match reason {
            Some("length") => StopReason::MaxTokens,
            Some("content_filter") => StopReason::ContentFilter,
            _ => StopReason::EndTurn,
        }
    }
}
