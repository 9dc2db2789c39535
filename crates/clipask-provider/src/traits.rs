//! Transport trait definition.

use crate::error::TransportError;
use crate::types::{Request, Response};
use async_trait::async_trait;

/// Trait for chat-completion transports.
///
/// A transport issues exactly one request per call. Implementations enforce
/// their own wait budget; callers never retry.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Transport name (e.g., "openai").
    fn name(&self) -> &str;

    /// Currently selected model identifier.
    fn current_model(&self) -> &str;

    /// Switch to a different model.
    fn set_model(&mut self, model: &str) -> Result<(), TransportError>;

    /// Send the conversation and wait for the full reply.
    async fn send(&self, request: Request) -> Result<Response, TransportError>;
}

// Compile-time check: Transport must be object-safe
const _: () = {
    fn _assert_object_safe(_: &dyn Transport) {}
};
