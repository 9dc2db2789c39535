//! Error types for the clipask-core crate.

/// Umbrella error for an invocation.
///
/// Every variant is terminal for the current run; nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum ClipaskError {
    /// Missing environment, utility, or credential
    #[error("Setup error: {0}")]
    Setup(#[from] clipask_desktop::SetupError),

    /// Reading the clipboard or selection failed
    #[error("Capture error: {0}")]
    Capture(#[from] clipask_desktop::CaptureError),

    /// The chat-completion request failed
    #[error("Transport error: {0}")]
    Transport(#[from] clipask_provider::TransportError),

    /// Writing the reply to its destination failed
    #[error("Delivery error: {0}")]
    Delivery(#[from] clipask_desktop::DeliveryError),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
