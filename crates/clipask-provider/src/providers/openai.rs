//! OpenAI transport built on the OpenAI-compatible protocol.

use crate::error::TransportError;
use crate::providers::openai_compat::{OpenAiCompatConfig, OpenAiCompatTransport};
use std::time::Duration;

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

const DEFAULT_MODEL: &str = "chatgpt-4o-latest";

/// Create a new OpenAI transport.
///
/// `base_url` overrides the public endpoint for compatible gateways.
pub fn new_openai_transport(
    api_key: String,
    base_url: Option<&str>,
    timeout: Duration,
) -> Result<OpenAiCompatTransport, TransportError> {
    let config = OpenAiCompatConfig {
        base_url: base_url.unwrap_or(OPENAI_BASE_URL).to_string(),
        api_key,
        provider_name: "openai".to_string(),
        default_model: DEFAULT_MODEL.to_string(),
        timeout,
    };

    OpenAiCompatTransport::new(config)
}
