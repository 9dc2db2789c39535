//! Generic OpenAI-compatible transport.
//!
//! Speaks the non-streaming chat completions API used by OpenAI, OpenRouter,
//! Ollama and friends. One POST per call, bounded by the configured timeout.

use crate::error::TransportError;
use crate::traits::Transport;
use crate::types::{Request, Response, StopReason, Usage};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

/// Configuration for an OpenAI-compatible transport.
#[derive(Debug, Clone)]
pub struct OpenAiCompatConfig {
    pub base_url: String,
    pub api_key: String,
    pub provider_name: String,
    pub default_model: String,
    /// Upper bound on the whole request, connect to last body byte.
    pub timeout: Duration,
}

/// A transport that speaks the OpenAI chat completions protocol.
pub struct OpenAiCompatTransport {
    config: OpenAiCompatConfig,
    model: String,
    client: Client,
}

impl OpenAiCompatTransport {
    /// Create a new OpenAI-compatible transport.
    pub fn new(config: OpenAiCompatConfig) -> Result<Self, TransportError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        let model = config.default_model.clone();
        Ok(Self {
            config,
            model,
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    /// Build the JSON request body.
    fn build_request_body(&self, request: &Request) -> Value {
        json!({
            "model": self.model,
            "store": request.store,
            "messages": request.messages,
        })
    }

    /// Parse a successful response body into a reply.
    fn parse_response(body: &str) -> Result<Response, TransportError> {
        let resp: OpenAiResponse = serde_json::from_str(body)?;

        let choice = resp
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| TransportError::EmptyResponse("No choices in response".to_string()))?;

        Ok(Response {
            text: choice.message.content.unwrap_or_default(),
            model: resp.model,
            stop_reason: StopReason::from_finish_reason(choice.finish_reason.as_deref()),
            usage: resp
                .usage
                .map(|u| Usage {
                    input_tokens: u.prompt_tokens,
                    output_tokens: u.completion_tokens,
                })
                .unwrap_or_default(),
        })
    }
}

#[async_trait]
impl Transport for OpenAiCompatTransport {
    fn name(&self) -> &str {
        &self.config.provider_name
    }

    fn current_model(&self) -> &str {
        &self.model
    }

    fn set_model(&mut self, model: &str) -> Result<(), TransportError> {
        let model = model.trim();
        if model.is_empty() {
            return Err(TransportError::InvalidModel(model.to_string()));
        }
        self.model = model.to_string();
        Ok(())
    }

    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        let body = self.build_request_body(&request);
        let url = self.endpoint();

        tracing::debug!(
            url = %url,
            model = %self.model,
            messages = request.messages.len(),
            "sending chat completion request"
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(TransportError::Http)?;

        let status = response.status();
        tracing::info!(status = status.as_u16(), "chat completion response");

        let text = response.text().await.map_err(TransportError::Http)?;

        if !status.is_success() {
            return Err(TransportError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        Self::parse_response(&text)
    }
}

// OpenAI response types for deserialization

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    #[serde(default)]
    model: String,
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
    #[serde(default)]
    usage: Option<OpenAiUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    #[serde(default)]
    prompt_tokens: usize,
    #[serde(default)]
    completion_tokens: usize,
}
