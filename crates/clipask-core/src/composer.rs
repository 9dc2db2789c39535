//! Request composition.
//!
//! One composed request per invocation: the typed prompt and the captured
//! context become a single user message, appended to the rolling history,
//! and the whole history goes to the transport.

use crate::conversation::ConversationStore;
use crate::error::ClipaskError;
use crate::message::Message;
use clipask_provider::{ProviderMessage, Request, Response, StopReason, Transport};

/// Builds outbound requests on top of a borrowed conversation history.
pub struct RequestComposer<'a> {
    history: &'a mut ConversationStore,
    store: bool,
}

impl<'a> RequestComposer<'a> {
    pub fn new(history: &'a mut ConversationStore) -> Self {
        Self {
            history,
            store: true,
        }
    }

    /// Whether the API should retain completions server-side.
    pub fn with_store(mut self, store: bool) -> Self {
        self.store = store;
        self
    }

    /// Append `prompt_text + external_context` as one user message and
    /// return the history to send. No separator is inserted.
    pub fn compose(&mut self, prompt_text: &str, external_context: &str) -> &[Message] {
        let mut content = String::with_capacity(prompt_text.len() + external_context.len());
        content.push_str(prompt_text);
        content.push_str(external_context);
        self.history.append(Message::user(content))
    }

    /// Record the assistant reply so the next exchange sees it.
    pub fn record_reply(&mut self, text: &str) {
        self.history.append(Message::assistant(text));
    }

    /// Compose, send once, and record the reply.
    pub async fn send(
        &mut self,
        transport: &dyn Transport,
        prompt_text: &str,
        external_context: &str,
    ) -> Result<Response, ClipaskError> {
        let store = self.store;
        let messages: Vec<ProviderMessage> = self
            .compose(prompt_text, external_context)
            .iter()
            .map(ProviderMessage::from)
            .collect();

        tracing::info!(
            transport = transport.name(),
            model = transport.current_model(),
            messages = messages.len(),
            "sending prompt"
        );

        let response = transport.send(Request { messages, store }).await?;

        tracing::info!(
            model = %response.model,
            stop_reason = ?response.stop_reason,
            bytes = response.text.len(),
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "received reply"
        );
        if response.stop_reason != StopReason::EndTurn {
            tracing::warn!(stop_reason = ?response.stop_reason, "reply was cut short");
        }

        self.record_reply(&response.text);
        Ok(response)
    }
}
