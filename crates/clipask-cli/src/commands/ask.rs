//! The ask pipeline: gather a prompt and context, send it, deliver the reply.

use crate::cli::{Cli, Invocation};
use clipask_core::config::API_KEY_ENV;
use clipask_core::{
    ClipaskError, Config, ConfigStore, ConversationStore, RequestComposer, UserIntent,
};
use clipask_desktop::{
    require_utility, ContextReader, DesktopSink, ReplySink, SetupError, SinkConfig, XclipReader,
};
use clipask_provider::{new_openai_transport, Transport};
use std::path::PathBuf;
use std::time::Duration;

/// Collaborators and settings for one request.
pub struct AskPipeline<'a> {
    reader: &'a dyn ContextReader,
    transport: &'a dyn Transport,
    sink: &'a dyn ReplySink,
    config: &'a Config,
    history_path: Option<PathBuf>,
}

impl<'a> AskPipeline<'a> {
    pub fn new(
        reader: &'a dyn ContextReader,
        transport: &'a dyn Transport,
        sink: &'a dyn ReplySink,
        config: &'a Config,
    ) -> Self {
        Self {
            reader,
            transport,
            sink,
            config,
            history_path: None,
        }
    }

    /// Keep the conversation in `path` between runs.
    pub fn with_history(mut self, path: impl Into<PathBuf>) -> Self {
        self.history_path = Some(path.into());
        self
    }

    fn open_history(&self) -> ConversationStore {
        let prompt = self.config.system_prompt.as_str();
        let cap = self.config.max_history;
        let Some(path) = &self.history_path else {
            return ConversationStore::with_capacity(prompt, cap);
        };

        ConversationStore::load(path, prompt, cap).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "discarding unreadable history");
            ConversationStore::with_capacity(prompt, cap)
        })
    }

    /// Read context for `intent`, send `prompt` with it, and deliver the
    /// reply. Returns the reply text.
    pub async fn run(&self, intent: &UserIntent, prompt: &str) -> Result<String, ClipaskError> {
        let context = self.reader.read(intent.context_source()).await?;
        tracing::info!(source = %intent.context_source(), bytes = context.len(), "context captured");

        let mut history = self.open_history();
        let response = RequestComposer::new(&mut history)
            .with_store(self.config.store)
            .send(self.transport, prompt, &context)
            .await?;

        if let Some(path) = &self.history_path {
            if let Err(e) = history.save(path) {
                tracing::warn!(path = %path.display(), error = %e, "failed to save history");
            }
        }

        self.sink
            .deliver(&response.text, intent.copy_to_clipboard())
            .await?;
        tracing::info!(to_clipboard = intent.copy_to_clipboard(), "reply delivered");
        Ok(response.text)
    }
}

/// Text sent ahead of the context. A typed prompt gets a trailing newline so
/// it stands apart from the context.
pub fn request_prompt(invocation: Invocation, intent: &UserIntent) -> String {
    match invocation {
        Invocation::Floating => format!("{}\n", intent.prompt_text()),
        Invocation::Clipboard | Invocation::Selection => intent.prompt_text().to_string(),
    }
}

/// Locate the clipboard utility and the API key before anything is shown.
pub fn preflight(config: &Config) -> Result<(PathBuf, String), ClipaskError> {
    let clipboard_tool = require_utility(&config.clipboard_tool)?;
    let api_key = config
        .api_key()
        .ok_or_else(|| SetupError::MissingEnv(API_KEY_ENV.to_string()))?;
    Ok((clipboard_tool, api_key))
}

/// Run `clipask` end to end against the real desktop.
pub async fn run(cli: &Cli, config: &Config, config_store: &ConfigStore) -> anyhow::Result<()> {
    let invocation = cli.invocation();
    tracing::info!(mode = ?invocation, "clipask started");

    let (clipboard_tool, api_key) = preflight(config)?;

    let intent = match invocation {
        Invocation::Floating => clipask_tui::capture_prompt()?,
        Invocation::Clipboard | Invocation::Selection => {
            UserIntent::context_only(invocation.default_source())
        }
    };
    if intent.is_cancelled() {
        return Ok(());
    }

    let mut transport = new_openai_transport(
        api_key,
        Some(config.base_url.as_str()),
        Duration::from_secs(config.timeout_secs),
    )?;
    transport.set_model(cli.model.as_deref().unwrap_or(config.model.as_str()))?;

    let clipboard_tool = clipboard_tool.to_string_lossy().into_owned();
    let reader = XclipReader::new(clipboard_tool.clone());
    let sink = DesktopSink::new(SinkConfig {
        clipboard_tool,
        scratch_file: config.scratch_file.clone(),
        terminal: PathBuf::from(&config.terminal),
        editor: PathBuf::from(&config.editor),
    });

    let mut pipeline = AskPipeline::new(&reader, &transport, &sink, config);
    if config.persist_history {
        pipeline = pipeline.with_history(config_store.history_path());
    }

    pipeline
        .run(&intent, &request_prompt(invocation, &intent))
        .await?;
    Ok(())
}
