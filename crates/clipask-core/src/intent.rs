//! The outcome of one prompt-capture session.

use crate::directive::parse_directives;
use clipask_desktop::ContextSource;

/// What the user asked for. Built once per invocation, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIntent {
    cancelled: bool,
    prompt_text: String,
    copy_to_clipboard: bool,
    context_source: ContextSource,
}

impl UserIntent {
    /// Editing was abandoned; any typed text is discarded.
    pub fn cancelled() -> Self {
        Self {
            cancelled: true,
            prompt_text: String::new(),
            copy_to_clipboard: false,
            context_source: ContextSource::default(),
        }
    }

    /// Editing was confirmed with `raw` in the buffer.
    pub fn confirmed(raw: &str) -> Self {
        let directives = parse_directives(raw);
        Self {
            cancelled: false,
            prompt_text: directives.prompt_text,
            copy_to_clipboard: directives.copy_to_clipboard,
            context_source: directives.context_source,
        }
    }

    /// No prompt was typed; only the context source was chosen.
    pub fn context_only(source: ContextSource) -> Self {
        Self {
            cancelled: false,
            prompt_text: String::new(),
            copy_to_clipboard: false,
            context_source: source,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn prompt_text(&self) -> &str {
        &self.prompt_text
    }

    pub fn copy_to_clipboard(&self) -> bool {
        self.copy_to_clipboard
    }

    pub fn context_source(&self) -> ContextSource {
        self.context_source
    }
}
