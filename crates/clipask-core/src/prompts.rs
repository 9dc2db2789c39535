//! Built-in system prompt.

/// Pinned at index 0 of every conversation unless the config overrides it.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a programming assistant. \
You might receive a bunch of error messages or general questions, \
your job is to answer them with any code snippets if necessary.";
