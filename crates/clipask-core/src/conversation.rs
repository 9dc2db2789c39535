//! Rolling-window conversation history.
//!
//! Element 0 is the pinned system message and is never evicted or reordered.
//! Once the history grows past the cap, each append first drops the oldest
//! user/assistant exchange after the pinned message.

use crate::error::ClipaskError;
use crate::message::{Message, Role};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Default maximum number of messages sent per request.
pub const MAX_CONV_LEN: usize = 16;

/// Ordered, bounded message history with a pinned first entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationStore {
    messages: Vec<Message>,
    max_len: usize,
}

impl ConversationStore {
    /// Create a store holding only the pinned system message.
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self::with_capacity(system_prompt, MAX_CONV_LEN)
    }

    /// Create a store with a custom cap (at least 1).
    pub fn with_capacity(system_prompt: impl Into<String>, max_len: usize) -> Self {
        Self {
            messages: vec![Message::system(system_prompt)],
            max_len: max_len.max(1),
        }
    }

    /// Append a message and return the full history to send.
    ///
    /// Eviction runs before the push and only when the history is already
    /// strictly over the cap, so the store may hold `max_len + 1` messages.
    pub fn append(&mut self, message: Message) -> &[Message] {
        if self.messages.len() > self.max_len {
            self.evict_oldest_exchange();
        }
        self.messages.push(message);
        &self.messages
    }

    /// Drop the message after the pinned one together with any assistant
    /// replies directly following it.
    ///
    /// A well-formed history loses exactly indices 1 and 2. A user message
    /// left without a reply is dropped alone rather than taking the next
    /// user's message with it.
    fn evict_oldest_exchange(&mut self) {
        if self.messages.len() < 2 {
            return;
        }
        let replies = self.messages[2..]
            .iter()
            .take_while(|m| m.role() == Role::Assistant)
            .count();
        let end = 2 + replies;
        tracing::debug!(dropped = end - 1, len = self.messages.len(), "evicting oldest exchange");
        self.messages.drain(1..end);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Always false: the pinned message is never removed.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// The pinned system message.
    pub fn pinned(&self) -> &Message {
        &self.messages[0]
    }

    /// Load a persisted history, re-pinning `system_prompt` at index 0.
    ///
    /// A missing file yields a fresh store. Loaded histories longer than the
    /// cap are trimmed exchange by exchange.
    pub fn load(
        path: &Path,
        system_prompt: impl Into<String>,
        max_len: usize,
    ) -> Result<Self, ClipaskError> {
        let mut store = Self::with_capacity(system_prompt, max_len);

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(store),
            Err(e) => return Err(e.into()),
        };

        let saved: Vec<Message> = serde_json::from_str(&content)?;
        store.messages.extend(
            saved
                .into_iter()
                .skip_while(|m| m.role() == Role::System),
        );
        while store.messages.len() > store.max_len {
            let before = store.messages.len();
            store.evict_oldest_exchange();
            if store.messages.len() == before {
                break;
            }
        }

        tracing::debug!(path = %path.display(), len = store.len(), "loaded conversation history");
        Ok(store)
    }

    /// Persist the history as a JSON array of messages.
    pub fn save(&self, path: &Path) -> Result<(), ClipaskError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.messages)?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn exchange(store: &mut ConversationStore, n: usize) {
        store.append(Message::user(format!("q{n}")));
        store.append(Message::assistant(format!("a{n}")));
    }

    #[test]
    fn test_new_store_has_pinned_message() {
        let store = ConversationStore::new("sys");
        assert_eq!(store.len(), 1);
        assert_eq!(store.pinned(), &Message::system("sys"));
        assert_eq!(store.max_len(), MAX_CONV_LEN);
    }

    #[test]
    fn test_append_returns_full_history() {
        let mut store = ConversationStore::new("sys");
        let history = store.append(Message::user("hello"));
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role(), Role::System);
        assert_eq!(history[1].content(), "hello");
    }

    #[test]
    fn test_twenty_appends_keep_pinned_and_stay_bounded() {
        let mut store = ConversationStore::new("sys");
        for i in 0..20 {
            let msg = if i % 2 == 0 {
                Message::user(format!("u{i}"))
            } else {
                Message::assistant(format!("a{i}"))
            };
            let history = store.append(msg);
            assert_eq!(history[0], Message::system("sys"));
            assert!(history.len() <= MAX_CONV_LEN + 1, "len {} at append {i}", history.len());
        }
    }

    #[test]
    fn test_no_eviction_at_cap() {
        let mut store = ConversationStore::with_capacity("sys", 4);
        store.append(Message::user("q1"));
        store.append(Message::assistant("a1"));
        store.append(Message::user("q2"));
        store.append(Message::assistant("a2"));
        // 5 messages: over the cap, but eviction waits for the next append.
        assert_eq!(store.len(), 5);
        assert_eq!(store.messages()[1].content(), "q1");
    }

    #[test]
    fn test_evicts_oldest_pair() {
        let mut store = ConversationStore::with_capacity("sys", 4);
        exchange(&mut store, 1);
        exchange(&mut store, 2);
        let history = store.append(Message::user("q3"));

        let contents: Vec<&str> = history.iter().map(|m| m.content()).collect();
        assert_eq!(contents, vec!["sys", "q2", "a2", "q3"]);
    }

    #[test]
    fn test_unanswered_user_message_evicted_alone() {
        let mut store = ConversationStore::with_capacity("sys", 3);
        store.append(Message::user("lost"));
        exchange(&mut store, 1);
        let history = store.append(Message::user("q2"));

        let contents: Vec<&str> = history.iter().map(|m| m.content()).collect();
        assert_eq!(contents, vec!["sys", "q1", "a1", "q2"]);
    }

    #[test]
    fn test_capacity_clamped() {
        let mut store = ConversationStore::with_capacity("sys", 0);
        assert_eq!(store.max_len(), 1);
        for i in 0..5 {
            exchange(&mut store, i);
        }
        assert_eq!(store.pinned().content(), "sys");
        assert!(store.len() <= 2);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("history.json");

        let mut store = ConversationStore::new("sys");
        exchange(&mut store, 1);
        store.save(&path).unwrap();

        let loaded = ConversationStore::load(&path, "sys", MAX_CONV_LEN).unwrap();
        assert_eq!(loaded, store);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let store = ConversationStore::load(&dir.path().join("none.json"), "sys", 8).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.max_len(), 8);
    }

    #[test]
    fn test_load_repins_system_prompt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");

        let mut old = ConversationStore::new("old prompt");
        exchange(&mut old, 1);
        old.save(&path).unwrap();

        let loaded = ConversationStore::load(&path, "new prompt", MAX_CONV_LEN).unwrap();
        assert_eq!(loaded.pinned().content(), "new prompt");
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded.messages()[1].content(), "q1");
    }

    #[test]
    fn test_load_trims_to_cap() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");

        let mut big = ConversationStore::with_capacity("sys", 100);
        for i in 0..10 {
            exchange(&mut big, i);
        }
        big.save(&path).unwrap();

        let loaded = ConversationStore::load(&path, "sys", 6).unwrap();
        assert!(loaded.len() <= 6);
        assert_eq!(loaded.messages().last().unwrap().content(), "a9");
        assert_eq!(loaded.messages()[1].role(), Role::User);
    }

    #[test]
    fn test_load_rejects_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = ConversationStore::load(&path, "sys", 8).unwrap_err();
        assert!(matches!(err, ClipaskError::Serialization(_)));
    }
}
