//! The prompt editor state machine.
//!
//! Key events edit an ASCII buffer until Return confirms it or Escape, a quit
//! signal, or a render failure cancels it.

use crate::event::{Key, KeyEvent, SurfaceEvent};
use crate::surface::{RenderError, Surface};
use clipask_core::UserIntent;

/// Lifecycle of one editing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    Editing,
    Confirmed,
    Cancelled,
}

/// Collects a typed prompt from key events.
#[derive(Debug)]
pub struct PromptEditor {
    buffer: String,
    state: EditorState,
}

impl Default for PromptEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptEditor {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            state: EditorState::Editing,
        }
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Apply one event. Events after a terminal state are ignored.
    pub fn handle_event(&mut self, event: SurfaceEvent) -> EditorState {
        if self.state != EditorState::Editing {
            return self.state;
        }

        match event {
            SurfaceEvent::Quit => self.cancel(),
            SurfaceEvent::Key(key) => self.handle_key(key),
        }
        self.state
    }

    fn handle_key(&mut self, event: KeyEvent) {
        if event.is_key_up {
            return;
        }

        match event.key {
            Key::Escape => self.cancel(),
            Key::Return => self.state = EditorState::Confirmed,
            _ if event.is_repeat => {}
            Key::Backspace => {
                self.buffer.pop();
            }
            Key::Char(c) if c.is_ascii() => self.buffer.push(c),
            Key::Char(_) | Key::Other => {}
        }
    }

    fn cancel(&mut self) {
        self.buffer.clear();
        self.state = EditorState::Cancelled;
    }

    fn redraw<S: Surface>(&self, surface: &mut S) -> Result<(), RenderError> {
        surface.clear();
        if !self.buffer.is_empty() {
            surface.render_line(&self.buffer)?;
        }
        surface.present()
    }

    /// Turn the current state into an intent. Anything but a confirmed
    /// buffer is a cancellation.
    pub fn into_intent(self) -> UserIntent {
        match self.state {
            EditorState::Confirmed => UserIntent::confirmed(&self.buffer),
            EditorState::Editing | EditorState::Cancelled => UserIntent::cancelled(),
        }
    }

    /// Drive the editor against `surface` until it leaves `Editing`.
    pub fn run<S: Surface>(mut self, surface: &mut S) -> UserIntent {
        while self.state == EditorState::Editing {
            if let Some(event) = surface.poll_event() {
                if self.handle_event(event) != EditorState::Editing {
                    break;
                }
            }

            if let Err(e) = self.redraw(surface) {
                tracing::error!(error = %e, "prompt render failed");
                self.cancel();
            }
        }

        tracing::debug!(state = ?self.state, bytes = self.buffer.len(), "prompt editor finished");
        self.into_intent()
    }
}
