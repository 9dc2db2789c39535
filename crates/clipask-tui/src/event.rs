//! Key event translation.

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Keys the prompt editor distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Return,
    Backspace,
    Char(char),
    /// Anything else (arrows, function keys, chords).
    Other,
}

/// One physical key action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub is_repeat: bool,
    pub is_key_up: bool,
}

impl KeyEvent {
    /// A fresh key-down.
    pub fn press(key: Key) -> Self {
        Self {
            key,
            is_repeat: false,
            is_key_up: false,
        }
    }

    /// An auto-repeat key-down from a held key.
    pub fn repeat(key: Key) -> Self {
        Self {
            key,
            is_repeat: true,
            is_key_up: false,
        }
    }

    pub fn release(key: Key) -> Self {
        Self {
            key,
            is_repeat: false,
            is_key_up: true,
        }
    }
}

/// Events a surface delivers to the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// The surface is going away (Ctrl+C, window close).
    Quit,
    Key(KeyEvent),
}

/// Translate a crossterm event. Mouse, focus, paste and resize events map to
/// `None`.
pub fn translate(event: Event) -> Option<SurfaceEvent> {
    let Event::Key(key) = event else {
        return None;
    };

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(SurfaceEvent::Quit);
    }

    let mapped = match key.code {
        KeyCode::Esc => Key::Escape,
        KeyCode::Enter => Key::Return,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Key::Char(c)
        }
        _ => Key::Other,
    };

    Some(SurfaceEvent::Key(match key.kind {
        KeyEventKind::Press => KeyEvent::press(mapped),
        KeyEventKind::Repeat => KeyEvent::repeat(mapped),
        KeyEventKind::Release => KeyEvent::release(mapped),
    }))
}

/// Poll the terminal for one event, waiting at most `timeout`.
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<SurfaceEvent>> {
    if event::poll(timeout)? {
        Ok(translate(event::read()?))
    } else {
        Ok(None)
    }
}
