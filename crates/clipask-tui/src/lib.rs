//! clipask-tui: the floating prompt editor.

pub mod editor;
pub mod event;
pub mod runner;
pub mod surface;

pub use editor::{EditorState, PromptEditor};
pub use event::{Key, KeyEvent, SurfaceEvent};
pub use runner::capture_prompt;
pub use surface::{RenderError, Surface, TerminalSurface};
