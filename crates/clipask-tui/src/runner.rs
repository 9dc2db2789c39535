//! Runs the prompt editor on the real terminal.

use crate::editor::PromptEditor;
use crate::surface::{RenderError, TerminalSurface};
use clipask_core::UserIntent;

/// Take over the terminal, collect one prompt, and restore the terminal.
///
/// Only surface setup can fail; failures while editing come back as a
/// cancelled intent.
pub fn capture_prompt() -> Result<UserIntent, RenderError> {
    let mut surface = TerminalSurface::new()?;
    let intent = PromptEditor::new().run(&mut surface);
    drop(surface);

    if intent.is_cancelled() {
        tracing::info!("prompt cancelled");
    } else {
        tracing::info!(
            copy = intent.copy_to_clipboard(),
            source = %intent.context_source(),
            "prompt confirmed"
        );
    }
    Ok(intent)
}
