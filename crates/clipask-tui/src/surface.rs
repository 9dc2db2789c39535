//! Rendering surfaces for the prompt editor.

use crate::event::{poll_event, SurfaceEvent};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use std::io::{stdout, Stdout};
use std::time::Duration;

const COLOR_ACCENT: Color = Color::Rgb(166, 227, 161); // Green accent
const COLOR_DIM: Color = Color::Rgb(88, 91, 112); // Overlay0

const PROMPT: &str = "› ";
const HINT: &str = " enter send · esc cancel · /c copy reply · /s use selection";

/// How long a single poll waits before reporting a tick.
const TICK: Duration = Duration::from_millis(50);

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot render control character {0:?}")]
    Unprintable(char),
}

/// A window-like surface that yields key events and shows one line of text.
pub trait Surface {
    /// Wait briefly for the next event. `None` is a tick.
    fn poll_event(&mut self) -> Option<SurfaceEvent>;

    /// Forget whatever was drawn for the previous frame.
    fn clear(&mut self);

    /// Queue `text` as the line shown on the next present.
    fn render_line(&mut self, text: &str) -> Result<(), RenderError>;

    fn present(&mut self) -> Result<(), RenderError>;
}

/// Full-screen terminal surface. Raw mode and the alternate screen are held
/// for the lifetime of the value.
pub struct TerminalSurface {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    line: Option<String>,
}

impl TerminalSurface {
    pub fn new() -> Result<Self, RenderError> {
        enable_raw_mode()?;
        let setup = stdout()
            .execute(EnterAlternateScreen)
            .and_then(|_| Terminal::new(CrosstermBackend::new(stdout())));

        match setup {
            Ok(terminal) => Ok(Self {
                terminal,
                line: None,
            }),
            Err(e) => {
                restore();
                Err(e.into())
            }
        }
    }
}

impl Surface for TerminalSurface {
    fn poll_event(&mut self) -> Option<SurfaceEvent> {
        match poll_event(TICK) {
            Ok(event) => event,
            Err(e) => {
                tracing::error!(error = %e, "terminal event poll failed");
                Some(SurfaceEvent::Quit)
            }
        }
    }

    fn clear(&mut self) {
        self.line = None;
    }

    fn render_line(&mut self, text: &str) -> Result<(), RenderError> {
        if let Some(c) = text.chars().find(|c| c.is_control()) {
            return Err(RenderError::Unprintable(c));
        }
        self.line = Some(text.to_string());
        Ok(())
    }

    fn present(&mut self) -> Result<(), RenderError> {
        let line = self.line.as_deref();
        self.terminal.draw(|frame| draw_prompt(frame, line))?;
        Ok(())
    }
}

impl Drop for TerminalSurface {
    fn drop(&mut self) {
        restore();
        let _ = self.terminal.show_cursor();
    }
}

fn restore() {
    let _ = disable_raw_mode();
    let _ = stdout().execute(LeaveAlternateScreen);
}

/// Draw the input box with an optional line of text and a hint underneath.
pub(crate) fn draw_prompt(frame: &mut Frame, line: Option<&str>) {
    let [input_area, hint_area, _] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(frame.area());

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_ACCENT))
        .title(" clipask ");

    let text = line.unwrap_or_default();
    let paragraph = Paragraph::new(format!("{PROMPT}{text}"))
        .style(Style::default().fg(Color::White))
        .block(block);
    frame.render_widget(paragraph, input_area);

    frame.render_widget(
        Paragraph::new(HINT).style(Style::default().fg(COLOR_DIM)),
        hint_area,
    );

    frame.set_cursor_position(Position::new(
        cursor_x(input_area, text),
        input_area.y + 1,
    ));
}

/// Cursor column after `text`, pinned inside the right border.
fn cursor_x(area: Rect, text: &str) -> u16 {
    let typed = u16::try_from(text.chars().count()).unwrap_or(u16::MAX);
    // +1 border +2 prompt
    let x = area.x.saturating_add(typed).saturating_add(3);
    x.min(area.right().saturating_sub(2))
}
