//! Context capture from the X selection or clipboard.

use crate::error::CaptureError;
use async_trait::async_trait;
use std::fmt;
use std::time::Duration;
use tokio::process::Command;

const READ_TIMEOUT: Duration = Duration::from_secs(5);

/// Where the background text for a prompt is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ContextSource {
    /// The X primary selection (currently highlighted text).
    Selection,
    /// The X clipboard (last explicit copy).
    #[default]
    ClipboardPrimary,
}

impl ContextSource {
    /// Name of the X selection buffer this source maps to.
    pub fn selection_name(&self) -> &'static str {
        match self {
            ContextSource::Selection => "primary",
            ContextSource::ClipboardPrimary => "clipboard",
        }
    }
}

impl fmt::Display for ContextSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextSource::Selection => write!(f, "selection"),
            ContextSource::ClipboardPrimary => write!(f, "clipboard"),
        }
    }
}

/// Reads the current text of a context source.
#[async_trait]
pub trait ContextReader: Send + Sync {
    async fn read(&self, source: ContextSource) -> Result<String, CaptureError>;
}

/// Reader backed by `xclip -o`.
#[derive(Debug, Clone)]
pub struct XclipReader {
    tool: String,
    timeout: Duration,
}

impl XclipReader {
    /// `tool` is the xclip executable name or path.
    pub fn new(tool: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            timeout: READ_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn command(&self, source: ContextSource) -> Command {
        let mut cmd = Command::new(&self.tool);
        cmd.arg("-o").arg("-selection").arg(source.selection_name());
        cmd.kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl ContextReader for XclipReader {
    async fn read(&self, source: ContextSource) -> Result<String, CaptureError> {
        let mut cmd = self.command(source);
        tracing::debug!(command = ?cmd.as_std(), "running context reader");

        let output = tokio::time::timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| CaptureError::Timeout {
                tool: self.tool.clone(),
                secs: self.timeout.as_secs(),
            })?
            .map_err(|e| CaptureError::Spawn {
                tool: self.tool.clone(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(CaptureError::Exit {
                tool: self.tool.clone(),
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        tracing::debug!(source = %source, bytes = text.len(), "captured context");
        Ok(text)
    }
}
