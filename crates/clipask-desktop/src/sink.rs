//! Reply delivery: the clipboard, or a scratch file opened in an editor window.

use crate::error::DeliveryError;
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Destination for a finished reply.
#[async_trait]
pub trait ReplySink: Send + Sync {
    /// Write `text` to the clipboard when `to_clipboard` is set, otherwise
    /// open it for reading.
    async fn deliver(&self, text: &str, to_clipboard: bool) -> Result<(), DeliveryError>;
}

/// Paths and programs used by [`DesktopSink`].
#[derive(Debug, Clone)]
pub struct SinkConfig {
    /// Clipboard writer, fed through stdin (`xclip -selection clipboard`).
    pub clipboard_tool: String,
    /// File the reply is written to before opening the editor.
    pub scratch_file: PathBuf,
    /// Terminal emulator that hosts the editor.
    pub terminal: PathBuf,
    /// Editor executable.
    pub editor: PathBuf,
}

/// Sink backed by xclip and a terminal-hosted editor.
#[derive(Debug, Clone)]
pub struct DesktopSink {
    config: SinkConfig,
}

impl DesktopSink {
    pub fn new(config: SinkConfig) -> Self {
        Self { config }
    }

    async fn copy_to_clipboard(&self, text: &str) -> Result<(), DeliveryError> {
        let tool = &self.config.clipboard_tool;
        let command = format!("{tool} -selection clipboard");
        tracing::info!(bytes = text.len(), "copying reply to clipboard");

        let spawn_err = |e: std::io::Error| DeliveryError::Spawn {
            command: command.clone(),
            source: e,
        };

        let mut child = Command::new(tool)
            .arg("-selection")
            .arg("clipboard")
            .stdin(Stdio::piped())
            .spawn()
            .map_err(spawn_err)?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).await.map_err(spawn_err)?;
            // Closing stdin lets xclip take ownership of the selection.
            drop(stdin);
        }

        let status = child.wait().await.map_err(spawn_err)?;
        if !status.success() {
            return Err(DeliveryError::Exit {
                command,
                code: status.code().unwrap_or(-1),
            });
        }
        Ok(())
    }

    async fn open_in_editor(&self, text: &str) -> Result<(), DeliveryError> {
        let path = &self.config.scratch_file;

        tokio::fs::write(path, text)
            .await
            .map_err(|e| DeliveryError::Write {
                path: path.clone(),
                source: e,
            })?;
        tracing::info!(bytes = text.len(), file = %path.display(), "wrote reply to scratch file");

        let mut cmd = Command::new(&self.config.terminal);
        cmd.arg("--window")
            .arg("--maximize")
            .arg("--")
            .arg(&self.config.editor)
            .arg(path);

        let command = format!("{:?}", cmd.as_std());
        tracing::info!(cmd = %command, "launching editor");

        let status = cmd.status().await.map_err(|e| DeliveryError::Spawn {
            command: command.clone(),
            source: e,
        })?;

        if !status.success() {
            return Err(DeliveryError::Exit {
                command,
                code: status.code().unwrap_or(-1),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ReplySink for DesktopSink {
    async fn deliver(&self, text: &str, to_clipboard: bool) -> Result<(), DeliveryError> {
        if to_clipboard {
            self.copy_to_clipboard(text).await
        } else {
            self.open_in_editor(text).await
        }
    }
}
