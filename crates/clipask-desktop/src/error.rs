//! Error types for the clipask-desktop crate.

use std::path::PathBuf;

/// Missing prerequisites detected before any work starts.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    /// Required executable not found on PATH
    #[error("{0} not found. Please install '{0}'")]
    MissingUtility(String),

    /// Required environment variable not set
    #[error("Environment variable {0} not set")]
    MissingEnv(String),
}

/// Reading the clipboard or selection failed.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    /// The reader process could not be started
    #[error("Failed to run {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// The reader process exited non-zero
    #[error("{tool} exited with code {code}: {stderr}")]
    Exit {
        tool: String,
        code: i32,
        stderr: String,
    },

    /// The reader process did not finish in time
    #[error("{tool} timed out after {secs}s")]
    Timeout { tool: String, secs: u64 },
}

/// Writing the reply to its destination failed.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    /// Scratch file could not be written
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Clipboard writer or editor could not be started or fed
    #[error("Failed to run {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Clipboard writer or editor exited non-zero
    #[error("{command} exited with code {code}")]
    Exit { command: String, code: i32 },
}
