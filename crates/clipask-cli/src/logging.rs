//! Logging to `$HOME/clipask.log`, mirrored to stderr unless the prompt
//! surface owns the terminal.

use clipask_desktop::SetupError;
use std::ffi::OsStr;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "CLIPASK_LOG";
const LOG_FILE: &str = "clipask.log";

/// Log file location under `$HOME`. An unset or empty `HOME` is fatal.
pub fn log_path() -> Result<PathBuf, SetupError> {
    log_path_in(std::env::var_os("HOME").as_deref())
}

fn log_path_in(home: Option<&OsStr>) -> Result<PathBuf, SetupError> {
    match home {
        Some(home) if !home.is_empty() => Ok(Path::new(home).join(LOG_FILE)),
        _ => Err(SetupError::MissingEnv("HOME".to_string())),
    }
}

/// Filter from `CLIPASK_LOG`, else `clipask=info` (`clipask=debug` when verbose).
pub fn filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "clipask=debug" } else { "clipask=info" })
    })
}

/// Install the global subscriber, appending to the file at `path`. With
/// `console` set every line is also written to stderr.
pub fn init(path: &Path, verbose: bool, console: bool) -> anyhow::Result<()> {
    let log_file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_writer(log_writer(log_file, console))
        .with_ansi(false)
        .init();
    Ok(())
}

fn log_writer(log_file: File, console: bool) -> BoxMakeWriter {
    if console {
        BoxMakeWriter::new(log_file.and(std::io::stderr))
    } else {
        BoxMakeWriter::new(log_file)
    }
}
