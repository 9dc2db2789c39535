//! CLI argument definitions.

use clap::Parser;
use clipask_core::ContextSource;

#[derive(Parser, Debug)]
#[command(
    name = "clipask",
    version,
    about = "Send the clipboard or selection to a chat model"
)]
pub struct Cli {
    /// `s` reads the selection, `c` the clipboard, `floating` opens a prompt
    /// box first. Anything else reads the clipboard.
    pub mode: Option<String>,

    /// Model to use (defaults to the configured model).
    #[arg(long)]
    pub model: Option<String>,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn invocation(&self) -> Invocation {
        Invocation::from_arg(self.mode.as_deref())
    }
}

/// How this run gathers its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation {
    Clipboard,
    Selection,
    /// Ask for a prompt before reading context.
    Floating,
}

impl Invocation {
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            Some("s") => Invocation::Selection,
            Some("floating") => Invocation::Floating,
            Some("c") | None => Invocation::Clipboard,
            Some(other) => {
                tracing::debug!(mode = other, "unknown mode, reading clipboard");
                Invocation::Clipboard
            }
        }
    }

    /// Context source when no prompt is typed.
    pub fn default_source(&self) -> ContextSource {
        match self {
            Invocation::Selection => ContextSource::Selection,
            Invocation::Clipboard | Invocation::Floating => ContextSource::ClipboardPrimary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modes() {
        assert_eq!(Invocation::from_arg(None), Invocation::Clipboard);
        assert_eq!(Invocation::from_arg(Some("c")), Invocation::Clipboard);
        assert_eq!(Invocation::from_arg(Some("s")), Invocation::Selection);
        assert_eq!(Invocation::from_arg(Some("floating")), Invocation::Floating);
        assert_eq!(Invocation::from_arg(Some("sel")), Invocation::Clipboard);
    }

    #[test]
    fn test_parse_args() {
        let cli = Cli::try_parse_from(["clipask", "s", "--model", "gpt-4o", "-v"]).unwrap();
        assert_eq!(cli.invocation(), Invocation::Selection);
        assert_eq!(cli.model.as_deref(), Some("gpt-4o"));
        assert!(cli.verbose);

        let cli = Cli::try_parse_from(["clipask"]).unwrap();
        assert_eq!(cli.invocation(), Invocation::Clipboard);
        assert_eq!(cli.invocation().default_source(), ContextSource::ClipboardPrimary);
    }
}
