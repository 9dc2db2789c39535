//! Inline `/x` directives typed at the start of a prompt.
//!
//! Directives form a contiguous prefix: `/c /s explain this` sets both flags
//! and leaves `explain this` as the prompt. A `/` after free text is literal.

use clipask_desktop::ContextSource;

/// A one-letter directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// `/c`: copy the reply to the clipboard instead of opening the editor.
    CopyReply,
    /// `/s`: read context from the selection instead of the clipboard.
    UseSelection,
}

impl Directive {
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'c' => Some(Directive::CopyReply),
            's' => Some(Directive::UseSelection),
            _ => None,
        }
    }
}

/// Flags and remaining prompt text extracted from a typed line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directives {
    pub copy_to_clipboard: bool,
    pub context_source: ContextSource,
    pub prompt_text: String,
}

impl Directives {
    fn apply(&mut self, directive: Directive) {
        match directive {
            Directive::CopyReply => self.copy_to_clipboard = true,
            Directive::UseSelection => self.context_source = ContextSource::Selection,
        }
    }
}

/// Split a typed line into its directive prefix and the prompt text.
///
/// Unknown letters still consume their two characters. Whitespace between
/// directives and before the prompt is skipped.
pub fn parse_directives(raw: &str) -> Directives {
    let mut directives = Directives::default();
    let mut rest = raw.trim();

    loop {
        let mut chars = rest.chars();
        match (chars.next(), chars.next()) {
            (Some('/'), Some(letter)) => {
                match Directive::from_letter(letter) {
                    Some(directive) => directives.apply(directive),
                    None => tracing::debug!(letter = %letter, "ignoring unknown directive"),
                }
                rest = chars.as_str().trim_start();
            }
            _ => break,
        }
    }

    directives.prompt_text = rest.to_string();
    directives
}
