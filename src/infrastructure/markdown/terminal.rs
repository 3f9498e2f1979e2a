#[cfg(test)]
#[path = "terminal_test.rs"]
mod tests;

use termimad::MadSkin;

use crate::domain::models::Markdown;

/// Renders markdown to styled terminal text. termimad never fails on
/// unbalanced markup, it prints what it cannot parse as is.
pub struct TerminalMarkdown {
    skin: MadSkin,
}

impl Default for TerminalMarkdown {
    fn default() -> TerminalMarkdown {
        return TerminalMarkdown {
            skin: MadSkin::default(),
        };
    }
}

impl Markdown for TerminalMarkdown {
    fn to_markup(&self, text: &str) -> String {
        return self.skin.term_text(text).to_string();
    }
}
