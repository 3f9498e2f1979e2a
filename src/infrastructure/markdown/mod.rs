pub mod terminal;

use crate::domain::models::MarkdownBox;

pub struct MarkdownManager {}

impl MarkdownManager {
    pub fn get() -> MarkdownBox {
        return Box::<terminal::TerminalMarkdown>::default();
    }
}
