#[cfg(test)]
#[path = "renderer_test.rs"]
mod tests;

use crate::domain::models::Author;
use crate::domain::models::MarkdownBox;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::RenderMode;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rendered {
    /// Status narration, shown literally in an emphasis style.
    Emphasis(String),
    /// Output of the markdown service.
    Markup(String),
    /// Text that is never parsed: user input and failure notices.
    Plain(String),
}

impl Rendered {
    pub fn text(&self) -> &str {
        match self {
            Rendered::Emphasis(text) => return text,
            Rendered::Markup(text) => return text,
            Rendered::Plain(text) => return text,
        }
    }
}

pub struct MessageRenderer {
    markdown: MarkdownBox,
}

impl MessageRenderer {
    pub fn new(markdown: MarkdownBox) -> MessageRenderer {
        return MessageRenderer { markdown };
    }

    pub fn translate(&self, text: &str, mode: RenderMode) -> Rendered {
        match mode {
            RenderMode::Status => return Rendered::Emphasis(text.to_string()),
            RenderMode::Content => return Rendered::Markup(self.markdown.to_markup(text)),
        }
    }

    pub fn render(&self, message: &Message) -> Rendered {
        if message.message_type() == MessageType::Error {
            return Rendered::Plain(message.text.to_string());
        }

        if message.author == Author::User {
            let mut text = message.text.to_string();
            if let Some(attachment) = &message.attachment {
                if !text.is_empty() {
                    text += "\n";
                }
                text += &format!("[image: {attachment}]");
            }

            return Rendered::Plain(text);
        }

        return self.translate(&message.text, message.render_mode());
    }
}
