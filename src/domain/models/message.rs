#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::AttachmentRef;
use super::Author;
use super::RenderMode;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    #[default]
    Normal,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub author: Author,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<AttachmentRef>,
    #[serde(default)]
    mode: RenderMode,
    #[serde(default)]
    mtype: MessageType,
    #[serde(skip)]
    copyable: bool,
}

impl Message {
    pub fn new(author: Author, text: &str) -> Message {
        return Message {
            author,
            text: text.to_string(),
            attachment: None,
            mode: RenderMode::Content,
            mtype: MessageType::Normal,
            copyable: false,
        };
    }

    pub fn new_user(text: &str, attachment: Option<AttachmentRef>) -> Message {
        let mut msg = Message::new(Author::User, text);
        msg.attachment = attachment;
        return msg;
    }

    pub fn new_status(author: Author, text: &str) -> Message {
        let mut msg = Message::new(author, text);
        msg.mode = RenderMode::Status;
        return msg;
    }

    pub fn message_type(&self) -> MessageType {
        return self.mtype;
    }

    pub fn render_mode(&self) -> RenderMode {
        return self.mode;
    }

    pub fn is_copyable(&self) -> bool {
        return self.copyable;
    }

    /// Replaces the live text of a streaming message with the latest
    /// classification of its buffer.
    pub fn set_text(&mut self, mode: RenderMode, text: &str) {
        self.mode = mode;
        self.text = text.to_string();
    }

    /// Turns the message into an inline failure notice. Any partially
    /// streamed text is discarded.
    pub fn fail(&mut self, notice: &str) {
        self.text = notice.to_string();
        self.mode = RenderMode::Content;
        self.mtype = MessageType::Error;
        self.copyable = false;
    }

    /// Sets the copy affordance. Only finished, non-error assistant content
    /// with some text qualifies.
    pub fn finalize(&mut self) {
        self.copyable = self.author == Author::Assistant
            && self.mtype == MessageType::Normal
            && self.mode == RenderMode::Content
            && !self.text.trim().is_empty();
    }
}
