#[cfg(test)]
#[path = "conversation_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::Author;
use super::Message;

pub const WELCOME_TEXT: &str = "Hello! I'm the VDMAX assistant. Ask me a question, have me write some code, or attach an image for me to analyze.";

pub const SNAPSHOT_VERSION: u32 = 1;

fn is_welcome(message: &Message) -> bool {
    return message.author == Author::Assistant && message.text == WELCOME_TEXT;
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    /// The welcome state shown when there is no history.
    pub fn placeholder() -> Conversation {
        return Conversation::from_messages(vec![Message::new(Author::Assistant, WELCOME_TEXT)]);
    }

    /// Rebuilds a conversation, recomputing copy affordances. The welcome
    /// message is static text and never gets one.
    pub fn from_messages(messages: Vec<Message>) -> Conversation {
        let mut conversation = Conversation { messages };
        for message in conversation.messages.iter_mut() {
            if !is_welcome(message) {
                message.finalize();
            }
        }

        return conversation;
    }

    pub fn messages(&self) -> &[Message] {
        return &self.messages;
    }

    pub fn len(&self) -> usize {
        return self.messages.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.messages.is_empty();
    }

    /// True for the empty conversation and for the untouched welcome state.
    /// Neither is ever persisted.
    pub fn is_placeholder(&self) -> bool {
        if self.messages.is_empty() {
            return true;
        }

        return self.messages.len() == 1 && is_welcome(&self.messages[0]);
    }

    /// Appends a message, returning its index.
    pub fn push(&mut self, message: Message) -> usize {
        self.messages.push(message);
        return self.messages.len() - 1;
    }

    pub fn get(&self, idx: usize) -> Option<&Message> {
        return self.messages.get(idx);
    }

    pub fn get_mut(&mut self, idx: usize) -> Option<&mut Message> {
        return self.messages.get_mut(idx);
    }

    /// The most recent message carrying the copy affordance.
    pub fn last_copyable(&self) -> Option<&Message> {
        return self.messages.iter().rev().find(|e| return e.is_copyable());
    }
}

/// Versioned on-disk form of a conversation. Copy affordances are not part of
/// it; they are recomputed when a snapshot is decoded.
#[derive(Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub messages: Vec<Message>,
}

impl Snapshot {
    pub fn encode(conversation: &Conversation) -> Result<String> {
        let snapshot = Snapshot {
            version: SNAPSHOT_VERSION,
            messages: conversation.messages().to_vec(),
        };

        return Ok(serde_yaml::to_string(&snapshot)?);
    }

    /// Returns `None` when the payload is blank.
    pub fn decode(payload: &str) -> Result<Option<Conversation>> {
        if payload.trim().is_empty() {
            return Ok(None);
        }

        let snapshot: Snapshot = serde_yaml::from_str(payload)?;
        if snapshot.version != SNAPSHOT_VERSION {
            bail!(format!(
                "Unsupported transcript version {}",
                snapshot.version
            ));
        }

        return Ok(Some(Conversation::from_messages(snapshot.messages)));
    }
}
