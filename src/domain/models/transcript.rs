use anyhow::Result;
use async_trait::async_trait;

use super::Conversation;

#[async_trait]
pub trait TranscriptStore: Send + Sync {
    /// Persists the conversation. Does nothing for the placeholder state.
    async fn save(&self, conversation: &Conversation) -> Result<()>;

    /// Reads the persisted conversation, falling back to the placeholder
    /// when nothing usable is stored.
    async fn load(&self) -> Result<Conversation>;

    /// Removes the persisted conversation.
    async fn clear(&self) -> Result<()>;
}

pub type TranscriptStoreBox = Box<dyn TranscriptStore>;
