#[cfg(test)]
#[path = "transcripts_test.rs"]
mod tests;

use std::path;

use anyhow::Result;
use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Conversation;
use crate::domain::models::Snapshot;
use crate::domain::models::TranscriptStore;

/// Keeps the transcript in a single YAML file. The file path is the one
/// well-known key of the store.
pub struct FileTranscriptStore {
    pub file_path: path::PathBuf,
}

impl Default for FileTranscriptStore {
    fn default() -> FileTranscriptStore {
        return FileTranscriptStore::new(path::PathBuf::from(Config::get(
            ConfigKey::TranscriptFile,
        )));
    }
}

impl FileTranscriptStore {
    pub fn new(file_path: path::PathBuf) -> FileTranscriptStore {
        return FileTranscriptStore { file_path };
    }

    fn staging_path(&self) -> path::PathBuf {
        let mut file_name = self
            .file_path
            .file_name()
            .map(|name| return name.to_os_string())
            .unwrap_or_default();
        file_name.push(".tmp");

        return self.file_path.with_file_name(file_name);
    }

    /// Raw persisted payload, if any.
    pub async fn read_raw(&self) -> Result<Option<String>> {
        if !self.file_path.exists() {
            return Ok(None);
        }

        let payload = fs::read_to_string(&self.file_path).await?;
        return Ok(Some(payload));
    }
}

#[async_trait]
impl TranscriptStore for FileTranscriptStore {
    #[allow(clippy::implicit_return)]
    async fn save(&self, conversation: &Conversation) -> Result<()> {
        if conversation.is_placeholder() {
            tracing::debug!("Skipping save of placeholder transcript");
            return Ok(());
        }

        let payload = Snapshot::encode(conversation)?;

        if let Some(parent) = self.file_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).await?;
            }
        }

        // The slot is only ever replaced whole.
        let staging_path = self.staging_path();
        let mut file = fs::File::create(&staging_path).await?;
        file.write_all(payload.as_bytes()).await?;
        file.flush().await?;
        file.sync_all().await?;
        drop(file);
        fs::rename(&staging_path, &self.file_path).await?;

        tracing::debug!(
            messages = conversation.len(),
            path = ?self.file_path,
            "Saved transcript"
        );

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn load(&self) -> Result<Conversation> {
        let payload = match self.read_raw().await? {
            Some(payload) => payload,
            None => return Ok(Conversation::placeholder()),
        };

        match Snapshot::decode(&payload) {
            Ok(Some(conversation)) => return Ok(conversation),
            Ok(None) => return Ok(Conversation::placeholder()),
            Err(err) => {
                tracing::warn!(error = ?err, path = ?self.file_path, "Unreadable transcript, starting fresh");
                return Ok(Conversation::placeholder());
            }
        }
    }

    #[allow(clippy::implicit_return)]
    async fn clear(&self) -> Result<()> {
        if !self.file_path.exists() {
            return Ok(());
        }

        fs::remove_file(&self.file_path).await?;
        return Ok(());
    }
}
