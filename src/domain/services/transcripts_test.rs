use anyhow::Result;
use tempfile::TempDir;

use super::FileTranscriptStore;
use crate::domain::models::Author;
use crate::domain::models::Conversation;
use crate::domain::models::Message;
use crate::domain::models::TranscriptStore;

fn store(dir: &TempDir) -> FileTranscriptStore {
    return FileTranscriptStore::new(dir.path().join("nested/transcript.yaml"));
}

fn conversation() -> Conversation {
    let mut conversation = Conversation::placeholder();
    conversation.push(Message::new_user("Hello\nworld", None));
    let idx = conversation.push(Message::new(Author::Assistant, "Hi **there**"));
    conversation.get_mut(idx).unwrap().finalize();
    return conversation;
}

#[tokio::test]
async fn it_loads_placeholder_when_absent() -> Result<()> {
    let dir = TempDir::new()?;
    let res = store(&dir).load().await?;

    assert_eq!(res, Conversation::placeholder());
    return Ok(());
}

#[tokio::test]
async fn it_round_trips() -> Result<()> {
    let dir = TempDir::new()?;
    let store = store(&dir);
    let conversation = conversation();

    store.save(&conversation).await?;
    let res = store.load().await?;

    assert_eq!(res, conversation);
    assert!(res.messages()[2].is_copyable());
    return Ok(());
}

#[tokio::test]
async fn it_saves_idempotently() -> Result<()> {
    let dir = TempDir::new()?;
    let store = store(&dir);
    let conversation = conversation();

    store.save(&conversation).await?;
    let first = store.read_raw().await?;
    store.save(&conversation).await?;
    let second = store.read_raw().await?;

    assert!(first.is_some());
    assert_eq!(first, second);
    return Ok(());
}

#[tokio::test]
async fn it_does_not_overwrite_history_with_placeholder() -> Result<()> {
    let dir = TempDir::new()?;
    let store = store(&dir);

    store.save(&Conversation::placeholder()).await?;
    assert!(store.read_raw().await?.is_none());

    store.save(&conversation()).await?;
    store.save(&Conversation::placeholder()).await?;
    store.save(&Conversation::default()).await?;

    assert_eq!(store.load().await?, conversation());
    return Ok(());
}

#[tokio::test]
async fn it_falls_back_on_blank_files() -> Result<()> {
    let dir = TempDir::new()?;
    let store = FileTranscriptStore::new(dir.path().join("transcript.yaml"));
    tokio::fs::write(&store.file_path, "  \n ").await?;

    assert_eq!(store.load().await?, Conversation::placeholder());
    return Ok(());
}

#[tokio::test]
async fn it_falls_back_on_corrupt_files() -> Result<()> {
    let dir = TempDir::new()?;
    let store = FileTranscriptStore::new(dir.path().join("transcript.yaml"));
    tokio::fs::write(&store.file_path, "<div class=\"message\">").await?;

    assert_eq!(store.load().await?, Conversation::placeholder());
    return Ok(());
}

#[tokio::test]
async fn it_clears() -> Result<()> {
    let dir = TempDir::new()?;
    let store = store(&dir);

    store.clear().await?;
    store.save(&conversation()).await?;
    store.clear().await?;

    assert!(store.read_raw().await?.is_none());
    assert_eq!(store.load().await?, Conversation::placeholder());
    return Ok(());
}

#[tokio::test]
async fn it_replaces_the_slot_without_leaving_staging_files() -> Result<()> {
    let dir = TempDir::new()?;
    let store = store(&dir);
    let staging_path = store.staging_path();
    assert_eq!(staging_path, dir.path().join("nested/transcript.yaml.tmp"));

    store.save(&conversation()).await?;
    assert!(!staging_path.exists());

    let mut longer = conversation();
    longer.push(Message::new_user("Another question", None));
    store.save(&longer).await?;

    assert!(!staging_path.exists());
    assert_eq!(store.load().await?, longer);
    return Ok(());
}

#[tokio::test]
async fn it_ignores_a_truncated_staging_file() -> Result<()> {
    let dir = TempDir::new()?;
    let store = store(&dir);
    let conversation = conversation();
    store.save(&conversation).await?;

    // A save that died mid-write.
    std::fs::write(store.staging_path(), "version: 1\nmessages:\n- author: Us")?;

    assert_eq!(store.load().await?, conversation);

    store.save(&conversation).await?;
    assert!(!store.staging_path().exists());
    assert_eq!(store.load().await?, conversation);
    return Ok(());
}
