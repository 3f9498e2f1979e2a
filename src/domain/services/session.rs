#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use anyhow::Result;
use futures::StreamExt;
use tokio::sync::mpsc;

use super::AttachmentPreparer;
use super::Frame;
use super::StreamConsumer;
use crate::domain::models::Author;
use crate::domain::models::ChatRequest;
use crate::domain::models::CompressionError;
use crate::domain::models::Conversation;
use crate::domain::models::Event;
use crate::domain::models::ImageBlob;
use crate::domain::models::Message;
use crate::domain::models::Phase;
use crate::domain::models::SessionError;
use crate::domain::models::TranscriptStoreBox;
use crate::domain::models::TransportBox;

pub const COMPRESSING_TEXT: &str = "Compressing image...";

/// Locks the input affordance for the lifetime of a submission. Unlocking
/// happens on drop, so every exit path unlocks exactly once.
struct InputLock {
    tx: mpsc::UnboundedSender<Event>,
}

impl InputLock {
    fn acquire(tx: mpsc::UnboundedSender<Event>) -> InputLock {
        let _ = tx.send(Event::InputLocked());
        return InputLock { tx };
    }
}

impl Drop for InputLock {
    fn drop(&mut self) {
        let _ = self.tx.send(Event::InputUnlocked());
    }
}

/// Owns the conversation and drives one submission at a time through
/// compress, dispatch, stream and persist.
pub struct Session {
    conversation: Conversation,
    pending_attachment: Option<ImageBlob>,
    phase: Phase,
    store: TranscriptStoreBox,
    transport: TransportBox,
    preparer: AttachmentPreparer,
    tx: mpsc::UnboundedSender<Event>,
}

impl Session {
    /// Builds the session and restores the persisted transcript. This is the
    /// only place the store is read.
    pub async fn start(
        store: TranscriptStoreBox,
        transport: TransportBox,
        preparer: AttachmentPreparer,
        tx: mpsc::UnboundedSender<Event>,
    ) -> Session {
        let conversation = match store.load().await {
            Ok(conversation) => conversation,
            Err(err) => {
                tracing::warn!(error = ?err, "Failed to load transcript");
                Conversation::placeholder()
            }
        };

        let session = Session {
            conversation,
            pending_attachment: None,
            phase: Phase::Composing,
            store,
            transport,
            preparer,
            tx,
        };
        session.emit(Event::TranscriptLoaded(
            session.conversation.messages().to_vec(),
        ));

        return session;
    }

    pub fn conversation(&self) -> &Conversation {
        return &self.conversation;
    }

    pub fn phase(&self) -> Phase {
        return self.phase;
    }

    pub fn pending_attachment(&self) -> Option<&ImageBlob> {
        return self.pending_attachment.as_ref();
    }

    /// Selects the image for the next submission, replacing any previous one.
    pub fn attach(&mut self, image: ImageBlob) -> Result<(), CompressionError> {
        AttachmentPreparer::validate(&image)?;
        self.pending_attachment = Some(image);
        return Ok(());
    }

    /// Drops the pending image. Returns whether there was one.
    pub fn detach(&mut self) -> bool {
        return self.pending_attachment.take().is_some();
    }

    /// Runs one submission to a terminal state. Errors other than
    /// `SessionError::Validation` have already been shown and persisted as an
    /// inline notice by the time they are returned.
    pub async fn submit(&mut self, prompt: &str) -> Result<(), SessionError> {
        let prompt = prompt.trim().to_string();
        if prompt.is_empty() && self.pending_attachment.is_none() {
            return Err(SessionError::Validation);
        }

        let _lock = InputLock::acquire(self.tx.clone());
        let attachment = self.pending_attachment.take();

        let user_message =
            Message::new_user(&prompt, attachment.as_ref().map(|e| return e.reference()));
        let user_idx = self.conversation.push(user_message.clone());
        self.emit(Event::MessageAdded(user_idx, user_message));
        self.persist().await;

        let assistant_message = if attachment.is_some() {
            Message::new_status(Author::Assistant, COMPRESSING_TEXT)
        } else {
            Message::new(Author::Assistant, "")
        };
        let idx = self.conversation.push(assistant_message.clone());
        self.emit(Event::MessageAdded(idx, assistant_message));

        match self.exchange(idx, prompt, attachment).await {
            Ok(()) => {
                self.finalize(idx).await;
                return Ok(());
            }
            Err(err) => {
                self.fail(idx, &err).await;
                return Err(err);
            }
        }
    }

    /// Discards the conversation and the persisted transcript, restoring the
    /// welcome state.
    pub async fn reset(&mut self) -> Result<()> {
        self.conversation = Conversation::placeholder();
        self.pending_attachment = None;
        self.phase = Phase::Composing;
        self.store.clear().await?;

        self.emit(Event::TranscriptLoaded(
            self.conversation.messages().to_vec(),
        ));

        return Ok(());
    }

    async fn exchange(
        &mut self,
        idx: usize,
        prompt: String,
        attachment: Option<ImageBlob>,
    ) -> Result<(), SessionError> {
        let image = match attachment {
            Some(raw) => {
                self.set_phase(Phase::Compressing);
                match self.preparer.prepare(&raw).await {
                    Ok(compressed) => Some(compressed),
                    Err(err) => {
                        // Keep the selection so it can be retried or removed.
                        self.pending_attachment = Some(raw);
                        return Err(err.into());
                    }
                }
            }
            None => None,
        };

        self.set_phase(Phase::Dispatching);
        let mut stream = self
            .transport
            .dispatch(ChatRequest { prompt, image })
            .await?;

        self.set_phase(Phase::Streaming);
        let mut consumer = StreamConsumer::default();
        while let Some(chunk) = stream.next().await {
            let frame = consumer.push(&chunk?);
            self.update(idx, &frame);
        }

        let frame = consumer.finish();
        self.update(idx, &frame);
        tracing::debug!(
            chunks = consumer.chunks(),
            bytes = consumer.buffer().len(),
            mode = ?frame.mode,
            "Stream finished"
        );

        return Ok(());
    }

    fn update(&mut self, idx: usize, frame: &Frame) {
        if let Some(message) = self.conversation.get_mut(idx) {
            message.set_text(frame.mode, &frame.text);
            let message = message.clone();
            self.emit(Event::MessageUpdated(idx, message));
        }
    }

    async fn finalize(&mut self, idx: usize) {
        if let Some(message) = self.conversation.get_mut(idx) {
            message.finalize();
            let message = message.clone();
            self.emit(Event::MessageUpdated(idx, message));
        }

        self.persist().await;
        self.set_phase(Phase::Finalized);
    }

    async fn fail(&mut self, idx: usize, err: &SessionError) {
        tracing::error!(error = ?err, phase = %self.phase, "Submission failed");

        if let Some(message) = self.conversation.get_mut(idx) {
            message.fail(&err.notice());
            let message = message.clone();
            self.emit(Event::MessageUpdated(idx, message));
        }

        self.persist().await;
        self.set_phase(Phase::Error);
    }

    async fn persist(&self) {
        if let Err(err) = self.store.save(&self.conversation).await {
            tracing::warn!(error = ?err, "Failed to save transcript");
        }
    }

    fn set_phase(&mut self, phase: Phase) {
        tracing::debug!(
            from = %self.phase,
            to = %phase,
            terminal = phase.is_terminal(),
            "Phase change"
        );
        self.phase = phase;
        self.emit(Event::PhaseChanged(phase));
    }

    fn emit(&self, event: Event) {
        if self.tx.send(event).is_err() {
            tracing::debug!("No view attached, dropping event");
        }
    }
}
