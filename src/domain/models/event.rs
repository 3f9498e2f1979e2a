use super::Message;
use super::Phase;

/// Everything the view needs to mirror the session. Messages are sent by
/// value so the view never shares state with the session.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    InputLocked(),
    InputUnlocked(),
    PhaseChanged(Phase),
    MessageAdded(usize, Message),
    MessageUpdated(usize, Message),
    TranscriptLoaded(Vec<Message>),
    /// A line for the user that is not part of the conversation.
    Notice(String),
}
