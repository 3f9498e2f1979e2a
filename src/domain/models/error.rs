use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CompressionError {
    #[error("Unsupported image type: {0}")]
    UnsupportedType(String),
    #[error("The image is empty")]
    Empty,
    #[error("The compressed image is {size} bytes, over the {limit} byte limit")]
    TooLarge { size: usize, limit: usize },
    #[error("{0}")]
    Service(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("HTTP error! status: 413")]
    PayloadTooLarge,
    #[error("HTTP error! status: {0}")]
    Status(u16),
    #[error("{0}")]
    Network(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct StreamError(pub String);

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Nothing to send: type a message or attach an image")]
    Validation,
    #[error(transparent)]
    Compression(#[from] CompressionError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Stream(#[from] StreamError),
}

impl SessionError {
    /// Short inline notice shown in place of the assistant message.
    pub fn notice(&self) -> String {
        match self {
            SessionError::Validation => return self.to_string(),
            SessionError::Compression(err) => {
                return format!("Sorry, the image could not be compressed.\n\n{err}");
            }
            SessionError::Transport(TransportError::PayloadTooLarge) => {
                return "Sorry, that image is too large for the server. Try a smaller one."
                    .to_string();
            }
            SessionError::Transport(err) => {
                return format!("Sorry, something went wrong. Please try again later.\n\n{err}");
            }
            SessionError::Stream(err) => {
                return format!("Sorry, something went wrong. Please try again later.\n\n{err}");
            }
        }
    }
}
