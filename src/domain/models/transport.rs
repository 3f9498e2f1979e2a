use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use super::ImageBlob;
use super::StreamError;
use super::TransportError;

pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, StreamError>> + Send>>;

/// The multi-part payload of a single submission.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatRequest {
    pub prompt: String,
    pub image: Option<ImageBlob>,
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends the request and hands back the open response body. Fails before
    /// any body bytes are read when the connection fails or the status is not
    /// a success.
    async fn dispatch(&self, request: ChatRequest) -> Result<ByteStream, TransportError>;
}

pub type TransportBox = Box<dyn Transport>;
