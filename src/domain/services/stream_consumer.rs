#[cfg(test)]
#[path = "stream_consumer_test.rs"]
mod tests;

use super::Utf8Decoder;
use crate::domain::models::RenderMode;

const STATUS_MARKER: &str = "*";
const STATUS_SUFFIX: &str = "*\n\n";

/// What the view shows for the stream so far.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub mode: RenderMode,
    pub text: String,
}

/// Classifies the entire accumulated buffer.
///
/// A buffer shaped like `*narration*\n\n` is status narration and yields the
/// inner text. Anything else is content and yields the buffer unchanged. The
/// check always runs on the whole buffer, so a message can start as status
/// and flip to content once more text arrives.
pub fn classify(buffer: &str) -> Frame {
    if buffer.starts_with(STATUS_MARKER) && buffer.ends_with(STATUS_SUFFIX) {
        // In `*\n\n` the opening and closing markers are the same character.
        let inner = buffer
            .get(STATUS_MARKER.len()..buffer.len() - STATUS_SUFFIX.len())
            .unwrap_or_default();
        return Frame {
            mode: RenderMode::Status,
            text: inner.to_string(),
        };
    }

    return Frame {
        mode: RenderMode::Content,
        text: buffer.to_string(),
    };
}

/// Accumulates a chunked response body and reclassifies it after every chunk.
#[derive(Default)]
pub struct StreamConsumer {
    decoder: Utf8Decoder,
    buffer: String,
    chunks: usize,
}

impl StreamConsumer {
    pub fn push(&mut self, chunk: &[u8]) -> Frame {
        self.chunks += 1;
        let text = self.decoder.decode(chunk);
        self.buffer.push_str(&text);

        tracing::debug!(
            chunk = self.chunks,
            bytes = chunk.len(),
            buffered = self.buffer.len(),
            "Stream chunk"
        );

        return classify(&self.buffer);
    }

    /// Called once the stream is exhausted.
    pub fn finish(&mut self) -> Frame {
        if self.decoder.has_pending() {
            tracing::warn!(chunks = self.chunks, "Stream ended inside a multi-byte sequence");
        }
        let tail = self.decoder.flush();
        self.buffer.push_str(&tail);

        return classify(&self.buffer);
    }

    pub fn buffer(&self) -> &str {
        return &self.buffer;
    }

    pub fn chunks(&self) -> usize {
        return self.chunks;
    }
}
