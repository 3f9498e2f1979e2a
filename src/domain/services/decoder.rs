#[cfg(test)]
#[path = "decoder_test.rs"]
mod tests;

use std::char::REPLACEMENT_CHARACTER;
use std::str;

/// Incremental UTF-8 decoder. A multi-byte sequence split across chunk
/// boundaries is held back until the rest of it arrives. Invalid bytes decode
/// to U+FFFD instead of failing.
#[derive(Default)]
pub struct Utf8Decoder {
    pending: Vec<u8>,
}

impl Utf8Decoder {
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        let mut bytes = std::mem::take(&mut self.pending);
        bytes.extend_from_slice(chunk);

        let mut res = String::with_capacity(bytes.len());
        let mut input = bytes.as_slice();

        loop {
            match str::from_utf8(input) {
                Ok(text) => {
                    res.push_str(text);
                    break;
                }
                Err(err) => {
                    let (valid, rest) = input.split_at(err.valid_up_to());
                    res.push_str(&String::from_utf8_lossy(valid));

                    match err.error_len() {
                        Some(len) => {
                            res.push(REPLACEMENT_CHARACTER);
                            input = &rest[len..];
                        }
                        None => {
                            // Incomplete sequence at the end of the chunk.
                            self.pending = rest.to_vec();
                            break;
                        }
                    }
                }
            }
        }

        return res;
    }

    /// Ends the stream. A dangling partial sequence becomes a single U+FFFD.
    pub fn flush(&mut self) -> String {
        if self.pending.is_empty() {
            return "".to_string();
        }

        self.pending.clear();
        return REPLACEMENT_CHARACTER.to_string();
    }

    pub fn has_pending(&self) -> bool {
        return !self.pending.is_empty();
    }
}
