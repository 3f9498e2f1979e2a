mod attachments;
pub mod clipboard;
mod decoder;
mod renderer;
mod session;
mod stream_consumer;
mod transcripts;

pub use attachments::*;
pub use decoder::*;
pub use renderer::*;
pub use session::*;
pub use stream_consumer::*;
pub use transcripts::*;
