mod attachment;
mod author;
mod compressor;
mod conversation;
mod error;
mod event;
mod markdown;
mod message;
mod phase;
mod render_mode;
mod slash_commands;
mod transcript;
mod transport;

pub use attachment::*;
pub use author::*;
pub use compressor::*;
pub use conversation::*;
pub use error::*;
pub use event::*;
pub use markdown::*;
pub use message::*;
pub use phase::*;
pub use render_mode::*;
pub use slash_commands::*;
pub use transcript::*;
pub use transport::*;
