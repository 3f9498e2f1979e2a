use serde_derive::Deserialize;
use serde_derive::Serialize;

/// How streamed assistant text is presented.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Ephemeral narration such as `*Preparing an answer...*`, shown without
    /// any markdown parsing.
    Status,
    /// Final answer text, formatted through the markdown service.
    #[default]
    Content,
}
