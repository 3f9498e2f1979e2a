/// Converts markdown source to presentable markup. Implementations must not
/// panic on partial or malformed input; they degrade to literal text.
pub trait Markdown: Send + Sync {
    fn to_markup(&self, text: &str) -> String;
}

pub type MarkdownBox = Box<dyn Markdown>;
