use super::MessageRenderer;
use super::Rendered;
use crate::domain::models::AttachmentRef;
use crate::domain::models::Author;
use crate::domain::models::Markdown;
use crate::domain::models::Message;
use crate::domain::models::RenderMode;

struct Brackets {}

impl Markdown for Brackets {
    fn to_markup(&self, text: &str) -> String {
        return format!("[md]{text}[/md]");
    }
}

fn renderer() -> MessageRenderer {
    return MessageRenderer::new(Box::new(Brackets {}));
}

#[test]
fn it_translates_status_without_parsing() {
    let res = renderer().translate("Preparing **an** answer...", RenderMode::Status);
    assert_eq!(
        res,
        Rendered::Emphasis("Preparing **an** answer...".to_string())
    );
}

#[test]
fn it_translates_content_through_markdown() {
    let res = renderer().translate("Hi **there**", RenderMode::Content);
    assert_eq!(res, Rendered::Markup("[md]Hi **there**[/md]".to_string()));
    assert_eq!(res.text(), "[md]Hi **there**[/md]");
}

#[test]
fn it_renders_user_messages_literally() {
    let msg = Message::new_user("**not bold**\nsecond line", None);
    assert_eq!(
        renderer().render(&msg),
        Rendered::Plain("**not bold**\nsecond line".to_string())
    );
}

#[test]
fn it_renders_attachment_previews() {
    let attachment = AttachmentRef {
        file_name: "cat.png".to_string(),
        size_bytes: 3 * 1024 * 1024,
    };
    let with_text = Message::new_user("What is this?", Some(attachment.clone()));
    insta::assert_snapshot!(renderer().render(&with_text).text(), @r###"
    What is this?
    [image: cat.png (3.0 MB)]
    "###);

    let image_only = Message::new_user("", Some(attachment));
    insta::assert_snapshot!(renderer().render(&image_only).text(), @"[image: cat.png (3.0 MB)]");
}

#[test]
fn it_renders_errors_plainly() {
    let mut msg = Message::new(Author::Assistant, "");
    msg.fail("Sorry, **something** went wrong.");
    assert_eq!(
        renderer().render(&msg),
        Rendered::Plain("Sorry, **something** went wrong.".to_string())
    );
}

#[test]
fn it_renders_assistant_messages_by_mode() {
    let status = Message::new_status(Author::Assistant, "Compressing image...");
    assert_eq!(
        renderer().render(&status),
        Rendered::Emphasis("Compressing image...".to_string())
    );

    let content = Message::new(Author::Assistant, "Hi");
    assert_eq!(
        renderer().render(&content),
        Rendered::Markup("[md]Hi[/md]".to_string())
    );
}
