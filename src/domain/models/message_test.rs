use super::Author;
use super::Message;
use super::MessageType;
use crate::domain::models::AttachmentRef;
use crate::domain::models::RenderMode;

#[test]
fn it_executes_new() {
    let msg = Message::new(Author::Assistant, "Hi there!");
    assert_eq!(msg.author, Author::Assistant);
    assert_eq!(msg.author.to_string(), "AI");
    assert_eq!(msg.text, "Hi there!".to_string());
    assert_eq!(msg.message_type(), MessageType::Normal);
    assert_eq!(msg.render_mode(), RenderMode::Content);
    assert!(!msg.is_copyable());
}

#[test]
fn it_executes_new_user_preserving_newlines() {
    let attachment = AttachmentRef {
        file_name: "cat.png".to_string(),
        size_bytes: 10,
    };
    let msg = Message::new_user("first\nsecond", Some(attachment.clone()));
    assert_eq!(msg.author, Author::User);
    assert_eq!(msg.author.to_string(), "You");
    assert_eq!(msg.text, "first\nsecond");
    assert_eq!(msg.attachment, Some(attachment));
}

#[test]
fn it_executes_set_text() {
    let mut msg = Message::new(Author::Assistant, "");
    msg.set_text(RenderMode::Status, "Thinking...");
    assert_eq!(msg.render_mode(), RenderMode::Status);
    assert_eq!(msg.text, "Thinking...");

    msg.set_text(RenderMode::Content, "*Thinking...*\n\nDone");
    assert_eq!(msg.render_mode(), RenderMode::Content);
}

#[test]
fn it_finalizes_content_as_copyable() {
    let mut msg = Message::new(Author::Assistant, "Hi there");
    msg.finalize();
    assert!(msg.is_copyable());
}

#[test]
fn it_does_not_finalize_status_as_copyable() {
    let mut msg = Message::new_status(Author::Assistant, "Preparing an answer...");
    msg.finalize();
    assert!(!msg.is_copyable());
}

#[test]
fn it_does_not_finalize_empty_or_user_as_copyable() {
    let mut empty = Message::new(Author::Assistant, "  ");
    empty.finalize();
    assert!(!empty.is_copyable());

    let mut user = Message::new_user("Hello", None);
    user.finalize();
    assert!(!user.is_copyable());
}

#[test]
fn it_fails_discarding_partial_text() {
    let mut msg = Message::new(Author::Assistant, "Hi th");
    msg.finalize();
    msg.fail("Sorry, something went wrong.");

    assert_eq!(msg.text, "Sorry, something went wrong.");
    assert_eq!(msg.message_type(), MessageType::Error);
    assert!(!msg.is_copyable());

    msg.finalize();
    assert!(!msg.is_copyable());
}

#[test]
fn it_does_not_serialize_copy_affordance() {
    let mut msg = Message::new(Author::Assistant, "Hi there");
    msg.finalize();

    let payload = serde_yaml::to_string(&msg).unwrap();
    assert!(!payload.contains("copyable"));

    let restored: Message = serde_yaml::from_str(&payload).unwrap();
    assert!(!restored.is_copyable());
}

#[test]
fn it_formats_authors_as_labels() {
    assert_eq!(format!("{}:", Author::User), "You:");
    assert_eq!(format!("{}: {}", Author::Assistant, "Hi"), "AI: Hi");
}
