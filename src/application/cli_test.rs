use anyhow::Result;

use super::build;
use super::format_transcript;
use crate::configuration::ConfigKey;
use crate::domain::models::AttachmentRef;
use crate::domain::models::Author;
use crate::domain::models::Conversation;
use crate::domain::models::Message;

#[test]
fn it_formats_transcript() {
    let conversation = Conversation::from_messages(vec![
        Message::new_user(
            "Hello\nthere",
            Some(AttachmentRef {
                file_name: "cat.png".to_string(),
                size_bytes: 2048,
            }),
        ),
        Message::new(Author::Assistant, "Hi there"),
    ]);

    insta::assert_snapshot!(format_transcript(&conversation), @r###"
    You: Hello
    there
    [image: cat.png (2.0 KB)]

    AI: Hi there
    "###);
}

#[test]
fn it_defaults_to_chat_without_subcommand() -> Result<()> {
    let matches = build().try_get_matches_from(vec!["vdmax"])?;
    assert!(matches.subcommand().is_none());
    return Ok(());
}

#[test]
fn it_accepts_global_args_after_subcommand() -> Result<()> {
    let matches =
        build().try_get_matches_from(vec!["vdmax", "chat", "--chat-url", "http://127.0.0.1:9000/chat"])?;
    let (name, subcmd_matches) = matches.subcommand().unwrap();
    assert_eq!(name, "chat");
    assert_eq!(
        subcmd_matches
            .get_one::<String>(&ConfigKey::ChatURL.to_string())
            .unwrap(),
        "http://127.0.0.1:9000/chat"
    );
    return Ok(());
}

#[test]
fn it_parses_transcript_subcommands() -> Result<()> {
    for name in ["path", "show", "clear"] {
        let matches = build().try_get_matches_from(vec!["vdmax", "transcript", name])?;
        let (_, transcript_matches) = matches.subcommand().unwrap();
        assert_eq!(transcript_matches.subcommand_name(), Some(name));
    }
    return Ok(());
}

#[test]
fn it_rejects_unknown_subcommands() {
    let res = build().try_get_matches_from(vec!["vdmax", "sessions"]);
    assert!(res.is_err());
}

#[test]
fn it_passes_clap_debug_asserts() {
    build().debug_assert();
}
