use super::help_text;
use super::SlashCommand;

#[test]
fn it_parse_empty_string() {
    let text = "";
    assert!(SlashCommand::parse(text).is_none());
}

#[test]
fn it_parse_space_only() {
    let text = " ";
    assert!(SlashCommand::parse(text).is_none());
}

#[test]
fn it_parse_single_slash() {
    let text = "/";
    assert!(SlashCommand::parse(text).is_none());
}

#[test]
fn it_parse_invalid_prefix() {
    let text = "!q";
    assert!(SlashCommand::parse(text).is_none());
}

#[test]
fn it_parse_plain_prompt() {
    assert!(SlashCommand::parse("what is /q for?").is_none());
}

#[test]
fn it_parse_valid_prefix() {
    let text = "/q";
    let cmd = SlashCommand::parse(text);
    assert!(cmd.is_some());
    assert_eq!(cmd.unwrap().command, "/q");
}

#[test]
fn it_is_quit() {
    for text in ["/q", "/quit", "/exit"] {
        let cmd = SlashCommand::parse(text).unwrap();
        assert!(cmd.is_quit());
    }
}

#[test]
fn it_is_not_quit() {
    let cmd = SlashCommand::parse("/copy").unwrap();
    assert!(!cmd.is_quit());
}

#[test]
fn it_is_attach_image_with_path() {
    let cmd = SlashCommand::parse("/image ./photos/my cat.png").unwrap();
    assert!(cmd.is_attach_image());
    assert_eq!(cmd.joined_args(), "./photos/my cat.png");
}

#[test]
fn it_is_short_attach_image() {
    let cmd = SlashCommand::parse("/i cat.png").unwrap();
    assert!(cmd.is_attach_image());
    assert_eq!(cmd.args, vec!["cat.png".to_string()]);
}

#[test]
fn it_is_remove_image() {
    assert!(SlashCommand::parse("/rm").unwrap().is_remove_image());
    assert!(SlashCommand::parse("/remove").unwrap().is_remove_image());
}

#[test]
fn it_is_copy() {
    assert!(SlashCommand::parse("/c").unwrap().is_copy());
    assert!(SlashCommand::parse("/copy").unwrap().is_copy());
}

#[test]
fn it_is_clear() {
    assert!(SlashCommand::parse("/clear").unwrap().is_clear());
    assert!(SlashCommand::parse("/reset").unwrap().is_clear());
}

#[test]
fn it_is_help() {
    assert!(SlashCommand::parse("  /h ").unwrap().is_help());
    assert!(SlashCommand::parse("/help").unwrap().is_help());
}

#[test]
fn it_lists_every_command_in_help() {
    let text = help_text();
    for line in text.lines().filter(|line| return line.starts_with("- /")) {
        let name = line
            .trim_start_matches("- ")
            .split(' ')
            .next()
            .unwrap_or_default();
        assert!(SlashCommand::parse(name).is_some(), "{name}");
    }
    assert!(text.starts_with("COMMANDS:"));
}
