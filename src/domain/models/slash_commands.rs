#[cfg(test)]
#[path = "slash_commands_test.rs"]
mod tests;

pub struct SlashCommand {
    command: String,
    pub args: Vec<String>,
}

impl SlashCommand {
    pub fn parse(text: &str) -> Option<SlashCommand> {
        let mut args = text
            .trim()
            .split(' ')
            .filter(|e| return !e.is_empty())
            .map(|e| return e.to_string())
            .collect::<Vec<String>>();
        if args.is_empty() {
            return None;
        }
        let prefix = args[0].to_string();
        args.remove(0);

        let cmd = SlashCommand {
            command: prefix,
            args,
        };
        if cmd.is_quit()
            || cmd.is_attach_image()
            || cmd.is_remove_image()
            || cmd.is_copy()
            || cmd.is_clear()
            || cmd.is_help()
        {
            return Some(cmd);
        }

        return None;
    }

    pub fn is_quit(&self) -> bool {
        return ["/q", "/quit", "/exit"].contains(&self.command.as_str());
    }

    pub fn is_attach_image(&self) -> bool {
        return ["/i", "/image"].contains(&self.command.as_str());
    }

    pub fn is_remove_image(&self) -> bool {
        return ["/rm", "/remove"].contains(&self.command.as_str());
    }

    pub fn is_copy(&self) -> bool {
        return ["/c", "/copy"].contains(&self.command.as_str());
    }

    pub fn is_clear(&self) -> bool {
        return ["/clear", "/reset"].contains(&self.command.as_str());
    }

    pub fn is_help(&self) -> bool {
        return ["/h", "/help"].contains(&self.command.as_str());
    }

    /// Arguments joined back together, so paths with spaces survive.
    pub fn joined_args(&self) -> String {
        return self.args.join(" ");
    }
}

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /image (/i) [PATH] - Attaches an image to the next prompt. Supports png, jpg, jpeg, gif and webp.
- /remove (/rm) - Removes the pending image attachment.
- /copy (/c) - Copies the latest answer to your clipboard.
- /clear (/reset) - Deletes the conversation and its saved transcript, after confirmation.
- /help (/h) - Provides this help menu.
- /quit (/q, /exit) - Exits vdmax.

INPUT:
- Enter - Submits the prompt.
- \ + Enter - Continues the prompt on a new line.
        "#;

    return text.trim().to_string();
}
