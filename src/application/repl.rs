#[cfg(test)]
#[path = "repl_test.rs"]
mod tests;

use std::path;

use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;
use tokio::fs;
use tokio::io::AsyncBufRead;
use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;
use tokio::task;

use crate::domain::models::help_text;
use crate::domain::models::Event;
use crate::domain::models::ImageBlob;
use crate::domain::models::SessionError;
use crate::domain::models::SlashCommand;
use crate::domain::services::clipboard::ClipboardService;
use crate::domain::services::Session;

const VALIDATION_HINT: &str =
    "Type a message, or attach an image with /image PATH. /help lists every command.";

/// Joins lines ending in a backslash into one multi-line prompt.
#[derive(Default)]
pub struct PromptBuffer {
    lines: Vec<String>,
}

impl PromptBuffer {
    /// Returns the finished input once a line without a trailing backslash
    /// arrives.
    pub fn push(&mut self, line: &str) -> Option<String> {
        if let Some(stripped) = line.strip_suffix('\\') {
            self.lines.push(stripped.to_string());
            return None;
        }

        self.lines.push(line.to_string());
        let input = self.lines.join("\n");
        self.lines.clear();

        return Some(input);
    }
}

fn confirm_reset() -> Result<bool> {
    let res = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("Delete this conversation and its saved transcript?")
        .default(false)
        .interact()?;

    return Ok(res);
}

pub struct Repl {
    session: Session,
    tx: mpsc::UnboundedSender<Event>,
    confirm: fn() -> Result<bool>,
}

impl Repl {
    pub fn new(session: Session, tx: mpsc::UnboundedSender<Event>) -> Repl {
        return Repl {
            session,
            tx,
            confirm: confirm_reset,
        };
    }

    pub fn session(&self) -> &Session {
        return &self.session;
    }

    fn notice(&self, text: &str) {
        if self.tx.send(Event::Notice(text.to_string())).is_err() {
            tracing::debug!("No view attached, dropping notice");
        }
    }

    async fn attach_image(&mut self, file_path: &str) -> Result<()> {
        if file_path.is_empty() {
            self.notice("Usage: /image PATH");
            return Ok(());
        }

        let bytes = match fs::read(file_path).await {
            Ok(bytes) => bytes,
            Err(err) => {
                self.notice(&format!("Could not read {file_path}: {err}"));
                return Ok(());
            }
        };

        let file_name = path::Path::new(file_path)
            .file_name()
            .map(|name| return name.to_string_lossy().to_string())
            .unwrap_or_else(|| return file_path.to_string());

        let image = ImageBlob::new(&file_name, bytes);
        let reference = image.reference();
        match self.session.attach(image) {
            Ok(()) => {
                self.notice(&format!(
                    "Attached {reference}. It will be sent with your next message."
                ));
            }
            Err(err) => {
                self.notice(&format!("Could not attach {file_name}: {err}"));
            }
        }

        return Ok(());
    }

    async fn clear(&mut self) -> Result<()> {
        let confirm = self.confirm;
        let confirmed = task::spawn_blocking(confirm).await??;
        if !confirmed {
            self.notice("Kept the conversation.");
            return Ok(());
        }

        return self.session.reset().await;
    }

    /// Runs one complete input. Returns false when the user asked to quit.
    pub async fn handle_input(&mut self, input: &str) -> Result<bool> {
        if let Some(command) = SlashCommand::parse(input) {
            if command.is_quit() {
                return Ok(false);
            }

            if command.is_help() {
                self.notice(&help_text());
            } else if command.is_attach_image() {
                self.attach_image(&command.joined_args()).await?;
            } else if command.is_remove_image() {
                if self.session.detach() {
                    self.notice("Removed the pending image.");
                } else {
                    self.notice("There is no pending image.");
                }
            } else if command.is_copy() {
                match ClipboardService::copy_last(self.session.conversation()) {
                    Ok(true) => self.notice("Copied the latest answer to your clipboard."),
                    Ok(false) => self.notice("There is no answer to copy yet."),
                    Err(err) => self.notice(&format!("Clipboard is unavailable: {err}")),
                }
            } else if command.is_clear() {
                self.clear().await?;
            }

            return Ok(true);
        }

        match self.session.submit(input).await {
            Err(SessionError::Validation) => {
                self.notice(VALIDATION_HINT);
            }
            Err(err) => {
                tracing::debug!(error = ?err, phase = %self.session.phase(), "Submission ended with an error");
            }
            Ok(()) => {}
        }

        return Ok(true);
    }

    /// Reads input until end of file or a quit command.
    pub async fn start<R: AsyncBufRead + Unpin>(mut self, reader: R) -> Result<()> {
        let mut lines = reader.lines();
        let mut buffer = PromptBuffer::default();

        while let Some(line) = lines.next_line().await? {
            let input = match buffer.push(&line) {
                Some(input) => input,
                None => continue,
            };

            if !self.handle_input(&input).await? {
                break;
            }
        }

        tracing::debug!(
            messages = self.session().conversation().len(),
            "Input closed"
        );

        return Ok(());
    }
}
