#[cfg(test)]
#[path = "view_test.rs"]
mod tests;

use std::io;
use std::io::IsTerminal;
use std::io::Write;
use std::process;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event as term_event;
use crossterm::event::KeyCode;
use crossterm::event::KeyModifiers;
use crossterm::queue;
use crossterm::terminal;
use crossterm::terminal::ClearType;
use tokio::sync::mpsc;
use tokio::task;
use yansi::Paint;

use crate::domain::models::Author;
use crate::domain::models::Event;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::services::MessageRenderer;
use crate::domain::services::Rendered;

pub const PROMPT: &str = "> ";
const COPY_HINT: &str = "(/copy to copy this answer)";

/// Terminal rows a block of text takes up once wrapped at `width` columns.
pub fn count_rows(text: &str, width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let rows = text
        .lines()
        .map(|line| {
            let len = console::measure_text_width(line);
            if len == 0 {
                return 1;
            }
            return (len + width - 1) / width;
        })
        .sum::<usize>();

    return u16::try_from(rows).unwrap_or(u16::MAX);
}

fn discard_keys(stop: &AtomicBool) -> Result<()> {
    while !stop.load(Ordering::SeqCst) {
        if !term_event::poll(Duration::from_millis(50))? {
            continue;
        }

        if let term_event::Event::Key(key) = term_event::read()? {
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                terminal::disable_raw_mode()?;
                println!();
                process::exit(130);
            }
        }
    }

    return Ok(());
}

/// Keeps the keyboard out of the transcript while a submission runs. Raw
/// mode turns echo off and keys typed meanwhile are read and dropped, so the
/// in-place redraw only ever sees rows the view printed itself.
struct KeyboardLock {
    stop: Arc<AtomicBool>,
    handle: task::JoinHandle<Result<()>>,
}

impl KeyboardLock {
    fn engage() -> Option<KeyboardLock> {
        if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
            return None;
        }

        if let Err(err) = terminal::enable_raw_mode() {
            tracing::debug!(error = ?err, "Unable to lock keyboard input");
            return None;
        }

        let stop = Arc::new(AtomicBool::new(false));
        let flag = stop.clone();
        let handle = task::spawn_blocking(move || return discard_keys(&flag));

        return Some(KeyboardLock { stop, handle });
    }

    async fn release(self) -> Result<()> {
        self.stop.store(true, Ordering::SeqCst);
        let res = self.handle.await;
        terminal::disable_raw_mode()?;

        return res?;
    }
}

struct LiveMessage {
    idx: usize,
    rows: u16,
}

/// Mirrors the session on a plain terminal. The newest assistant message is
/// redrawn in place as it streams; everything above it is left alone.
pub struct View {
    renderer: MessageRenderer,
    live: Option<LiveMessage>,
    width: u16,
    raw: bool,
}

impl View {
    pub fn new(renderer: MessageRenderer, width: u16) -> View {
        return View {
            renderer,
            live: None,
            width,
            raw: false,
        };
    }

    pub fn format_message(&self, message: &Message) -> String {
        let label = Paint::new(format!("{}:", message.author)).bold();
        let rendered = self.renderer.render(message);
        let body = match rendered {
            Rendered::Emphasis(_) => Paint::new(rendered.text()).italic().to_string(),
            Rendered::Markup(_) => rendered.text().trim_end().to_string(),
            Rendered::Plain(_) if message.message_type() == MessageType::Error => {
                Paint::red(rendered.text()).to_string()
            }
            Rendered::Plain(_) => rendered.text().to_string(),
        };

        let mut res = format!("{label}\n{body}\n");
        if message.is_copyable() {
            res = format!("{res}{}\n", Paint::new(COPY_HINT).dimmed());
        }

        return res;
    }

    /// Writes text, returning the carriage with every newline when the
    /// terminal is in raw mode.
    fn put<W: Write>(&self, out: &mut W, text: &str) -> Result<()> {
        if self.raw {
            write!(out, "{}", text.replace('\n', "\r\n"))?;
        } else {
            write!(out, "{text}")?;
        }

        return Ok(());
    }

    fn print_message<W: Write>(&mut self, out: &mut W, idx: usize, message: &Message) -> Result<()> {
        let text = self.format_message(message);
        self.put(out, &text)?;

        if message.author == Author::Assistant {
            self.live = Some(LiveMessage {
                idx,
                rows: count_rows(&text, self.width),
            });
        } else {
            self.live = None;
        }

        return Ok(());
    }

    fn redraw_message<W: Write>(&mut self, out: &mut W, idx: usize, message: &Message) -> Result<()> {
        if let Some(live) = &self.live {
            if live.idx == idx && live.rows > 0 {
                queue!(
                    out,
                    cursor::MoveToPreviousLine(live.rows),
                    terminal::Clear(ClearType::FromCursorDown)
                )?;
            }
        }

        return self.print_message(out, idx, message);
    }

    pub fn set_width(&mut self, width: u16) {
        self.width = width;
    }

    pub fn set_raw(&mut self, raw: bool) {
        self.raw = raw;
    }

    /// Applies one session event to the terminal.
    pub fn handle<W: Write>(&mut self, out: &mut W, event: Event) -> Result<()> {
        match event {
            Event::TranscriptLoaded(messages) => {
                self.live = None;
                self.put(out, "\n")?;
                for (idx, message) in messages.iter().enumerate() {
                    self.print_message(out, idx, message)?;
                    self.put(out, "\n")?;
                }
                self.live = None;
                self.put(out, PROMPT)?;
            }
            Event::MessageAdded(idx, message) => {
                self.print_message(out, idx, &message)?;
            }
            Event::MessageUpdated(idx, message) => {
                self.redraw_message(out, idx, &message)?;
            }
            Event::InputUnlocked() => {
                self.live = None;
                self.put(out, "\n")?;
                self.put(out, PROMPT)?;
            }
            Event::Notice(text) => {
                self.put(out, &format!("{text}\n"))?;
                self.put(out, PROMPT)?;
            }
            Event::InputLocked() => {}
            Event::PhaseChanged(phase) => {
                tracing::debug!(%phase, "View phase");
            }
        }

        out.flush()?;
        return Ok(());
    }

    pub async fn start(
        renderer: MessageRenderer,
        mut rx: mpsc::UnboundedReceiver<Event>,
    ) -> Result<()> {
        let (width, _) = terminal::size().unwrap_or((80, 24));
        let mut view = View::new(renderer, width);
        let mut stdout = io::stdout();
        let mut keyboard: Option<KeyboardLock> = None;

        while let Some(event) = rx.recv().await {
            if let Ok((width, _)) = terminal::size() {
                view.set_width(width);
            }

            match event {
                Event::InputLocked() if keyboard.is_none() => {
                    keyboard = KeyboardLock::engage();
                    view.set_raw(keyboard.is_some());
                }
                Event::InputUnlocked() => {
                    if let Some(lock) = keyboard.take() {
                        lock.release().await?;
                    }
                    view.set_raw(false);
                }
                _ => {}
            }

            view.handle(&mut stdout, event)?;
        }

        if let Some(lock) = keyboard.take() {
            lock.release().await?;
        }

        return Ok(());
    }
}
