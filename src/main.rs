#![deny(clippy::implicit_return)]
#![allow(clippy::needless_return)]

mod application;
mod configuration;
mod domain;
mod infrastructure;

use std::env;
use std::process;

use anyhow::Error;
use anyhow::Result;
use domain::models::Event;
use domain::services::clipboard::ClipboardService;
use domain::services::AttachmentPreparer;
use domain::services::FileTranscriptStore;
use domain::services::MessageRenderer;
use domain::services::Session;
use infrastructure::compressors::CompressorManager;
use infrastructure::markdown::MarkdownManager;
use infrastructure::transports::TransportManager;
use tokio::io;
use tokio::sync::mpsc;
use tokio::task;
use yansi::Paint;

use crate::application::cli;
use crate::application::repl::Repl;
use crate::application::view::View;
use crate::configuration::Config;

fn handle_error(err: Error) {
    eprintln!(
        "{}",
        Paint::red(format!(
            "Oh no! vdmax has failed with the following app version and error.\n\nVersion: {}\nError: {}",
            env!("CARGO_PKG_VERSION"),
            err
        ))
    );

    let backtrace = err.backtrace();
    if backtrace.to_string() == "disabled backtrace" {
        let args = env::args().collect::<Vec<String>>().join(" ");
        eprintln!("\nRunning the following can help explain further what the issue is:");
        eprintln!("\nRUST_BACKTRACE=1 {args}");
    } else {
        eprintln!("\n{}", backtrace);
    }

    process::exit(1);
}

async fn run() -> Result<()> {
    let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();

    let view = task::spawn(View::start(
        MessageRenderer::new(MarkdownManager::get()),
        event_rx,
    ));

    if let Err(clipboard_err) = ClipboardService::healthcheck() {
        tracing::warn!(err = ?clipboard_err, "Clipboard service is unable to start")
    } else {
        task::spawn(async move {
            if let Err(err) = ClipboardService::start().await {
                tracing::warn!(err = ?err, "Clipboard service stopped");
            }
        });
    }

    let preparer = AttachmentPreparer::new(CompressorManager::get(), Config::compression_options()?);
    let session = Session::start(
        Box::<FileTranscriptStore>::default(),
        TransportManager::get(),
        preparer,
        event_tx.clone(),
    )
    .await;

    Repl::new(session, event_tx)
        .start(io::BufReader::new(io::stdin()))
        .await?;

    // The repl owned the last senders, so the view drains and stops.
    view.await??;
    println!();

    return Ok(());
}

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        let _ = crossterm::terminal::disable_raw_mode();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    let debug_log_dir = env::var("VDMAX_LOG_DIR").unwrap_or_else(|_| {
        return dirs::cache_dir()
            .unwrap_or_else(|| return env::temp_dir())
            .join("vdmax")
            .to_string_lossy()
            .to_string();
    });

    let file_appender = tracing_appender::rolling::never(debug_log_dir, "debug.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    if env::var("RUST_LOG")
        .unwrap_or_else(|_| return "".to_string())
        .contains("vdmax")
    {
        tracing_subscriber::fmt()
            .json()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(writer)
            .init();
    }

    match cli::parse().await {
        Ok(true) => {}
        Ok(false) => process::exit(0),
        Err(err) => {
            handle_error(err);
            return;
        }
    }

    if let Err(err) = run().await {
        handle_error(err);
    }

    process::exit(0);
}
