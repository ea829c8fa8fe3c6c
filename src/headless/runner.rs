//! Headless runner: session loop without a TUI
//!
//! Entries go to stdout in the chosen format. Filters can be changed by
//! writing commands to stdin, one per line.

use std::io::BufRead;

use tokio::sync::mpsc;
use tracing::{error, info, warn};

use logtail_app::config::UiSettings;
use logtail_app::message::Message;
use logtail_app::{signals, Engine, RenderSink, SessionConfig};
use logtail_core::prelude::*;
use logtail_core::{FilterField, LevelOption};
use logtail_stream::Connector;

use super::sink::{JsonSink, TextFormat, TextSink};
use super::HeadlessEvent;
use crate::cli::OutputFormat;

/// Run in headless mode until `quit` or a signal
pub async fn run_headless(
    config: SessionConfig,
    url: &str,
    format: OutputFormat,
    ui: UiSettings,
    connector: Box<dyn Connector>,
) -> Result<()> {
    info!("═══════════════════════════════════════════════════════");
    info!("logtail starting in HEADLESS mode ({:?})", format);
    info!("Source: {}", url);
    info!("═══════════════════════════════════════════════════════");

    let mut engine = Engine::new(config, connector);
    signals::spawn_signal_handler(engine.msg_sender());

    let stdin_tx = engine.msg_sender();
    std::thread::spawn(move || {
        spawn_stdin_reader_blocking(stdin_tx);
    });

    let stdout = std::io::stdout();
    let mut sink: Box<dyn RenderSink> = match format {
        OutputFormat::Lines => Box::new(TextSink::new(stdout, TextFormat::Lines, ui)),
        OutputFormat::Html => Box::new(TextSink::new(stdout, TextFormat::Html, ui)),
        OutputFormat::Json => {
            let log_file = logtail_core::logging::get_current_log_file()
                .ok()
                .map(|p| p.display().to_string());
            HeadlessEvent::started(url, log_file).emit();
            Box::new(JsonSink::new(stdout))
        }
    };

    engine.run(sink.as_mut()).await;

    if format == OutputFormat::Json {
        HeadlessEvent::stopped(&engine.state.stats).emit();
    }

    info!("logtail headless mode exiting");
    Ok(())
}

/// Parse one stdin command line.
///
/// `Ok(None)` for blank lines; `Err` carries the unrecognized input.
pub fn parse_command(line: &str) -> std::result::Result<Option<Message>, String> {
    let trimmed = line.trim();
    let (command, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (trimmed, ""),
    };

    let message = match command {
        "" => return Ok(None),
        "q" | "quit" => Message::Quit,
        "clear" => Message::ClearLogs,
        "query" => Message::filter(FilterField::Query, rest),
        "service" => Message::filter(FilterField::Service, rest),
        "level" => {
            let value = match LevelOption::from_filter(rest) {
                Some(option) => option.as_filter().to_string(),
                None => rest.to_string(),
            };
            Message::filter(FilterField::Level, value)
        }
        _ => return Err(trimmed.to_string()),
    };
    Ok(Some(message))
}

/// Read stdin commands and forward them to the session (blocking)
fn spawn_stdin_reader_blocking(msg_tx: mpsc::Sender<Message>) {
    let stdin = std::io::stdin();
    let reader = stdin.lock();

    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to read stdin: {}", e);
                break;
            }
        };

        match parse_command(&line) {
            Ok(Some(message)) => {
                let quit = message == Message::Quit;
                info!("Stdin: {:?}", message);
                if msg_tx.blocking_send(message).is_err() || quit {
                    break;
                }
            }
            Ok(None) => {}
            Err(unknown) => warn!("Unknown stdin command: {}", unknown),
        }
    }

    info!("Stdin reader exiting");
}
