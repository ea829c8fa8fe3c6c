//! Interactive session loop

use logtail_app::config::UiSettings;
use logtail_app::message::Message;
use logtail_app::{signals, Engine, SessionConfig};
use logtail_core::prelude::*;
use logtail_stream::Connector;

use crate::event::{self, TerminalEvent};
use crate::render::{self, RedrawTracker};
use crate::terminal;

/// Run the TUI until the user quits or a signal arrives
pub async fn run(
    config: SessionConfig,
    ui: UiSettings,
    connector: Box<dyn Connector>,
) -> Result<()> {
    terminal::install_panic_hook();
    let mut term = terminal::init()?;

    let mut engine = Engine::new(config, connector);
    signals::spawn_signal_handler(engine.msg_sender());

    let result = run_loop(&mut term, &mut engine, &ui);

    engine.shutdown().await;
    ratatui::restore();

    if let Err(e) = &result {
        error!("TUI loop failed: {}", e);
    }
    result
}

fn run_loop(
    terminal: &mut ratatui::DefaultTerminal,
    engine: &mut Engine,
    ui: &UiSettings,
) -> Result<()> {
    let mut tracker = RedrawTracker::new();
    engine.sync_sink(&mut tracker);
    engine.process_message(Message::Start, &mut tracker);

    while !engine.should_quit() {
        engine.drain_pending_messages(&mut tracker);

        if tracker.take() {
            terminal.draw(|frame| render::view(frame, &engine.state, ui))?;
        }

        match event::poll()? {
            Some(TerminalEvent::Message(message)) => {
                tracker.mark();
                engine.process_message(message, &mut tracker);
            }
            Some(TerminalEvent::Resize) => tracker.mark(),
            None => {}
        }
    }

    info!("Session ended");
    Ok(())
}
