//! Engine - session orchestration shared by the TUI and headless runners
//!
//! The Engine owns the session state and everything that produces messages
//! for it: the message channel, the stream event channel, the current
//! transport, the debouncer and the reconnect timer. Runners feed it
//! messages; it runs `handler::update()`, executes the returned actions and
//! reports state changes to a [`RenderSink`].

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use logtail_core::prelude::*;
use logtail_core::FilterState;
use logtail_stream::{
    ConnectionId, Connector, OutboundMessage, StreamEvent, TransportEvent, TransportHandle,
    EVENT_CHANNEL_CAPACITY,
};

use crate::config::SessionConfig;
use crate::debounce::{DebounceKey, Debouncer};
use crate::handler::{self, UpdateAction};
use crate::message::Message;
use crate::render::RenderSink;
use crate::state::{ConnectionState, SessionState};

/// Capacity of the message channel
const MESSAGE_CHANNEL_CAPACITY: usize = 256;

/// How long shutdown waits for the transport to report its closure
const CLOSE_TIMEOUT: Duration = Duration::from_secs(1);

/// Lightweight snapshot of state for change detection.
///
/// Captured before message processing, compared after to decide which
/// sink notifications to send.
#[derive(Debug, Clone, PartialEq, Eq)]
struct StateSnapshot {
    connection: ConnectionState,
    buffer_revision: u64,
    filters: FilterState,
}

impl StateSnapshot {
    fn capture(state: &SessionState) -> Self {
        Self {
            connection: state.connection,
            buffer_revision: state.buffer.revision(),
            filters: state.filters.clone(),
        }
    }
}

/// Orchestration engine for one stream session.
pub struct Engine {
    /// TEA session state (the Model)
    pub state: SessionState,

    /// Sender half of the message channel.
    /// Clone this to give to input sources (signal handler, stdin, keys).
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half of the message channel
    msg_rx: mpsc::Receiver<Message>,

    /// Transports report here; kept separate so stream events stay in
    /// delivery order without an extra forwarding hop
    stream_tx: mpsc::Sender<StreamEvent>,
    stream_rx: mpsc::Receiver<StreamEvent>,

    connector: Box<dyn Connector>,

    /// Transport of the current attempt
    transport: Option<TransportHandle>,

    debouncer: Debouncer<DebounceKey>,

    reconnect_timer: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("state", &self.state)
            .field("transport", &self.transport)
            .field("debouncer", &self.debouncer)
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Create an engine. Must be called from within a tokio runtime.
    pub fn new(config: SessionConfig, connector: Box<dyn Connector>) -> Self {
        let debouncer = Debouncer::new(config.debounce);
        let state = SessionState::new(config);
        let (msg_tx, msg_rx) = mpsc::channel::<Message>(MESSAGE_CHANNEL_CAPACITY);
        let (stream_tx, stream_rx) = mpsc::channel::<StreamEvent>(EVENT_CHANNEL_CAPACITY);

        Self {
            state,
            msg_tx,
            msg_rx,
            stream_tx,
            stream_rx,
            connector,
            transport: None,
            debouncer,
            reconnect_timer: None,
        }
    }

    /// Get a clone of the message sender for spawning input sources.
    pub fn msg_sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    /// Check if the session should stop.
    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    /// Push the complete current state to a sink (initial render).
    pub fn sync_sink(&self, sink: &mut dyn RenderSink) {
        sink.status_changed(self.state.status_label(), self.state.is_live());
        sink.filters_changed(&self.state.filters);
        sink.buffer_changed(&self.state.buffer);
    }

    /// Wait for the next message. Stream events take priority so a burst of
    /// frames is applied before queued user input.
    ///
    /// Returns `None` only if every sender is gone, which cannot happen
    /// while the engine holds its own senders.
    pub async fn next_message(&mut self) -> Option<Message> {
        tokio::select! {
            biased;
            Some(event) = self.stream_rx.recv() => Some(Message::Transport(event)),
            msg = self.msg_rx.recv() => msg,
        }
    }

    /// Take the next already-queued message without waiting.
    pub fn try_next_message(&mut self) -> Option<Message> {
        if let Ok(event) = self.stream_rx.try_recv() {
            return Some(Message::Transport(event));
        }
        self.msg_rx.try_recv().ok()
    }

    /// Process a single message through the TEA update cycle.
    ///
    /// Runs follow-up messages to completion, executes every returned action
    /// in order, then notifies `sink` of what changed.
    pub fn process_message(&mut self, msg: Message, sink: &mut dyn RenderSink) {
        let pre = StateSnapshot::capture(&self.state);

        let mut msg = Some(msg);
        while let Some(m) = msg {
            let result = handler::update(&mut self.state, m);
            for action in result.actions {
                self.handle_action(action);
            }
            msg = result.message;
        }

        let post = StateSnapshot::capture(&self.state);
        Self::emit_changes(&self.state, &pre, &post, sink);
    }

    /// Drain and process all queued messages.
    ///
    /// Returns the number of messages processed.
    pub fn drain_pending_messages(&mut self, sink: &mut dyn RenderSink) -> usize {
        let mut count = 0;
        while !self.should_quit() {
            let Some(msg) = self.try_next_message() else {
                break;
            };
            self.process_message(msg, sink);
            count += 1;
        }
        count
    }

    /// Run the session until a `Quit` message is processed.
    pub async fn run(&mut self, sink: &mut dyn RenderSink) {
        self.sync_sink(sink);
        self.process_message(Message::Start, sink);

        while !self.should_quit() {
            match self.next_message().await {
                Some(msg) => self.process_message(msg, sink),
                None => break,
            }
        }

        self.shutdown().await;
    }

    /// Abort timers, close the transport and wait briefly for its closure.
    pub async fn shutdown(&mut self) {
        self.cancel_timers();

        let Some(handle) = self.transport.take() else {
            return;
        };
        let id = handle.id();
        handle.close();

        let wait_closed = async {
            while let Some(event) = self.stream_rx.recv().await {
                if event.id == id && matches!(event.event, TransportEvent::Closed { .. }) {
                    return true;
                }
            }
            false
        };

        match tokio::time::timeout(CLOSE_TIMEOUT, wait_closed).await {
            Ok(true) => info!("Transport {} closed", id),
            Ok(false) | Err(_) => warn!("Transport {} did not confirm closure", id),
        }
    }

    // ─────────────────────────────────────────────────────────
    // Actions
    // ─────────────────────────────────────────────────────────

    fn handle_action(&mut self, action: UpdateAction) {
        match action {
            UpdateAction::Connect(id) => self.connect(id),
            UpdateAction::Send(message) => self.send(message),
            UpdateAction::CloseTransport => {
                if let Some(handle) = &self.transport {
                    handle.close();
                }
            }
            UpdateAction::ScheduleReconnect(delay) => self.schedule_reconnect(delay),
            UpdateAction::Debounce(ticket) => {
                let tx = self.msg_tx.clone();
                self.debouncer.trigger(ticket.key, async move {
                    let _ = tx.send(Message::DebounceElapsed(ticket)).await;
                });
            }
            UpdateAction::CancelDebounces => self.debouncer.cancel_all(),
            UpdateAction::Shutdown => {
                self.cancel_timers();
                if let Some(handle) = &self.transport {
                    handle.close();
                }
            }
        }
    }

    fn connect(&mut self, id: ConnectionId) {
        if let Some(previous) = self.transport.take() {
            previous.close();
        }
        self.transport = Some(self.connector.connect(id, self.stream_tx.clone()));
    }

    fn send(&mut self, message: OutboundMessage) {
        let text = match message.to_text() {
            Ok(text) => text,
            Err(e) => {
                warn!("Dropping outbound message: {}", e);
                return;
            }
        };

        let sent = self
            .transport
            .as_ref()
            .is_some_and(|handle| handle.send(text));
        if !sent {
            debug!("Transport not open, outbound message dropped");
            self.state.stats.dropped_sends += 1;
        }
    }

    fn schedule_reconnect(&mut self, delay: Duration) {
        if let Some(previous) = self.reconnect_timer.take() {
            previous.abort();
        }
        let tx = self.msg_tx.clone();
        self.reconnect_timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(Message::ReconnectDelayElapsed).await;
        }));
    }

    fn cancel_timers(&mut self) {
        self.debouncer.cancel_all();
        if let Some(timer) = self.reconnect_timer.take() {
            timer.abort();
        }
    }

    // ─────────────────────────────────────────────────────────
    // Change notification
    // ─────────────────────────────────────────────────────────

    fn emit_changes(
        state: &SessionState,
        pre: &StateSnapshot,
        post: &StateSnapshot,
        sink: &mut dyn RenderSink,
    ) {
        if pre.connection != post.connection {
            sink.status_changed(state.status_label(), state.is_live());
        }
        if pre.filters != post.filters {
            sink.filters_changed(&state.filters);
        }
        if pre.buffer_revision != post.buffer_revision {
            sink.buffer_changed(&state.buffer);
        }
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.cancel_timers();
    }
}
