//! Event handling for the TUI.

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;
use tokio::sync::mpsc;

/// Events that can occur in the TUI.
#[derive(Debug, Clone)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// The terminal was resized.
    Resize(u16, u16),
    /// A tick event for periodic updates.
    Tick,
    /// Text was pasted (from bracketed paste mode).
    Paste(String),
}

/// Handles events from the terminal.
pub struct EventHandler {
    sender: mpsc::UnboundedSender<Event>,
    receiver: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Create a new event handler.
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self { sender, receiver }
    }

    /// Get a sender for injecting events.
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.sender.clone()
    }

    /// Start polling the terminal on a blocking task.
    pub fn start(&self) -> EventLoopHandle {
        let sender = self.sender.clone();
        let handle = tokio::task::spawn_blocking(move || {
            let tick_rate = Duration::from_millis(250);

            loop {
                let event = match event::poll(tick_rate) {
                    Ok(true) => match event::read() {
                        Ok(CrosstermEvent::Key(key)) => Event::Key(key),
                        Ok(CrosstermEvent::Resize(w, h)) => Event::Resize(w, h),
                        Ok(CrosstermEvent::Paste(text)) => Event::Paste(text),
                        Ok(_) => continue,
                        Err(e) => {
                            tracing::warn!(error = %e, "Failed to read terminal event");
                            continue;
                        }
                    },
                    Ok(false) => Event::Tick,
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to poll terminal events");
                        break;
                    }
                };

                if sender.send(event).is_err() {
                    break;
                }
            }
        });

        EventLoopHandle { handle }
    }

    /// Receive the next event.
    pub async fn next(&mut self) -> Option<Event> {
        self.receiver.recv().await
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to the event loop task.
pub struct EventLoopHandle {
    handle: tokio::task::JoinHandle<()>,
}

impl EventLoopHandle {
    /// Abort the event loop.
    pub fn abort(self) {
        self.handle.abort();
    }
}

/// Check if a key event is Ctrl+C.
pub fn is_quit(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Check if a key event is a plain Enter (no Shift/Alt).
pub fn is_enter(key: &KeyEvent) -> bool {
    key.code == KeyCode::Enter
        && !key
            .modifiers
            .intersects(KeyModifiers::SHIFT | KeyModifiers::ALT)
}
