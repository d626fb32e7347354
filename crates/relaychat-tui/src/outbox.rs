//! Local outbound message queue.
//!
//! Stands in for the sync layer: sent text becomes a `user-text` message
//! that the app prepends to the transcript on its next pass.

use relaychat_core::RawMessage;
use relaychat_tui_messages::MessageSender;
use relaychat_util::id::{self, IdPrefix};
use std::cell::RefCell;

#[derive(Debug, Default)]
pub struct Outbox {
    session_id: String,
    pending: RefCell<Vec<RawMessage>>,
}

impl Outbox {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            pending: RefCell::new(Vec::new()),
        }
    }

    /// Take queued messages, oldest first.
    pub fn drain(&self) -> Vec<RawMessage> {
        std::mem::take(&mut *self.pending.borrow_mut())
    }

    pub fn is_empty(&self) -> bool {
        self.pending.borrow().is_empty()
    }
}

impl MessageSender for Outbox {
    fn send_message(&self, session_id: &str, text: &str) {
        if session_id != self.session_id {
            tracing::warn!(
                session_id = %session_id,
                current = %self.session_id,
                "Dropping message for another session"
            );
            return;
        }
        let message = RawMessage::user_text(id::ascending(IdPrefix::Message), text);
        tracing::info!(session_id = %session_id, message_id = %message.id, "Message queued");
        self.pending.borrow_mut().push(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_send_queues_user_text() {
        let outbox = Outbox::new("ses_1");
        outbox.send_message("ses_1", "hello");
        outbox.send_message("ses_1", "again");

        let sent = outbox.drain();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].kind, "user-text");
        assert_eq!(sent[0].payload.get("text"), Some(&json!("hello")));
        assert!(sent[0].id.starts_with("msg_"));
        assert_ne!(sent[0].id, sent[1].id);
        assert!(outbox.is_empty());
    }

    #[test]
    fn test_other_session_is_dropped() {
        let outbox = Outbox::new("ses_1");
        outbox.send_message("ses_2", "hello");
        assert!(outbox.is_empty());
    }
}
