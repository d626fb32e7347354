//! Message types for chat transcripts.
//!
//! Messages arrive from the sync layer as [`RawMessage`] values: a stable id,
//! a `kind` discriminant and a kind-specific payload. The classifier turns
//! them into the typed [`Message`] enum that the renderer matches on.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A message as delivered by the sync layer, before classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMessage {
    /// Stable unique identifier.
    pub id: String,

    /// Discriminant, e.g. `user-text` or `agent-event`.
    pub kind: String,

    /// Kind-specific fields.
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl RawMessage {
    /// Create a raw message with an empty payload.
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            payload: Map::new(),
        }
    }

    /// Add a payload field (builder pattern).
    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.payload.insert(field.to_string(), value.into());
        self
    }

    /// A `user-text` message, as produced when the user sends text.
    pub fn user_text(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, "user-text").with("text", text.into())
    }

    /// An `agent-text` message.
    pub fn agent_text(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, "agent-text").with("text", text.into())
    }
}

/// A classified chat message.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    UserText(UserTextMessage),
    AgentText(AgentTextMessage),
    ToolCall(ToolCallMessage),
    AgentEvent(AgentEventMessage),
}

impl Message {
    /// Get the message ID.
    pub fn id(&self) -> &str {
        match self {
            Message::UserText(m) => &m.id,
            Message::AgentText(m) => &m.id,
            Message::ToolCall(m) => &m.id,
            Message::AgentEvent(m) => &m.id,
        }
    }

    /// Check if this is a user message.
    pub fn is_user(&self) -> bool {
        matches!(self, Message::UserText(_))
    }
}

/// Text typed by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserTextMessage {
    pub id: String,

    /// Text as sent.
    pub text: String,

    /// Optional prettier rendition shown instead of `text`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_text: Option<String>,
}

impl UserTextMessage {
    /// The text to show: `display_text` when present and non-empty.
    pub fn shown_text(&self) -> &str {
        match self.display_text.as_deref() {
            Some(display) if !display.is_empty() => display,
            _ => &self.text,
        }
    }
}

/// Text produced by the agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentTextMessage {
    pub id: String,
    pub text: String,
}

/// A tool invocation with its nested child messages.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCallMessage {
    pub id: String,

    /// Tool payload. Absent while the call is still being assembled.
    pub tool: Option<ToolCall>,

    /// Messages produced inside the tool call (e.g. a sub-agent).
    pub children: Vec<Message>,
}

/// Tool call payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub name: String,

    #[serde(default)]
    pub state: ToolState,

    #[serde(default)]
    pub input: Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolState {
    #[default]
    Running,
    Completed,
    Error,
}

/// A system notice from the agent.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentEventMessage {
    pub id: String,
    pub event: AgentEvent,
}

/// Agent event payload.
///
/// Unlike message kinds, unknown event types are tolerated and kept as
/// [`AgentEvent::Unknown`] so the renderer can show a generic label.
#[derive(Debug, Clone, PartialEq)]
pub enum AgentEvent {
    /// The agent switched mode.
    Switch { mode: String },
    /// A plain notice to show verbatim.
    Message { message: String },
    /// Usage limit reached; `ends_at` is epoch seconds as sent, unvalidated.
    LimitReached { ends_at: Value },
    /// Any other event type.
    Unknown { kind: String },
}

impl AgentEvent {
    /// Decode an event payload, never failing.
    pub fn from_value(value: &Value) -> Self {
        let kind = value.get("type").and_then(Value::as_str).unwrap_or_default();
        let text_field = |name: &str| {
            value
                .get(name)
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        match kind {
            "switch" => match text_field("mode") {
                Some(mode) => AgentEvent::Switch { mode },
                None => AgentEvent::Unknown {
                    kind: kind.to_string(),
                },
            },
            "message" => match text_field("message") {
                Some(message) => AgentEvent::Message { message },
                None => AgentEvent::Unknown {
                    kind: kind.to_string(),
                },
            },
            "limit-reached" => AgentEvent::LimitReached {
                ends_at: value.get("endsAt").cloned().unwrap_or(Value::Null),
            },
            other => AgentEvent::Unknown {
                kind: other.to_string(),
            },
        }
    }
}
