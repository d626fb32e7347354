//! Message classification.
//!
//! Maps a raw message's `kind` tag onto the typed [`Message`] enum. The set
//! of kinds is closed: an unknown kind is a [`ClassifyError::UnknownKind`]
//! and is propagated to the caller rather than rendered with a default.

use crate::error::ClassifyError;
use crate::message::{
    AgentEvent, AgentEventMessage, AgentTextMessage, Message, RawMessage, ToolCall,
    ToolCallMessage, UserTextMessage,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// The closed set of message kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    UserText,
    AgentText,
    ToolCall,
    AgentEvent,
}

impl MessageKind {
    /// Every supported kind.
    pub const ALL: [MessageKind; 4] = [
        MessageKind::UserText,
        MessageKind::AgentText,
        MessageKind::ToolCall,
        MessageKind::AgentEvent,
    ];

    /// Wire tag for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::UserText => "user-text",
            MessageKind::AgentText => "agent-text",
            MessageKind::ToolCall => "tool-call",
            MessageKind::AgentEvent => "agent-event",
        }
    }

    /// Parse a wire tag.
    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == tag)
    }
}

#[derive(Deserialize)]
struct ToolCallPayload {
    #[serde(default)]
    tool: Option<ToolCall>,
    #[serde(default)]
    children: Vec<RawMessage>,
}

/// Classify a single raw message.
pub fn classify(raw: &RawMessage) -> Result<Message, ClassifyError> {
    let kind = MessageKind::parse(&raw.kind).ok_or_else(|| ClassifyError::UnknownKind {
        id: raw.id.clone(),
        kind: raw.kind.clone(),
    })?;

    let message = match kind {
        MessageKind::UserText => Message::UserText(decode::<UserTextMessage>(raw, kind)?),
        MessageKind::AgentText => Message::AgentText(decode::<AgentTextMessage>(raw, kind)?),
        MessageKind::ToolCall => {
            let payload = decode::<ToolCallPayload>(raw, kind)?;
            Message::ToolCall(ToolCallMessage {
                id: raw.id.clone(),
                tool: payload.tool,
                children: classify_all(&payload.children)?,
            })
        }
        MessageKind::AgentEvent => Message::AgentEvent(AgentEventMessage {
            id: raw.id.clone(),
            event: AgentEvent::from_value(raw.payload.get("event").unwrap_or(&Value::Null)),
        }),
    };
    Ok(message)
}

/// Classify a list, failing on the first unsupported message.
pub fn classify_all(raws: &[RawMessage]) -> Result<Vec<Message>, ClassifyError> {
    raws.iter().map(classify).collect()
}

fn decode<T: DeserializeOwned>(raw: &RawMessage, kind: MessageKind) -> Result<T, ClassifyError> {
    let mut object = raw.payload.clone();
    object.insert("id".to_string(), Value::String(raw.id.clone()));
    serde_json::from_value(Value::Object(object)).map_err(|source| {
        ClassifyError::MalformedPayload {
            id: raw.id.clone(),
            kind: kind.as_str(),
            source,
        }
    })
}
