//! Session descriptors.
//!
//! A session is owned by the sync layer; this crate only reads its id,
//! metadata and agent state.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A chat session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_state: Option<AgentState>,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Whether the agent is currently driven directly by the user.
    pub fn controlled_by_user(&self) -> bool {
        self.agent_state
            .as_ref()
            .is_some_and(|state| state.controlled_by_user)
    }
}

/// Session metadata handed to tool renderers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Working directory of the agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Host the agent runs on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// Human readable session name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Everything else, kept for tool renderers.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Agent state as reported by the agent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentState {
    #[serde(default)]
    pub controlled_by_user: bool,
}
