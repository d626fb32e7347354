//! Core logic for relaychat.
//!
//! This crate holds everything that is independent of the terminal:
//! - Configuration management (global + project files, env overrides)
//! - The chat message model and its classifier
//! - Quick-reply option extraction and custom-input keyword matching
//! - Session descriptors
//! - Per-session input history with up/down recall

pub mod classify;
pub mod config;
pub mod error;
pub mod history;
pub mod message;
pub mod options;
pub mod session;

pub use classify::{classify, classify_all, MessageKind};
pub use config::Config;
pub use error::{ClassifyError, ConfigError, CoreError, CoreResult};
pub use history::{InputHistory, NavigationState};
pub use message::{
    AgentEvent, AgentEventMessage, AgentTextMessage, Message, RawMessage, ToolCall,
    ToolCallMessage, ToolState, UserTextMessage,
};
pub use options::{extract_options, CustomInputKeywords, QuickReply};
pub use session::{AgentState, Metadata, Session};
