//! Transcript rendering for the relaychat TUI.
//!
//! - [`block`]: message to block mapping and quick-reply actions
//! - [`agent_event`]: text for agent events
//! - [`tool`]: pluggable tool call renderers
//! - [`transcript`]: inverted list ordering, keys and scroll anchoring
//! - [`widget`]: the ratatui widget drawing it all

pub mod agent_event;
pub mod block;
pub mod text;
pub mod tool;
pub mod transcript;
pub mod widget;

pub use block::{
    render_block, MessageSender, OptionAction, OptionButton, RenderBlock, RenderContext, TextBlock,
};
pub use tool::{DefaultToolRenderer, ToolContext, ToolRenderer};
pub use transcript::{Insets, ListChange, ListSettings, Row, TranscriptList};
pub use widget::TranscriptView;
