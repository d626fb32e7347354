//! Block rendering: one transcript block per classified message.
//!
//! Blocks are derived on every render pass and borrow from the message list.
//! Whether a block is the most recent one is decided by the list and passed
//! in; only that block gets actionable quick-reply options.

use crate::agent_event::event_text;
use crate::tool::ToolContext;
use relaychat_core::{extract_options, CustomInputKeywords, Message, QuickReply, Session};
use relaychat_tui_core::Labels;

/// Session-level inputs for block rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub session: &'a Session,
    pub labels: &'a Labels,
    pub keywords: &'a CustomInputKeywords,
    /// Whether the caller can pre-fill the input field.
    pub can_fill_input: bool,
}

/// A renderable block.
#[derive(Debug, Clone)]
pub enum RenderBlock<'a> {
    /// Right-aligned bubble for the user's own text.
    UserBubble(TextBlock),
    /// Left-aligned agent text.
    AgentText(TextBlock),
    /// Delegated to a tool renderer.
    Tool(ToolContext<'a>),
    /// Centered system notice.
    Event { id: &'a str, text: String },
}

impl RenderBlock<'_> {
    /// Stable key of the block: its message id.
    pub fn key(&self) -> &str {
        match self {
            RenderBlock::UserBubble(block) | RenderBlock::AgentText(block) => &block.id,
            RenderBlock::Tool(ctx) => ctx.message_id,
            RenderBlock::Event { id, .. } => id,
        }
    }

    /// Quick-reply buttons of a text block.
    pub fn options(&self) -> &[OptionButton] {
        match self {
            RenderBlock::UserBubble(block) | RenderBlock::AgentText(block) => &block.options,
            _ => &[],
        }
    }
}

/// Body text with its quick-reply options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBlock {
    pub id: String,
    pub body: String,
    pub options: Vec<OptionButton>,
}

/// A quick-reply option as rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionButton {
    pub reply: QuickReply,
    /// What pressing the option does. `None` for inert options.
    pub action: Option<OptionAction>,
}

impl OptionButton {
    pub fn is_interactive(&self) -> bool {
        self.action.is_some()
    }
}

/// Outcome of pressing a quick-reply option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionAction {
    /// Send the text as a new message in the session.
    Send { session_id: String, text: String },
    /// Put the text in the input field for the user to complete.
    FillInput(String),
}

impl OptionAction {
    /// Decide what pressing `label` does.
    ///
    /// Custom-input labels fill the input with empty text, but only when
    /// there is an input to fill; otherwise the label is sent.
    pub fn resolve(
        label: &str,
        session_id: &str,
        keywords: &CustomInputKeywords,
        can_fill_input: bool,
    ) -> Self {
        if can_fill_input && keywords.matches(label) {
            OptionAction::FillInput(String::new())
        } else {
            OptionAction::Send {
                session_id: session_id.to_string(),
                text: label.to_string(),
            }
        }
    }

    /// Carry out the action.
    pub fn perform(&self, sender: &dyn MessageSender, fill_input: Option<&mut dyn FnMut(&str)>) {
        match self {
            OptionAction::Send { session_id, text } => {
                tracing::info!(session_id = %session_id, "Sending quick reply");
                sender.send_message(session_id, text);
            }
            OptionAction::FillInput(text) => match fill_input {
                Some(fill) => fill(text.as_str()),
                None => tracing::warn!("Quick reply wants the input filled but no input is attached"),
            },
        }
    }
}

/// Outbound messaging collaborator. Fire-and-forget.
pub trait MessageSender {
    fn send_message(&self, session_id: &str, text: &str);
}

/// Map a message to its block.
///
/// Returns `None` for tool calls without a payload.
pub fn render_block<'a>(
    message: &'a Message,
    ctx: &RenderContext<'a>,
    is_last: bool,
) -> Option<RenderBlock<'a>> {
    let block = match message {
        Message::UserText(m) => {
            RenderBlock::UserBubble(text_block(&m.id, m.shown_text(), ctx, is_last))
        }
        Message::AgentText(m) => RenderBlock::AgentText(text_block(&m.id, &m.text, ctx, is_last)),
        Message::ToolCall(m) => {
            let tool = m.tool.as_ref()?;
            RenderBlock::Tool(ToolContext {
                tool,
                metadata: ctx.session.metadata.as_ref(),
                children: &m.children,
                session_id: &ctx.session.id,
                message_id: &m.id,
            })
        }
        Message::AgentEvent(m) => RenderBlock::Event {
            id: &m.id,
            text: event_text(&m.event, ctx.labels),
        },
    };
    Some(block)
}

fn text_block(id: &str, text: &str, ctx: &RenderContext<'_>, is_last: bool) -> TextBlock {
    let (body, replies) = extract_options(text);
    let options = replies
        .into_iter()
        .map(|reply| {
            let action = is_last.then(|| {
                OptionAction::resolve(&reply.title, &ctx.session.id, ctx.keywords, ctx.can_fill_input)
            });
            OptionButton { reply, action }
        })
        .collect();

    TextBlock {
        id: id.to_string(),
        body,
        options,
    }
}
