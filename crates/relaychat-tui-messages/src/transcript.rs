//! Inverted transcript list.
//!
//! Messages are handed over newest-first. Row 0 is the most recent message
//! and is drawn at the bottom of the view; rows are keyed by message id so
//! a row keeps its identity while new messages push it up.
//!
//! Scrolling is measured in rows from the bottom. When new messages arrive
//! while the user is reading older content, the offset grows by the height
//! of the new rows so the visible content stays put. Within the auto-scroll
//! threshold the view snaps back to the bottom instead.

use crate::block::{render_block, RenderBlock, RenderContext};
use relaychat_core::config::{DEFAULT_AUTO_SCROLL_THRESHOLD, DEFAULT_FOOTER_PADDING};
use relaychat_core::{Config, Message, Session};
use relaychat_tui_core::Labels;

/// A transcript row.
#[derive(Debug, Clone)]
pub struct Row<'a> {
    /// Stable key: the message id.
    pub key: &'a str,
    pub block: RenderBlock<'a>,
    /// Whether this is the most recent message.
    pub is_last: bool,
}

/// Derive the rows for a newest-first message list.
///
/// Messages without a visible block (tool calls without payload) produce
/// no row; the most-recent flag still belongs to the message at index 0.
pub fn rows<'a>(messages: &'a [Message], ctx: &RenderContext<'a>) -> Vec<Row<'a>> {
    messages
        .iter()
        .enumerate()
        .filter_map(|(index, message)| {
            let is_last = index == 0;
            render_block(message, ctx, is_last).map(|block| Row {
                key: message.id(),
                block,
                is_last,
            })
        })
        .collect()
}

/// Header notice for the session, shown at the visual bottom.
pub fn header_notice<'l>(session: &Session, labels: &'l Labels) -> Option<&'l str> {
    session
        .controlled_by_user()
        .then(|| labels.controlled_by_user())
}

/// Platform insets the footer spacer must clear.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Insets {
    /// Height of the app's top bar.
    pub header_height: u16,
    /// Top safe-area inset.
    pub safe_area_top: u16,
}

/// List behaviour settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListSettings {
    pub auto_scroll_threshold: u16,
    pub footer_padding: u16,
}

impl Default for ListSettings {
    fn default() -> Self {
        Self {
            auto_scroll_threshold: DEFAULT_AUTO_SCROLL_THRESHOLD,
            footer_padding: DEFAULT_FOOTER_PADDING,
        }
    }
}

impl From<&Config> for ListSettings {
    fn from(config: &Config) -> Self {
        Self {
            auto_scroll_threshold: config.auto_scroll_threshold(),
            footer_padding: config.footer_padding(),
        }
    }
}

impl ListSettings {
    /// Height of the spacer drawn above the oldest message.
    pub fn footer_height(&self, insets: Insets) -> u16 {
        insets
            .header_height
            .saturating_add(insets.safe_area_top)
            .saturating_add(self.footer_padding)
    }
}

/// How the message list changed since the last sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListChange {
    /// Same newest message as before.
    Unchanged,
    /// This many messages arrived in front of the previous newest one.
    Prepended(usize),
    /// The previous newest message is gone; the list was replaced.
    Replaced,
}

/// Tracks list identity and the scroll anchor across render passes.
#[derive(Debug, Clone, Default)]
pub struct TranscriptList {
    settings: ListSettings,
    first_key: Option<String>,
    /// Rows scrolled up from the bottom.
    offset: usize,
}

impl TranscriptList {
    pub fn new(settings: ListSettings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    pub fn settings(&self) -> &ListSettings {
        &self.settings
    }

    /// Rows scrolled up from the bottom.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Whether the view is within the auto-scroll threshold of the bottom.
    pub fn is_near_bottom(&self) -> bool {
        self.offset <= self.settings.auto_scroll_threshold as usize
    }

    /// Compare a new message list with the previous one.
    pub fn sync(&mut self, messages: &[Message]) -> ListChange {
        let first = messages.first().map(Message::id);
        let change = match (self.first_key.as_deref(), first) {
            (previous, current) if previous == current => ListChange::Unchanged,
            (None, _) => ListChange::Replaced,
            (Some(previous), _) => match messages.iter().position(|m| m.id() == previous) {
                Some(count) => ListChange::Prepended(count),
                None => ListChange::Replaced,
            },
        };

        if change != ListChange::Unchanged {
            tracing::debug!(?change, messages = messages.len(), "Transcript changed");
        }
        self.first_key = first.map(str::to_string);
        change
    }

    /// Keep the anchor after `rows` of new content were added at the bottom.
    pub fn on_prepended(&mut self, rows: usize) {
        if self.is_near_bottom() {
            self.offset = 0;
        } else {
            self.offset = self.offset.saturating_add(rows);
        }
    }

    /// Forget the scroll position, e.g. after the list was replaced.
    pub fn reset(&mut self) {
        self.offset = 0;
    }

    pub fn scroll_up(&mut self, amount: usize) {
        self.offset = self.offset.saturating_add(amount);
    }

    pub fn scroll_down(&mut self, amount: usize) {
        self.offset = self.offset.saturating_sub(amount);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.offset = 0;
    }

    /// Clamp the offset to the scrollable range.
    pub fn clamp(&mut self, max_offset: usize) {
        self.offset = self.offset.min(max_offset);
    }
}
