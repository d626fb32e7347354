//! Transcript widget.
//!
//! Lays the rows of a [`TranscriptList`] out bottom-up: the footer spacer
//! first, then messages from oldest to newest, then the session header
//! notice. The view is anchored to the bottom and scrolled by the list's
//! offset.

use crate::block::{OptionButton, RenderBlock, RenderContext};
use crate::text::{display_width, sanitize_for_display, wrap_text};
use crate::tool::{DefaultToolRenderer, ToolRenderer};
use crate::transcript::{header_notice, rows, Insets, ListChange, ListSettings, TranscriptList};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};
use ratatui::Frame;
use relaychat_core::{CustomInputKeywords, Message, Session};
use relaychat_tui_core::{Labels, Theme};

/// Minimum width of a user bubble's text area.
const MIN_BUBBLE_WIDTH: usize = 10;

/// Transcript view state.
pub struct TranscriptView {
    theme: Theme,
    labels: Labels,
    keywords: CustomInputKeywords,
    tool_renderer: Box<dyn ToolRenderer>,
    list: TranscriptList,
    insets: Insets,
    focused: bool,
    last_height: u16,
}

impl TranscriptView {
    pub fn new(theme: Theme, settings: ListSettings) -> Self {
        Self {
            theme,
            labels: Labels::default(),
            keywords: CustomInputKeywords::default(),
            tool_renderer: Box::new(DefaultToolRenderer),
            list: TranscriptList::new(settings),
            insets: Insets::default(),
            focused: true,
            last_height: 0,
        }
    }

    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_keywords(mut self, keywords: CustomInputKeywords) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn with_tool_renderer(mut self, renderer: Box<dyn ToolRenderer>) -> Self {
        self.tool_renderer = renderer;
        self
    }

    pub fn with_insets(mut self, insets: Insets) -> Self {
        self.insets = insets;
        self
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn list(&self) -> &TranscriptList {
        &self.list
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn scroll_up(&mut self, amount: usize) {
        self.list.scroll_up(amount);
    }

    pub fn scroll_down(&mut self, amount: usize) {
        self.list.scroll_down(amount);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.list.scroll_to_bottom();
    }

    /// Rows per page for PageUp/PageDown.
    pub fn page_size(&self) -> usize {
        (self.last_height as usize).saturating_sub(2).max(1)
    }

    fn context<'a>(&'a self, session: &'a Session, can_fill_input: bool) -> RenderContext<'a> {
        RenderContext {
            session,
            labels: &self.labels,
            keywords: &self.keywords,
            can_fill_input,
        }
    }

    /// Options of the most recent message, actionable.
    pub fn latest_options(
        &self,
        messages: &[Message],
        session: &Session,
        can_fill_input: bool,
    ) -> Vec<OptionButton> {
        let ctx = self.context(session, can_fill_input);
        rows(&messages[..messages.len().min(1)], &ctx)
            .first()
            .map(|row| row.block.options().to_vec())
            .unwrap_or_default()
    }

    /// Build every line of the transcript in visual order, top to bottom.
    ///
    /// Also updates the scroll anchor for messages that arrived since the
    /// previous call.
    pub fn layout(
        &mut self,
        messages: &[Message],
        session: &Session,
        can_fill_input: bool,
        width: usize,
    ) -> Vec<Line<'static>> {
        let change = self.list.sync(messages);
        let ctx = self.context(session, can_fill_input);
        let all_rows = rows(messages, &ctx);

        let new_rows = match change {
            ListChange::Prepended(count) => Some(
                rows(&messages[..count], &ctx)
                    .iter()
                    .map(|row| self.block_lines(&row.block, width).len() + 1)
                    .sum::<usize>(),
            ),
            ListChange::Replaced => None,
            ListChange::Unchanged => Some(0),
        };

        let mut lines: Vec<Line<'static>> = Vec::new();
        let footer = self.list.settings().footer_height(self.insets);
        lines.extend((0..footer).map(|_| Line::default()));

        for row in all_rows.iter().rev() {
            lines.extend(self.block_lines(&row.block, width));
            lines.push(Line::default());
        }

        if let Some(notice) = header_notice(session, &self.labels) {
            lines.push(centered(notice, width, self.theme.warning_style()));
        }

        match new_rows {
            Some(0) => {}
            Some(added) => self.list.on_prepended(added),
            None => self.list.reset(),
        }
        lines
    }

    /// Render the transcript for a newest-first message list.
    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        messages: &[Message],
        session: &Session,
        can_fill_input: bool,
    ) {
        self.last_height = area.height;
        let width = area.width.saturating_sub(1) as usize;
        let height = area.height as usize;

        let mut lines = self.layout(messages, session, can_fill_input, width);
        if lines.len() < height {
            let mut padded = vec![Line::default(); height - lines.len()];
            padded.append(&mut lines);
            lines = padded;
        }

        let total = lines.len();
        let max_offset = total.saturating_sub(height);
        self.list.clamp(max_offset);
        let top = max_offset - self.list.offset();

        let paragraph = Paragraph::new(Text::from(lines)).scroll((top.min(u16::MAX as usize) as u16, 0));
        frame.render_widget(paragraph, area);

        if max_offset > 0 && self.focused && area.width > 0 {
            let scrollbar = Scrollbar::default()
                .orientation(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None)
                .track_symbol(Some("│"))
                .thumb_symbol("█");
            let mut state = ScrollbarState::new(max_offset).position(top);
            frame.render_stateful_widget(
                scrollbar,
                Rect::new(area.x + area.width - 1, area.y, 1, area.height),
                &mut state,
            );
        }
    }

    fn block_lines(&self, block: &RenderBlock<'_>, width: usize) -> Vec<Line<'static>> {
        let theme = &self.theme;
        match block {
            RenderBlock::UserBubble(text) => {
                let mut lines = bubble_lines(&text.body, width, theme.user_style());
                for line in option_lines(&text.options, theme) {
                    lines.push(right_align(line, width));
                }
                lines
            }
            RenderBlock::AgentText(text) => {
                let body = sanitize_for_display(&text.body);
                let mut lines: Vec<Line<'static>> = wrap_text(&body, width.saturating_sub(2))
                    .into_iter()
                    .map(|l| {
                        Line::from(vec![
                            Span::raw("  "),
                            Span::styled(l, theme.assistant_style()),
                        ])
                    })
                    .collect();
                for line in option_lines(&text.options, theme) {
                    let mut spans = vec![Span::raw("  ")];
                    spans.extend(line.spans);
                    lines.push(Line::from(spans));
                }
                lines
            }
            RenderBlock::Tool(ctx) => self.tool_renderer.render(ctx, theme, width),
            RenderBlock::Event { text, .. } => wrap_text(&sanitize_for_display(text), width)
                .iter()
                .map(|l| centered(l, width, theme.event_style()))
                .collect(),
        }
    }
}

/// Right-aligned bubble, padded by one cell on each side.
fn bubble_lines(body: &str, width: usize, style: Style) -> Vec<Line<'static>> {
    let max_inner = (width * 3 / 4).max(MIN_BUBBLE_WIDTH).min(width.saturating_sub(2).max(1));
    let wrapped = wrap_text(&sanitize_for_display(body), max_inner);
    let inner = wrapped.iter().map(|l| display_width(l)).max().unwrap_or(0);

    wrapped
        .into_iter()
        .map(|l| {
            let fill = inner - display_width(&l);
            let bubble = format!(" {l}{} ", " ".repeat(fill));
            right_align(Line::from(Span::styled(bubble, style)), width)
        })
        .collect()
}

fn option_lines(options: &[OptionButton], theme: &Theme) -> Vec<Line<'static>> {
    options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let title = sanitize_for_display(&option.reply.title);
            if option.is_interactive() {
                Line::from(vec![
                    Span::styled(format!("[{}] ", i + 1), theme.muted_style()),
                    Span::styled(title, theme.option_style()),
                ])
            } else {
                Line::from(Span::styled(format!("· {title}"), theme.muted_style()))
            }
        })
        .collect()
}

fn right_align(line: Line<'static>, width: usize) -> Line<'static> {
    let used = line.width();
    let mut spans = Vec::with_capacity(line.spans.len() + 1);
    spans.push(Span::raw(" ".repeat(width.saturating_sub(used))));
    spans.extend(line.spans);
    Line::from(spans)
}

fn centered(text: &str, width: usize, style: Style) -> Line<'static> {
    let pad = width.saturating_sub(display_width(text)) / 2;
    Line::from(vec![
        Span::raw(" ".repeat(pad)),
        Span::styled(text.to_string(), style),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use relaychat_core::{classify, AgentState, RawMessage};
    use serde_json::json;

    fn no_footer() -> ListSettings {
        ListSettings {
            footer_padding: 0,
            ..Default::default()
        }
    }

    fn msg(raw: RawMessage) -> Message {
        classify(&raw).unwrap()
    }

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    /// Screen rows without the scrollbar column.
    fn screen(terminal: &Terminal<TestBackend>) -> Vec<String> {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width - 1)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn test_layout_orders_oldest_first_visually() {
        let mut view = TranscriptView::new(Theme::default(), no_footer());
        let session = Session::new("s");
        let messages = vec![
            msg(RawMessage::agent_text("m2", "second")),
            msg(RawMessage::user_text("m1", "first")),
        ];

        let lines: Vec<String> = view
            .layout(&messages, &session, true, 30)
            .iter()
            .map(line_text)
            .collect();
        let first = lines.iter().position(|l| l.contains("first")).unwrap();
        let second = lines.iter().position(|l| l.contains("second")).unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_user_bubble_is_right_aligned() {
        let lines = bubble_lines("hi", 20, Style::default());
        assert_eq!(lines.len(), 1);
        assert_eq!(line_text(&lines[0]), format!("{} hi ", " ".repeat(16)));
    }

    #[test]
    fn test_event_is_centered() {
        let line = centered("abcd", 10, Style::default());
        assert_eq!(line_text(&line), "   abcd");
    }

    #[test]
    fn test_footer_spacer_and_header_notice() {
        let settings = ListSettings {
            footer_padding: 2,
            ..Default::default()
        };
        let mut view = TranscriptView::new(Theme::default(), settings).with_insets(Insets {
            header_height: 1,
            safe_area_top: 0,
        });
        let mut session = Session::new("s");
        session.agent_state = Some(AgentState {
            controlled_by_user: true,
        });
        let messages = vec![msg(RawMessage::agent_text("m1", "hello"))];

        let lines: Vec<String> = view
            .layout(&messages, &session, true, 40)
            .iter()
            .map(line_text)
            .collect();
        assert!(lines[..3].iter().all(String::is_empty));
        assert_eq!(lines[3], "  hello");
        assert_eq!(lines.last().unwrap().trim(), "Controlled by user");
    }

    #[test]
    fn test_only_latest_options_are_numbered() {
        let mut view = TranscriptView::new(Theme::default(), no_footer());
        let session = Session::new("s");
        let text = "Pick<options><option>Yes</option></options>";
        let messages = vec![
            msg(RawMessage::agent_text("m2", text)),
            msg(RawMessage::agent_text("m1", text)),
        ];

        let lines: Vec<String> = view
            .layout(&messages, &session, true, 40)
            .iter()
            .map(line_text)
            .collect();
        assert!(lines.contains(&"  · Yes".to_string()));
        assert!(lines.contains(&"  [1] Yes".to_string()));

        let options = view.latest_options(&messages, &session, true);
        assert_eq!(options.len(), 1);
        assert!(options[0].is_interactive());
    }

    #[test]
    fn test_render_shows_newest_at_bottom() {
        let mut view = TranscriptView::new(Theme::default(), no_footer());
        let session = Session::new("s");
        let messages: Vec<Message> = (0..20)
            .rev()
            .map(|i| msg(RawMessage::agent_text(format!("m{i}"), format!("message {i}"))))
            .collect();

        let mut terminal = Terminal::new(TestBackend::new(30, 6)).unwrap();
        terminal
            .draw(|f| view.render(f, f.area(), &messages, &session, true))
            .unwrap();

        let rows = screen(&terminal);
        assert!(rows[4].contains("message 19"), "{rows:?}");
        assert!(rows[2].contains("message 18"), "{rows:?}");
    }

    #[test]
    fn test_new_message_keeps_position_when_scrolled_up() {
        let mut view = TranscriptView::new(Theme::default(), no_footer());
        let session = Session::new("s");
        let mut messages: Vec<Message> = (0..30)
            .rev()
            .map(|i| msg(RawMessage::agent_text(format!("m{i}"), format!("message {i}"))))
            .collect();

        let mut terminal = Terminal::new(TestBackend::new(30, 6)).unwrap();
        terminal
            .draw(|f| view.render(f, f.area(), &messages, &session, true))
            .unwrap();
        view.scroll_up(20);
        terminal
            .draw(|f| view.render(f, f.area(), &messages, &session, true))
            .unwrap();
        let before = screen(&terminal);

        messages.insert(0, msg(RawMessage::agent_text("m30", "message 30")));
        terminal
            .draw(|f| view.render(f, f.area(), &messages, &session, true))
            .unwrap();

        assert_eq!(screen(&terminal), before);
        assert_eq!(view.list().offset(), 22);
    }

    #[test]
    fn test_new_message_auto_scrolls_near_bottom() {
        let mut view = TranscriptView::new(Theme::default(), no_footer());
        let session = Session::new("s");
        let mut messages: Vec<Message> = (0..30)
            .rev()
            .map(|i| msg(RawMessage::agent_text(format!("m{i}"), format!("message {i}"))))
            .collect();

        let mut terminal = Terminal::new(TestBackend::new(30, 6)).unwrap();
        terminal
            .draw(|f| view.render(f, f.area(), &messages, &session, true))
            .unwrap();
        view.scroll_up(4);

        messages.insert(
            0,
            msg(RawMessage::new("e1", "agent-event").with("event", json!({"type": "switch", "mode": "plan"}))),
        );
        terminal
            .draw(|f| view.render(f, f.area(), &messages, &session, true))
            .unwrap();

        assert_eq!(view.list().offset(), 0);
        assert!(screen(&terminal)[4].contains("Switched to plan mode"));
    }
}
