//! Input widget with per-session history recall.
//!
//! Up on the first line recalls older submissions, Down on the last line
//! walks back toward the draft. An entry recalled with Up starts with the
//! cursor on its first line, one recalled with Down on its last line.
//! Any direct edit ends the recall.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Paragraph},
    Frame,
};
use relaychat_core::InputHistory;
use relaychat_tui_core::Theme;
use tui_textarea::{CursorMove, TextArea};

/// Maximum number of text lines before the input stops growing.
const MAX_VISIBLE_LINES: u16 = 8;

/// What the app should do after a key press in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    None,
    /// Non-blank text was submitted and recorded in history.
    Submit(String),
    Cancel,
    Escape,
    /// Up at the top with nothing to recall.
    ScrollUp,
    /// Down at the bottom while not recalling.
    ScrollDown,
}

pub struct InputWidget {
    textarea: TextArea<'static>,
    focused: bool,
    history: InputHistory,
}

impl InputWidget {
    pub fn new(history: InputHistory) -> Self {
        let mut textarea = TextArea::default();
        textarea.set_cursor_line_style(Style::default());
        textarea.set_placeholder_text("Type a message...");
        Self {
            textarea,
            focused: true,
            history,
        }
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn history(&self) -> &InputHistory {
        &self.history
    }

    /// Current text.
    pub fn text(&self) -> String {
        self.textarea.lines().join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.textarea.lines().iter().all(|l| l.is_empty()) && self.line_count() == 1
    }

    pub fn line_count(&self) -> usize {
        self.textarea.lines().len()
    }

    /// Replace the text without touching history state.
    fn set_text(&mut self, text: &str) {
        self.textarea.select_all();
        self.textarea.delete_char();
        self.textarea.insert_str(text);
    }

    /// Replace the text on behalf of the user, e.g. from a quick reply.
    pub fn fill(&mut self, text: &str) {
        self.set_text(text);
        self.history.reset_navigation();
    }

    /// Submit the current text: record it and clear the input.
    ///
    /// Blank text is neither recorded nor returned.
    pub fn take(&mut self) -> Option<String> {
        let text = self.text();
        if text.trim().is_empty() {
            return None;
        }
        self.history.commit(&text);
        self.set_text("");
        Some(text)
    }

    fn edited(&mut self) {
        self.history.reset_navigation();
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> InputAction {
        match key.code {
            KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => match c {
                'c' => return InputAction::Cancel,
                'a' => self.textarea.move_cursor(CursorMove::Head),
                'e' => self.textarea.move_cursor(CursorMove::End),
                'j' => {
                    self.textarea.insert_newline();
                    self.edited();
                }
                'u' => {
                    self.textarea.delete_line_by_head();
                    self.edited();
                }
                'k' => {
                    self.textarea.delete_line_by_end();
                    self.edited();
                }
                'w' => {
                    self.textarea.delete_word();
                    self.edited();
                }
                'd' => {
                    self.textarea.delete_next_char();
                    self.edited();
                }
                _ => {}
            },
            KeyCode::Char(c) => {
                self.textarea.insert_char(c);
                self.edited();
            }
            KeyCode::Enter => {
                if key
                    .modifiers
                    .intersects(KeyModifiers::SHIFT | KeyModifiers::ALT)
                {
                    self.textarea.insert_newline();
                    self.edited();
                } else if let Some(text) = self.take() {
                    return InputAction::Submit(text);
                }
            }
            KeyCode::Backspace => {
                self.textarea.delete_char();
                self.edited();
            }
            KeyCode::Delete => {
                self.textarea.delete_next_char();
                self.edited();
            }
            KeyCode::Left if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.textarea.move_cursor(CursorMove::WordBack)
            }
            KeyCode::Right if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.textarea.move_cursor(CursorMove::WordForward)
            }
            KeyCode::Left => self.textarea.move_cursor(CursorMove::Back),
            KeyCode::Right => self.textarea.move_cursor(CursorMove::Forward),
            KeyCode::Up => {
                let (row, _) = self.textarea.cursor();
                if row > 0 {
                    self.textarea.move_cursor(CursorMove::Up);
                } else {
                    let draft = self.text();
                    match self.history.recall_older(&draft).map(str::to_string) {
                        Some(entry) => {
                            self.set_text(&entry);
                            // Start on the first row so the next Up keeps walking.
                            self.textarea.move_cursor(CursorMove::Top);
                            self.textarea.move_cursor(CursorMove::Head);
                        }
                        None if !self.history.is_navigating() => return InputAction::ScrollUp,
                        None => {}
                    }
                }
            }
            KeyCode::Down => {
                let (row, _) = self.textarea.cursor();
                if row + 1 < self.line_count() {
                    self.textarea.move_cursor(CursorMove::Down);
                } else {
                    match self.history.recall_newer().map(str::to_string) {
                        Some(entry) => self.set_text(&entry),
                        None => return InputAction::ScrollDown,
                    }
                }
            }
            KeyCode::Home => self.textarea.move_cursor(CursorMove::Head),
            KeyCode::End => self.textarea.move_cursor(CursorMove::End),
            KeyCode::Esc => return InputAction::Escape,
            _ => {}
        }
        InputAction::None
    }

    /// Paste text at the cursor.
    pub fn insert_paste(&mut self, text: &str) {
        self.textarea.insert_str(text.replace('\r', ""));
        self.edited();
    }

    /// Rows needed: text lines plus one row of padding above and below.
    pub fn height(&self) -> u16 {
        (self.line_count() as u16).clamp(1, MAX_VISIBLE_LINES) + 2
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let border_color = if self.history.is_navigating() {
            theme.accent
        } else {
            theme.border_active
        };
        let bg_style = theme.element_style();

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(1), Constraint::Min(1)])
            .split(area);

        let border = "┃\n".repeat(area.height as usize);
        frame.render_widget(
            Paragraph::new(border).style(Style::default().fg(border_color)),
            chunks[0],
        );
        frame.render_widget(Block::default().style(bg_style), chunks[1]);

        let text_area = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(chunks[1])[1];

        self.textarea.set_style(bg_style.fg(theme.text));
        self.textarea.set_placeholder_style(theme.muted_style());
        if self.focused {
            self.textarea.set_cursor_style(
                Style::default()
                    .fg(theme.background)
                    .bg(theme.text)
                    .add_modifier(Modifier::BOLD),
            );
        } else {
            self.textarea.set_cursor_style(bg_style);
        }

        frame.render_widget(&self.textarea, text_area);
    }
}
