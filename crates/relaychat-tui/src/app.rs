//! Main TUI application.

use crate::error::TuiResult;
use crate::input::{InputAction, InputWidget};
use crate::outbox::Outbox;
use crate::transcript_file::Transcript;
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    prelude::CrosstermBackend,
    Frame, Terminal,
};
use relaychat_core::{Config, InputHistory, Message};
use relaychat_tui_core::{is_quit, Event, EventHandler, Labels, Theme};
use relaychat_tui_messages::{ListSettings, MessageSender, TranscriptView};
use std::io::{self, Write};
use std::path::PathBuf;

/// Restore terminal to normal state.
///
/// Called on panic and on normal exit.
pub fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableBracketedPaste,
        crossterm::cursor::Show
    );
    let _ = io::stdout().flush();
}

/// Install a panic hook that restores the terminal before printing the panic.
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        original_hook(panic_info);
    }));
}

/// Chat screen: transcript on top, input below.
pub struct App {
    transcript: Transcript,
    messages: Vec<Message>,
    transcript_path: Option<PathBuf>,
    view: TranscriptView,
    input: InputWidget,
    theme: Theme,
    outbox: Outbox,
    events: EventHandler,
    quit: bool,
}

impl App {
    /// Build the app for a transcript.
    ///
    /// Fails if any message in the transcript cannot be classified.
    pub fn new(
        transcript: Transcript,
        config: &Config,
        labels: Labels,
        history: InputHistory,
    ) -> TuiResult<Self> {
        let messages = transcript.classify()?;
        let theme = Theme::by_name(config.theme_name());
        let view = TranscriptView::new(theme.clone(), ListSettings::from(config))
            .with_labels(labels)
            .with_keywords(config.custom_input_keywords());
        let outbox = Outbox::new(transcript.session.id.clone());

        Ok(Self {
            transcript,
            messages,
            transcript_path: None,
            view,
            input: InputWidget::new(history),
            theme,
            outbox,
            events: EventHandler::new(),
            quit: false,
        })
    }

    /// Persist sent messages to this file on exit.
    pub fn with_transcript_path(mut self, path: PathBuf) -> Self {
        self.transcript_path = Some(path);
        self
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn input(&self) -> &InputWidget {
        &self.input
    }

    pub fn view(&self) -> &TranscriptView {
        &self.view
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Run the TUI.
    pub async fn run(&mut self) -> TuiResult<()> {
        install_panic_hook();

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let event_loop = self.events.start();
        tracing::info!(session_id = %self.transcript.session.id, "TUI started");

        let result = self.main_loop(&mut terminal).await;

        event_loop.abort();
        restore_terminal();

        result?;
        self.save()
    }

    async fn main_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> TuiResult<()> {
        let mut needs_redraw = true;
        while !self.quit {
            if needs_redraw {
                terminal.draw(|frame| self.draw(frame))?;
                needs_redraw = false;
            }

            match self.events.next().await {
                Some(Event::Tick) => {}
                Some(event) => {
                    self.handle_event(event)?;
                    needs_redraw = true;
                }
                None => break,
            }
        }
        Ok(())
    }

    /// Write the transcript back to its file, if it has one.
    pub fn save(&self) -> TuiResult<()> {
        if let Some(path) = &self.transcript_path {
            self.transcript.save(path)?;
            tracing::info!(path = %path.display(), "Transcript saved");
        }
        Ok(())
    }

    /// Handle one terminal event.
    pub fn handle_event(&mut self, event: Event) -> TuiResult<()> {
        match event {
            Event::Key(key) => self.handle_key(key)?,
            Event::Paste(text) => self.input.insert_paste(&text),
            Event::Resize(_, _) | Event::Tick => {}
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) -> TuiResult<()> {
        if is_quit(&key) {
            self.quit = true;
            return Ok(());
        }

        match key.code {
            KeyCode::PageUp => self.view.scroll_up(self.view.page_size()),
            KeyCode::PageDown => self.view.scroll_down(self.view.page_size()),
            KeyCode::End if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.view.scroll_to_bottom()
            }
            KeyCode::Char(c @ '1'..='9') if key.modifiers.contains(KeyModifiers::ALT) => {
                let index = c as usize - '1' as usize;
                self.choose_option(index);
            }
            _ => match self.input.handle_key(key) {
                InputAction::Submit(text) => {
                    self.outbox.send_message(&self.transcript.session.id, &text)
                }
                InputAction::Cancel | InputAction::Escape => self.quit = true,
                InputAction::ScrollUp => self.view.scroll_up(1),
                InputAction::ScrollDown => self.view.scroll_down(1),
                InputAction::None => {}
            },
        }

        self.flush_outbox()
    }

    /// Press the `index`th interactive option of the latest message.
    fn choose_option(&mut self, index: usize) {
        let options = self
            .view
            .latest_options(&self.messages, &self.transcript.session, true);
        let Some(action) = options
            .iter()
            .filter_map(|option| option.action.as_ref())
            .nth(index)
        else {
            tracing::debug!(index, "No quick reply at this position");
            return;
        };

        let input = &mut self.input;
        let fill: &mut dyn FnMut(&str) = &mut |text| input.fill(text);
        action.perform(&self.outbox, Some(fill));
    }

    /// Move sent messages into the transcript.
    fn flush_outbox(&mut self) -> TuiResult<()> {
        for raw in self.outbox.drain() {
            let message = self.transcript.push_newest(raw)?;
            self.messages.insert(0, message);
            self.view.scroll_to_bottom();
        }
        Ok(())
    }

    /// Draw the UI.
    pub fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(self.input.height()),
            ])
            .split(area);

        self.view.render(
            frame,
            chunks[0],
            &self.messages,
            &self.transcript.session,
            true,
        );
        self.input.render(frame, chunks[1], &self.theme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use relaychat_core::RawMessage;
    use relaychat_storage::MemoryStore;
    use std::sync::Arc;

    fn app(messages: Vec<RawMessage>) -> App {
        let mut transcript = Transcript::empty("ses_1");
        transcript.messages = messages;
        let history = InputHistory::load(Arc::new(MemoryStore::new()), "ses_1");
        App::new(transcript, &Config::default(), Labels::default(), history).unwrap()
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn alt(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::ALT))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_event(key(KeyCode::Char(c))).unwrap();
        }
    }

    fn screen(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(40, 20)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_unknown_kind_fails_to_open() {
        let mut transcript = Transcript::empty("ses_1");
        transcript.messages = vec![RawMessage::new("m1", "agent-thought")];
        let history = InputHistory::load(Arc::new(MemoryStore::new()), "ses_1");
        assert!(App::new(transcript, &Config::default(), Labels::default(), history).is_err());
    }

    #[test]
    fn test_submit_prepends_user_message() {
        let mut app = app(vec![RawMessage::agent_text("m1", "Hi there")]);
        type_text(&mut app, "hello");
        app.handle_event(key(KeyCode::Enter)).unwrap();

        assert_eq!(app.messages().len(), 2);
        assert!(app.messages()[0].is_user());
        assert!(app.input().is_empty());
        assert_eq!(app.input().history().entries(), ["hello"]);
        assert!(screen(&mut app).contains("hello"));
    }

    #[test]
    fn test_quick_reply_sends_label() {
        let mut app = app(vec![RawMessage::agent_text(
            "m1",
            "Pick\n<options><option>Yes</option><option>No</option></options>",
        )]);
        app.handle_event(alt('2')).unwrap();

        assert_eq!(app.messages().len(), 2);
        match &app.messages()[0] {
            Message::UserText(m) => assert_eq!(m.text, "No"),
            other => panic!("unexpected message {other:?}"),
        }
        // Sent quick replies do not enter the input history.
        assert!(app.input().history().is_empty());
    }

    #[test]
    fn test_custom_quick_reply_fills_input() {
        let mut app = app(vec![RawMessage::agent_text(
            "m1",
            "Pick\n<options><option>Other</option></options>",
        )]);
        type_text(&mut app, "draft");
        app.handle_event(alt('1')).unwrap();

        assert_eq!(app.messages().len(), 1);
        assert!(app.input().is_empty());
    }

    #[test]
    fn test_missing_option_is_ignored() {
        let mut app = app(vec![RawMessage::agent_text("m1", "No options")]);
        app.handle_event(alt('1')).unwrap();
        assert_eq!(app.messages().len(), 1);
    }

    #[test]
    fn test_escape_and_ctrl_c_quit() {
        let mut app = app(Vec::new());
        app.handle_event(key(KeyCode::Esc)).unwrap();
        assert!(app.should_quit());

        let mut app = self::app(Vec::new());
        app.handle_event(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )))
        .unwrap();
        assert!(app.should_quit());
    }

    #[test]
    fn test_history_recall_through_app() {
        let mut app = app(Vec::new());
        type_text(&mut app, "first");
        app.handle_event(key(KeyCode::Enter)).unwrap();
        type_text(&mut app, "wip");
        app.handle_event(key(KeyCode::Up)).unwrap();
        assert_eq!(app.input().text(), "first");
        app.handle_event(key(KeyCode::Down)).unwrap();
        assert_eq!(app.input().text(), "wip");
    }

    #[tokio::test]
    async fn test_main_loop_runs_until_escape() {
        let mut app = app(Vec::new());
        let tx = app.events.sender();
        for c in "hi".chars() {
            tx.send(key(KeyCode::Char(c))).unwrap();
        }
        tx.send(key(KeyCode::Enter)).unwrap();
        tx.send(Event::Tick).unwrap();
        tx.send(key(KeyCode::Esc)).unwrap();

        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        app.main_loop(&mut terminal).await.unwrap();

        assert!(app.should_quit());
        assert_eq!(app.messages().len(), 1);
    }

    #[test]
    fn test_page_up_scrolls_transcript() {
        let long: Vec<RawMessage> = (0..30)
            .map(|i| RawMessage::agent_text(format!("m{i}"), format!("line {i}")))
            .collect();
        let mut app = app(long);
        screen(&mut app);
        app.handle_event(key(KeyCode::PageUp)).unwrap();
        assert!(app.view().list().offset() > 0);
    }
}
