//! Non-interactive transcript rendering.

use crate::error::TuiResult;
use crate::transcript_file::Transcript;
use ratatui::text::Line;
use relaychat_core::Config;
use relaychat_tui_core::{Labels, Theme};
use relaychat_tui_messages::{ListSettings, TranscriptView};

/// Render a transcript as plain text, oldest message first.
///
/// There is no input to fill, so custom-input options read as plain
/// replies. The footer spacer is left out.
pub fn render_plain(
    transcript: &Transcript,
    config: &Config,
    labels: Labels,
    width: usize,
) -> TuiResult<String> {
    let messages = transcript.classify()?;
    let mut view = TranscriptView::new(
        Theme::by_name(config.theme_name()),
        ListSettings::from(config),
    )
    .with_labels(labels)
    .with_keywords(config.custom_input_keywords());

    let lines = view.layout(&messages, &transcript.session, false, width);
    let text: Vec<String> = lines
        .iter()
        .map(line_text)
        .skip_while(|line| line.is_empty())
        .collect();

    let mut out = text.join("\n");
    out.push('\n');
    Ok(out)
}

fn line_text(line: &Line<'_>) -> String {
    let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
    text.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use relaychat_core::{AgentState, RawMessage};
    use serde_json::json;

    #[test]
    fn test_render_plain_orders_oldest_first() {
        let mut transcript = Transcript::empty("ses_1");
        transcript.messages = vec![
            RawMessage::new("m3", "agent-event").with("event", json!({"type": "switch", "mode": "plan"})),
            RawMessage::agent_text("m2", "Sure thing"),
            RawMessage::user_text("m1", "Hello"),
        ];

        let out = render_plain(&transcript, &Config::default(), Labels::default(), 40).unwrap();
        let hello = out.find("Hello").unwrap();
        let sure = out.find("Sure thing").unwrap();
        let switched = out.find("Switched to plan mode").unwrap();
        assert!(hello < sure && sure < switched);
        assert!(!out.starts_with('\n'));
    }

    #[test]
    fn test_render_plain_shows_controlled_notice_last() {
        let mut transcript = Transcript::empty("ses_1");
        transcript.session.agent_state = Some(AgentState {
            controlled_by_user: true,
        });
        transcript.messages = vec![RawMessage::agent_text("m1", "Hi")];

        let out = render_plain(&transcript, &Config::default(), Labels::default(), 40).unwrap();
        assert_eq!(out.trim_end().lines().last().map(str::trim), Some("Controlled by user"));
    }

    #[test]
    fn test_render_plain_numbers_latest_options_only() {
        let mut transcript = Transcript::empty("ses_1");
        transcript.messages = vec![
            RawMessage::agent_text("m2", "Pick\n<options><option>Yes</option></options>"),
            RawMessage::agent_text("m1", "Earlier\n<options><option>Maybe</option></options>"),
        ];

        let out = render_plain(&transcript, &Config::default(), Labels::default(), 40).unwrap();
        assert!(out.contains("[1] Yes"));
        assert!(out.contains("· Maybe"));
        assert!(!out.contains("<options>"));
    }
}
