//! Tool call rendering.
//!
//! The transcript hands every tool call with a payload to a [`ToolRenderer`].
//! Applications can plug in their own; [`DefaultToolRenderer`] draws a
//! bordered header with the tool's icon, title and state, followed by a
//! one-line summary of each child message.

use crate::text::sanitize_for_display;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use relaychat_core::{Message, Metadata, ToolCall, ToolState};
use relaychat_tui_core::Theme;
use serde_json::Value;

/// Everything a tool renderer may look at.
#[derive(Debug, Clone, Copy)]
pub struct ToolContext<'a> {
    pub tool: &'a ToolCall,
    pub metadata: Option<&'a Metadata>,
    pub children: &'a [Message],
    pub session_id: &'a str,
    pub message_id: &'a str,
}

/// Renders a tool call into transcript lines.
pub trait ToolRenderer {
    fn render(&self, ctx: &ToolContext<'_>, theme: &Theme, width: usize) -> Vec<Line<'static>>;
}

/// Generic renderer used when no tool-specific one is installed.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultToolRenderer;

impl ToolRenderer for DefaultToolRenderer {
    fn render(&self, ctx: &ToolContext<'_>, theme: &Theme, width: usize) -> Vec<Line<'static>> {
        let tool = ctx.tool;
        let (status_icon, status_style) = match tool.state {
            ToolState::Running => ("●", theme.warning_style()),
            ToolState::Completed => ("●", theme.success_style()),
            ToolState::Error => ("●", theme.error_style()),
        };

        let mut lines = vec![Line::from(vec![
            Span::styled("  ╭─ ", theme.tool_border_style()),
            Span::styled(
                format!("{} ", tool_icon(&tool.name)),
                theme.tool_style().add_modifier(Modifier::BOLD),
            ),
            Span::styled(tool_title(tool, ctx.metadata), theme.muted_style()),
            Span::styled(" ", theme.text_style()),
            Span::styled(status_icon, status_style),
        ])];

        let summary_width = width.saturating_sub(6).max(8);
        for child in ctx.children {
            lines.push(Line::from(vec![
                Span::styled("  │ ", theme.tool_border_style()),
                Span::styled(
                    truncate(&child_summary(child), summary_width),
                    theme.muted_style(),
                ),
            ]));
        }

        lines.push(Line::from(Span::styled("  ╰─", theme.tool_border_style())));
        lines
    }
}

/// Get icon for a tool by name.
pub fn tool_icon(name: &str) -> &'static str {
    match normalize_tool_name(name) {
        "bash" | "shell" => "#",
        "read" | "list" => "→",
        "write" | "edit" => "←",
        "glob" | "grep" | "search" => "✱",
        "task" => "◉",
        "webfetch" => "%",
        _ => "◇",
    }
}

/// Strip the server prefix from MCP tool names.
/// e.g., "mcp__files__read" -> "read"
pub fn normalize_tool_name(name: &str) -> &str {
    match name.strip_prefix("mcp__") {
        Some(rest) => rest.rsplit_once("__").map_or(rest, |(_, tool)| tool),
        None => name,
    }
}

/// Human-readable title for a tool call.
pub fn tool_title(tool: &ToolCall, metadata: Option<&Metadata>) -> String {
    if let Some(description) = tool.description.as_deref().filter(|d| !d.is_empty()) {
        return sanitize_for_display(description);
    }

    let input = &tool.input;
    let field = |name: &str| input.get(name).and_then(Value::as_str);
    let name = normalize_tool_name(&tool.name);

    let title = match name {
        "bash" | "shell" => field("description")
            .or_else(|| field("command"))
            .unwrap_or("Shell")
            .to_string(),
        "read" => format!("Read {}", file_name(field("filePath").unwrap_or("file"))),
        "write" => format!("Wrote {}", file_name(field("filePath").unwrap_or("file"))),
        "edit" => format!("Edit {}", file_name(field("filePath").unwrap_or("file"))),
        "glob" | "grep" => {
            let pattern = field("pattern").unwrap_or("*");
            let label = if name == "glob" { "Glob" } else { "Grep" };
            match field("path").or_else(|| metadata.and_then(|m| m.path.as_deref())) {
                Some(path) => format!("{label} \"{pattern}\" in {}", file_name(path)),
                None => format!("{label} \"{pattern}\""),
            }
        }
        "task" => format!("Task \"{}\"", field("description").unwrap_or("Task")),
        _ => tool.name.clone(),
    };
    sanitize_for_display(&title)
}

fn child_summary(message: &Message) -> String {
    let text = match message {
        Message::UserText(m) => m.shown_text().to_string(),
        Message::AgentText(m) => m.text.clone(),
        Message::ToolCall(m) => match &m.tool {
            Some(tool) => format!("{} {}", tool_icon(&tool.name), tool_title(tool, None)),
            None => String::new(),
        },
        Message::AgentEvent(_) => String::new(),
    };
    let first_line = text.lines().next().unwrap_or_default();
    sanitize_for_display(first_line)
}

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{kept}…")
}
