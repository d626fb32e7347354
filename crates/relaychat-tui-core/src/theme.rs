//! Color themes for the TUI.

use ratatui::style::{Color, Modifier, Style};

/// Color theme for the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Theme name.
    pub name: String,

    // Background hierarchy
    /// Base background - darkest.
    pub background: Color,
    /// Panel background (header, footer).
    pub background_panel: Color,
    /// Element background (input box).
    pub background_element: Color,
    /// Background of the user's message bubbles.
    pub user_bubble: Color,

    // Text colors
    /// Primary text color.
    pub text: Color,
    /// Muted/secondary text.
    pub text_muted: Color,

    // Accent colors
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,

    // Semantic colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,

    // Border colors
    /// Default border.
    pub border: Color,
    /// Active/focused border.
    pub border_active: Color,
    /// Tool border (very subtle).
    pub tool_border: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::relay()
    }
}

impl Theme {
    /// Get a theme by name.
    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => Self::light(),
            "dracula" => Self::dracula(),
            "nord" => Self::nord(),
            _ => Self::relay(),
        }
    }

    /// List available theme names.
    pub fn available() -> Vec<&'static str> {
        vec!["relay", "light", "dracula", "nord"]
    }

    /// Default dark theme.
    pub fn relay() -> Self {
        Self {
            name: "relay".to_string(),

            background: Color::Rgb(24, 24, 27),         // #18181B
            background_panel: Color::Rgb(39, 39, 42),   // #27272A
            background_element: Color::Rgb(50, 50, 55),
            user_bubble: Color::Rgb(52, 52, 60),

            text: Color::Rgb(250, 250, 250),       // #fafafa
            text_muted: Color::Rgb(161, 161, 170), // #a1a1aa

            primary: Color::Rgb(14, 163, 222),   // #0EA3DE
            secondary: Color::Rgb(91, 222, 14),  // #5BDE0E
            accent: Color::Rgb(145, 14, 222),    // #910EDE

            success: Color::Rgb(91, 222, 14),
            warning: Color::Rgb(250, 204, 21),
            error: Color::Rgb(222, 13, 95),
            info: Color::Rgb(14, 163, 222),

            border: Color::Rgb(63, 63, 70),
            border_active: Color::Rgb(14, 163, 222),
            tool_border: Color::Rgb(39, 39, 42),
        }
    }

    /// Light theme.
    pub fn light() -> Self {
        Self {
            name: "light".to_string(),

            background: Color::Rgb(255, 255, 255),
            background_panel: Color::Rgb(250, 250, 250),
            background_element: Color::Rgb(245, 245, 245),
            user_bubble: Color::Rgb(232, 238, 250),

            text: Color::Rgb(30, 30, 30),
            text_muted: Color::Rgb(128, 128, 128),

            primary: Color::Rgb(50, 100, 200),
            secondary: Color::Rgb(200, 120, 60),
            accent: Color::Rgb(130, 80, 180),

            success: Color::Rgb(40, 160, 70),
            warning: Color::Rgb(200, 130, 30),
            error: Color::Rgb(200, 60, 70),
            info: Color::Rgb(50, 100, 200),

            border: Color::Rgb(220, 220, 220),
            border_active: Color::Rgb(50, 100, 200),
            tool_border: Color::Rgb(212, 212, 216),
        }
    }

    /// Dracula theme.
    pub fn dracula() -> Self {
        Self {
            name: "dracula".to_string(),

            background: Color::Rgb(40, 42, 54),         // #282a36
            background_panel: Color::Rgb(33, 34, 44),   // #21222c
            background_element: Color::Rgb(68, 71, 90), // #44475a
            user_bubble: Color::Rgb(68, 71, 90),

            text: Color::Rgb(248, 248, 242),      // #f8f8f2
            text_muted: Color::Rgb(98, 114, 164), // #6272a4

            primary: Color::Rgb(189, 147, 249),  // #bd93f9
            secondary: Color::Rgb(139, 233, 253), // #8be9fd
            accent: Color::Rgb(255, 121, 198),   // #ff79c6

            success: Color::Rgb(80, 250, 123),
            warning: Color::Rgb(255, 184, 108),
            error: Color::Rgb(255, 85, 85),
            info: Color::Rgb(139, 233, 253),

            border: Color::Rgb(68, 71, 90),
            border_active: Color::Rgb(189, 147, 249),
            tool_border: Color::Rgb(52, 55, 70),
        }
    }

    /// Nord theme.
    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),

            background: Color::Rgb(46, 52, 64),         // #2e3440
            background_panel: Color::Rgb(59, 66, 82),   // #3b4252
            background_element: Color::Rgb(67, 76, 94), // #434c5e
            user_bubble: Color::Rgb(76, 86, 106),       // #4c566a

            text: Color::Rgb(236, 239, 244),       // #eceff4
            text_muted: Color::Rgb(129, 161, 193), // #81a1c1

            primary: Color::Rgb(136, 192, 208),  // #88c0d0
            secondary: Color::Rgb(163, 190, 140), // #a3be8c
            accent: Color::Rgb(180, 142, 173),   // #b48ead

            success: Color::Rgb(163, 190, 140),
            warning: Color::Rgb(235, 203, 139),
            error: Color::Rgb(191, 97, 106),
            info: Color::Rgb(129, 161, 193),

            border: Color::Rgb(76, 86, 106),
            border_active: Color::Rgb(136, 192, 208),
            tool_border: Color::Rgb(59, 66, 82),
        }
    }

    // Style helper methods

    /// Base text style.
    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    /// Muted text style.
    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    pub fn primary_style(&self) -> Style {
        Style::default().fg(self.primary)
    }

    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success)
    }

    pub fn warning_style(&self) -> Style {
        Style::default().fg(self.warning)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    /// Border style (not focused).
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Active border style.
    pub fn border_active_style(&self) -> Style {
        Style::default().fg(self.border_active)
    }

    /// Tool border style.
    pub fn tool_border_style(&self) -> Style {
        Style::default().fg(self.tool_border)
    }

    /// Style with background panel color.
    pub fn panel_style(&self) -> Style {
        Style::default().bg(self.background_panel)
    }

    /// Style with element background.
    pub fn element_style(&self) -> Style {
        Style::default().bg(self.background_element)
    }

    /// Bold text style.
    pub fn bold(&self) -> Style {
        Style::default().fg(self.text).add_modifier(Modifier::BOLD)
    }

    /// User bubble: regular text on the bubble background.
    pub fn user_style(&self) -> Style {
        Style::default().fg(self.text).bg(self.user_bubble)
    }

    pub fn assistant_style(&self) -> Style {
        self.text_style()
    }

    pub fn tool_style(&self) -> Style {
        self.accent_style()
    }

    /// Centered system notices.
    pub fn event_style(&self) -> Style {
        self.muted_style().add_modifier(Modifier::ITALIC)
    }

    /// Quick-reply option buttons.
    pub fn option_style(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }
}
