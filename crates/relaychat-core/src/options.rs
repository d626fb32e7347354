//! Quick-reply options embedded in message text.
//!
//! Agents offer canned replies with an `<options>` block:
//!
//! ```text
//! Which database should I use?
//! <options>
//!   <option>Postgres</option>
//!   <option>SQLite</option>
//!   <option>Other (please describe)</option>
//! </options>
//! ```
//!
//! The block is stripped from the displayed body and each `<option>` becomes
//! a [`QuickReply`].

use regex::Regex;
use std::sync::OnceLock;

/// Keywords that mark an option as "let me type my own answer".
pub const DEFAULT_CUSTOM_INPUT_KEYWORDS: [&str; 6] =
    ["自定义", "其他", "请描述", "请输入", "custom", "other"];

static OPTIONS_BLOCK: OnceLock<Regex> = OnceLock::new();
static OPTION_ITEM: OnceLock<Regex> = OnceLock::new();

fn options_block() -> &'static Regex {
    OPTIONS_BLOCK.get_or_init(|| {
        Regex::new(r"(?s)<options>(.*?)</options>")
            .expect("Invalid regex pattern - this is a compile-time constant")
    })
}

fn option_item() -> &'static Regex {
    OPTION_ITEM.get_or_init(|| {
        Regex::new(r"(?s)<option>(.*?)</option>")
            .expect("Invalid regex pattern - this is a compile-time constant")
    })
}

/// A selectable canned response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickReply {
    pub title: String,
}

impl QuickReply {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

/// Split message text into its displayed body and its quick-reply options.
pub fn extract_options(text: &str) -> (String, Vec<QuickReply>) {
    let mut options = Vec::new();
    for block in options_block().captures_iter(text) {
        for item in option_item().captures_iter(&block[1]) {
            let title = item[1].trim();
            if !title.is_empty() {
                options.push(QuickReply::new(title));
            }
        }
    }

    if options.is_empty() && !options_block().is_match(text) {
        return (text.to_string(), options);
    }

    let body = options_block().replace_all(text, "");
    (body.trim_end().to_string(), options)
}

/// Case-insensitive substring matcher for custom-input option labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomInputKeywords {
    keywords: Vec<String>,
}

impl CustomInputKeywords {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    /// Whether `label` asks for free-form input instead of being sent.
    pub fn matches(&self, label: &str) -> bool {
        let lower = label.to_lowercase();
        self.keywords.iter().any(|k| lower.contains(k.as_str()))
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

impl Default for CustomInputKeywords {
    fn default() -> Self {
        Self::new(DEFAULT_CUSTOM_INPUT_KEYWORDS)
    }
}
