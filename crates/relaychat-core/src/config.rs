//! Configuration loading and management.
//!
//! Configuration is loaded from multiple sources with the following precedence
//! (highest to lowest):
//! 1. Environment variables (`RELAYCHAT_*`)
//! 2. Project config (`relaychat.json` in the given directory)
//! 3. Global config (`~/.config/relaychat/config.json`)
//!
//! Config files may contain `//` and `/* */` comments.

use crate::error::{ConfigError, CoreResult};
use crate::history::{DEFAULT_HISTORY_NAMESPACE, DEFAULT_MAX_HISTORY_SIZE};
use crate::options::{CustomInputKeywords, DEFAULT_CUSTOM_INPUT_KEYWORDS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Rows from the newest message within which new messages auto-scroll.
pub const DEFAULT_AUTO_SCROLL_THRESHOLD: u16 = 10;

/// Fixed padding added to the footer spacer.
pub const DEFAULT_FOOTER_PADDING: u16 = 32;

pub const ENV_HISTORY_MAX: &str = "RELAYCHAT_HISTORY_MAX";
pub const ENV_THEME: &str = "RELAYCHAT_THEME";
pub const ENV_LOG_LEVEL: &str = "RELAYCHAT_LOG_LEVEL";

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Theme name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    /// Log level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// Directory for persisted state (input history).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Input history settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<HistoryConfig>,

    /// Transcript list settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript: Option<TranscriptConfig>,

    /// Quick-reply settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quick_replies: Option<QuickRepliesConfig>,
}

/// Input history configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum entries kept per session.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_size: Option<usize>,

    /// Storage key prefix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

impl HistoryConfig {
    /// Merge with another HistoryConfig, preferring values from other if present.
    pub fn merge(self, other: Self) -> Self {
        Self {
            max_size: merge_option(self.max_size, other.max_size),
            namespace: merge_option(self.namespace, other.namespace),
        }
    }
}

/// Transcript list configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_scroll_threshold: Option<u16>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer_padding: Option<u16>,
}

impl TranscriptConfig {
    pub fn merge(self, other: Self) -> Self {
        Self {
            auto_scroll_threshold: merge_option(
                self.auto_scroll_threshold,
                other.auto_scroll_threshold,
            ),
            footer_padding: merge_option(self.footer_padding, other.footer_padding),
        }
    }
}

/// Quick-reply configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuickRepliesConfig {
    /// Labels containing any of these (case-insensitive) fill the input
    /// instead of being sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_input_keywords: Option<Vec<String>>,
}

impl QuickRepliesConfig {
    pub fn merge(self, other: Self) -> Self {
        Self {
            custom_input_keywords: merge_option(
                self.custom_input_keywords,
                other.custom_input_keywords,
            ),
        }
    }
}

impl Config {
    /// Load configuration from the global file, the project directory and
    /// the process environment.
    ///
    /// Returns the config and the files it was read from.
    pub fn load(project_dir: Option<&Path>) -> CoreResult<(Self, Vec<PathBuf>)> {
        let mut config = Config::default();
        let mut sources = Vec::new();

        if let Some(path) = relaychat_util::path::global_config_file() {
            if path.exists() {
                config = config.merge(Self::load_file(&path)?);
                sources.push(path);
            }
        }

        if let Some(dir) = project_dir {
            let path = relaychat_util::path::project_config_file(dir);
            if path.exists() {
                config = config.merge(Self::load_file(&path)?);
                sources.push(path);
            }
        }

        let config = config.apply_env(|name| std::env::var(name).ok())?;
        Ok((config, sources))
    }

    /// Load configuration from a file.
    pub fn load_file(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::parse_jsonc(&content, &path.display().to_string())?;
        tracing::debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Apply `RELAYCHAT_*` overrides read through `lookup`.
    pub fn apply_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_HISTORY_MAX) {
            let max_size = value
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|&n| n >= 1)
                .ok_or_else(|| ConfigError::InvalidEnv {
                    name: ENV_HISTORY_MAX.to_string(),
                    value: value.clone(),
                })?;
            let history = self.history.take().unwrap_or_default();
            self.history = Some(history.merge(HistoryConfig {
                max_size: Some(max_size),
                namespace: None,
            }));
        }
        if let Some(theme) = lookup(ENV_THEME) {
            self.theme = Some(theme);
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = Some(level);
        }
        Ok(self)
    }

    /// Merge with another config, preferring values from other if present.
    pub fn merge(self, other: Self) -> Self {
        Self {
            theme: merge_option(self.theme, other.theme),
            log_level: merge_option(self.log_level, other.log_level),
            data_dir: merge_option(self.data_dir, other.data_dir),
            history: merge_section(self.history, other.history, HistoryConfig::merge),
            transcript: merge_section(self.transcript, other.transcript, TranscriptConfig::merge),
            quick_replies: merge_section(
                self.quick_replies,
                other.quick_replies,
                QuickRepliesConfig::merge,
            ),
        }
    }

    pub fn history_max_size(&self) -> usize {
        self.history
            .as_ref()
            .and_then(|h| h.max_size)
            .unwrap_or(DEFAULT_MAX_HISTORY_SIZE)
    }

    pub fn history_namespace(&self) -> &str {
        self.history
            .as_ref()
            .and_then(|h| h.namespace.as_deref())
            .unwrap_or(DEFAULT_HISTORY_NAMESPACE)
    }

    pub fn auto_scroll_threshold(&self) -> u16 {
        self.transcript
            .as_ref()
            .and_then(|t| t.auto_scroll_threshold)
            .unwrap_or(DEFAULT_AUTO_SCROLL_THRESHOLD)
    }

    pub fn footer_padding(&self) -> u16 {
        self.transcript
            .as_ref()
            .and_then(|t| t.footer_padding)
            .unwrap_or(DEFAULT_FOOTER_PADDING)
    }

    pub fn custom_input_keywords(&self) -> CustomInputKeywords {
        match self
            .quick_replies
            .as_ref()
            .and_then(|q| q.custom_input_keywords.as_ref())
        {
            Some(keywords) => CustomInputKeywords::new(keywords),
            None => CustomInputKeywords::new(DEFAULT_CUSTOM_INPUT_KEYWORDS),
        }
    }

    pub fn theme_name(&self) -> &str {
        self.theme.as_deref().unwrap_or("default")
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }

    /// Resolved state directory: the configured one, or the platform default.
    pub fn data_dir(&self) -> Option<PathBuf> {
        self.data_dir
            .clone()
            .or_else(relaychat_util::path::state_dir)
    }

    /// Parse JSONC (JSON with comments).
    fn parse_jsonc(content: &str, source: &str) -> CoreResult<Self> {
        let stripped = strip_comments(content);

        let config: Self =
            serde_json::from_str(&stripped).map_err(|e| ConfigError::InvalidJson {
                path: source.to_string(),
                message: e.to_string(),
            })?;
        config.validate(source)?;
        Ok(config)
    }

    fn validate(&self, source: &str) -> Result<(), ConfigError> {
        if self.history.as_ref().and_then(|h| h.max_size) == Some(0) {
            return Err(ConfigError::InvalidValue {
                path: source.to_string(),
                field: "history.max_size",
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Strip `//` and `/* */` comments outside of string literals.
fn strip_comments(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;
    let mut escape_next = false;

    while let Some(c) = chars.next() {
        if escape_next {
            result.push(c);
            escape_next = false;
            continue;
        }

        if in_string {
            match c {
                '\\' => escape_next = true,
                '"' => in_string = false,
                _ => {}
            }
            result.push(c);
            continue;
        }

        match (c, chars.peek()) {
            ('"', _) => {
                in_string = true;
                result.push(c);
            }
            ('/', Some('/')) => {
                chars.next();
                for c in chars.by_ref() {
                    if c == '\n' {
                        result.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = ' ';
                for c in chars.by_ref() {
                    if prev == '*' && c == '/' {
                        break;
                    }
                    // Keep line numbers stable for parse errors.
                    if c == '\n' {
                        result.push('\n');
                    }
                    prev = c;
                }
            }
            _ => result.push(c),
        }
    }

    result
}

fn merge_option<T>(base: Option<T>, other: Option<T>) -> Option<T> {
    match (base, other) {
        (_, Some(o)) => Some(o),
        (b, None) => b,
    }
}

fn merge_section<T>(base: Option<T>, other: Option<T>, merge: fn(T, T) -> T) -> Option<T> {
    match (base, other) {
        (Some(b), Some(o)) => Some(merge(b, o)),
        (b, None) => b,
        (None, o) => o,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.history_max_size(), 100);
        assert_eq!(config.history_namespace(), "input-history");
        assert_eq!(config.auto_scroll_threshold(), 10);
        assert_eq!(config.footer_padding(), 32);
        assert!(config.custom_input_keywords().matches("Other"));
        assert_eq!(config.theme_name(), "default");
    }

    #[test]
    fn test_strip_comments() {
        let input = r#"{
            // line comment
            "theme": "dark", /* block */
            "url": "http://example.com/a"
        }"#;
        let stripped = strip_comments(input);
        let value: serde_json::Value = serde_json::from_str(&stripped).unwrap();
        assert_eq!(value["theme"], "dark");
        assert_eq!(value["url"], "http://example.com/a");
    }

    #[test]
    fn test_strip_comments_respects_escaped_quotes() {
        let stripped = strip_comments(r#"{"a": "say \"//hi\""}"#);
        let value: serde_json::Value = serde_json::from_str(&stripped).unwrap();
        assert_eq!(value["a"], "say \"//hi\"");
    }

    #[test]
    fn test_merge_prefers_other() {
        let base = Config {
            theme: Some("light".to_string()),
            history: Some(HistoryConfig {
                max_size: Some(50),
                namespace: Some("h".to_string()),
            }),
            ..Default::default()
        };
        let other = Config {
            history: Some(HistoryConfig {
                max_size: Some(20),
                namespace: None,
            }),
            ..Default::default()
        };

        let merged = base.merge(other);
        assert_eq!(merged.theme_name(), "light");
        assert_eq!(merged.history_max_size(), 20);
        assert_eq!(merged.history_namespace(), "h");
    }

    #[test]
    fn test_load_file_with_sections() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("relaychat.json");
        std::fs::write(
            &path,
            r#"{
                // keep it short
                "history": { "max_size": 5 },
                "transcript": { "footer_padding": 4 },
                "quick_replies": { "custom_input_keywords": ["please"] }
            }"#,
        )
        .unwrap();

        let config = Config::load_file(&path).unwrap();
        assert_eq!(config.history_max_size(), 5);
        assert_eq!(config.footer_padding(), 4);
        assert_eq!(config.auto_scroll_threshold(), 10);
        let keywords = config.custom_input_keywords();
        assert!(keywords.matches("Please enter details"));
        assert!(!keywords.matches("Other"));
    }

    #[test]
    fn test_load_file_malformed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("relaychat.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = Config::load_file(&path).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Config(ConfigError::InvalidJson { .. })
        ));
    }

    #[test]
    fn test_apply_env() {
        let vars: HashMap<&str, &str> = [
            (ENV_HISTORY_MAX, "7"),
            (ENV_THEME, "solarized"),
            (ENV_LOG_LEVEL, "debug"),
        ]
        .into_iter()
        .collect();

        let config = Config::default()
            .apply_env(|name| vars.get(name).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.history_max_size(), 7);
        assert_eq!(config.theme_name(), "solarized");
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn test_apply_env_rejects_bad_number() {
        let err = Config::default()
            .apply_env(|name| (name == ENV_HISTORY_MAX).then(|| "lots".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { ref value, .. } if value == "lots"));
    }

    #[test]
    fn test_apply_env_rejects_zero_history_max() {
        let err = Config::default()
            .apply_env(|name| (name == ENV_HISTORY_MAX).then(|| "0".to_string()))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidEnv { ref name, ref value } if name == ENV_HISTORY_MAX && value == "0"
        ));
    }

    #[test]
    fn test_load_file_rejects_zero_history_max() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("relaychat.json");
        std::fs::write(&path, r#"{ "history": { "max_size": 0 } }"#).unwrap();

        let err = Config::load_file(&path).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Config(ConfigError::InvalidValue { field: "history.max_size", .. })
        ));
    }

    #[test]
    fn test_configured_data_dir_wins() {
        let config = Config {
            data_dir: Some(PathBuf::from("/tmp/relaychat-state")),
            ..Default::default()
        };
        assert_eq!(config.data_dir(), Some(PathBuf::from("/tmp/relaychat-state")));
    }
}
