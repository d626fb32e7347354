//! Localizable labels for system notices.
//!
//! Templates use `{mode}` and `{time}` placeholders. A translation only
//! needs to override the labels it changes.

use serde::Deserialize;

/// User-visible strings for agent events and the session header.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Labels {
    /// Template with a `{mode}` placeholder.
    pub switched_to_mode: String,
    /// Template with a `{time}` placeholder.
    pub usage_limit_until: String,
    /// Shown in place of a limit time that cannot be decoded.
    pub unknown_time: String,
    /// Shown for agent events of an unrecognized type.
    pub unknown_event: String,
    /// Header notice while the user controls the agent.
    pub controlled_by_user: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            switched_to_mode: "Switched to {mode} mode".to_string(),
            usage_limit_until: "Usage limit reached until {time}".to_string(),
            unknown_time: "unknown time".to_string(),
            unknown_event: "Unknown event".to_string(),
            controlled_by_user: "Controlled by user".to_string(),
        }
    }
}

impl Labels {
    pub fn switched_to_mode(&self, mode: &str) -> String {
        self.switched_to_mode.replace("{mode}", mode)
    }

    pub fn usage_limit_until(&self, time: &str) -> String {
        self.usage_limit_until.replace("{time}", time)
    }

    pub fn unknown_time(&self) -> &str {
        &self.unknown_time
    }

    pub fn unknown_event(&self) -> &str {
        &self.unknown_event
    }

    pub fn controlled_by_user(&self) -> &str {
        &self.controlled_by_user
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_labels() {
        let labels = Labels::default();
        assert_eq!(labels.switched_to_mode("plan"), "Switched to plan mode");
        assert_eq!(
            labels.usage_limit_until("14:30"),
            "Usage limit reached until 14:30"
        );
        assert_eq!(labels.unknown_event(), "Unknown event");
    }

    #[test]
    fn test_partial_translation_keeps_defaults() {
        let labels: Labels =
            serde_json::from_str(r#"{"switched_to_mode": "已切换到 {mode} 模式"}"#).unwrap();
        assert_eq!(labels.switched_to_mode("plan"), "已切换到 plan 模式");
        assert_eq!(labels.unknown_time(), "unknown time");
    }
}
