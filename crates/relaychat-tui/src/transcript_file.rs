//! Transcript files.
//!
//! A transcript file is a JSON document holding a session and its raw
//! messages, newest first:
//!
//! ```json
//! {
//!   "session": {"id": "ses_1", "agentState": {"controlledByUser": false}},
//!   "messages": [{"id": "m2", "kind": "agent-text", "text": "Hi"}]
//! }
//! ```

use crate::error::{TuiError, TuiResult};
use relaychat_core::{classify, classify_all, Message, RawMessage, Session};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A session with its messages, as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub session: Session,

    /// Raw messages, newest first.
    #[serde(default)]
    pub messages: Vec<RawMessage>,
}

impl Transcript {
    /// An empty transcript for a session.
    pub fn empty(session_id: impl Into<String>) -> Self {
        Self {
            session: Session::new(session_id),
            messages: Vec::new(),
        }
    }

    /// Read a transcript file.
    pub fn load(path: &Path) -> TuiResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let transcript: Self =
            serde_json::from_str(&content).map_err(|source| TuiError::InvalidTranscript {
                path: path.display().to_string(),
                source,
            })?;
        tracing::debug!(
            path = %path.display(),
            session_id = %transcript.session.id,
            messages = transcript.messages.len(),
            "Loaded transcript"
        );
        Ok(transcript)
    }

    /// Write the transcript atomically.
    pub fn save(&self, path: &Path) -> TuiResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            serde_json::to_string_pretty(self).map_err(|source| TuiError::InvalidTranscript {
                path: path.display().to_string(),
                source,
            })?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Classify every message. Any unknown or malformed message fails the
    /// whole transcript.
    pub fn classify(&self) -> TuiResult<Vec<Message>> {
        Ok(classify_all(&self.messages)?)
    }

    /// Add a newer message in front, returning its classified form.
    pub fn push_newest(&mut self, raw: RawMessage) -> TuiResult<Message> {
        let message = classify(&raw)?;
        self.messages.insert(0, raw);
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_load_and_classify() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("t.json");
        std::fs::write(
            &path,
            json!({
                "session": {"id": "ses_1"},
                "messages": [
                    {"id": "m2", "kind": "agent-text", "text": "Hi"},
                    {"id": "m1", "kind": "user-text", "text": "Hello"}
                ]
            })
            .to_string(),
        )
        .unwrap();

        let transcript = Transcript::load(&path).unwrap();
        assert_eq!(transcript.session.id, "ses_1");
        let messages = transcript.classify().unwrap();
        assert_eq!(messages[0].id(), "m2");
        assert!(messages[1].is_user());
    }

    #[test]
    fn test_invalid_json_names_the_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{").unwrap();

        let err = Transcript::load(&path).unwrap_err();
        assert!(matches!(err, TuiError::InvalidTranscript { .. }));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_unknown_kind_fails_classification() {
        let mut transcript = Transcript::empty("ses_1");
        transcript.messages.push(RawMessage::new("m1", "agent-thought"));
        assert!(matches!(
            transcript.classify(),
            Err(TuiError::Classify(_))
        ));
    }

    #[test]
    fn test_save_round_trips_new_messages() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("t.json");
        let mut transcript = Transcript::empty("ses_1");
        transcript
            .push_newest(RawMessage::user_text("m1", "first"))
            .unwrap();
        transcript
            .push_newest(RawMessage::user_text("m2", "second"))
            .unwrap();
        transcript.save(&path).unwrap();

        let loaded = Transcript::load(&path).unwrap();
        assert_eq!(loaded, transcript);
        assert_eq!(loaded.messages[0].id, "m2");
    }
}
