//! Per-session input history with up/down recall.
//!
//! Submitted prompts are kept newest-first and persisted under
//! `<namespace>-<session id>` as a JSON array of strings. Recall walks the
//! list without submitting anything; the draft that was being typed when
//! recall started is saved and handed back when the walk returns past the
//! newest entry.

use relaychat_storage::{namespaced_key, KeyValueStore};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Default storage namespace for history keys.
pub const DEFAULT_HISTORY_NAMESPACE: &str = "input-history";

/// Default maximum number of entries kept per session.
pub const DEFAULT_MAX_HISTORY_SIZE: usize = 100;

/// Recall position.
///
/// `index == None` means the user is looking at the live draft.
/// `saved_draft` only carries meaning while `index` is `Some`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationState {
    index: Option<usize>,
    saved_draft: String,
}

impl NavigationState {
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn saved_draft(&self) -> &str {
        &self.saved_draft
    }

    pub fn is_navigating(&self) -> bool {
        self.index.is_some()
    }

    fn clear(&mut self) {
        self.index = None;
        self.saved_draft.clear();
    }
}

/// Input history for one session.
pub struct InputHistory {
    store: Arc<dyn KeyValueStore>,
    key: String,
    entries: Vec<String>,
    max_size: usize,
    navigation: NavigationState,
}

impl std::fmt::Debug for InputHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputHistory")
            .field("key", &self.key)
            .field("entries", &self.entries.len())
            .field("max_size", &self.max_size)
            .field("navigation", &self.navigation)
            .finish()
    }
}

impl InputHistory {
    /// Load the history of `session_id` with the default namespace and size.
    pub fn load(store: Arc<dyn KeyValueStore>, session_id: &str) -> Self {
        Self::load_with(
            store,
            DEFAULT_HISTORY_NAMESPACE,
            session_id,
            DEFAULT_MAX_HISTORY_SIZE,
        )
    }

    /// Load the history of `session_id` using the configured namespace and size.
    pub fn from_config(
        store: Arc<dyn KeyValueStore>,
        session_id: &str,
        config: &crate::config::Config,
    ) -> Self {
        Self::load_with(
            store,
            config.history_namespace(),
            session_id,
            config.history_max_size(),
        )
    }

    /// Load the history of `session_id`.
    ///
    /// Missing, unreadable or malformed stored data yields an empty history.
    /// A `max_size` of 0 is treated as 1 so the latest commit is always kept.
    pub fn load_with(
        store: Arc<dyn KeyValueStore>,
        namespace: &str,
        session_id: &str,
        max_size: usize,
    ) -> Self {
        let max_size = max_size.max(1);
        let key = namespaced_key(namespace, session_id);
        let mut entries = load_entries(store.as_ref(), &key);
        entries.truncate(max_size);
        debug!(key = %key, entries = entries.len(), "Loaded input history");

        Self {
            store,
            key,
            entries,
            max_size,
            navigation: NavigationState::default(),
        }
    }

    /// Record submitted text.
    ///
    /// Blank text is ignored. Committing always ends an in-progress recall.
    pub fn commit(&mut self, text: &str) {
        if text.trim().is_empty() {
            return;
        }

        self.navigation.clear();

        if self.entries.first().map(String::as_str) == Some(text) {
            return;
        }

        self.entries.retain(|entry| entry != text);
        self.entries.insert(0, text.to_string());
        self.entries.truncate(self.max_size);
        self.persist();
    }

    /// Step to the next older entry.
    ///
    /// On the first step the current draft is saved so [`recall_newer`]
    /// can restore it. Returns `None`, without touching any state, when the
    /// history is empty or the oldest entry is already shown.
    ///
    /// [`recall_newer`]: InputHistory::recall_newer
    pub fn recall_older(&mut self, current_draft: &str) -> Option<&str> {
        let last = self.entries.len().checked_sub(1)?;
        let next = match self.navigation.index {
            None => 0,
            Some(index) if index >= last => return None,
            Some(index) => index + 1,
        };

        if self.navigation.index.is_none() {
            self.navigation.saved_draft = current_draft.to_string();
        }
        self.navigation.index = Some(next);
        self.entries.get(next).map(String::as_str)
    }

    /// Step to the next newer entry, or back to the saved draft.
    ///
    /// Returns `None` when not recalling.
    pub fn recall_newer(&mut self) -> Option<&str> {
        match self.navigation.index? {
            0 => {
                self.navigation.index = None;
                Some(self.navigation.saved_draft.as_str())
            }
            index => {
                self.navigation.index = Some(index - 1);
                self.entries.get(index - 1).map(String::as_str)
            }
        }
    }

    /// End any recall because the user edited the text directly.
    pub fn reset_navigation(&mut self) {
        if self.navigation.is_navigating() {
            self.navigation.clear();
        }
    }

    /// Drop all entries for this session, in memory and in the store.
    pub fn clear(&mut self) -> relaychat_storage::StorageResult<()> {
        self.entries.clear();
        self.navigation.clear();
        self.store.remove(&self.key)
    }

    /// Entries, newest first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_navigating(&self) -> bool {
        self.navigation.is_navigating()
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Storage key of this history.
    pub fn key(&self) -> &str {
        &self.key
    }

    fn persist(&self) {
        let encoded = match serde_json::to_string(&self.entries) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to encode input history");
                return;
            }
        };

        match self.store.set(&self.key, &encoded) {
            Ok(()) => info!(key = %self.key, entries = self.entries.len(), "Saved input history"),
            Err(e) => warn!(key = %self.key, error = %e, "Failed to persist input history"),
        }
    }
}

/// Read the stored list for `key`, treating any failure as empty.
pub fn load_entries(store: &dyn KeyValueStore, key: &str) -> Vec<String> {
    let raw = match store.get_string(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!(key, error = %e, "Failed to read input history");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<String>>(&raw) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(key, error = %e, "Ignoring malformed input history");
            Vec::new()
        }
    }
}
