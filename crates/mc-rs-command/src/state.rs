//! Persistent per-user collections. Every map is keyed by lowercased username.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::items::ItemId;

/// Memos queued for one user are capped at this many.
pub const MAX_MEMOS: usize = 5;

/// Number of invocations kept in each user's history.
pub const HISTORY_LEN: usize = 3;

/// A message left for a user, delivered at their next login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memo {
    pub from: String,
    pub text: String,
}

/// Everything that survives a restart, one field per data file.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtensionState {
    /// Auto-give timers: user → item → interval in seconds.
    pub timers: BTreeMap<String, BTreeMap<ItemId, u32>>,
    /// Shortcuts: user → label → command words.
    pub shortcuts: BTreeMap<String, BTreeMap<String, Vec<String>>>,
    pub points: BTreeMap<String, i64>,
    /// Users who do not wish to be disturbed.
    pub dnd: BTreeSet<String>,
    pub memos: BTreeMap<String, Vec<Memo>>,
    pub todo: Vec<String>,
    /// Logged uptime in seconds, excluding the current session.
    pub uptime: BTreeMap<String, u64>,
    /// Recent invocations, newest first.
    pub history: BTreeMap<String, VecDeque<Vec<String>>>,
}

impl ExtensionState {
    /// True if `user` asked not to be disturbed.
    pub fn is_dnd(&self, user: &str) -> bool {
        self.dnd.contains(&user.to_lowercase())
    }

    /// Record an invocation unless it repeats the most recent one.
    pub fn record_history(&mut self, user: &str, invocation: Vec<String>) {
        let entries = self.history.entry(user.to_lowercase()).or_default();
        if entries.front() == Some(&invocation) {
            return;
        }
        entries.push_front(invocation);
        entries.truncate(HISTORY_LEN);
    }

    /// Remembered invocations for `user`, newest first.
    pub fn history_of(&self, user: &str) -> Option<&VecDeque<Vec<String>>> {
        self.history.get(&user.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(line: &str) -> Vec<String> {
        line.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn history_is_bounded_and_newest_first() {
        let mut state = ExtensionState::default();
        for line in ["give dirt", "tp foo", "list", "rules"] {
            state.record_history("Foo", words(line));
        }
        let history = state.history_of("foo").unwrap();
        assert_eq!(history.len(), HISTORY_LEN);
        assert_eq!(history[0], words("rules"));
        assert_eq!(history[2], words("tp foo"));
    }

    #[test]
    fn consecutive_duplicates_are_skipped() {
        let mut state = ExtensionState::default();
        state.record_history("foo", words("list"));
        state.record_history("foo", words("list"));
        state.record_history("foo", words("rules"));
        state.record_history("foo", words("list"));
        let history = state.history_of("foo").unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0], words("list"));
        assert_eq!(history[1], words("rules"));
    }

    #[test]
    fn serde_defaults_for_missing_fields() {
        let state: ExtensionState = serde_json::from_str(r#"{"todo": ["build a wall"]}"#).unwrap();
        assert_eq!(state.todo, vec!["build a wall"]);
        assert!(state.points.is_empty());
    }
}
