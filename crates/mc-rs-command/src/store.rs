//! JSON persistence for extension state, one file per collection.
//!
//! Missing or unreadable files load as empty collections. Saves rewrite each
//! file wholesale; failures are logged and leave the in-memory state alone.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::state::ExtensionState;

const TIMERS_FILE: &str = "timers.json";
const SHORTCUTS_FILE: &str = "shortcuts.json";
const HOPS_FILE: &str = "hops.json";
const POINTS_FILE: &str = "points.json";
const DND_FILE: &str = "dnd.json";
const MEMOS_FILE: &str = "memos.json";
const TODO_FILE: &str = "todo.json";
const UPTIME_FILE: &str = "uptime.json";
const HISTORY_FILE: &str = "history.json";

/// Data directory holding the state files.
#[derive(Debug, Clone)]
pub struct StateStore {
    dir: PathBuf,
}

impl StateStore {
    /// A store rooted at `dir`. Nothing is read until [`StateStore::load`].
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load every collection, plus the persisted half-op set.
    pub fn load(&self) -> (ExtensionState, BTreeSet<String>) {
        let state = ExtensionState {
            timers: self.load_json(TIMERS_FILE),
            shortcuts: self.load_json(SHORTCUTS_FILE),
            points: self.load_json(POINTS_FILE),
            dnd: self.load_json(DND_FILE),
            memos: self.load_json(MEMOS_FILE),
            todo: self.load_json(TODO_FILE),
            uptime: self.load_json(UPTIME_FILE),
            history: self.load_json(HISTORY_FILE),
        };
        let hops = self.load_json(HOPS_FILE);
        (state, hops)
    }

    /// Write every collection.
    pub fn save(&self, state: &ExtensionState, hops: &BTreeSet<String>) {
        if let Err(e) = fs::create_dir_all(&self.dir) {
            warn!("Failed to create {}: {e}", self.dir.display());
            return;
        }
        self.save_json(TIMERS_FILE, &state.timers);
        self.save_json(SHORTCUTS_FILE, &state.shortcuts);
        self.save_json(HOPS_FILE, hops);
        self.save_json(POINTS_FILE, &state.points);
        self.save_json(DND_FILE, &state.dnd);
        self.save_json(MEMOS_FILE, &state.memos);
        self.save_json(TODO_FILE, &state.todo);
        self.save_json(UPTIME_FILE, &state.uptime);
        self.save_json(HISTORY_FILE, &state.history);
        debug!("Saved extension state to {}", self.dir.display());
    }

    fn load_json<T: DeserializeOwned + Default>(&self, name: &str) -> T {
        let path = self.dir.join(name);
        if !path.exists() {
            return T::default();
        }
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(value) => {
                    info!("Loaded {}", path.display());
                    value
                }
                Err(e) => {
                    warn!("Failed to parse {}: {e}", path.display());
                    T::default()
                }
            },
            Err(e) => {
                warn!("Failed to read {}: {e}", path.display());
                T::default()
            }
        }
    }

    fn save_json<T: Serialize + ?Sized>(&self, name: &str, value: &T) {
        let path = self.dir.join(name);
        match serde_json::to_string_pretty(value) {
            Ok(json) => {
                if let Err(e) = fs::write(&path, json) {
                    warn!("Failed to write {}: {e}", path.display());
                }
            }
            Err(e) => warn!("Failed to serialize {}: {e}", path.display()),
        }
    }
}
