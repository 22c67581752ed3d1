//! Runtime options and the borrowed context handed to command handlers.

use std::collections::BTreeMap;

use crate::commands::kickvote::KickVote;
use crate::error::CommandError;
use crate::instruction::Outbox;
use crate::items::{ItemCatalog, ItemId};
use crate::privilege::{PrivilegeModel, Tier};
use crate::registry::CommandRegistry;
use crate::session::SessionTable;
use crate::state::ExtensionState;

/// Named runtime options supplied at startup.
#[derive(Debug, Clone)]
pub struct Options {
    /// Tally at which a kickvote passes.
    pub vote_threshold: u32,
    /// Seconds before an unfinished kickvote expires.
    pub vote_expiration: u64,
    pub rules: String,
    /// Login greeting; `%` is replaced with the user's name.
    pub welcome: String,
    /// Seconds between state flushes. 0 disables periodic saving.
    pub save_frequency: u64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            vote_threshold: 5,
            vote_expiration: 300,
            rules: "No griefing, no stealing, be nice.".into(),
            welcome: String::new(),
            save_frequency: 60,
        }
    }
}

/// State that lives only as long as the process.
#[derive(Debug, Default)]
pub struct RuntimeState {
    /// Seconds since startup, advanced by the periodic tick.
    pub counter: u64,
    pub kickvotes: BTreeMap<String, KickVote>,
    pub last_kick_vote: Option<String>,
    pub disco: bool,
    /// `time add` amount emitted every tick, 0 when off.
    pub time_warp: u32,
    /// server.properties, in file order.
    pub server_properties: Vec<(String, String)>,
}

/// Everything a command handler may touch, borrowed from the dispatcher for
/// one call.
pub struct CommandContext<'a> {
    pub registry: &'a CommandRegistry,
    pub catalog: &'a ItemCatalog,
    pub privileges: &'a mut PrivilegeModel,
    pub sessions: &'a SessionTable,
    pub state: &'a mut ExtensionState,
    pub runtime: &'a mut RuntimeState,
    pub options: &'a mut Options,
    pub out: &'a mut Outbox,
}

impl CommandContext<'_> {
    /// Queue a chat broadcast.
    pub fn say(&mut self, text: impl Into<String>) {
        self.out.say(text);
    }

    /// Tier currently held by `user`.
    pub fn tier_of(&self, user: &str) -> Tier {
        self.privileges.tier_of(user)
    }

    /// Resolve an item token, failing with the user-visible "no item" notice.
    pub fn resolve_item(&self, token: &str) -> Result<ItemId, CommandError> {
        self.catalog
            .resolve(token)
            .ok_or_else(|| CommandError::ValidationFailed(format!("No item {token} found.")))
    }

    /// Announce and return true if `user` does not wish to be disturbed.
    pub fn check_dnd(&mut self, user: &str) -> bool {
        if self.state.is_dnd(user) {
            self.say(format!("{user} does not wish to be disturbed, don't be a jerk!"));
            true
        } else {
            false
        }
    }

    /// Display names of online users who have not opted out with `!dnd`.
    pub fn disturbable_users(&self) -> Vec<String> {
        self.sessions
            .online()
            .into_iter()
            .filter(|u| !self.state.is_dnd(u))
            .collect()
    }

    /// Seconds the user has been connected in the current session.
    pub fn session_seconds(&self, user: &str) -> Option<u64> {
        self.sessions
            .get(user)
            .map(|s| self.runtime.counter.saturating_sub(s.login_tick))
    }
}
