//! Routing of chat commands to handlers, plus the login, disconnect and
//! periodic tick hooks.

use tracing::{debug, error, info, warn};

use crate::commands::{kickvote, notes, timers};
use crate::context::{CommandContext, Options, RuntimeState};
use crate::error::CommandError;
use crate::instruction::{Instruction, Outbox};
use crate::items::{ItemCatalog, ItemId};
use crate::line::{classify, LineEvent};
use crate::privilege::{PrivilegeModel, Tier};
use crate::registry::{CommandDescriptor, CommandRegistry, Outcome, Validation, ALL_SUFFIX};
use crate::session::SessionTable;
use crate::state::ExtensionState;
use crate::store::StateStore;

/// Shortcut expansions nested deeper than this are dropped. `!last` replays
/// its entry at its own depth.
const MAX_EXPANSION_DEPTH: usize = 1;

/// Commands that are never written to history.
const UNRECORDED: &[&str] = &["last", "history"];

/// How a command name resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Registered { name: &'static str, is_all: bool },
    /// The name is an item; runs `give` with the arguments as quantity.
    ImplicitGive(ItemId),
    Unknown,
}

/// Result of one dispatch, for callers that care.
#[derive(Debug)]
pub enum Dispatch {
    Executed,
    Denied(CommandError),
    Failed(CommandError),
}

/// Owns all extension state and routes server lines to it.
pub struct Dispatcher {
    registry: CommandRegistry,
    catalog: ItemCatalog,
    privileges: PrivilegeModel,
    sessions: SessionTable,
    state: ExtensionState,
    runtime: RuntimeState,
    options: Options,
    out: Outbox,
    store: Option<StateStore>,
}

impl Dispatcher {
    /// A dispatcher with empty state and no persistence.
    pub fn new(options: Options) -> Self {
        Self {
            registry: CommandRegistry::new(),
            catalog: ItemCatalog::new(),
            privileges: PrivilegeModel::default(),
            sessions: SessionTable::default(),
            state: ExtensionState::default(),
            runtime: RuntimeState::default(),
            options,
            out: Outbox::default(),
            store: None,
        }
    }

    /// Load saved state and half-ops from `store`, and save back to it.
    pub fn with_store(mut self, store: StateStore) -> Self {
        let (state, hops) = store.load();
        self.state = state;
        for hop in hops {
            self.privileges.add_hop(&hop);
        }
        info!("Using data directory {}", store.dir().display());
        self.store = Some(store);
        self
    }

    /// Grant op to each name, as read from `ops.txt`.
    pub fn with_ops(mut self, ops: impl IntoIterator<Item = String>) -> Self {
        for op in ops {
            self.privileges.add_op(&op);
        }
        self
    }

    /// Seed the `server.properties` entries shown by `!property`.
    pub fn with_properties(mut self, properties: Vec<(String, String)>) -> Self {
        self.set_server_properties(properties);
        self
    }

    /// Replace the `server.properties` entries shown by `!property`.
    pub fn set_server_properties(&mut self, properties: Vec<(String, String)>) {
        self.runtime.server_properties = properties;
    }

    // -----------------------------------------------------------------------
    // Server events
    // -----------------------------------------------------------------------

    /// Process one line of server output.
    pub fn handle_line(&mut self, line: &str) {
        match classify(line) {
            LineEvent::Login(user) => self.login(&user),
            LineEvent::Disconnect(user) => self.logout(&user),
            LineEvent::Opped(user) => {
                info!(user = %user, "Opped");
                self.privileges.add_op(&user);
            }
            LineEvent::Deopped(user) => {
                info!(user = %user, "De-opped");
                self.privileges.remove_op(&user);
            }
            LineEvent::Command { user, name, args } => {
                self.execute(&user, &name, &args);
            }
            LineEvent::Other => {}
        }
    }

    /// Start a session, greet the user and deliver their memos.
    pub fn login(&mut self, user: &str) {
        if let Some(previous) = self.sessions.logout(user) {
            self.fold_uptime(&previous.display_name, previous.login_tick);
        }
        info!(user, "User logged in");
        self.sessions.login(user, self.runtime.counter);

        if !self.options.welcome.is_empty() {
            let greeting = self.options.welcome.replace('%', user);
            self.out.say(greeting);
        }
        let memos = notes::take_memos(&mut self.context(), user);
        for memo in memos {
            self.out.say(memo);
        }
    }

    /// End a session, log its uptime and flush state.
    pub fn logout(&mut self, user: &str) {
        let Some(session) = self.sessions.logout(user) else {
            debug!(user, "Disconnect for unknown session");
            return;
        };
        self.fold_uptime(&session.display_name, session.login_tick);
        info!(user, "User disconnected");
        self.save();
    }

    /// Log every live session's uptime so far and flush state. Sessions stay
    /// open, counting again from now.
    pub fn shutdown(&mut self) {
        let now = self.runtime.counter;
        for (user, login_tick) in self.sessions.restart_all(now) {
            self.fold_uptime(&user, login_tick);
        }
        info!("Logged uptime for open sessions");
        self.save();
    }

    fn fold_uptime(&mut self, user: &str, login_tick: u64) {
        let seconds = self.runtime.counter.saturating_sub(login_tick);
        *self.state.uptime.entry(user.to_lowercase()).or_default() += seconds;
    }

    /// Advance the clock by one second.
    pub fn tick(&mut self) {
        self.runtime.counter += 1;
        {
            let mut ctx = self.context();
            kickvote::expire_votes(&mut ctx);
            timers::fire(&mut ctx);
        }
        if self.runtime.time_warp > 0 {
            self.out.push(Instruction::TimeAdd(self.runtime.time_warp));
        }
        let every = self.options.save_frequency;
        if every > 0 && self.runtime.counter % every == 0 {
            self.save();
        }
    }

    /// Flush persistent state, if a store is attached.
    pub fn save(&self) {
        if let Some(store) = &self.store {
            store.save(&self.state, self.privileges.hops());
        }
    }

    /// Take the instructions queued since the last drain.
    pub fn drain_output(&mut self) -> Vec<Instruction> {
        self.out.drain()
    }

    // -----------------------------------------------------------------------
    // Dispatch
    // -----------------------------------------------------------------------

    /// Decide what `name` refers to.
    pub fn resolve(&self, name: &str) -> Resolution {
        if let Some(root) = name.strip_suffix(ALL_SUFFIX) {
            if let Some(desc) = self.registry.get(root) {
                if desc.supports_all() {
                    return Resolution::Registered {
                        name: desc.name,
                        is_all: true,
                    };
                }
            }
        }
        if let Some(desc) = self.registry.get(name) {
            return Resolution::Registered {
                name: desc.name,
                is_all: false,
            };
        }
        match self.catalog.resolve_exact(name) {
            Some(item) => Resolution::ImplicitGive(item),
            None => Resolution::Unknown,
        }
    }

    /// Run a chat command for `user`.
    pub fn execute(&mut self, user: &str, name: &str, args: &[String]) -> Dispatch {
        self.run(user, name, args, 0, true)
    }

    fn run(
        &mut self,
        user: &str,
        name: &str,
        args: &[String],
        depth: usize,
        record: bool,
    ) -> Dispatch {
        let name = name.to_lowercase();
        let (target, is_all, call_args) = match self.resolve(&name) {
            Resolution::Registered { name, is_all } => (name, is_all, args.to_vec()),
            Resolution::ImplicitGive(item) => {
                let mut call_args = vec![item.to_string()];
                call_args.extend_from_slice(args);
                ("give", false, call_args)
            }
            Resolution::Unknown => {
                let err = CommandError::UnknownCommand(name.clone());
                return self.fail(user, &name, args, err);
            }
        };
        let Some(desc) = self.registry.get(target).cloned() else {
            let err = CommandError::UnknownCommand(name.clone());
            return self.fail(user, &name, args, err);
        };
        debug!(user, command = %name, args = args.len(), depth, "Dispatching");

        let required = if is_all { Tier::Op } else { desc.tier };
        if let Err(err) = self.privileges.authorize(user, required, &name) {
            self.report(user, &name, args, &err);
            return Dispatch::Denied(err);
        }

        if let Some(validator) = desc.validator {
            if let Validation::Rejected(reason) = validator(&self.context(), &call_args) {
                return self.fail(user, &name, args, CommandError::ValidationFailed(reason));
            }
        }

        let shaped = match desc.shape_args(&call_args) {
            Ok(shaped) => shaped.to_vec(),
            Err(err) => return self.fail(user, &name, args, err),
        };

        let result = if is_all {
            self.fan_out(user, &desc, &shaped)
        } else {
            (desc.handler)(&mut self.context(), user, &shaped)
        };

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(err) => return self.fail(user, &name, args, err),
        };

        // Expand before recording so a replay never sees its own invocation
        if let Outcome::Expand(line) = outcome {
            self.expand(user, &name, line, depth);
        }

        if record && !UNRECORDED.contains(&desc.name) {
            let mut invocation = vec![name.clone()];
            invocation.extend_from_slice(args);
            self.state.record_history(user, invocation);
        }
        Dispatch::Executed
    }

    /// Broadcast the `all` phrase, then run the command for everyone.
    fn fan_out(
        &mut self,
        user: &str,
        desc: &CommandDescriptor,
        args: &[String],
    ) -> Result<Outcome, CommandError> {
        let phrase = desc.all.unwrap_or_default();
        self.out.say(format!("{user} {phrase}"));

        if let Some(handler) = desc.all_handler {
            return handler(&mut self.context(), user, args);
        }

        let targets = self.context().disturbable_users();
        for target in targets {
            match (desc.handler)(&mut self.context(), &target, args) {
                Ok(_) => {}
                Err(err) if err.is_runtime() => self.report(&target, desc.name, args, &err),
                Err(err) => return Err(err),
            }
        }
        Ok(Outcome::Done)
    }

    fn expand(&mut self, user: &str, from: &str, line: Vec<String>, depth: usize) {
        // `last` never replays itself, so keeping its depth cannot loop
        let depth = if from == "last" { depth } else { depth + 1 };
        if depth > MAX_EXPANSION_DEPTH {
            warn!(user, command = from, "Dropping nested expansion");
            self.out.say(format!("!{from} cannot be used from a shortcut."));
            return;
        }
        let Some((name, args)) = line.split_first() else {
            return;
        };
        self.run(user, name, args, depth, false);
    }

    fn fail(&mut self, user: &str, name: &str, args: &[String], err: CommandError) -> Dispatch {
        self.report(user, name, args, &err);
        Dispatch::Failed(err)
    }

    /// Show the error in chat, or log it when it has no chat notice.
    fn report(&mut self, user: &str, name: &str, args: &[String], err: &CommandError) {
        match err.notice() {
            Some(notice) => {
                debug!(user, command = name, error = %err, "Command rejected");
                self.out.say(notice);
            }
            None => error!(
                user,
                command = name,
                args = args.len(),
                error = %err,
                "Command failed"
            ),
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    fn context(&mut self) -> CommandContext<'_> {
        CommandContext {
            registry: &self.registry,
            catalog: &self.catalog,
            privileges: &mut self.privileges,
            sessions: &self.sessions,
            state: &mut self.state,
            runtime: &mut self.runtime,
            options: &mut self.options,
            out: &mut self.out,
        }
    }

    /// Op and half-op membership.
    pub fn privileges(&self) -> &PrivilegeModel {
        &self.privileges
    }

    pub fn privileges_mut(&mut self) -> &mut PrivilegeModel {
        &mut self.privileges
    }

    /// Users currently online.
    pub fn sessions(&self) -> &SessionTable {
        &self.sessions
    }

    pub fn state(&self) -> &ExtensionState {
        &self.state
    }

    pub fn runtime(&self) -> &RuntimeState {
        &self.runtime
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }
}
