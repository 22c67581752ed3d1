//! Test harness driving a [`Dispatcher`] the way the server would.

use crate::context::{Options, RuntimeState};
use crate::dispatcher::Dispatcher;
use crate::state::ExtensionState;

pub(crate) struct Harness {
    dispatcher: Dispatcher,
}

impl Harness {
    /// A dispatcher with `users` logged in, in order, and output cleared.
    pub fn with_users(users: &[&str]) -> Self {
        let mut dispatcher = Dispatcher::new(Options::default());
        for user in users {
            dispatcher.login(user);
        }
        dispatcher.drain_output();
        Self { dispatcher }
    }

    pub fn op(mut self, user: &str) -> Self {
        self.dispatcher.privileges_mut().add_op(user);
        self
    }

    pub fn hop(mut self, user: &str) -> Self {
        self.dispatcher.privileges_mut().add_hop(user);
        self
    }

    /// Run `line` (a command without the `!`) as `user`.
    pub fn run(&mut self, user: &str, line: &str) -> Vec<String> {
        let mut words = line.split_whitespace();
        let name = words.next().unwrap_or_default();
        let args: Vec<String> = words.map(String::from).collect();
        self.dispatcher.execute(user, name, &args);
        self.output()
    }

    /// Feed a raw server output line.
    pub fn line(&mut self, raw: &str) -> Vec<String> {
        self.dispatcher.handle_line(raw);
        self.output()
    }

    pub fn tick(&mut self) -> Vec<String> {
        self.dispatcher.tick();
        self.output()
    }

    pub fn connect(&mut self, user: &str) -> Vec<String> {
        self.dispatcher.login(user);
        self.output()
    }

    pub fn disconnect(&mut self, user: &str) -> Vec<String> {
        self.dispatcher.logout(user);
        self.output()
    }

    /// Drain queued instructions as console lines.
    pub fn output(&mut self) -> Vec<String> {
        self.dispatcher
            .drain_output()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    pub fn dispatcher(&mut self) -> &mut Dispatcher {
        &mut self.dispatcher
    }

    pub fn state(&self) -> &ExtensionState {
        self.dispatcher.state()
    }

    pub fn runtime(&self) -> &RuntimeState {
        self.dispatcher.runtime()
    }

    pub fn set_vote_expiration(&mut self, seconds: u64) {
        self.dispatcher.options_mut().vote_expiration = seconds;
    }

    pub fn set_properties(&mut self, properties: &[(&str, &str)]) {
        self.dispatcher.set_server_properties(
            properties
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        );
    }
}
