//! Command metadata and the registry of available commands.

use std::collections::BTreeMap;

use crate::commands;
use crate::context::CommandContext;
use crate::error::{CommandError, RegistryError};
use crate::privilege::Tier;

/// Suffix that turns a command into its broadcast form.
pub const ALL_SUFFIX: &str = "all";

/// One declared parameter, after the implicit leading user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Param {
    Required(&'static str),
    Optional(&'static str),
    /// One or more trailing words.
    Variadic(&'static str),
    /// Zero or more trailing words.
    Rest(&'static str),
}

impl Param {
    pub fn name(self) -> &'static str {
        match self {
            Param::Required(n) | Param::Optional(n) | Param::Variadic(n) | Param::Rest(n) => n,
        }
    }

    fn is_trailing(self) -> bool {
        matches!(self, Param::Variadic(_) | Param::Rest(_))
    }

    fn usage(self) -> String {
        match self {
            Param::Required(n) => format!("<{n}>"),
            Param::Optional(n) => format!("[{n}]"),
            Param::Variadic(n) => format!("<{n}...>"),
            Param::Rest(n) => format!("[{n}...]"),
        }
    }
}

/// Result of a command-specific precondition check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Ok,
    Rejected(String),
}

/// What the dispatcher should do after a handler returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// Run this command line (name followed by arguments) for the same user.
    Expand(Vec<String>),
}

/// Command handler: context, acting user, shaped arguments.
pub type CommandFn = fn(&mut CommandContext<'_>, &str, &[String]) -> Result<Outcome, CommandError>;

pub type ValidatorFn = fn(&CommandContext<'_>, &[String]) -> Validation;

/// Static description of a command.
#[derive(Clone)]
pub struct CommandDescriptor {
    pub name: &'static str,
    pub tier: Tier,
    /// Broadcast phrase for the `<name>all` form, if offered.
    pub all: Option<&'static str>,
    pub params: &'static [Param],
    pub help: &'static str,
    pub handler: CommandFn,
    /// Replaces the per-user fan-out of the `all` form.
    pub all_handler: Option<CommandFn>,
    pub validator: Option<ValidatorFn>,
}

impl CommandDescriptor {
    /// A descriptor with no parameters, help or `all` form.
    pub fn new(name: &'static str, tier: Tier, handler: CommandFn) -> Self {
        Self {
            name,
            tier,
            all: None,
            params: &[],
            help: "",
            handler,
            all_handler: None,
            validator: None,
        }
    }

    /// Declare the parameters, in order.
    pub fn params(mut self, params: &'static [Param]) -> Self {
        self.params = params;
        self
    }

    /// One-line help shown by `!help <command>`.
    pub fn help(mut self, help: &'static str) -> Self {
        self.help = help;
        self
    }

    /// Offer a `<name>all` form, broadcast as `<user> <phrase>`.
    pub fn all(mut self, phrase: &'static str) -> Self {
        self.all = Some(phrase);
        self
    }

    /// Run this once for the `all` form instead of once per user.
    pub fn all_handler(mut self, handler: CommandFn) -> Self {
        self.all_handler = Some(handler);
        self
    }

    /// Check arguments before the command runs.
    pub fn validator(mut self, validator: ValidatorFn) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn supports_all(&self) -> bool {
        self.all.is_some()
    }

    pub fn is_variadic(&self) -> bool {
        self.params.iter().any(|p| p.is_trailing())
    }

    /// Minimum number of arguments the command accepts.
    pub fn required_count(&self) -> usize {
        self.params
            .iter()
            .filter(|p| matches!(p, Param::Required(_) | Param::Variadic(_)))
            .count()
    }

    /// Fit the caller's arguments to the declared parameters.
    ///
    /// Arguments past the last declared parameter of a non-variadic command
    /// are dropped without notice. Too few arguments fail with the names of
    /// the missing parameters.
    pub fn shape_args<'a>(&self, args: &'a [String]) -> Result<&'a [String], CommandError> {
        if args.len() < self.required_count() {
            if args.is_empty() && matches!(self.params, [Param::Variadic(_)]) {
                return Err(CommandError::MissingArguments(
                    "at least one argument".to_string(),
                ));
            }
            let missing: Vec<&str> = self
                .params
                .iter()
                .enumerate()
                .filter(|(idx, p)| {
                    *idx >= args.len() && matches!(p, Param::Required(_) | Param::Variadic(_))
                })
                .map(|(_, p)| p.name())
                .collect();
            return Err(CommandError::MissingArguments(missing.join(", ")));
        }

        if !self.is_variadic() && args.len() > self.params.len() {
            return Ok(&args[..self.params.len()]);
        }
        Ok(args)
    }

    /// e.g. `!give <item...>`
    pub fn usage(&self) -> String {
        let mut usage = format!("!{}", self.name);
        for param in self.params {
            usage.push(' ');
            usage.push_str(&param.usage());
        }
        usage
    }
}

/// Registry of available commands, ordered by name.
pub struct CommandRegistry {
    commands: BTreeMap<&'static str, CommandDescriptor>,
}

impl CommandRegistry {
    /// Create a registry with every built-in command.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for descriptor in commands::builtin() {
            registry
                .register(descriptor)
                .expect("built-in command table is invalid");
        }
        registry
    }

    /// A registry with no commands.
    pub fn empty() -> Self {
        Self {
            commands: BTreeMap::new(),
        }
    }

    /// Register a command. Names are unique and may not end in `all`.
    pub fn register(&mut self, descriptor: CommandDescriptor) -> Result<(), RegistryError> {
        let name = descriptor.name;
        if name.ends_with(ALL_SUFFIX) {
            return Err(RegistryError::ReservedSuffix(name.to_string()));
        }
        if self.commands.contains_key(name) {
            return Err(RegistryError::Duplicate(name.to_string()));
        }
        self.commands.insert(name, descriptor);
        Ok(())
    }

    /// Look up a command by its exact name.
    pub fn get(&self, name: &str) -> Option<&CommandDescriptor> {
        self.commands.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDescriptor> {
        self.commands.values()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &mut CommandContext<'_>, _: &str, _: &[String]) -> Result<Outcome, CommandError> {
        Ok(Outcome::Done)
    }

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn builtins_register_cleanly() {
        let reg = CommandRegistry::new();
        assert!(reg.contains("give"));
        assert!(reg.contains("kickvote"));
        assert!(reg.contains("help"));
        assert!(!reg.contains("giveall"));
        assert!(reg.iter().all(|d| !d.name.ends_with(ALL_SUFFIX)));
    }

    #[test]
    fn reserved_suffix_rejected() {
        let mut reg = CommandRegistry::empty();
        let err = reg
            .register(CommandDescriptor::new("ball", Tier::None, noop))
            .unwrap_err();
        assert_eq!(err, RegistryError::ReservedSuffix("ball".into()));
    }

    #[test]
    fn duplicates_rejected() {
        let mut reg = CommandRegistry::empty();
        reg.register(CommandDescriptor::new("tp", Tier::HalfOp, noop))
            .unwrap();
        let err = reg
            .register(CommandDescriptor::new("tp", Tier::Op, noop))
            .unwrap_err();
        assert_eq!(err, RegistryError::Duplicate("tp".into()));
    }

    #[test]
    fn excess_arguments_are_truncated() {
        let desc = CommandDescriptor::new("tp", Tier::HalfOp, noop)
            .params(&[Param::Required("target")]);
        let given = args(&["mike_n_7", "extra", "words"]);
        assert_eq!(desc.shape_args(&given).unwrap(), &given[..1]);
    }

    #[test]
    fn variadic_keeps_everything() {
        let desc = CommandDescriptor::new("give", Tier::HalfOp, noop)
            .params(&[Param::Variadic("item")]);
        let given = args(&["flint", "and", "steel", "2"]);
        assert_eq!(desc.shape_args(&given).unwrap().len(), 4);
    }

    #[test]
    fn missing_required_names_parameters() {
        let desc = CommandDescriptor::new("memo", Tier::None, noop)
            .params(&[Param::Required("target"), Param::Variadic("text")]);
        let err = desc.shape_args(&[]).unwrap_err();
        assert_eq!(err.notice().as_deref(), Some("Expected target, text."));
        let err = desc.shape_args(&args(&["foo"])).unwrap_err();
        assert_eq!(err.notice().as_deref(), Some("Expected text."));
    }

    #[test]
    fn variadic_only_needs_one() {
        let desc = CommandDescriptor::new("give", Tier::HalfOp, noop)
            .params(&[Param::Variadic("item")]);
        let err = desc.shape_args(&[]).unwrap_err();
        assert_eq!(
            err.notice().as_deref(),
            Some("Expected at least one argument.")
        );
    }

    #[test]
    fn optional_and_rest_may_be_empty() {
        let desc = CommandDescriptor::new("s", Tier::HalfOp, noop)
            .params(&[Param::Required("label"), Param::Rest("command")]);
        assert!(desc.shape_args(&args(&["cobble"])).is_ok());
        let desc = CommandDescriptor::new("board", Tier::None, noop)
            .params(&[Param::Optional("target")]);
        assert!(desc.shape_args(&[]).unwrap().is_empty());
    }

    #[test]
    fn usage_string() {
        let desc = CommandDescriptor::new("points", Tier::None, noop)
            .params(&[Param::Required("target"), Param::Optional("amount")]);
        assert_eq!(desc.usage(), "!points <target> [amount]");
    }
}
