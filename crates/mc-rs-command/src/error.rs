//! Command dispatch errors.

use thiserror::Error;

use crate::privilege::Tier;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0} is not a valid command.")]
    UnknownCommand(String),

    #[error("{user} is not {}, cannot use !{command}.", .required.with_article())]
    PermissionDenied {
        user: String,
        required: Tier,
        command: String,
    },

    #[error("{0}")]
    ValidationFailed(String),

    #[error("Expected {0}.")]
    MissingArguments(String),

    #[error("command failed: {0}")]
    Runtime(String),
}

impl CommandError {
    /// Text shown to players in chat, or `None` for failures that only go to
    /// the operator log.
    pub fn notice(&self) -> Option<String> {
        match self {
            CommandError::Runtime(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Runtime failures are logged, never shown in chat.
    pub fn is_runtime(&self) -> bool {
        matches!(self, CommandError::Runtime(_))
    }
}

/// Errors raised while building a [`crate::registry::CommandRegistry`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("command {0} is already registered")]
    Duplicate(String),

    #[error("command {0} ends with the reserved \"all\" suffix")]
    ReservedSuffix(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_notice_names_command() {
        let err = CommandError::PermissionDenied {
            user: "blizzard4U".into(),
            required: Tier::HalfOp,
            command: "give".into(),
        };
        assert_eq!(
            err.notice().as_deref(),
            Some("blizzard4U is not a half-op, cannot use !give.")
        );
    }

    #[test]
    fn runtime_failures_have_no_notice() {
        let err = CommandError::Runtime("boom".into());
        assert!(err.notice().is_none());
        assert!(err.is_runtime());
    }
}
