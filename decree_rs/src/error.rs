//! Error taxonomy for the engine.
//!
//! Every failure carries a stable machine-readable code alongside its human
//! message, so embedders can branch on category without string matching.
//! The engine never prints or exits; errors flow back to the caller and
//! presentation happens in [`Cli::exec`](crate::Cli::exec) or user code.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Stable error codes, one per [`Error`] variant.
pub mod codes {
    /// Invalid declarative configuration, rejected before any parsing.
    pub const CLI_ERROR: &str = "CLI_ERROR";
    /// The command token matched no registered name or alias.
    pub const COMMAND_NOT_FOUND: &str = "COMMAND_NOT_FOUND";
    /// Missing or malformed input for a declared argument or option.
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    /// A user action returned an error after a successful parse.
    pub const ACTION_ERROR: &str = "ACTION_ERROR";
}

/// All failures surfaced by [`Cli`](crate::Cli).
#[derive(Debug, Error)]
pub enum Error {
    /// The declarative input was rejected at construction time: duplicate
    /// command names, colliding flags, a required argument declared after
    /// an optional one, a default that contradicts its declared kind.
    #[error("{0}")]
    Config(String),

    /// The first argv token resolved to no command. Carries the attempted
    /// name and, when a registered name is close enough, a suggestion.
    #[error("unknown command '{command}'{}", suggestion_suffix(.suggestion))]
    CommandNotFound {
        command: String,
        suggestion: Option<String>,
    },

    /// Parse-time failure: a missing required argument or option, a value
    /// that failed coercion, or a custom validator that rejected its input.
    #[error("{message}")]
    Validation {
        /// Name of the argument or option the failure refers to, when known.
        field: Option<String>,
        message: String,
    },

    /// An action failed. The underlying error is propagated verbatim,
    /// never rewrapped, so `source()` and downcasting keep working.
    #[error(transparent)]
    Action(#[from] anyhow::Error),
}

impl Error {
    /// Stable code for this error category. See [`codes`].
    pub fn code(&self) -> &'static str {
        match self {
            Error::Config(_) => codes::CLI_ERROR,
            Error::CommandNotFound { .. } => codes::COMMAND_NOT_FOUND,
            Error::Validation { .. } => codes::VALIDATION_ERROR,
            Error::Action(_) => codes::ACTION_ERROR,
        }
    }

    /// Argument or option name attached to a validation failure.
    pub fn field(&self) -> Option<&str> {
        match self {
            Error::Validation { field, .. } => field.as_deref(),
            _ => None,
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Error::Validation {
            field: None,
            message: message.into(),
        }
    }

    pub(crate) fn validation_for(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Validation {
            field: Some(field.into()),
            message: message.into(),
        }
    }
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(name) => format!(", did you mean '{name}'?"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_variants() {
        assert_eq!(Error::config("bad").code(), "CLI_ERROR");
        assert_eq!(
            Error::CommandNotFound {
                command: "fooz".into(),
                suggestion: None,
            }
            .code(),
            "COMMAND_NOT_FOUND"
        );
        assert_eq!(Error::validation("nope").code(), "VALIDATION_ERROR");
        assert_eq!(
            Error::Action(anyhow::anyhow!("boom")).code(),
            "ACTION_ERROR"
        );
    }

    #[test]
    fn not_found_message_includes_suggestion() {
        let err = Error::CommandNotFound {
            command: "deplyo".into(),
            suggestion: Some("deploy".into()),
        };
        assert_eq!(
            err.to_string(),
            "unknown command 'deplyo', did you mean 'deploy'?"
        );

        let bare = Error::CommandNotFound {
            command: "fooz".into(),
            suggestion: None,
        };
        assert_eq!(bare.to_string(), "unknown command 'fooz'");
    }

    #[test]
    fn validation_keeps_field_name() {
        let err = Error::validation_for("env", "option '--env' requires a value");
        assert_eq!(err.field(), Some("env"));
        assert_eq!(err.to_string(), "option '--env' requires a value");
    }

    #[test]
    fn action_errors_pass_through_verbatim() {
        let inner = anyhow::anyhow!("disk on fire");
        let err = Error::from(inner);
        assert_eq!(err.to_string(), "disk on fire");
        assert!(matches!(err, Error::Action(_)));
    }
}
