//! Declarative command model.
//!
//! A CLI is described as plain data: a [`CliSpec`] holds commands, each
//! [`CommandSpec`] declares its positionals, options and action. The engine
//! owns all tokenizing, binding, coercion and validation; user code only
//! supplies these declarations and an action to run.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::parsed::{OptionValue, ParsedCommand};

/// Declared value type of an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueKind {
    /// Presence-implies-true flag. Never consumes a following token.
    Bool,
    /// Numeric value, parsed as `f64`.
    Number,
    /// Raw string passthrough. The default when nothing is declared.
    #[default]
    Text,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ValueKind::Bool => "boolean",
            ValueKind::Number => "number",
            ValueKind::Text => "string",
        };
        f.write_str(label)
    }
}

/// Validation callback for a bound argument value. Return `Err` with a
/// message to reject; an empty message falls back to generic wording.
pub type ArgValidator = Arc<dyn Fn(&str) -> Result<(), String> + Send + Sync>;

/// Validation callback for a coerced option value.
pub type OptionValidator = Arc<dyn Fn(&OptionValue) -> Result<(), String> + Send + Sync>;

/// Stored action. Invoked with the parse result and awaited to completion;
/// errors propagate to the runner verbatim.
pub type Action =
    Arc<dyn Fn(ParsedCommand) -> BoxFuture<'static, anyhow::Result<()>> + Send + Sync>;

/// One declared positional argument.
#[derive(Clone, Default)]
pub struct ArgSpec {
    /// Key under which the bound value lands in [`ParsedCommand::args`].
    pub name: String,
    /// Help text shown in the ARGUMENTS section.
    pub description: String,
    /// Required arguments must be bound from argv; parsing fails otherwise.
    pub required: bool,
    /// Fallback used when the argument is absent from argv.
    pub default: Option<String>,
    /// Optional custom check, run after binding.
    pub validate: Option<ArgValidator>,
}

impl ArgSpec {
    /// Optional positional.
    pub fn new(name: impl Into<String>) -> Self {
        ArgSpec {
            name: name.into(),
            ..ArgSpec::default()
        }
    }

    /// Required positional.
    pub fn required(name: impl Into<String>) -> Self {
        ArgSpec {
            name: name.into(),
            required: true,
            ..ArgSpec::default()
        }
    }

    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn validate<F>(mut self, check: F) -> Self
    where
        F: Fn(&str) -> Result<(), String> + Send + Sync + 'static,
    {
        self.validate = Some(Arc::new(check));
        self
    }
}

impl fmt::Debug for ArgSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgSpec")
            .field("name", &self.name)
            .field("required", &self.required)
            .field("default", &self.default)
            .field("validate", &self.validate.as_ref().map(|_| "fn"))
            .finish()
    }
}

/// One declared option.
#[derive(Clone, Default)]
pub struct OptionSpec {
    /// Key under which the coerced value lands in [`ParsedCommand::options`].
    pub name: String,
    /// Primary token form, dashes included (`--verbose`).
    pub flag: String,
    /// Alternate token forms (`-v`). Matched whole, in declared order.
    pub aliases: Vec<String>,
    /// Help text shown in the OPTIONS section.
    pub description: String,
    /// Declared value type; drives coercion and token claiming.
    pub kind: ValueKind,
    /// Fallback used when no token form appears in argv.
    pub default: Option<OptionValue>,
    /// Required options must appear in argv or carry a default.
    pub required: bool,
    /// Optional custom check, run after coercion.
    pub validate: Option<OptionValidator>,
}

impl OptionSpec {
    /// String-valued option.
    pub fn new(name: impl Into<String>, flag: impl Into<String>) -> Self {
        OptionSpec {
            name: name.into(),
            flag: flag.into(),
            ..OptionSpec::default()
        }
    }

    /// Boolean option: bare presence reads as `true`.
    pub fn boolean(name: impl Into<String>, flag: impl Into<String>) -> Self {
        OptionSpec {
            kind: ValueKind::Bool,
            ..OptionSpec::new(name, flag)
        }
    }

    /// Number-valued option.
    pub fn number(name: impl Into<String>, flag: impl Into<String>) -> Self {
        OptionSpec {
            kind: ValueKind::Number,
            ..OptionSpec::new(name, flag)
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }

    pub fn default_value(mut self, value: impl Into<OptionValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn validate<F>(mut self, check: F) -> Self
    where
        F: Fn(&OptionValue) -> Result<(), String> + Send + Sync + 'static,
    {
        self.validate = Some(Arc::new(check));
        self
    }

    /// Whole-token match against the flag, then each alias in order.
    pub fn matches(&self, token: &str) -> bool {
        self.flag == token || self.aliases.iter().any(|a| a == token)
    }
}

impl fmt::Debug for OptionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionSpec")
            .field("name", &self.name)
            .field("flag", &self.flag)
            .field("aliases", &self.aliases)
            .field("kind", &self.kind)
            .field("default", &self.default)
            .field("required", &self.required)
            .field("validate", &self.validate.as_ref().map(|_| "fn"))
            .finish()
    }
}

/// One declared command.
#[derive(Clone, Default)]
pub struct CommandSpec {
    /// Primary name, matched exactly against the first argv token.
    pub name: String,
    /// Alternate names resolving to this same command.
    pub aliases: Vec<String>,
    /// Help text shown in command listings.
    pub description: String,
    /// Sample invocations for the EXAMPLES help section.
    pub examples: Vec<String>,
    /// Declared positionals, bound left to right.
    pub args: Vec<ArgSpec>,
    /// Local options. A local name overrides a global of the same name.
    pub options: Vec<OptionSpec>,
    /// Capture leftover positionals into `dynamic_args`.
    pub allow_dynamic_args: bool,
    /// Capture unmatched option tokens into `dynamic_options`.
    pub allow_dynamic_options: bool,
    /// Handler invoked after a successful parse. Commands without one
    /// still parse; the result is returned to the caller instead.
    pub action: Option<Action>,
}

impl CommandSpec {
    pub fn new(name: impl Into<String>) -> Self {
        CommandSpec {
            name: name.into(),
            ..CommandSpec::default()
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }

    pub fn example(mut self, line: impl Into<String>) -> Self {
        self.examples.push(line.into());
        self
    }

    pub fn arg(mut self, arg: ArgSpec) -> Self {
        self.args.push(arg);
        self
    }

    pub fn option(mut self, option: OptionSpec) -> Self {
        self.options.push(option);
        self
    }

    pub fn allow_dynamic_args(mut self) -> Self {
        self.allow_dynamic_args = true;
        self
    }

    pub fn allow_dynamic_options(mut self) -> Self {
        self.allow_dynamic_options = true;
        self
    }

    /// Synchronous action.
    pub fn action<F>(mut self, action: F) -> Self
    where
        F: Fn(ParsedCommand) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.action = Some(Arc::new(
            move |parsed| -> BoxFuture<'static, anyhow::Result<()>> {
                Box::pin(std::future::ready(action(parsed)))
            },
        ));
        self
    }

    /// Async action. The returned future is awaited to completion before
    /// the runner reports success.
    pub fn action_async<F, Fut>(mut self, action: F) -> Self
    where
        F: Fn(ParsedCommand) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.action = Some(Arc::new(
            move |parsed| -> BoxFuture<'static, anyhow::Result<()>> {
                Box::pin(action(parsed))
            },
        ));
        self
    }
}

impl fmt::Debug for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandSpec")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("args", &self.args)
            .field("options", &self.options)
            .field("allow_dynamic_args", &self.allow_dynamic_args)
            .field("allow_dynamic_options", &self.allow_dynamic_options)
            .field("action", &self.action.as_ref().map(|_| "fn"))
            .finish()
    }
}

/// Whole program description: metadata, commands, global options.
#[derive(Debug, Clone, Default)]
pub struct CliSpec {
    pub name: String,
    pub version: String,
    pub description: String,
    pub commands: Vec<CommandSpec>,
    /// Options merged into every command before resolution.
    pub global_options: Vec<OptionSpec>,
}
