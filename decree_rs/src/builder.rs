//! Fluent construction of a CLI description.

use crate::error::Result;
use crate::runner::Cli;
use crate::spec::{CliSpec, CommandSpec, OptionSpec};

/// Start describing a CLI.
///
/// ```
/// use decree::{cli, CommandSpec};
///
/// let app = cli("mycli", "1.0.0")
///     .description("Example tool")
///     .command(CommandSpec::new("status").describe("Show status"))
///     .build()
///     .unwrap();
/// assert_eq!(app.spec().name, "mycli");
/// ```
pub fn cli(name: impl Into<String>, version: impl Into<String>) -> Builder {
    Builder {
        spec: CliSpec {
            name: name.into(),
            version: version.into(),
            ..CliSpec::default()
        },
    }
}

/// Accumulates a [`CliSpec`] and compiles it into a [`Cli`].
#[derive(Debug, Clone, Default)]
pub struct Builder {
    spec: CliSpec,
}

impl Builder {
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.spec.description = text.into();
        self
    }

    pub fn command(mut self, command: CommandSpec) -> Self {
        self.spec.commands.push(command);
        self
    }

    /// Register an option merged into every command. A command declaring
    /// a local option of the same name overrides it for that command.
    pub fn global_option(mut self, option: OptionSpec) -> Self {
        self.spec.global_options.push(option);
        self
    }

    /// The accumulated declaration, unvalidated.
    pub fn into_spec(self) -> CliSpec {
        self.spec
    }

    /// Validate and compile. All configuration errors surface here.
    pub fn build(self) -> Result<Cli> {
        Cli::new(self.spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_accumulates_in_order() {
        let spec = cli("mycli", "1.0.0")
            .description("Example tool")
            .command(CommandSpec::new("deploy"))
            .command(CommandSpec::new("build"))
            .global_option(OptionSpec::boolean("verbose", "--verbose"))
            .into_spec();

        assert_eq!(spec.name, "mycli");
        assert_eq!(spec.version, "1.0.0");
        let names: Vec<_> = spec.commands.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["deploy", "build"]);
        assert_eq!(spec.global_options.len(), 1);
    }

    #[test]
    fn build_rejects_bad_configuration() {
        let err = cli("mycli", "1.0.0")
            .command(CommandSpec::new("deploy"))
            .command(CommandSpec::new("deploy"))
            .build()
            .unwrap_err();
        assert_eq!(err.code(), "CLI_ERROR");
    }
}
