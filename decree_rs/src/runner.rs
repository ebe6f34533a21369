//! Engine entry points.
//!
//! [`Cli`] is the compiled form of a [`CliSpec`]: construction validates
//! the whole declaration, after which [`Cli::run`] handles one invocation
//! end to end. Parsing is separated from dispatch so embedders and tests
//! can inspect a parse without running actions.

use std::io::IsTerminal;
use std::process::ExitCode;

use tracing::debug;

use crate::dispatch;
use crate::error::{Error, Result};
use crate::help;
use crate::parsed::ParsedCommand;
use crate::parser;
use crate::registry::CommandRegistry;
use crate::spec::{CliSpec, CommandSpec, OptionSpec};

/// What a parse produced, before any action runs.
#[derive(Debug)]
pub enum ParseOutcome<'a> {
    /// A command resolved and bound cleanly.
    Command {
        spec: &'a CommandSpec,
        parsed: ParsedCommand,
    },
    /// Help was requested, or no command token was given.
    Help(String),
    /// Version was requested.
    Version(String),
}

/// What a full run produced.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// The resolved command's action ran to completion.
    Ran { command: String },
    /// Parse succeeded but the command declares no action; the parse
    /// result travels back to the caller.
    NoAction {
        command: String,
        parsed: ParsedCommand,
    },
    /// Rendered help text. Nothing was dispatched.
    Help(String),
    /// Rendered version line. Nothing was dispatched.
    Version(String),
}

/// A validated, ready-to-run CLI.
#[derive(Debug)]
pub struct Cli {
    spec: CliSpec,
    registry: CommandRegistry,
}

impl Cli {
    /// Compile the declarative input. All configuration mistakes are
    /// rejected here, before any argv is seen.
    pub fn new(spec: CliSpec) -> Result<Self> {
        let registry = CommandRegistry::new(spec.commands.clone(), spec.global_options.clone())?;
        debug!(
            cli = %spec.name,
            commands = spec.commands.len(),
            globals = spec.global_options.len(),
            "cli compiled"
        );
        Ok(Cli { spec, registry })
    }

    /// The declarative input this engine was built from.
    pub fn spec(&self) -> &CliSpec {
        &self.spec
    }

    /// Rendered top-level help.
    pub fn help(&self) -> String {
        help::render_root_help(&self.spec)
    }

    /// Rendered help for one command, by name or alias.
    pub fn command_help(&self, name: &str) -> Option<String> {
        let resolved = self.registry.resolve(name).ok()?;
        Some(help::render_command_help(&self.spec, resolved.spec))
    }

    /// Parse one argv without dispatching.
    ///
    /// `argv` is the invocation only; the executable path is the caller's
    /// business and never passed here.
    pub fn parse<I, S>(&self, argv: I) -> Result<ParseOutcome<'_>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let argv: Vec<String> = argv.into_iter().map(Into::into).collect();
        self.parse_argv(&argv)
    }

    /// Parse and dispatch one invocation.
    pub async fn run<I, S>(&self, argv: I) -> Result<RunOutcome>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let argv: Vec<String> = argv.into_iter().map(Into::into).collect();
        match self.parse_argv(&argv)? {
            ParseOutcome::Command { spec, parsed } => dispatch::dispatch(spec, parsed).await,
            ParseOutcome::Help(text) => Ok(RunOutcome::Help(text)),
            ParseOutcome::Version(text) => Ok(RunOutcome::Version(text)),
        }
    }

    /// [`run`](Cli::run) for synchronous callers. Spins up a runtime for
    /// the duration of the invocation.
    pub fn run_blocking<I, S>(&self, argv: I) -> Result<RunOutcome>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let runtime = tokio::runtime::Runtime::new()
            .map_err(|e| Error::config(format!("failed to start async runtime: {e}")))?;
        runtime.block_on(self.run(argv))
    }

    /// Process-level entry: argv from the environment, help and version on
    /// stdout, errors on stderr, exit code for `main`.
    pub async fn exec(&self) -> ExitCode {
        let argv: Vec<String> = std::env::args().skip(1).collect();
        match self.run(argv).await {
            Ok(RunOutcome::Help(text)) | Ok(RunOutcome::Version(text)) => {
                println!("{text}");
                ExitCode::SUCCESS
            }
            Ok(_) => ExitCode::SUCCESS,
            Err(err) => {
                report_error(&err);
                ExitCode::FAILURE
            }
        }
    }

    /// [`exec`](Cli::exec) for a plain `fn main`.
    pub fn exec_blocking(&self) -> ExitCode {
        match tokio::runtime::Runtime::new() {
            Ok(runtime) => runtime.block_on(self.exec()),
            Err(e) => {
                eprintln!("error: failed to start async runtime: {e}");
                ExitCode::FAILURE
            }
        }
    }

    fn parse_argv(&self, argv: &[String]) -> Result<ParseOutcome<'_>> {
        let Some(first) = argv.first() else {
            debug!("empty argv, rendering help");
            return Ok(ParseOutcome::Help(help::render_root_help(&self.spec)));
        };

        // A leading option token means there is no command to run. Version
        // gets its builtin answer; everything else falls back to help.
        if first.starts_with('-') {
            if self.builtin_version(first) {
                return Ok(ParseOutcome::Version(help::render_version(&self.spec)));
            }
            debug!(token = %first, "option token in command position, rendering help");
            return Ok(ParseOutcome::Help(help::render_root_help(&self.spec)));
        }

        let resolved = self.registry.resolve(first)?;
        debug!(command = %resolved.spec.name, "command resolved");
        let rest = &argv[1..];
        if help_requested(resolved.options, rest) {
            debug!(command = %resolved.spec.name, "help requested");
            return Ok(ParseOutcome::Help(help::render_command_help(
                &self.spec,
                resolved.spec,
            )));
        }

        let parsed = parser::parse_invocation(resolved, rest)?;
        Ok(ParseOutcome::Command {
            spec: resolved.spec,
            parsed,
        })
    }

    /// Builtin version trigger. Yields to a global option that claims the
    /// same token form.
    fn builtin_version(&self, token: &str) -> bool {
        let claimed = |form: &str| self.spec.global_options.iter().any(|o| o.matches(form));
        (token == "--version" && !claimed("--version")) || (token == "-V" && !claimed("-V"))
    }
}

/// Builtin help trigger: `--help` or `-h` anywhere after the command
/// token, unless the command's merged options claim that form.
fn help_requested(options: &[OptionSpec], rest: &[String]) -> bool {
    let claimed = |form: &str| options.iter().any(|o| o.matches(form));
    rest.iter().any(|raw| {
        (raw == "--help" && !claimed("--help")) || (raw == "-h" && !claimed("-h"))
    })
}

fn report_error(err: &Error) {
    let prefix = if std::io::stderr().is_terminal() {
        "\x1b[1;31merror:\x1b[0m"
    } else {
        "error:"
    };
    // Alternate formatting prints the anyhow chain for action failures.
    match err {
        Error::Action(inner) => eprintln!("{prefix} {inner:#}"),
        other => eprintln!("{prefix} {other}"),
    }
}
