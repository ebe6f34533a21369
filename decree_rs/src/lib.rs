//! # decree
//!
//! **Declarative command-line engine** - describe commands, arguments and
//! options as plain data; the engine owns tokenizing, binding, coercion,
//! validation and dispatch.
//!
//! The declaration is the single source of truth: the parser, the help
//! text and the validation rules all derive from the same specs, so they
//! cannot drift apart.
//!
//! ## Features
//!
//! - **Declarative model** - commands are values, not derive macros or callbacks-in-callbacks
//! - **Typed options** - boolean, number and string kinds with coercion and custom validators
//! - **Alias resolution** - command and flag aliases are indistinguishable from primaries
//! - **Global options** - merged into every command, overridable per command by name
//! - **Dynamic capture** - opt-in collection of undeclared positionals and flags
//! - **Async dispatch** - actions are awaited futures; sync closures wrap for free
//! - **Generated help** - usage lines and option tables synthesized from the specs
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use decree::{cli, ArgSpec, CommandSpec, OptionSpec};
//!
//! # fn main() -> decree::Result<()> {
//! let app = cli("mycli", "1.0.0")
//!     .description("Example deployment tool")
//!     .command(
//!         CommandSpec::new("deploy")
//!             .alias("d")
//!             .describe("Deploy a target environment")
//!             .arg(ArgSpec::required("target"))
//!             .arg(ArgSpec::new("region").default_value("us-east-1"))
//!             .option(OptionSpec::new("env", "--env").alias("-e").default_value("staging"))
//!             .option(OptionSpec::boolean("force", "--force"))
//!             .action(|parsed| {
//!                 println!("deploying {}", parsed.arg("target").unwrap_or("?"));
//!                 Ok(())
//!             }),
//!     )
//!     .global_option(OptionSpec::boolean("verbose", "--verbose").alias("-v"))
//!     .build()?;
//!
//! std::process::exit(match app.run_blocking(["deploy", "prod", "--env=production"]) {
//!     Ok(_) => 0,
//!     Err(_) => 1,
//! });
//! # }
//! ```
//!
//! ## Parse Without Dispatch
//!
//! ```rust
//! use decree::{cli, ArgSpec, CommandSpec, ParseOutcome};
//!
//! let app = cli("mycli", "1.0.0")
//!     .command(CommandSpec::new("deploy").arg(ArgSpec::required("target")))
//!     .build()
//!     .unwrap();
//!
//! match app.parse(["deploy", "prod"]).unwrap() {
//!     ParseOutcome::Command { parsed, .. } => {
//!         assert_eq!(parsed.arg("target"), Some("prod"));
//!     }
//!     _ => unreachable!(),
//! }
//! ```

// ============================================================================
// Core Modules
// ============================================================================

/// Declarative command model: [`CliSpec`], [`CommandSpec`], [`ArgSpec`],
/// [`OptionSpec`] and the validator/action callback types.
pub mod spec;

/// Parse results: [`ParsedCommand`] and the coerced [`OptionValue`].
pub mod parsed;

/// Error taxonomy with stable machine-readable codes.
pub mod error;

/// Fluent construction: [`cli`] and [`Builder`].
pub mod builder;

/// Engine entry points: [`Cli`], [`ParseOutcome`], [`RunOutcome`].
pub mod runner;

mod dispatch;
mod help;
mod parser;
mod registry;
mod token;

// ============================================================================
// Re-exports for convenience
// ============================================================================

/// Start describing a CLI.
pub use builder::{Builder, cli};

/// Engine errors and the crate-wide result alias.
pub use error::{Error, Result, codes};

/// Parse results handed to actions.
pub use parsed::{OptionValue, ParsedCommand};

/// The compiled engine and its outcomes.
pub use runner::{Cli, ParseOutcome, RunOutcome};

/// Declarative building blocks.
pub use spec::{ArgSpec, CliSpec, CommandSpec, OptionSpec, ValueKind};
