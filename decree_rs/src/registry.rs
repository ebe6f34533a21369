//! Command registry.
//!
//! Built once from the declarative input. Construction validates the whole
//! configuration up front, so a [`CommandRegistry`] that exists is known
//! good and every later parse can assume clean declarations. Resolution is
//! exact whole-token matching over names and aliases; near misses only
//! feed the suggestion attached to the error.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::spec::{CommandSpec, OptionSpec};

/// Levenshtein distance at or below which a command name counts as a
/// plausible typo.
const SUGGESTION_DISTANCE: usize = 2;

#[derive(Debug)]
pub(crate) struct CommandRegistry {
    commands: Vec<CommandSpec>,
    /// Per-command option sets with globals merged in, parallel to
    /// `commands`. Local options override globals of the same name.
    merged: Vec<Vec<OptionSpec>>,
    /// Names and aliases to command index.
    lookup: HashMap<String, usize>,
    globals: Vec<OptionSpec>,
}

/// A resolved command together with its merged option set.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Resolved<'a> {
    pub(crate) spec: &'a CommandSpec,
    pub(crate) options: &'a [OptionSpec],
}

impl CommandRegistry {
    pub(crate) fn new(commands: Vec<CommandSpec>, globals: Vec<OptionSpec>) -> Result<Self> {
        check_option_set("global options", &globals)?;

        let mut lookup = HashMap::new();
        let mut merged = Vec::with_capacity(commands.len());
        for (idx, cmd) in commands.iter().enumerate() {
            if cmd.name.is_empty() {
                return Err(Error::config("command name must not be empty"));
            }
            for name in std::iter::once(&cmd.name).chain(cmd.aliases.iter()) {
                if lookup.insert(name.clone(), idx).is_some() {
                    return Err(Error::config(format!(
                        "duplicate command name or alias '{name}'"
                    )));
                }
            }
            check_args(cmd)?;
            let scope = format!("command '{}'", cmd.name);
            check_option_set(&scope, &cmd.options)?;
            let set = merge_options(&globals, &cmd.options);
            check_merged_forms(&scope, &set)?;
            merged.push(set);
        }

        Ok(CommandRegistry {
            commands,
            merged,
            lookup,
            globals,
        })
    }

    /// Exact match against names and aliases. On a miss the error carries
    /// the closest registered name, when one is close enough.
    pub(crate) fn resolve(&self, token: &str) -> Result<Resolved<'_>> {
        match self.lookup.get(token) {
            Some(&idx) => Ok(Resolved {
                spec: &self.commands[idx],
                options: &self.merged[idx],
            }),
            None => Err(Error::CommandNotFound {
                command: token.to_string(),
                suggestion: self.suggest(token),
            }),
        }
    }

    /// Closest registered name or alias within the typo threshold.
    /// Candidates are probed in declaration order, so ties are stable.
    pub(crate) fn suggest(&self, input: &str) -> Option<String> {
        let mut best: Option<(usize, &str)> = None;
        for cmd in &self.commands {
            for candidate in std::iter::once(&cmd.name).chain(cmd.aliases.iter()) {
                let distance = strsim::levenshtein(input, candidate);
                if distance > SUGGESTION_DISTANCE {
                    continue;
                }
                match best {
                    Some((best_distance, _)) if best_distance <= distance => {}
                    _ => best = Some((distance, candidate)),
                }
            }
        }
        best.map(|(_, name)| name.to_string())
    }

    pub(crate) fn commands(&self) -> &[CommandSpec] {
        &self.commands
    }

    pub(crate) fn globals(&self) -> &[OptionSpec] {
        &self.globals
    }
}

/// Local options shadow globals by name; everything else concatenates.
fn merge_options(globals: &[OptionSpec], locals: &[OptionSpec]) -> Vec<OptionSpec> {
    let mut merged = locals.to_vec();
    for global in globals {
        if !locals.iter().any(|local| local.name == global.name) {
            merged.push(global.clone());
        }
    }
    merged
}

fn check_args(cmd: &CommandSpec) -> Result<()> {
    let mut seen_optional = false;
    for (idx, arg) in cmd.args.iter().enumerate() {
        if arg.name.is_empty() {
            return Err(Error::config(format!(
                "command '{}': argument name must not be empty",
                cmd.name
            )));
        }
        if cmd.args[..idx].iter().any(|other| other.name == arg.name) {
            return Err(Error::config(format!(
                "command '{}': duplicate argument name '{}'",
                cmd.name, arg.name
            )));
        }
        if arg.required && seen_optional {
            return Err(Error::config(format!(
                "command '{}': required argument '{}' follows an optional one",
                cmd.name, arg.name
            )));
        }
        if !arg.required {
            seen_optional = true;
        }
    }
    Ok(())
}

/// One option set is internally consistent: non-empty dashed token forms,
/// unique names, defaults agreeing with the declared kind.
fn check_option_set(scope: &str, options: &[OptionSpec]) -> Result<()> {
    for (idx, opt) in options.iter().enumerate() {
        if opt.name.is_empty() {
            return Err(Error::config(format!(
                "{scope}: option name must not be empty"
            )));
        }
        if options[..idx].iter().any(|other| other.name == opt.name) {
            return Err(Error::config(format!(
                "{scope}: duplicate option name '{}'",
                opt.name
            )));
        }
        for form in std::iter::once(&opt.flag).chain(opt.aliases.iter()) {
            if !form.starts_with('-') {
                return Err(Error::config(format!(
                    "{scope}: option '{}': token form '{form}' must start with '-'",
                    opt.name
                )));
            }
        }
        if let Some(default) = &opt.default {
            if default.kind() != opt.kind {
                return Err(Error::config(format!(
                    "{scope}: option '{}': default is {} but declared kind is {}",
                    opt.name,
                    default.kind(),
                    opt.kind
                )));
            }
        }
    }
    check_merged_forms(scope, options)
}

/// No token form may belong to two options of one command, globals
/// included. Within a single option, repeating a form is harmless.
fn check_merged_forms(scope: &str, options: &[OptionSpec]) -> Result<()> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for opt in options {
        for form in std::iter::once(&opt.flag).chain(opt.aliases.iter()) {
            match seen.insert(form.as_str(), opt.name.as_str()) {
                Some(prev) if prev != opt.name => {
                    return Err(Error::config(format!(
                        "{scope}: token form '{form}' is claimed by both option '{prev}' and option '{}'",
                        opt.name
                    )));
                }
                _ => {}
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsed::OptionValue;
    use crate::spec::ArgSpec;

    fn sample_commands() -> Vec<CommandSpec> {
        vec![
            CommandSpec::new("deploy")
                .alias("d")
                .arg(ArgSpec::required("target"))
                .option(OptionSpec::new("env", "--env").alias("-e")),
            CommandSpec::new("build").alias("b"),
            CommandSpec::new("status"),
        ]
    }

    #[test]
    fn resolves_name_and_alias_to_same_command() {
        let registry = CommandRegistry::new(sample_commands(), Vec::new()).unwrap();
        let by_name = registry.resolve("deploy").unwrap();
        let by_alias = registry.resolve("d").unwrap();
        assert!(std::ptr::eq(by_name.spec, by_alias.spec));
        assert_eq!(by_alias.spec.name, "deploy");
    }

    #[test]
    fn unknown_command_carries_suggestion() {
        let registry = CommandRegistry::new(sample_commands(), Vec::new()).unwrap();
        let err = registry.resolve("deplyo").unwrap_err();
        match err {
            Error::CommandNotFound {
                command,
                suggestion,
            } => {
                assert_eq!(command, "deplyo");
                assert_eq!(suggestion.as_deref(), Some("deploy"));
            }
            other => panic!("expected CommandNotFound, got {other:?}"),
        }
    }

    #[test]
    fn distant_typo_gets_no_suggestion() {
        let registry = CommandRegistry::new(sample_commands(), Vec::new()).unwrap();
        let err = registry.resolve("fooz").unwrap_err();
        match err {
            Error::CommandNotFound { suggestion, .. } => assert_eq!(suggestion, None),
            other => panic!("expected CommandNotFound, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_alias_is_rejected() {
        let commands = vec![
            CommandSpec::new("deploy").alias("d"),
            CommandSpec::new("destroy").alias("d"),
        ];
        let err = CommandRegistry::new(commands, Vec::new()).unwrap_err();
        assert_eq!(err.code(), "CLI_ERROR");
        assert!(err.to_string().contains("'d'"));
    }

    #[test]
    fn required_after_optional_is_rejected() {
        let commands = vec![
            CommandSpec::new("deploy")
                .arg(ArgSpec::new("region"))
                .arg(ArgSpec::required("target")),
        ];
        let err = CommandRegistry::new(commands, Vec::new()).unwrap_err();
        assert!(err.to_string().contains("required argument 'target'"));
    }

    #[test]
    fn default_kind_mismatch_is_rejected() {
        let commands = vec![CommandSpec::new("deploy").option(
            OptionSpec::number("retries", "--retries").default_value("three"),
        )];
        let err = CommandRegistry::new(commands, Vec::new()).unwrap_err();
        assert!(err.to_string().contains("declared kind is number"));
    }

    #[test]
    fn undashed_flag_is_rejected() {
        let commands = vec![CommandSpec::new("deploy").option(OptionSpec::new("env", "env"))];
        let err = CommandRegistry::new(commands, Vec::new()).unwrap_err();
        assert!(err.to_string().contains("must start with '-'"));
    }

    #[test]
    fn cross_scope_flag_collision_is_rejected() {
        let globals = vec![OptionSpec::boolean("verbose", "--verbose").alias("-v")];
        let commands = vec![
            CommandSpec::new("deploy").option(OptionSpec::new("version-tag", "-v")),
        ];
        let err = CommandRegistry::new(commands, globals).unwrap_err();
        assert!(err.to_string().contains("'-v'"));
        assert!(err.to_string().contains("verbose"));
    }

    #[test]
    fn local_option_overrides_global_by_name() {
        let globals = vec![OptionSpec::new("env", "--env").default_value("global")];
        let commands = vec![
            CommandSpec::new("deploy").option(OptionSpec::new("env", "--env").default_value("local")),
        ];
        let registry = CommandRegistry::new(commands, globals).unwrap();
        let resolved = registry.resolve("deploy").unwrap();
        let env: Vec<_> = resolved
            .options
            .iter()
            .filter(|o| o.name == "env")
            .collect();
        assert_eq!(env.len(), 1);
        assert_eq!(env[0].default, Some(OptionValue::Text("local".into())));
    }

    #[test]
    fn globals_are_merged_into_every_command() {
        let globals = vec![OptionSpec::boolean("verbose", "--verbose")];
        let registry = CommandRegistry::new(sample_commands(), globals).unwrap();
        for name in ["deploy", "build", "status"] {
            let resolved = registry.resolve(name).unwrap();
            assert!(resolved.options.iter().any(|o| o.name == "verbose"));
        }
    }
}
