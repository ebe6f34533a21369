//! Parsing engine.
//!
//! One invocation flows through fixed stages: lex the argv remainder
//! against the merged option set, bind declared positionals, resolve and
//! coerce declared options, then capture dynamic leftovers. The first
//! failure aborts the whole parse; an action never sees partial state.

mod dynamic;
mod options;
mod positionals;

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::Result;
use crate::parsed::ParsedCommand;
use crate::registry::Resolved;
use crate::token::TokenStream;

/// Parse everything after the command token into a [`ParsedCommand`].
///
/// Pure over its inputs: the same command and argv always produce the
/// same result, with no state carried between invocations.
pub(crate) fn parse_invocation(resolved: Resolved<'_>, rest: &[String]) -> Result<ParsedCommand> {
    let spec = resolved.spec;
    let tokens = TokenStream::lex(rest, resolved.options);

    let bound = positionals::bind_args(&spec.args, &tokens)?;
    debug!(command = %spec.name, bound = bound.values.len(), "arguments bound");

    let mut resolved_options = BTreeMap::new();
    for opt in resolved.options {
        if let Some(value) = options::resolve_option(opt, &tokens)? {
            resolved_options.insert(opt.name.clone(), value);
        }
    }
    debug!(command = %spec.name, resolved = resolved_options.len(), "options resolved");

    let (dynamic_args, dynamic_options) =
        dynamic::capture(spec, resolved.options, &tokens, bound.consumed);
    if dynamic_args.is_some() || dynamic_options.is_some() {
        debug!(
            command = %spec.name,
            args = dynamic_args.as_ref().map_or(0, Vec::len),
            options = dynamic_options.as_ref().map_or(0, BTreeMap::len),
            "dynamic leftovers captured"
        );
    }

    Ok(ParsedCommand {
        args: bound.values,
        options: resolved_options,
        dynamic_args,
        dynamic_options,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsed::OptionValue;
    use crate::registry::CommandRegistry;
    use crate::spec::{ArgSpec, CommandSpec, OptionSpec};

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    fn deploy_registry() -> CommandRegistry {
        let deploy = CommandSpec::new("deploy")
            .alias("d")
            .arg(ArgSpec::required("target"))
            .arg(ArgSpec::new("region").default_value("us-east-1"))
            .option(OptionSpec::new("env", "--env").alias("-e").default_value("staging"))
            .option(OptionSpec::boolean("force", "--force").alias("-f"));
        CommandRegistry::new(vec![deploy], Vec::new()).unwrap()
    }

    #[test]
    fn binds_args_and_options_together() {
        let registry = deploy_registry();
        let resolved = registry.resolve("deploy").unwrap();
        let parsed =
            parse_invocation(resolved, &argv(&["prod", "--env=production"])).unwrap();

        assert_eq!(parsed.arg("target"), Some("prod"));
        assert_eq!(parsed.arg("region"), Some("us-east-1"));
        assert_eq!(parsed.text("env"), Some("production"));
        assert_eq!(parsed.option("force"), None);
        assert_eq!(parsed.dynamic_args, None);
        assert_eq!(parsed.dynamic_options, None);
    }

    #[test]
    fn same_argv_parses_identically_every_time() {
        let registry = deploy_registry();
        let resolved = registry.resolve("deploy").unwrap();
        let input = argv(&["prod", "eu-west-1", "--force", "-e", "production"]);

        let first = parse_invocation(resolved, &input).unwrap();
        let second = parse_invocation(resolved, &input).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.to_json(), second.to_json());
    }

    #[test]
    fn option_tokens_do_not_bind_as_positionals() {
        let registry = deploy_registry();
        let resolved = registry.resolve("deploy").unwrap();
        let parsed = parse_invocation(resolved, &argv(&["--env=qa", "prod"])).unwrap();
        assert_eq!(parsed.arg("target"), Some("prod"));
        assert_eq!(parsed.text("env"), Some("qa"));
    }

    #[test]
    fn first_failure_aborts_the_parse() {
        let registry = deploy_registry();
        let resolved = registry.resolve("deploy").unwrap();
        let err = parse_invocation(resolved, &argv(&[])).unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert!(err.to_string().contains("target"));
    }

    #[test]
    fn dynamic_capture_only_when_opted_in() {
        let build = CommandSpec::new("build")
            .arg(ArgSpec::required("entry"))
            .option(OptionSpec::boolean("minify", "--minify"))
            .allow_dynamic_args()
            .allow_dynamic_options();
        let registry = CommandRegistry::new(vec![build], Vec::new()).unwrap();
        let resolved = registry.resolve("build").unwrap();

        let parsed = parse_invocation(
            resolved,
            &argv(&["main.ts", "extra1", "extra2", "--tag=v1.2", "--minify"]),
        )
        .unwrap();

        assert_eq!(parsed.arg("entry"), Some("main.ts"));
        assert!(parsed.flag("minify"));
        assert_eq!(
            parsed.dynamic_args,
            Some(vec!["extra1".to_string(), "extra2".to_string()])
        );
        let dynamic = parsed.dynamic_options.unwrap();
        assert_eq!(dynamic.get("tag"), Some(&OptionValue::Text("v1.2".into())));
        assert!(!dynamic.contains_key("minify"));
    }

    #[test]
    fn undeclared_tokens_are_ignored_without_opt_in() {
        let registry = deploy_registry();
        let resolved = registry.resolve("deploy").unwrap();
        let parsed = parse_invocation(
            resolved,
            &argv(&["prod", "eu-west-1", "leftover", "--tag=v1"]),
        )
        .unwrap();
        assert_eq!(parsed.dynamic_args, None);
        assert_eq!(parsed.dynamic_options, None);
        assert!(!parsed.options.contains_key("tag"));
    }

    #[test]
    fn local_option_overrides_global_of_same_name() {
        let deploy = CommandSpec::new("deploy")
            .option(OptionSpec::new("env", "--env").default_value("local-default"));
        let globals = vec![OptionSpec::new("env", "--env").default_value("global-default")];
        let registry = CommandRegistry::new(vec![deploy], globals).unwrap();
        let resolved = registry.resolve("deploy").unwrap();

        let parsed = parse_invocation(resolved, &argv(&[])).unwrap();
        assert_eq!(parsed.text("env"), Some("local-default"));
    }

    #[test]
    fn global_options_resolve_on_any_command() {
        let deploy = CommandSpec::new("deploy");
        let globals = vec![OptionSpec::boolean("verbose", "--verbose").alias("-v")];
        let registry = CommandRegistry::new(vec![deploy], globals).unwrap();
        let resolved = registry.resolve("deploy").unwrap();

        let parsed = parse_invocation(resolved, &argv(&["-v"])).unwrap();
        assert!(parsed.flag("verbose"));
    }
}
