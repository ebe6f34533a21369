//! Help text generation, synthesized from the declarative model.
//!
//! Nothing here is hand-maintained per command: usage lines, argument and
//! option tables all come from the specs, so help never drifts from what
//! the parser actually accepts.

use crate::spec::{ArgSpec, CliSpec, CommandSpec, OptionSpec, ValueKind};

/// Top-level help: command listing plus global options.
pub(crate) fn render_root_help(spec: &CliSpec) -> String {
    let mut help = String::new();
    help.push_str(&title_line(&spec.name, &spec.version, &spec.description));
    help.push_str("\n\n");

    help.push_str("USAGE:\n");
    help.push_str(&format!("  {} <command> [args] [options]\n\n", spec.name));

    if !spec.commands.is_empty() {
        help.push_str("COMMANDS:\n");
        for cmd in &spec.commands {
            let mut names = cmd.name.clone();
            for alias in &cmd.aliases {
                names.push_str(&format!(", {alias}"));
            }
            help.push_str(&format!("  {:<18} {}\n", names, cmd.description));
        }
        help.push('\n');
    }

    let claimed_help = spec
        .global_options
        .iter()
        .any(|o| o.matches("--help") || o.matches("-h"));
    let claimed_version = spec
        .global_options
        .iter()
        .any(|o| o.matches("--version") || o.matches("-V"));

    help.push_str("GLOBAL OPTIONS:\n");
    for opt in &spec.global_options {
        push_option_row(&mut help, opt);
    }
    if !claimed_help {
        help.push_str(&format!("  {:<20} {}\n", "--help, -h", "Show help"));
    }
    if !claimed_version {
        help.push_str(&format!("  {:<20} {}\n", "--version, -V", "Show version"));
    }
    help.push('\n');

    help.push_str(&format!(
        "Run '{} <command> --help' for command details.\n",
        spec.name
    ));
    help
}

/// Per-command help: usage, aliases, arguments, options, examples.
pub(crate) fn render_command_help(spec: &CliSpec, cmd: &CommandSpec) -> String {
    let mut help = String::new();
    let heading = format!("{} {}", spec.name, cmd.name);
    help.push_str(&title_line(&heading, "", &cmd.description));
    help.push_str("\n\n");

    help.push_str("USAGE:\n");
    help.push_str(&format!("  {}\n\n", usage_line(&spec.name, cmd)));

    if !cmd.aliases.is_empty() {
        help.push_str("ALIASES:\n");
        help.push_str(&format!("  {}\n\n", cmd.aliases.join(", ")));
    }

    if !cmd.args.is_empty() {
        help.push_str("ARGUMENTS:\n");
        for arg in &cmd.args {
            push_arg_row(&mut help, arg);
        }
        help.push('\n');
    }

    if !cmd.options.is_empty() {
        help.push_str("OPTIONS:\n");
        for opt in &cmd.options {
            push_option_row(&mut help, opt);
        }
        help.push('\n');
    }

    let inherited: Vec<&OptionSpec> = spec
        .global_options
        .iter()
        .filter(|global| !cmd.options.iter().any(|local| local.name == global.name))
        .collect();
    if !inherited.is_empty() {
        help.push_str("GLOBAL OPTIONS:\n");
        for opt in inherited {
            push_option_row(&mut help, opt);
        }
        help.push('\n');
    }

    if !cmd.examples.is_empty() {
        help.push_str("EXAMPLES:\n");
        for example in &cmd.examples {
            help.push_str(&format!("  {} {}\n", spec.name, example));
        }
        help.push('\n');
    }

    help
}

pub(crate) fn render_version(spec: &CliSpec) -> String {
    format!("{} {}", spec.name, spec.version)
}

fn title_line(name: &str, version: &str, description: &str) -> String {
    let mut line = name.to_string();
    if !version.is_empty() {
        line.push_str(&format!(" {version}"));
    }
    if !description.is_empty() {
        line.push_str(&format!(" - {description}"));
    }
    line
}

/// `mycli deploy <target> [region] [args...] [options]`
fn usage_line(cli_name: &str, cmd: &CommandSpec) -> String {
    let mut usage = format!("{cli_name} {}", cmd.name);
    for arg in &cmd.args {
        if arg.required {
            usage.push_str(&format!(" <{}>", arg.name));
        } else {
            usage.push_str(&format!(" [{}]", arg.name));
        }
    }
    if cmd.allow_dynamic_args {
        usage.push_str(" [args...]");
    }
    usage.push_str(" [options]");
    usage
}

fn push_arg_row(help: &mut String, arg: &ArgSpec) {
    let name = if arg.required {
        format!("<{}>", arg.name)
    } else {
        format!("[{}]", arg.name)
    };
    let mut desc = arg.description.clone();
    if let Some(default) = &arg.default {
        if !desc.is_empty() {
            desc.push(' ');
        }
        desc.push_str(&format!("(default: {default})"));
    }
    help.push_str(&format!("  {:<18} {}\n", name, desc.trim_end()));
}

fn push_option_row(help: &mut String, opt: &OptionSpec) {
    let mut forms = opt.flag.clone();
    for alias in &opt.aliases {
        forms.push_str(&format!(", {alias}"));
    }
    if opt.kind != ValueKind::Bool {
        forms.push_str(" <value>");
    }

    let mut desc = opt.description.clone();
    let mut annotate = |text: String| {
        if !desc.is_empty() {
            desc.push(' ');
        }
        desc.push_str(&text);
    };
    annotate(format!("[{}]", opt.kind));
    if let Some(default) = &opt.default {
        annotate(format!("(default: {default})"));
    } else if opt.required {
        annotate("(required)".to_string());
    }

    help.push_str(&format!("  {:<20} {}\n", forms, desc.trim_end()));
}
