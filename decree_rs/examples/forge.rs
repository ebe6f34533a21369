//! Scaffolding-tool demo on the synchronous bridge. No async runtime in
//! user code; `exec_blocking` owns it for the duration of the invocation.
//!
//! ```bash
//! cargo run --example forge -- new my-app --template=api
//! cargo run --example forge -- gen model User --fields=name,email --dry-run
//! cargo run --example forge -- gne
//! ```

use std::process::ExitCode;

use decree::{ArgSpec, CommandSpec, OptionSpec, cli};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let app = cli("forge", env!("CARGO_PKG_VERSION"))
        .description("Project scaffolding tool")
        .command(
            CommandSpec::new("new")
                .alias("n")
                .describe("Create a project from a template")
                .example("new my-app --template=api")
                .arg(ArgSpec::required("name").describe("Project name").validate(
                    |value| {
                        if value.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
                            Ok(())
                        } else {
                            Err(format!("project name '{value}' may only use [a-z0-9-]"))
                        }
                    },
                ))
                .option(
                    OptionSpec::new("template", "--template")
                        .alias("-t")
                        .describe("Template to scaffold from")
                        .required(),
                )
                .action(|parsed| {
                    println!(
                        "created {} from template {}",
                        parsed.arg("name").unwrap_or(""),
                        parsed.text("template").unwrap_or(""),
                    );
                    Ok(())
                }),
        )
        .command(
            CommandSpec::new("gen")
                .alias("g")
                .describe("Generate a component")
                .example("gen model User --fields=name,email")
                .arg(ArgSpec::required("kind").describe("Component kind"))
                .arg(ArgSpec::required("name").describe("Component name"))
                .allow_dynamic_options()
                .action(|parsed| {
                    println!("{}", parsed.to_json());
                    Ok(())
                }),
        )
        .global_option(
            OptionSpec::boolean("dry-run", "--dry-run").describe("Print without writing"),
        )
        .build();

    match app {
        Ok(app) => app.exec_blocking(),
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
