//! Deployment-tool demo wired through the declarative engine.
//!
//! ```bash
//! cargo run --example deploy -- deploy prod --env=production
//! cargo run --example deploy -- build main.ts extra1 extra2 --tag=v1.2
//! cargo run --example deploy -- deploy --help
//! RUST_LOG=decree=debug cargo run --example deploy -- status
//! ```

use std::process::ExitCode;

use decree::{ArgSpec, CommandSpec, OptionSpec, cli};
use tracing::info;

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr; stdout carries command output only.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let app = cli("deploy-tool", env!("CARGO_PKG_VERSION"))
        .description("Example deployment tool")
        .command(
            CommandSpec::new("deploy")
                .alias("d")
                .describe("Deploy a target environment")
                .example("deploy prod --env=production")
                .example("deploy staging eu-west-1 --force")
                .arg(ArgSpec::required("target").describe("Target environment"))
                .arg(
                    ArgSpec::new("region")
                        .describe("Deployment region")
                        .default_value("us-east-1"),
                )
                .option(
                    OptionSpec::new("env", "--env")
                        .alias("-e")
                        .describe("Environment name")
                        .default_value("staging")
                        .validate(|value| match value.as_text() {
                            Some("staging" | "production" | "qa") => Ok(()),
                            _ => Err("env must be staging, production or qa".into()),
                        }),
                )
                .option(
                    OptionSpec::boolean("force", "--force")
                        .alias("-f")
                        .describe("Skip confirmation"),
                )
                .option(
                    OptionSpec::number("retries", "--retries")
                        .describe("Rollback retry budget")
                        .default_value(3),
                )
                .action_async(|parsed| async move {
                    let target = parsed.arg("target").unwrap_or("?").to_string();
                    info!(target = %target, "deploying");
                    tokio::time::sleep(std::time::Duration::from_millis(200)).await;
                    println!("{}", parsed.to_json());
                    Ok(())
                }),
        )
        .command(
            CommandSpec::new("build")
                .alias("b")
                .describe("Build the project")
                .example("build main.ts extra1 extra2 --tag=v1.2")
                .arg(ArgSpec::required("entry").describe("Entry point"))
                .option(OptionSpec::boolean("minify", "--minify").describe("Minify output"))
                .allow_dynamic_args()
                .allow_dynamic_options()
                .action(|parsed| {
                    println!("{}", parsed.to_json());
                    Ok(())
                }),
        )
        .command(
            CommandSpec::new("status")
                .describe("Show deployment status")
                .action(|_| {
                    println!("all systems nominal");
                    Ok(())
                }),
        )
        .global_option(
            OptionSpec::boolean("verbose", "--verbose")
                .alias("-v")
                .describe("Verbose output"),
        )
        .build();

    let app = match app {
        Ok(app) => app,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    app.exec().await
}
