use clap::Parser;
use infra_audit::cli::Cli;
use infra_audit::handlers::{handle_aggregate, handle_trend};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Some(n) = cli.trend {
        return handle_trend(&cli, n);
    }

    handle_aggregate(&cli)
}
