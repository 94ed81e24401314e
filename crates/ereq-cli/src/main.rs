#![allow(clippy::nursery)]
#![allow(clippy::pedantic)]

use anyhow::Context;
use clap::Parser;

mod bootstrap;
mod cli;
mod commands;
mod context;
mod output;
mod progress;
mod ui;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("ereq error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    ui::init(&flags);

    let config = bootstrap::load_config()?;
    context::warn_unconfigured(&config);

    match &cli.command {
        cli::Commands::Setup(args) => return commands::setup::handle(args, &flags),
        cli::Commands::Auth { action } => {
            return commands::auth::handle(action, &flags, &config).await;
        }
        _ => {}
    }

    let mut ctx = context::AppContext::init(config)
        .await
        .context("failed to open the entry requirements sheet")?;

    commands::dispatch::dispatch(cli.command, &mut ctx, &flags).await
}

/// Log level when `EREQ_LOG` is unset.
const fn default_log_level(quiet: bool, verbose: bool) -> &'static str {
    match (quiet, verbose) {
        (true, _) => "error",
        (false, true) => "debug",
        (false, false) => "warn",
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_env("EREQ_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_log_level(quiet, verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::default_log_level;

    #[test]
    fn quiet_wins_over_verbose() {
        assert_eq!(default_log_level(true, true), "error");
        assert_eq!(default_log_level(false, true), "debug");
        assert_eq!(default_log_level(false, false), "warn");
    }
}
