//! Starts tracing for the CLI. Command output goes to stdout so traces go to a
//! file, or to stderr when asked for

use anyhow::Context as _;
use ops_shared::telemetry::{self, DEFAULT_FILTER_DIRECTIVE};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

const APP_NAME: &str = "ops_admin_cli";

/// Falls back to stderr if the trace file cannot be set up
pub fn init(cli: &Cli) -> anyhow::Result<()> {
    if !cli.is_to_std_out {
        match init_to_file() {
            Ok(()) => return Ok(()),
            Err(e) => eprintln!("Failed to start tracing to file, using stderr instead: {e:#}"),
        }
    }
    init_to_stderr()
}

fn init_to_file() -> anyhow::Result<()> {
    let (file, path) = telemetry::create_trace_file(APP_NAME)?;
    telemetry::init_subscriber(telemetry::get_subscriber(
        APP_NAME,
        DEFAULT_FILTER_DIRECTIVE,
        file,
    ))?;
    tracing::info!(?path, "tracing started");
    Ok(())
}

fn init_to_stderr() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER_DIRECTIVE));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(anyhow::Error::msg)
        .context("failed to start tracing to stderr")
}
