use anyhow::Context as _;
use clap::Parser;
use ops_admin_cli::{cli::Cli, commands, configuration::get_configuration};
use ops_client_core::Client;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = ops_admin_cli::tracing::init(&cli) {
        eprintln!("Failed to start tracing: {e}");
    }

    let configuration = get_configuration().context("failed to read configuration")?;
    let server_address = cli
        .server
        .clone()
        .unwrap_or(configuration.client.server_address.clone());
    let client = Client::new(server_address, configuration.client.request_timeout()?)?;

    let output = commands::run(&client, cli).await?;
    println!("{output}");
    Ok(())
}
