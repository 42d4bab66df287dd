//! gitstandup-mcp: MCP server that turns your recent commits into standup notes
//!
//! Without a subcommand the binary serves MCP on stdio. Subcommands run the
//! same tools once and print JSON to stdout.

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gitstandup_mcp::cli;
use gitstandup_mcp::config::Config;
use gitstandup_mcp::server::{self, StandupServer};
use gitstandup_mcp::store::ConfigStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr so stdout stays reserved for the MCP transport
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(config.log_level().into()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    config.validate().context("Invalid configuration")?;

    match &config.command {
        Some(command) => {
            let output = cli::run(&config, command).await?;
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        None => {
            let store = ConfigStore::new(config.config_path());
            info!(config = %store.path().display(), "Starting gitstandup-mcp server...");
            server::serve(StandupServer::new(store, config.clone())).await?;
        }
    }

    Ok(())
}
