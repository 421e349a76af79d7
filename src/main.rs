//! SmartLead MCP server - process entry point.
//!
//! With no subcommand the process loads configuration from the
//! environment, builds the tool catalog and serves MCP over stdio until
//! stdin closes or a termination signal arrives.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use smartlead_mcp::{build_registry, install, Config, McpServer, SmartleadClient};

/// MCP server for the SmartLead email campaign API
#[derive(Parser)]
#[command(name = "smartlead-mcp")]
#[command(author, version, about, long_about = None)]
#[command(disable_version_flag = true)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Option<Commands>,

    /// Print version
    #[arg(short = 'v', long = "version", action = ArgAction::Version, value_parser = clap::value_parser!(bool))]
    version: Option<bool>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the MCP server on stdio (default)
    Serve,

    /// Register this server with Claude Desktop
    Install {
        /// Overwrite an existing smartlead entry
        #[arg(short, long)]
        force: bool,

        /// Config file to write instead of the Claude Desktop default
        #[arg(long)]
        config_path: Option<PathBuf>,

        /// API key; prompted for when omitted
        #[arg(long, env = "SMARTLEAD_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout is the MCP transport.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // A .env next to the binary is a convenience for local runs.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Install { force, config_path, api_key }) => {
            install::run(install::InstallOptions { force, config_path, api_key })
        }
        Some(Commands::Serve) | None => serve().await,
    }
}

async fn serve() -> Result<()> {
    let config = Config::from_env().context("configuration error")?;
    tracing::info!(
        base_url = %config.base_url,
        timeout_ms = config.timeout_ms,
        max_retries = config.max_retries,
        rate_limit = config.rate_limit,
        "starting SmartLead MCP server"
    );

    let client = Arc::new(SmartleadClient::new(Arc::new(config)).context("client error")?);
    let registry = build_registry(client);

    McpServer::new(registry).run().await.context("server error")?;
    Ok(())
}
