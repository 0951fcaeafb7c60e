//! Docs MCP server over streamable HTTP.
//!
//! Usage:
//!   docs                  Listen on $PORT or 8000
//!   docs --port 9000      Listen on an explicit port

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{self, EnvFilter};

use docs::{DocsConfig, config::DEFAULT_PORT, transport};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

#[derive(Parser)]
#[command(name = "docs")]
#[command(about = "Documentation sections MCP server")]
struct Args {
    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,
}

//--------------------------------------------------------------------------------------------------
// Functions: Main
//--------------------------------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let args = Args::parse();

    let config = DocsConfig::from_env();
    config.validate()?;

    tracing::info!(
        toc_url = %config.toc_url,
        full_docs_url = %config.full_docs_url,
        origins = ?config.allowed_origins,
        "starting docs MCP server"
    );

    transport::serve(config, args.port).await
}
