//! HTTP server command for the LightBnB API

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use lightbnb_server::db::Gateway;
use lightbnb_server::http::{run_server, ServerConfig};

use super::{connect, fixtures_dir, load_config, memory_gateway};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default from config: 127.0.0.1:3000)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides config/environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Serve from an in-memory store seeded with fixtures instead of PostgreSQL
    #[arg(long)]
    pub in_memory: bool,

    /// Fixture directory for --in-memory
    #[arg(long)]
    pub fixtures: Option<PathBuf>,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let mut config = load_config(args.database_url)?;
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    config.server.cors_permissive |= args.cors_permissive;

    let gateway: Arc<dyn Gateway> = if args.in_memory {
        let dir = fixtures_dir(args.fixtures, &config)?;
        Arc::new(memory_gateway(&dir).await?)
    } else {
        Arc::new(connect(&config).await?)
    };

    tracing::info!(in_memory = args.in_memory, "Starting lightbnb server on {}", config.server.bind);

    // Blocks until shutdown
    run_server(gateway, ServerConfig::from(&config))
        .await
        .context("Server error")?;

    Ok(())
}
