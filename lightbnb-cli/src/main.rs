//! lightbnb: run and query the LightBnB gateway from the command line

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{MigrateArgs, SearchArgs, SeedArgs, ServeArgs};

#[derive(Parser, Debug)]
#[command(
    name = "lightbnb",
    author,
    version,
    about = "Query gateway for the LightBnB property rental store",
    long_about = "Serve the LightBnB JSON API, manage its PostgreSQL schema and fixtures, \
                  and search listings from the terminal."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(ServeArgs),
    /// Apply the embedded schema migrations
    Migrate(MigrateArgs),
    /// Load users and properties from fixture files
    Seed(SeedArgs),
    /// Search properties and print them as JSON lines
    Search(SearchArgs),
}

fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Migrate(args) => commands::run_migrate(args).await?,
        Commands::Seed(args) => commands::run_seed(args).await?,
        Commands::Search(args) => commands::run_search(args).await?,
    }

    Ok(())
}
