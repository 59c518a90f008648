//! Load fixture users and properties into PostgreSQL

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use lightbnb_server::fixtures::{seed, Fixtures};

use super::{connect, fixtures_dir, load_config};

#[derive(Parser, Debug)]
pub struct SeedArgs {
    /// Directory containing users.json and properties.json
    #[arg(long)]
    pub fixtures: Option<PathBuf>,

    /// Database URL (overrides config/environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

pub async fn run_seed(args: SeedArgs) -> Result<()> {
    let config = load_config(args.database_url)?;
    let dir = fixtures_dir(args.fixtures, &config)?;

    // Parse before connecting so bad files fail fast
    let fixtures = Fixtures::load(&dir)
        .with_context(|| format!("Failed to load fixtures from {}", dir.display()))?;
    let gateway = connect(&config).await?;

    let report = seed(&gateway, &fixtures)
        .await
        .context("Failed to seed database")?;

    tracing::info!(
        users_created = report.users_created,
        users_existing = report.users_existing,
        properties_created = report.properties_created,
        "seed complete"
    );
    Ok(())
}
