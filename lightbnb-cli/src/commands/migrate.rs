use anyhow::{Context, Result};
use clap::Parser;

use lightbnb_server::db::run_migrations;

use super::{connect, load_config};

#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (overrides config/environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let config = load_config(args.database_url)?;
    let gateway = connect(&config).await?;

    run_migrations(gateway.pool())
        .await
        .context("Failed to apply migrations")?;

    tracing::info!("migrations applied");
    Ok(())
}
