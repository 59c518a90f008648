//! Command implementations for the lightbnb CLI

pub mod migrate;
pub mod search;
pub mod seed;
pub mod serve;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use lightbnb_server::db::create_pool_with_options;
use lightbnb_server::fixtures::Fixtures;
use lightbnb_server::{LightbnbConfig, MemoryGateway, PgGateway};

pub use migrate::{run_migrate, MigrateArgs};
pub use search::{run_search, SearchArgs};
pub use seed::{run_seed, SeedArgs};
pub use serve::{run_serve, ServeArgs};

/// Load layered config, then let a `--database-url` flag win.
pub(crate) fn load_config(database_url: Option<String>) -> Result<LightbnbConfig> {
    let mut config = LightbnbConfig::load().context("Failed to load configuration")?;
    if let Some(url) = database_url {
        config.database.url = url;
    }
    Ok(config)
}

pub(crate) async fn connect(config: &LightbnbConfig) -> Result<PgGateway> {
    let pool = create_pool_with_options(&config.database.url, config.database.max_connections)
        .await
        .context("Failed to create database pool. Check DATABASE_URL or --database-url")?;
    Ok(PgGateway::new(pool))
}

/// Fixture directory from the flag, falling back to config.
pub(crate) fn fixtures_dir(flag: Option<PathBuf>, config: &LightbnbConfig) -> Result<PathBuf> {
    flag.or_else(|| config.fixtures.dir.clone()).context(
        "No fixtures directory. Pass --fixtures, set LIGHTBNB_FIXTURES, or [fixtures] dir in config",
    )
}

/// Build an in-memory gateway seeded from `dir`.
pub(crate) async fn memory_gateway(dir: &Path) -> Result<MemoryGateway> {
    let fixtures = Fixtures::load(dir)
        .with_context(|| format!("Failed to load fixtures from {}", dir.display()))?;
    MemoryGateway::from_fixtures(&fixtures)
        .await
        .context("Failed to seed in-memory store")
}
