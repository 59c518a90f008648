//! Property search from the terminal, one JSON object per line

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use lightbnb_server::db::{Gateway, PropertySearch, PropertySearchParams};

use super::{connect, fixtures_dir, load_config, memory_gateway};

#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Substring of the city name
    #[arg(long)]
    pub city: Option<String>,

    /// Only properties owned by this user
    #[arg(long)]
    pub owner_id: Option<i32>,

    /// Minimum nightly price in whole currency units (needs --max-price)
    #[arg(long, requires = "max_price")]
    pub min_price: Option<u32>,

    /// Maximum nightly price in whole currency units (needs --min-price)
    #[arg(long, requires = "min_price")]
    pub max_price: Option<u32>,

    /// Minimum average review rating (0-5)
    #[arg(long)]
    pub min_rating: Option<f64>,

    /// Maximum number of results (1-100)
    #[arg(long, short = 'n', default_value_t = 10)]
    pub limit: u32,

    /// Query an in-memory store seeded with fixtures instead of PostgreSQL
    #[arg(long)]
    pub in_memory: bool,

    /// Fixture directory for --in-memory
    #[arg(long)]
    pub fixtures: Option<PathBuf>,

    /// Database URL (overrides config/environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

impl SearchArgs {
    fn params(&self) -> PropertySearchParams {
        PropertySearchParams {
            city: self.city.clone(),
            owner_id: self.owner_id,
            minimum_price_per_night: self.min_price,
            maximum_price_per_night: self.max_price,
            minimum_rating: self.min_rating,
            limit: Some(self.limit),
        }
    }
}

pub async fn run_search(args: SearchArgs) -> Result<()> {
    let params = args.params();
    let limit = params.limit();
    let search = PropertySearch::try_from(params).context("Invalid search filters")?;

    let config = load_config(args.database_url.clone())?;
    let result = if args.in_memory {
        let dir = fixtures_dir(args.fixtures.clone(), &config)?;
        memory_gateway(&dir).await?.search_properties(&search, limit).await
    } else {
        connect(&config).await?.search_properties(&search, limit).await
    };
    let rows = result.context("Search failed")?;

    let mut out = io::stdout().lock();
    for row in &rows {
        serde_json::to_writer(&mut out, row)?;
        writeln!(out)?;
    }
    tracing::debug!(count = rows.len(), "search complete");
    Ok(())
}
