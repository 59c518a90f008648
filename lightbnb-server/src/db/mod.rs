//! Database layer - gateway, repositories, search filter, pool
//!
//! # Design Principles
//!
//! - Connection pool created by the caller and passed in explicitly
//! - One parameterized statement per gateway operation
//! - Not-found is `Ok(None)`; store failures always propagate as `DbError`

pub mod error;
pub mod gateway;
pub mod memory;
pub mod migrate;
pub mod pool;
pub mod repos;
pub mod search;

pub use error::DbError;
pub use gateway::{Gateway, PgGateway};
pub use memory::MemoryGateway;
pub use migrate::{run_migrations, MIGRATOR};
pub use pool::{create_pool, create_pool_with_options};
pub use repos::*;
pub use search::{PriceRange, PropertySearch, PropertySearchParams};
