//! lightbnb-server: query gateway and HTTP API for LightBnB
//!
//! The `db` module holds the gateway over users, properties, reservations
//! and reviews, with a PostgreSQL implementation and an in-memory one.
//! `http` exposes it as a JSON API; `fixtures` loads the bundled JSON data.

pub mod config;
pub mod db;
pub mod fixtures;
pub mod http;
pub mod models;

pub use config::LightbnbConfig;
pub use db::{DbError, Gateway, MemoryGateway, PgGateway};
pub use fixtures::{FixtureError, Fixtures};
