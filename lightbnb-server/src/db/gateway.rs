//! Query gateway - the operations the web layer calls
//!
//! `Gateway` is the seam between handlers and storage. `PgGateway` runs
//! each operation as one statement against a pool it is given;
//! `MemoryGateway` (see `memory.rs`) keeps everything in process.

use async_trait::async_trait;
use sqlx::PgPool;

use super::repos::{
    GuestReservation, Property, PropertyListing, PropertyRepo, ReservationRepo, User, UserRepo,
    UserSummary,
};
use super::search::PropertySearch;
use super::DbError;
use crate::models::{Email, Limit, NewProperty, NewUser};

/// Operations over users, properties and reservations.
///
/// Lookups return `Ok(None)` / an empty `Vec` when nothing matches;
/// `Err` always means the store failed or rejected the statement.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// The user with exactly this email.
    async fn user_by_email(&self, email: &Email) -> Result<Option<User>, DbError>;

    /// Name-only projection of a user.
    async fn user_summary(&self, id: i32) -> Result<Option<UserSummary>, DbError>;

    /// Insert a user, returning it with the generated id.
    async fn add_user(&self, user: NewUser) -> Result<User, DbError>;

    /// A guest's reservations, earliest start date first, at most `limit`.
    async fn reservations_for_guest(
        &self,
        guest_id: i32,
        limit: Limit,
    ) -> Result<Vec<GuestReservation>, DbError>;

    /// Properties matching every predicate in `search`, cheapest first.
    async fn search_properties(
        &self,
        search: &PropertySearch,
        limit: Limit,
    ) -> Result<Vec<PropertyListing>, DbError>;

    /// Insert a property, returning it with the generated id.
    async fn add_property(&self, property: NewProperty) -> Result<Property, DbError>;

    /// Check the store answers.
    async fn ping(&self) -> Result<(), DbError>;

    /// Short name of the backing store, for health output.
    fn backend(&self) -> &'static str;
}

/// PostgreSQL-backed gateway
#[derive(Clone)]
pub struct PgGateway {
    pool: PgPool,
}

impl PgGateway {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Gateway for PgGateway {
    async fn user_by_email(&self, email: &Email) -> Result<Option<User>, DbError> {
        let user = UserRepo::new(&self.pool).find_by_email(email).await?;
        tracing::debug!(found = user.is_some(), "user_by_email");
        Ok(user)
    }

    async fn user_summary(&self, id: i32) -> Result<Option<UserSummary>, DbError> {
        let summary = UserRepo::new(&self.pool).summary(id).await?;
        tracing::debug!(id, found = summary.is_some(), "user_summary");
        Ok(summary)
    }

    async fn add_user(&self, user: NewUser) -> Result<User, DbError> {
        let user = UserRepo::new(&self.pool).create(user).await?;
        tracing::info!(id = user.id, "user created");
        Ok(user)
    }

    async fn reservations_for_guest(
        &self,
        guest_id: i32,
        limit: Limit,
    ) -> Result<Vec<GuestReservation>, DbError> {
        let rows = ReservationRepo::new(&self.pool)
            .list_for_guest(guest_id, limit)
            .await?;
        tracing::debug!(guest_id, limit = limit.get(), rows = rows.len(), "reservations_for_guest");
        Ok(rows)
    }

    async fn search_properties(
        &self,
        search: &PropertySearch,
        limit: Limit,
    ) -> Result<Vec<PropertyListing>, DbError> {
        let rows = PropertyRepo::new(&self.pool).search(search, limit).await?;
        tracing::debug!(limit = limit.get(), rows = rows.len(), "search_properties");
        Ok(rows)
    }

    async fn add_property(&self, property: NewProperty) -> Result<Property, DbError> {
        let property = PropertyRepo::new(&self.pool).create(property).await?;
        tracing::info!(id = property.id, owner_id = property.owner_id, "property created");
        Ok(property)
    }

    async fn ping(&self) -> Result<(), DbError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
