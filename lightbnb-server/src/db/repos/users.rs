//! User repository
//!
//! - lookup by email: exact match, `None` when absent
//! - summary by id: name-only projection
//! - create: INSERT ... RETURNING, unique email enforced by the store

use sqlx::{FromRow, PgPool};

use crate::db::DbError;
use crate::models::{Email, NewUser};

/// User record from database
#[derive(Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Name-only projection of a user
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct UserSummary {
    pub name: String,
}

/// User repository
pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get the user whose email matches exactly.
    pub async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DbError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Get a user's name by id.
    pub async fn summary(&self, id: i32) -> Result<Option<UserSummary>, DbError> {
        let summary = sqlx::query_as::<_, UserSummary>(
            r#"
            SELECT name
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(summary)
    }

    /// Insert a user and return the stored row with its generated id.
    ///
    /// A duplicate email is reported as `DbError::Conflict`.
    pub async fn create(&self, user: NewUser) -> Result<User, DbError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password
            "#,
        )
        .bind(user.name.as_str())
        .bind(user.email.as_str())
        .bind(user.password.as_str())
        .fetch_one(self.pool)
        .await
        .map_err(|e| DbError::from_write("user", e))
    }
}
