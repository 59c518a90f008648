//! Database error type

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("conflict on {resource}: {detail}")]
    Conflict { resource: &'static str, detail: String },

    #[error("{resource} references a missing row: {detail}")]
    ForeignKey { resource: &'static str, detail: String },

    #[error("{resource} violates a check constraint: {detail}")]
    Check { resource: &'static str, detail: String },
}

impl DbError {
    /// Classify an error from an INSERT.
    ///
    /// Unique, foreign-key and check violations become `Conflict`,
    /// `ForeignKey` and `Check`; anything else stays a store failure.
    pub(crate) fn from_write(resource: &'static str, err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if db.is_unique_violation() {
                return Self::Conflict {
                    resource,
                    detail: db.message().to_owned(),
                };
            }
            if db.is_foreign_key_violation() {
                return Self::ForeignKey {
                    resource,
                    detail: db.message().to_owned(),
                };
            }
            if db.is_check_violation() {
                return Self::Check {
                    resource,
                    detail: db.message().to_owned(),
                };
            }
        }
        Self::Sqlx(err)
    }
}
