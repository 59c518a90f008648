//! JSON fixtures - `users.json` and `properties.json`
//!
//! Both files are objects keyed by id string. Entries are loaded in
//! numeric key order. Property `owner_id`s refer to the user keys and are
//! remapped to the ids the store hands out when seeding.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::db::{DbError, Gateway, MemoryGateway};
use crate::models::{Email, NewUser, PropertyInput, ValidationError};

pub const USERS_FILE: &str = "users.json";
pub const PROPERTIES_FILE: &str = "properties.json";

#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid JSON in {file}: {source}")]
    Json {
        file: &'static str,
        source: serde_json::Error,
    },

    #[error("fixture key '{key}' in {file} is not an integer id")]
    BadKey { file: &'static str, key: String },

    #[error("invalid {file} entry {key}: {source}")]
    Invalid {
        file: &'static str,
        key: i32,
        source: ValidationError,
    },

    #[error("property {property} refers to unknown owner {owner}")]
    UnknownOwner { property: i32, owner: i32 },

    #[error(transparent)]
    Db(#[from] DbError),
}

/// User entry as it appears in `users.json`
#[derive(Debug, Clone, Deserialize)]
pub struct FixtureUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Parsed fixture files
#[derive(Debug, Clone, Default)]
pub struct Fixtures {
    pub users: BTreeMap<i32, FixtureUser>,
    pub properties: BTreeMap<i32, PropertyInput>,
}

/// Counts from a seeding run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub users_created: usize,
    pub users_existing: usize,
    pub properties_created: usize,
}

impl Fixtures {
    /// Read `users.json` and `properties.json` from `dir`.
    pub fn load(dir: &Path) -> Result<Self, FixtureError> {
        let users = read(&dir.join(USERS_FILE))?;
        let properties = read(&dir.join(PROPERTIES_FILE))?;
        Self::from_json(&users, &properties)
    }

    pub fn from_json(users: &str, properties: &str) -> Result<Self, FixtureError> {
        Ok(Self {
            users: parse_keyed(USERS_FILE, users)?,
            properties: parse_keyed(PROPERTIES_FILE, properties)?,
        })
    }
}

fn read(path: &Path) -> Result<String, FixtureError> {
    std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
        path: path.to_owned(),
        source,
    })
}

fn parse_keyed<T: serde::de::DeserializeOwned>(
    file: &'static str,
    content: &str,
) -> Result<BTreeMap<i32, T>, FixtureError> {
    let raw: HashMap<String, T> =
        serde_json::from_str(content).map_err(|source| FixtureError::Json { file, source })?;

    raw.into_iter()
        .map(|(key, value)| {
            key.trim()
                .parse::<i32>()
                .map(|id| (id, value))
                .map_err(|_| FixtureError::BadKey { file, key })
        })
        .collect()
}

impl MemoryGateway {
    /// In-memory store holding exactly the given fixtures.
    pub async fn from_fixtures(fixtures: &Fixtures) -> Result<Self, FixtureError> {
        let gateway = Self::new();
        seed(&gateway, fixtures).await?;
        Ok(gateway)
    }
}

/// Insert every fixture user then every property through `gateway`.
///
/// Users whose email is already stored are reused rather than duplicated.
pub async fn seed(gateway: &dyn Gateway, fixtures: &Fixtures) -> Result<SeedReport, FixtureError> {
    let mut report = SeedReport::default();
    let mut user_ids: HashMap<i32, i32> = HashMap::with_capacity(fixtures.users.len());

    for (&key, user) in &fixtures.users {
        let new_user = NewUser::new(&user.name, &user.email, &user.password).map_err(|source| {
            FixtureError::Invalid {
                file: USERS_FILE,
                key,
                source,
            }
        })?;

        let id = match gateway.add_user(new_user).await {
            Ok(created) => {
                report.users_created += 1;
                created.id
            }
            Err(DbError::Conflict { .. }) => {
                let email = Email::new(&user.email).map_err(|source| FixtureError::Invalid {
                    file: USERS_FILE,
                    key,
                    source,
                })?;
                let existing = gateway.user_by_email(&email).await?.ok_or_else(|| {
                    DbError::NotFound {
                        resource: "user",
                        id: user.email.clone(),
                    }
                })?;
                tracing::debug!(key, id = existing.id, "fixture user already present");
                report.users_existing += 1;
                existing.id
            }
            Err(e) => return Err(e.into()),
        };
        user_ids.insert(key, id);
    }

    for (&key, input) in &fixtures.properties {
        let mut input = input.clone();
        input.owner_id = *user_ids
            .get(&input.owner_id)
            .ok_or(FixtureError::UnknownOwner {
                property: key,
                owner: input.owner_id,
            })?;

        let property = input.validate().map_err(|source| FixtureError::Invalid {
            file: PROPERTIES_FILE,
            key,
            source,
        })?;
        gateway.add_property(property).await?;
        report.properties_created += 1;
    }

    tracing::info!(
        users_created = report.users_created,
        users_existing = report.users_existing,
        properties_created = report.properties_created,
        "fixtures seeded"
    );
    Ok(report)
}
