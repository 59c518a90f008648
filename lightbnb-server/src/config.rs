//! Layered configuration
//!
//! Precedence, lowest first: built-in defaults, TOML file
//! (`$LIGHTBNB_CONFIG` or `~/.lightbnb/config.toml`), environment
//! (`DATABASE_URL`, `LIGHTBNB_BIND`, `LIGHTBNB_FIXTURES`). Command-line
//! flags are applied on top by the binary.

use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::db::pool::DEFAULT_MAX_CONNECTIONS;

const DEFAULT_DATABASE_URL: &str = "postgres://localhost/lightbnb";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LightbnbConfig {
    pub database: DatabaseConfig,
    pub server: ServerSection,
    pub fixtures: FixturesConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub bind: SocketAddr,
    pub cors_permissive: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            cors_permissive: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FixturesConfig {
    /// Directory holding `users.json` and `properties.json`
    pub dir: Option<PathBuf>,
}

impl LightbnbConfig {
    /// Load defaults, then the config file if present, then environment.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        let mut config = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            Self::from_toml(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Self::default()
        };

        config.apply_env(|key| env::var(key).ok())?;
        Ok(config)
    }

    /// Config file path: `$LIGHTBNB_CONFIG` or `~/.lightbnb/config.toml`
    pub fn config_path() -> PathBuf {
        env::var_os("LIGHTBNB_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".lightbnb/config.toml")
            })
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("invalid TOML")
    }

    /// Override fields from environment variables read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(bind) = lookup("LIGHTBNB_BIND") {
            self.server.bind = bind
                .parse()
                .with_context(|| format!("LIGHTBNB_BIND is not a socket address: {}", bind))?;
        }
        if let Some(dir) = lookup("LIGHTBNB_FIXTURES") {
            self.fixtures.dir = Some(PathBuf::from(dir));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults() {
        let config = LightbnbConfig::default();
        assert_eq!(config.database.url, "postgres://localhost/lightbnb");
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.server.bind.port(), 3000);
        assert!(!config.server.cors_permissive);
        assert!(config.fixtures.dir.is_none());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = LightbnbConfig::from_toml(
            r#"
            [database]
            max_connections = 12

            [fixtures]
            dir = "/srv/lightbnb/json"
            "#,
        )
        .unwrap();
        assert_eq!(config.database.max_connections, 12);
        assert_eq!(config.database.url, "postgres://localhost/lightbnb");
        assert_eq!(config.fixtures.dir, Some(PathBuf::from("/srv/lightbnb/json")));
        assert_eq!(config.server, ServerSection::default());
    }

    #[test]
    fn rejects_bad_toml() {
        assert!(LightbnbConfig::from_toml("[server]\nbind = 3000").is_err());
    }

    #[test]
    fn env_overrides_file() {
        let env: HashMap<&str, &str> = [
            ("DATABASE_URL", "postgres://db/other"),
            ("LIGHTBNB_BIND", "0.0.0.0:8080"),
            ("LIGHTBNB_FIXTURES", "./json"),
        ]
        .into_iter()
        .collect();

        let mut config = LightbnbConfig::from_toml("[database]\nurl = \"postgres://file\"").unwrap();
        config
            .apply_env(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.database.url, "postgres://db/other");
        assert_eq!(config.server.bind.port(), 8080);
        assert_eq!(config.fixtures.dir, Some(PathBuf::from("./json")));
    }

    #[test]
    fn invalid_bind_env_is_an_error() {
        let mut config = LightbnbConfig::default();
        let err = config
            .apply_env(|key| (key == "LIGHTBNB_BIND").then(|| "not-an-addr".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("LIGHTBNB_BIND"));
    }
}
