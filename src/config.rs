use std::net::SocketAddr;

use thiserror::Error;

use crate::domain::team::TEAMS_COLLECTION;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown STORE_BACKEND: {0} (expected memory or postgres)")]
    UnknownBackend(String),

    #[error("DATABASE_URL must be set when STORE_BACKEND=postgres")]
    MissingDatabaseUrl,

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Which document store backs the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Postgres {
        database_url: String,
        max_connections: u32,
    },
}

/// Service configuration read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub backend: StoreBackend,
    pub collection: String,
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    /// Loads `.env` if present, then reads the process environment
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `STORE_BACKEND` | `memory` |
    /// | `DATABASE_URL` | required for `postgres` |
    /// | `DATABASE_MAX_CONNECTIONS` | `5` |
    /// | `TEAMS_COLLECTION` | `equipos` |
    /// | `BIND_ADDR` | `0.0.0.0:3000` |
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = match lookup("STORE_BACKEND").as_deref().map(str::trim) {
            None | Some("") | Some("memory") => StoreBackend::Memory,
            Some("postgres") => {
                let database_url = lookup("DATABASE_URL")
                    .filter(|url| !url.trim().is_empty())
                    .ok_or(ConfigError::MissingDatabaseUrl)?;

                let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
                    Some(value) => value.trim().parse::<u32>().map_err(|_| ConfigError::InvalidValue {
                        key: "DATABASE_MAX_CONNECTIONS",
                        value,
                    })?,
                    None => DEFAULT_MAX_CONNECTIONS,
                };

                StoreBackend::Postgres {
                    database_url,
                    max_connections,
                }
            }
            Some(other) => return Err(ConfigError::UnknownBackend(other.to_string())),
        };

        let collection = lookup("TEAMS_COLLECTION")
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| TEAMS_COLLECTION.to_string());

        let bind = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind.trim().parse::<SocketAddr>().map_err(|_| ConfigError::InvalidValue {
            key: "BIND_ADDR",
            value: bind.clone(),
        })?;

        Ok(Self {
            backend,
            collection,
            bind_addr,
        })
    }
}
