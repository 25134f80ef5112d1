//! Environment configuration
//!
//! Read once at startup from the process environment (after `.env` has been
//! loaded). Every variable has a default except `DATABASE_URL`, which is only
//! required by the postgres backend.

use std::env;
use std::str::FromStr;

use thiserror::Error;
use tracing::Level;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} has an invalid value '{value}'")]
    InvalidValue { name: &'static str, value: String },

    #[error("DATABASE_URL must be set when STORAGE_BACKEND is postgres")]
    MissingDatabaseUrl,
}

/// Where records are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Postgres,
}

impl FromStr for StorageBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "in-memory" | "inmemory" => Ok(StorageBackend::Memory),
            "postgres" | "postgresql" | "pg" => Ok(StorageBackend::Postgres),
            _ => Err(()),
        }
    }
}

/// Environment configuration
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,
    pub storage_backend: StorageBackend,
    pub database_url: Option<String>,
    pub cors_origins: Vec<String>,
    pub seed_data: bool,
    pub log_level: Level,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            host: "0.0.0.0".to_string(),
            port: 3000,
            storage_backend: StorageBackend::Memory,
            database_url: None,
            cors_origins: Vec::new(),
            seed_data: true,
            log_level: Level::DEBUG,
        }
    }
}

impl EnvironmentConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let port = match var("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                name: "PORT",
                value: raw,
            })?,
            None => defaults.port,
        };

        let storage_backend = match var("STORAGE_BACKEND") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                name: "STORAGE_BACKEND",
                value: raw,
            })?,
            None => defaults.storage_backend,
        };

        let seed_data = match var("SEED_DATA") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::InvalidValue {
                name: "SEED_DATA",
                value: raw,
            })?,
            None => defaults.seed_data,
        };

        let log_level = match var("LOG_LEVEL") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                name: "LOG_LEVEL",
                value: raw,
            })?,
            None => defaults.log_level,
        };

        let database_url = var("DATABASE_URL");
        if storage_backend == StorageBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::MissingDatabaseUrl);
        }

        let cors_origins = var("CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            environment: var("ENVIRONMENT").unwrap_or(defaults.environment),
            host: var("HOST").unwrap_or(defaults.host),
            port,
            storage_backend,
            database_url,
            cors_origins,
            seed_data,
            log_level,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
