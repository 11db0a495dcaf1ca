//! Configuration management for the coworking console.
//!
//! Settings come from environment variables, optionally primed from a `.env`
//! file. Numeric settings fall back to their defaults when unparseable;
//! enumerations fail fast.

use coworking_core::ManagementPolicy;
use coworking_postgres::PoolConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Configuration error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A variable holds a value outside its allowed set.
    #[error("invalid value `{value}` for {key} (expected {expected})")]
    InvalidValue {
        /// Environment variable name
        key: &'static str,
        /// Offending value
        value: String,
        /// Accepted spellings
        expected: &'static str,
    },
}

/// Where reservations are kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local tables, lost on exit.
    #[default]
    Memory,
    /// `PostgreSQL` through sqlx.
    Postgres,
}

impl FromStr for StorageBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "in-memory" => Ok(Self::Memory),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            _ => Err(()),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => f.write_str("memory"),
            Self::Postgres => f.write_str("postgres"),
        }
    }
}

/// Credentials of the admin account created at startup.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Username
    pub username: String,
    /// Plain-text password, hashed before it is stored
    pub password: String,
}

impl fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Storage backend
    pub storage: StorageBackend,
    /// Database settings, used by the postgres backend only
    pub database: PoolConfig,
    /// Who may manage workspaces and conference rooms
    pub management_policy: ManagementPolicy,
    /// Whether demo accounts and inventory are created at startup
    pub seed_demo_data: bool,
    /// Bootstrap admin, present when both username and password are set
    pub admin: Option<AdminConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageBackend::default(),
            database: PoolConfig::default(),
            management_policy: ManagementPolicy::default(),
            seed_demo_data: true,
            admin: None,
        }
    }
}

impl Config {
    /// Load configuration from the process environment, reading `.env`
    /// first if one exists.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `COWORKING_STORAGE`,
    /// `RESOURCE_MANAGEMENT_POLICY` or `SEED_DEMO_DATA` holds an unknown value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is the normal case.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// As [`Self::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let storage = match lookup("COWORKING_STORAGE") {
            Some(value) => value.parse().map_err(|()| ConfigError::InvalidValue {
                key: "COWORKING_STORAGE",
                value,
                expected: "`memory` or `postgres`",
            })?,
            None => defaults.storage,
        };

        let management_policy = match lookup("RESOURCE_MANAGEMENT_POLICY") {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
                key: "RESOURCE_MANAGEMENT_POLICY",
                value,
                expected: "`admin-only` or `any-registered-user`",
            })?,
            None => defaults.management_policy,
        };

        let seed_demo_data = match lookup("SEED_DEMO_DATA") {
            Some(value) => parse_flag(&value).ok_or(ConfigError::InvalidValue {
                key: "SEED_DEMO_DATA",
                value,
                expected: "`true` or `false`",
            })?,
            None => defaults.seed_demo_data,
        };

        let admin = match (lookup("ADMIN_USERNAME"), lookup("ADMIN_PASSWORD")) {
            (Some(username), Some(password)) if !username.trim().is_empty() => Some(AdminConfig {
                username: username.trim().to_string(),
                password,
            }),
            _ => None,
        };

        let database = PoolConfig {
            url: lookup("DATABASE_URL").unwrap_or(defaults.database.url),
            max_connections: number(
                lookup("DATABASE_MAX_CONNECTIONS"),
                defaults.database.max_connections,
            ),
            min_connections: number(
                lookup("DATABASE_MIN_CONNECTIONS"),
                defaults.database.min_connections,
            ),
            connect_timeout: number(
                lookup("DATABASE_CONNECT_TIMEOUT"),
                defaults.database.connect_timeout,
            ),
            idle_timeout: number(lookup("DATABASE_IDLE_TIMEOUT"), defaults.database.idle_timeout),
        };

        Ok(Self {
            storage,
            database,
            management_policy,
            seed_demo_data,
            admin,
        })
    }
}

fn number<T: FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|s| s.trim().parse().ok()).unwrap_or(default)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
