//! Configuration for the storefront binary.
//!
//! Loads configuration from environment variables with sensible defaults.
//! Call `dotenvy::dotenv()` first to pick up a local `.env` file.

use crate::types::OwnerId;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Default `EnvFilter` directive
pub const DEFAULT_LOG_FILTER: &str = "storefront=info,storefront_runtime=info";

/// A variable that is set but cannot be used
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid value {value:?} for {key}: {reason}")]
pub struct ConfigError {
    /// Environment variable name
    pub key: &'static str,
    /// Offending value
    pub value: String,
    /// What is wrong with it
    pub reason: String,
}

/// Storefront application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// `tracing_subscriber::EnvFilter` directive (`STOREFRONT_LOG`)
    pub log_filter: String,
    /// JSON product list to seed the catalog (`STOREFRONT_CATALOG_PATH`);
    /// the built-in catalog when unset
    pub catalog_path: Option<PathBuf>,
    /// User the binary acts as when listing products (`STOREFRONT_OWNER_ID`)
    pub owner_id: OwnerId,
    /// How long shutdown waits for effects (`STOREFRONT_SHUTDOWN_TIMEOUT_SECS`)
    pub shutdown_timeout: Duration,
    /// Action broadcast buffer (`STOREFRONT_BROADCAST_CAPACITY`)
    pub broadcast_capacity: usize,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            catalog_path: None,
            owner_id: OwnerId::new("u1"),
            shutdown_timeout: Duration::from_secs(5),
            broadcast_capacity: 16,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a numeric variable does not parse or a
    /// value is out of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a numeric variable does not parse or a
    /// value is out of range.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let shutdown_secs = parse_var(&lookup, "STOREFRONT_SHUTDOWN_TIMEOUT_SECS")?
            .unwrap_or(defaults.shutdown_timeout.as_secs());

        let broadcast_capacity = match parse_var::<usize, _>(&lookup, "STOREFRONT_BROADCAST_CAPACITY")? {
            Some(0) => {
                return Err(ConfigError {
                    key: "STOREFRONT_BROADCAST_CAPACITY",
                    value: "0".to_string(),
                    reason: "must be at least 1".to_string(),
                });
            },
            Some(capacity) => capacity,
            None => defaults.broadcast_capacity,
        };

        Ok(Self {
            log_filter: non_blank(&lookup, "STOREFRONT_LOG").unwrap_or(defaults.log_filter),
            catalog_path: non_blank(&lookup, "STOREFRONT_CATALOG_PATH").map(PathBuf::from),
            owner_id: non_blank(&lookup, "STOREFRONT_OWNER_ID")
                .map_or(defaults.owner_id, OwnerId::new),
            shutdown_timeout: Duration::from_secs(shutdown_secs),
            broadcast_capacity,
        })
    }
}

fn non_blank<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_var<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = non_blank(lookup, key) else {
        return Ok(None);
    };

    value.parse().map(Some).map_err(|e: T::Err| ConfigError {
        key,
        reason: e.to_string(),
        value,
    })
}
