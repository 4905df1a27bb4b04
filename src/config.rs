//! Storage configuration read from the environment.

use std::num::NonZeroU32;
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the `PostgreSQL` connection URL.
pub const DATABASE_URL_VAR: &str = "TASKBOARD_DATABASE_URL";
/// Environment variable holding the maximum pool size.
pub const POOL_SIZE_VAR: &str = "TASKBOARD_DB_POOL_SIZE";
/// Environment variable holding the connection timeout in seconds.
pub const CONNECT_TIMEOUT_VAR: &str = "TASKBOARD_DB_CONNECT_TIMEOUT_SECS";
/// Environment variable holding the `tracing` filter directive.
pub const LOG_FILTER_VAR: &str = "TASKBOARD_LOG";

const DEFAULT_POOL_SIZE: NonZeroU32 = match NonZeroU32::new(10) {
    Some(size) => size,
    None => NonZeroU32::MIN,
};
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default `tracing` filter directive.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Errors raised while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("{0} must be set")]
    Missing(&'static str),

    /// A variable holds a value that cannot be parsed.
    #[error("{variable} has invalid value {value:?}: {reason}")]
    Invalid {
        /// Variable name.
        variable: &'static str,
        /// Raw value.
        value: String,
        /// Parse failure.
        reason: String,
    },
}

/// Database connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    database_url: String,
    pool_size: NonZeroU32,
    connect_timeout: Duration,
}

impl StorageConfig {
    /// Creates a configuration with default pool settings.
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            pool_size: DEFAULT_POOL_SIZE,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }

    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the URL is missing or a numeric setting
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the URL is missing or a numeric setting
    /// cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup(DATABASE_URL_VAR)
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::Missing(DATABASE_URL_VAR))?;
        let mut config = Self::new(database_url);
        if let Some(raw) = lookup(POOL_SIZE_VAR) {
            config.pool_size = parse(POOL_SIZE_VAR, &raw)?;
        }
        if let Some(raw) = lookup(CONNECT_TIMEOUT_VAR) {
            config.connect_timeout = Duration::from_secs(parse(CONNECT_TIMEOUT_VAR, &raw)?);
        }
        Ok(config)
    }

    /// Sets the maximum pool size.
    #[must_use]
    pub const fn with_pool_size(mut self, pool_size: NonZeroU32) -> Self {
        self.pool_size = pool_size;
        self
    }

    /// Returns the connection URL.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Returns the maximum number of pooled connections.
    #[must_use]
    pub const fn pool_size(&self) -> NonZeroU32 {
        self.pool_size
    }

    /// Returns how long to wait for a pooled connection.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }
}

fn parse<T>(variable: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|err: T::Err| ConfigError::Invalid {
        variable,
        value: raw.to_owned(),
        reason: err.to_string(),
    })
}
