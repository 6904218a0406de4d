//! Postgres connection configuration and environment variable handling.
//!
//! The configuration is plain data so it can be built (and tested) without
//! the `postgres-repo` feature; only the repository itself needs Diesel.

use std::env;

/// Connection parameters used when nothing else is configured.
pub const DEFAULT_DB_HOST: &str = "student-db";
pub const DEFAULT_DB_USER: &str = "mamun";
pub const DEFAULT_DB_PASSWORD: &str = "1234";
pub const DEFAULT_DB_NAME: &str = "student_db";
pub const DEFAULT_DB_PORT: u16 = 5432;

/// Configuration for connecting to Postgres.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostgresConfig {
    /// Database connection URL
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_pool_size: u32,
    /// Minimum number of idle connections kept in the pool
    pub min_pool_size: u32,
    /// Connection checkout timeout in seconds
    pub connection_timeout_sec: u64,
    /// Idle connection timeout in seconds
    pub idle_timeout_sec: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            database_url: Self::connection_url(
                DEFAULT_DB_HOST,
                DEFAULT_DB_USER,
                DEFAULT_DB_PASSWORD,
                DEFAULT_DB_NAME,
                DEFAULT_DB_PORT,
            ),
            max_pool_size: 10,
            min_pool_size: 1,
            connection_timeout_sec: 30,
            idle_timeout_sec: 600,
        }
    }
}

impl PostgresConfig {
    /// Apply any environment variables that are set on top of `self`.
    ///
    /// # Environment Variables
    /// - `DATABASE_URL` or `PG_DATABASE_URL`: Connection string
    /// - `PG_POOL_MAX`: Maximum pool size
    /// - `PG_POOL_MIN`: Minimum pool size
    /// - `PG_CONN_TIMEOUT_SEC`: Connection timeout in seconds
    /// - `PG_IDLE_TIMEOUT_SEC`: Idle connection timeout in seconds
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = env::var("DATABASE_URL").or_else(|_| env::var("PG_DATABASE_URL")) {
            self.database_url = url;
        }
        if let Some(v) = parse_env("PG_POOL_MAX") {
            self.max_pool_size = v;
        }
        if let Some(v) = parse_env("PG_POOL_MIN") {
            self.min_pool_size = v;
        }
        if let Some(v) = parse_env("PG_CONN_TIMEOUT_SEC") {
            self.connection_timeout_sec = v;
        }
        if let Some(v) = parse_env("PG_IDLE_TIMEOUT_SEC") {
            self.idle_timeout_sec = v;
        }
        self
    }

    /// Create a new configuration with a database URL.
    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }

    /// Build a `postgres://` URL from discrete connection parameters.
    pub fn connection_url(host: &str, user: &str, password: &str, dbname: &str, port: u16) -> String {
        format!("postgres://{}:{}@{}:{}/{}", user, password, host, port, dbname)
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse::<T>().ok())
}
