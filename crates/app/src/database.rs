//! Database connection management

use std::{future::Future, str::FromStr, time::Duration};

use sqlx::{
    PgPool,
    migrate::MigrateError,
    postgres::{PgConnectOptions, PgPoolOptions},
};
use tracing::warn;

use crate::domain::store::StoreError;

/// Default per-statement timeout.
pub const DEFAULT_STATEMENT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default pool size.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Connection settings.
#[derive(Debug, Clone)]
pub struct DbSettings {
    pub url: String,
    pub max_connections: u32,
    pub statement_timeout: Duration,
}

impl DbSettings {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            statement_timeout: DEFAULT_STATEMENT_TIMEOUT,
        }
    }
}

/// Shared persistence handle. Built once by the process entry point and
/// handed to every store.
#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
    statement_timeout: Duration,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool, statement_timeout: Duration) -> Self {
        Self {
            pool,
            statement_timeout,
        }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    #[must_use]
    pub fn statement_timeout(&self) -> Duration {
        self.statement_timeout
    }

    /// Run a store operation under the configured timeout.
    ///
    /// Dropping the returned future (caller cancellation) drops the in-flight
    /// query with it.
    pub async fn bounded<T, F>(&self, operation: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.statement_timeout, operation).await {
            Ok(result) => result.map_err(StoreError::from),
            Err(_elapsed) => {
                warn!(
                    timeout_ms = self.statement_timeout.as_millis(),
                    "store operation timed out"
                );

                Err(StoreError::Timeout(self.statement_timeout))
            }
        }
    }
}

/// Connect to `PostgreSQL`.
///
/// The statement timeout is also set server-side so abandoned queries do not
/// keep running after the client gives up.
///
/// # Errors
///
/// Returns an error if the URL is invalid or the connection cannot be established.
pub async fn connect(settings: &DbSettings) -> Result<PgPool, sqlx::Error> {
    let options = PgConnectOptions::from_str(&settings.url)?.options([(
        "statement_timeout",
        settings.statement_timeout.as_millis().to_string(),
    )]);

    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.statement_timeout)
        .connect_with(options)
        .await
}

/// Apply pending migrations.
///
/// # Errors
///
/// Returns an error if a migration fails to apply.
pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}
