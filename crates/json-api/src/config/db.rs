//! Database Config

use std::time::Duration;

use clap::Args;

use vouchers_app::database::DbSettings;

/// Database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,

    /// Maximum pooled connections.
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 10_u32)]
    pub database_max_connections: u32,

    /// Upper bound for every store call, in milliseconds.
    #[arg(long, env = "DATABASE_STATEMENT_TIMEOUT_MS", default_value_t = 5_000_u64)]
    pub database_statement_timeout_ms: u64,

    /// Apply pending migrations on startup.
    #[arg(
        long = "database-run-migrations",
        env = "DATABASE_RUN_MIGRATIONS",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    pub run_migrations: bool,
}

impl DatabaseConfig {
    /// Per-statement timeout.
    #[must_use]
    pub fn statement_timeout(&self) -> Duration {
        Duration::from_millis(self.database_statement_timeout_ms)
    }

    /// Connection settings for the application context.
    #[must_use]
    pub fn settings(&self) -> DbSettings {
        DbSettings {
            url: self.database_url.clone(),
            max_connections: self.database_max_connections,
            statement_timeout: self.statement_timeout(),
        }
    }
}
