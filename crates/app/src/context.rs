//! App Context

use std::sync::Arc;

use sqlx::migrate::MigrateError;
use thiserror::Error;
use tracing::info;

use crate::{
    database::{self, Db, DbSettings},
    domain::lifecycle::{VoucherLifecycle, VouchersService},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrate(#[source] MigrateError),
}

#[derive(Clone)]
pub struct AppContext {
    pub vouchers: Arc<dyn VouchersService>,
}

impl AppContext {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            vouchers: Arc::new(VoucherLifecycle::postgres(db)),
        }
    }

    /// Build application context from database settings, optionally applying
    /// pending migrations first.
    ///
    /// # Errors
    ///
    /// Returns an error when the database is unreachable or a migration fails.
    pub async fn from_settings(
        settings: &DbSettings,
        run_migrations: bool,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(settings)
            .await
            .map_err(AppInitError::Database)?;

        if run_migrations {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrate)?;

            info!("database migrations applied");
        }

        Ok(Self::new(Db::new(pool, settings.statement_timeout)))
    }
}
