use clap::{Args, Parser, Subcommand};
use vouchers_app::{
    context::AppContext,
    database::{DEFAULT_MAX_CONNECTIONS, DbSettings},
};

mod db;
mod voucher;

#[derive(Debug, Parser)]
#[command(name = "vouchers-app", about = "Vouchers CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Voucher(voucher::VoucherCommand),
    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Voucher(command) => voucher::run(command).await,
            Commands::Db(command) => db::run(command).await,
        }
    }
}

/// Connection arguments shared by every subcommand.
#[derive(Debug, Args)]
pub(crate) struct DatabaseArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Per-statement timeout in milliseconds
    #[arg(long, env = "DATABASE_STATEMENT_TIMEOUT_MS", default_value_t = 5_000)]
    statement_timeout_ms: u64,
}

impl DatabaseArgs {
    pub(crate) fn settings(&self) -> DbSettings {
        DbSettings {
            url: self.database_url.clone(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            statement_timeout: std::time::Duration::from_millis(self.statement_timeout_ms),
        }
    }

    pub(crate) async fn context(&self) -> Result<AppContext, String> {
        AppContext::from_settings(&self.settings(), false)
            .await
            .map_err(|error| format!("failed to initialize: {error}"))
    }
}
