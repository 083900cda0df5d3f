//! Vouchers JSON API Server

use std::process::ExitCode;

use salvo::{
    affix_state::inject,
    oapi::{OpenApi, swagger_ui::SwaggerUi},
    prelude::*,
    trailing_slash::remove_slash,
};
use tracing::{error, info};

use vouchers_app::context::AppContext;

use crate::{config::ServerConfig, observability::Observability, state::State};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod config;
mod cors;
mod extensions;
mod healthcheck;
mod observability;
mod responses;
mod router;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;
mod vouchers;

/// Vouchers JSON API Server entry point
#[tokio::main]
pub async fn main() -> ExitCode {
    // Load configuration from .env and CLI arguments
    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(source) => {
            #[expect(
                clippy::print_stderr,
                reason = "logging not initialized yet, must use eprintln for config errors"
            )]
            {
                eprintln!("Configuration error: {source}");
            }

            return ExitCode::FAILURE;
        }
    };

    let observability = match Observability::init(&config) {
        Ok(observability) => observability,
        Err(source) => {
            #[expect(
                clippy::print_stderr,
                reason = "tracing subscriber failed to initialise"
            )]
            {
                eprintln!("Observability error: {source}");
            }

            return ExitCode::FAILURE;
        }
    };

    let app = match AppContext::from_settings(
        &config.database.settings(),
        config.database.run_migrations,
    )
    .await
    {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            observability.shutdown();

            return ExitCode::FAILURE;
        }
    };

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    // Bind server
    let listener = TcpListener::new(addr).bind().await;

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(observability::request_logging)
        .hoop(inject(State::from_app_context(app)))
        .push(router::app_router());

    let doc = OpenApi::new("Vouchers API", env!("CARGO_PKG_VERSION")).merge_router(&router);

    let router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let server = Server::new(listener);

    let handle = server.handle();
    let grace = config.server.shutdown_grace_period();

    // Listen for shutdown signal
    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle, grace).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    // Start serving requests
    server
        .serve(
            Service::new(router)
                .catcher(responses::catcher())
                .hoop(cors::handler),
        )
        .await;

    info!("server stopped");

    observability.shutdown();

    ExitCode::SUCCESS
}
