#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

mod config;
mod server;

use std::process;

use anyhow::Context;
use axum::Router;
use clap::Parser;
use mantra_opendal::StorageConfig;
use mantra_server::handler;
use mantra_server::service::ServiceState;
use tower_http::services::ServeDir;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{Cli, log_config};

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "mantra_cli::server::startup";
pub const TRACING_TARGET_SHUTDOWN: &str = "mantra_cli::server::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "mantra_cli::config";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SHUTDOWN,
            error = %error,
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_tracing();
    log_startup_info();

    let service_config = cli.service_config()?;
    log_config(&cli, &service_config.storage);

    let state =
        ServiceState::from_config(&service_config).context("failed to create service state")?;
    let router = create_router(state, &service_config.storage);

    server::serve_http(router, &cli.server).await
}

/// Assembles the full router: the API surface plus, for the fs backend,
/// static serving of the uploads directory.
fn create_router(state: ServiceState, storage: &StorageConfig) -> Router {
    let router = handler::routes(state);

    match storage {
        StorageConfig::Fs(fs) => router.nest_service("/uploads", ServeDir::new(&fs.root)),
        _ => router,
    }
}

/// Initializes tracing with environment-based filtering.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Logs startup information.
fn log_startup_info() {
    tracing::info!(
        target: TRACING_TARGET_STARTUP,
        version = env!("CARGO_PKG_VERSION"),
        "starting studymantra server"
    );

    tracing::debug!(
        target: TRACING_TARGET_STARTUP,
        pid = process::id(),
        arch = std::env::consts::ARCH,
        os = std::env::consts::OS,
        "build information"
    );
}
