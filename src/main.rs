//! Attendance engine HTTP server.
//!
//! Configuration is read from `ATTENDANCE_CONFIG_DIR` (default
//! `./config/default`). `ATTENDANCE_BIND` overrides the configured bind
//! address. Log filtering follows `RUST_LOG`, then `ATTENDANCE_LOG`.

use std::env;
use std::sync::Arc;

use attendance_engine::api::{create_router, AppState};
use attendance_engine::clock::SystemClock;
use attendance_engine::config::ConfigLoader;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_DIR: &str = "./config/default";
const DEFAULT_LOG_LEVEL: &str = "info";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(env::var("ATTENDANCE_LOG").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.into()))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "attendance-server starting");

    let config_dir = env::var("ATTENDANCE_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.into());
    let config = ConfigLoader::load(&config_dir)?;
    let bind_address = env::var("ATTENDANCE_BIND").unwrap_or_else(|_| config.bind_address().to_string());

    let engine = config.build_engine(Arc::new(SystemClock))?;
    let router = create_router(AppState::new(engine));

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!(address = %bind_address, config_dir = %config_dir, "Listening");
    axum::serve(listener, router).await?;

    Ok(())
}
