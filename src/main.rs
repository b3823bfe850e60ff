// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_service::DashboardService;
use crate::infrastructure::config::load_dashboard_config;
use crate::infrastructure::http_vessel_source::HttpVesselSource;
use crate::presentation::app_state::AppState;
use crate::presentation::routes::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_dashboard_config()?;

    // Create vessel source (infrastructure layer)
    let source = Arc::new(HttpVesselSource::new(&config.upstream)?);

    // Create service (application layer)
    let dashboard_service = DashboardService::new(
        source,
        config.upstream.retry_policy(),
        config.hazard.min_safe_depth,
    );

    let state = Arc::new(AppState { dashboard_service });
    let router = build_router(state);

    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.server.bind))?;
    tracing::info!(
        "Starting bathymetry hazard dashboard on {} (upstream {})",
        addr,
        config.upstream.url
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
