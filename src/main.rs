// Main entry point - Dependency injection and server setup
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use anyhow::Context;
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::composer::LayoutComposer;
use crate::application::controller::DashboardController;
use crate::application::diagnostics::TracingSink;
use crate::application::snapshot_source::SnapshotSource;
use crate::application::transformer::SeriesTransformer;
use crate::infrastructure::chart_registry;
use crate::infrastructure::config::{load_dashboard_config, SnapshotLocation};
use crate::infrastructure::file_source::FileSnapshotSource;
use crate::infrastructure::http_source::HttpSnapshotSource;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{dashboard_json, dashboard_page, health_check};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_dashboard_config().context("failed to load config/dashboard")?;
    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("invalid bind address {:?}", config.server.bind))?;

    // Register chart primitives before anything renders
    let renderer = chart_registry::init();

    // Snapshot source (infrastructure layer)
    let source: Arc<dyn SnapshotSource> = match SnapshotLocation::parse(&config.snapshot.source) {
        SnapshotLocation::File(path) => Arc::new(FileSnapshotSource::new(path)),
        SnapshotLocation::Http(url) => Arc::new(HttpSnapshotSource::new(url)),
    };

    // Transformer, composer and controller (application layer)
    let transformer = SeriesTransformer::new(
        config.display.chart_style(),
        config.display.date_format()?,
    );
    let composer = LayoutComposer::new(config.display.title.clone(), transformer);
    let (controller, dashboard) =
        DashboardController::new(source, composer, renderer, Arc::new(TracingSink));

    // One load per session
    tokio::spawn(controller.run());

    let state = Arc::new(AppState { dashboard });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/", get(dashboard_page))
        .route("/healthz", get(health_check))
        .route("/api/dashboard", get(dashboard_json))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    tracing::info!(%addr, "starting attendance-dashboard");
    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
