// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::application::dashboard_service::DashboardService;
use crate::application::upload_service::UploadService;
use crate::application::version_service::VersionService;
use crate::infrastructure::config::load_server_config;
use crate::infrastructure::cors::cors_layer;
use crate::infrastructure::memory_store::InMemoryVersionStore;
use crate::infrastructure::metadata_workbook::MetadataWorkbookParser;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    get_dashboard, get_template, get_version, health_check, list_versions, not_found,
    rollback_version, upload_file,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = load_server_config()?;

    // Create store and parser (infrastructure layer)
    let store = Arc::new(InMemoryVersionStore::new(config.storage.version_cap));
    let parser = Arc::new(MetadataWorkbookParser);

    // Create services (application layer)
    let dashboard_service = DashboardService::new(store.clone());
    let upload_service = UploadService::new(store.clone(), parser);
    let version_service = VersionService::new(store);

    // Create application state
    let state = Arc::new(AppState {
        dashboard_service,
        upload_service,
        version_service,
        config: config.clone(),
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/health", get(health_check))
        .route("/dashboard", get(get_dashboard))
        .route("/upload", post(upload_file))
        .route("/template", get(get_template))
        .route("/versions", get(list_versions))
        .route("/versions/:id", get(get_version))
        .route("/versions/:id/rollback", post(rollback_version))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(config.storage.max_upload_bytes))
        .layer(cors_layer(&config.cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config.server.bind.parse()?;
    println!("Starting portfolio-dashboard service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
