//! HTTP surface of the dashboard

pub mod handlers;

use crate::config::DashboardConfig;
use crate::core::dashboard::Dashboard;
use crate::utils::error::Result;
use axum::{routing::get, Router};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Page settings exposed to the browser
#[derive(Debug, Clone)]
pub struct PageConfig {
    pub title: String,
    pub heading: String,
    pub refresh_interval_ms: u64,
}

impl From<&DashboardConfig> for PageConfig {
    fn from(config: &DashboardConfig) -> Self {
        Self {
            title: config.title.clone(),
            heading: config.heading.clone(),
            refresh_interval_ms: config.refresh_interval_ms,
        }
    }
}

/// Shared application state
pub struct AppState {
    pub page: PageConfig,
    pub dashboard: Arc<Dashboard>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/config", get(handlers::get_config))
        .route("/api/chart", get(handlers::get_chart))
        .route("/api/status", get(handlers::status))
        .with_state(state)
}

/// Dashboard HTTP server
pub struct DashboardServer;

impl DashboardServer {
    /// Serves until `shutdown` resolves.
    pub async fn start<F>(bind_address: &str, state: Arc<AppState>, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = router(state);

        let listener = TcpListener::bind(bind_address).await?;
        tracing::info!("🌐 Dashboard listening on http://{}", listener.local_addr()?);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        Ok(())
    }
}
