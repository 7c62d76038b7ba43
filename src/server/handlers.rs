use crate::core::dashboard::DashboardState;
use crate::domain::model::Frame;
use crate::server::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, Json},
};
use serde::Serialize;
use std::sync::Arc;

/// Serve the dashboard page
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../../assets/index.html"))
}

#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub title: String,
    pub heading: String,
    pub refresh_interval_ms: u64,
}

pub async fn get_config(State(state): State<Arc<AppState>>) -> Json<ConfigResponse> {
    Json(ConfigResponse {
        title: state.page.title.clone(),
        heading: state.page.heading.clone(),
        refresh_interval_ms: state.page.refresh_interval_ms,
    })
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Latest chart frame; the first request on a fresh server triggers the initial render.
pub async fn get_chart(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Frame>, (StatusCode, Json<ErrorResponse>)> {
    state
        .dashboard
        .latest_or_initial()
        .await
        .map(Json)
        .map_err(|e| {
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse {
                    error: e.user_friendly_message(),
                }),
            )
        })
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub state: DashboardState,
    pub last_tick: Option<u64>,
    pub record_count: Option<usize>,
}

pub async fn status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let record_count = match state.dashboard.record_count().await {
        Ok(count) => Some(count),
        Err(e) => {
            tracing::warn!("Status check could not count records: {}", e);
            None
        }
    };

    Json(StatusResponse {
        state: state.dashboard.state(),
        last_tick: state.dashboard.latest().map(|frame| frame.tick),
        record_count,
    })
}
