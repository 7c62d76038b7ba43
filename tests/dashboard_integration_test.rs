use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use salary_dashboard::config::DashboardConfig;
use salary_dashboard::server::router;
use salary_dashboard::{Aggregator, AppState, Dashboard, ImportEngine, PageConfig, SqliteStore};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

fn setup(csv: Option<&str>) -> (TempDir, DashboardConfig, Arc<AppState>) {
    let temp_dir = TempDir::new().unwrap();
    let config = DashboardConfig {
        database_path: temp_dir.path().join("database.db"),
        csv_path: temp_dir.path().join("data.csv"),
        refresh_interval_ms: 1000,
        ..Default::default()
    };
    if let Some(content) = csv {
        std::fs::write(&config.csv_path, content).unwrap();
    }

    let store = Arc::new(SqliteStore::new(config.database_path.clone()));
    ImportEngine::new(store.clone(), config.clone(), config.csv_options().unwrap())
        .run()
        .unwrap();

    let dashboard = Arc::new(Dashboard::new(Aggregator::new(store), config.title.clone()));
    let state = Arc::new(AppState {
        page: PageConfig::from(&config),
        dashboard,
    });
    (temp_dir, config, state)
}

async fn get_json(state: Arc<AppState>, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = router(state)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_index_serves_dashboard_page() {
    let (_dir, _config, state) = setup(None);

    let response = router(state)
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("bar-chart"));
    assert!(html.contains("/api/chart"));
}

#[tokio::test]
async fn test_chart_reflects_imported_csv() {
    let (_dir, _config, state) =
        setup(Some("genre;salaire\nF;2500\nF;3100\nM;2700\nM;3300\nX;4000\n"));

    let (status, frame) = get_json(state, "/api/chart").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(frame["tick"], 0);
    assert_eq!(frame["chart"]["title"], "Salaire Moyen par Genre");

    let bars = frame["chart"]["bars"].as_array().unwrap();
    assert_eq!(bars.len(), 3);
    assert_eq!(bars[0]["label"], "F");
    assert_eq!(bars[0]["value"], 2800.0);
    assert_eq!(bars[1]["label"], "M");
    assert_eq!(bars[1]["value"], 3000.0);
    assert_eq!(bars[2]["value"], 4000.0);
}

#[tokio::test]
async fn test_empty_store_renders_chart_without_bars() {
    let (_dir, _config, state) = setup(None);

    let (status, frame) = get_json(state, "/api/chart").await;
    assert_eq!(status, StatusCode::OK);
    assert!(frame["chart"]["bars"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_chart_serves_latest_tick_after_refresh() {
    let (_dir, _config, state) = setup(Some("genre;salaire\nF;2500\n"));

    state.dashboard.render(0).await.unwrap();
    state.dashboard.render(1).await.unwrap();

    let (_, frame) = get_json(state, "/api/chart").await;
    assert_eq!(frame["tick"], 1);
}

#[tokio::test]
async fn test_unreachable_store_returns_503() {
    let (dir, _config, _state) = setup(None);

    let broken = Arc::new(SqliteStore::new(dir.path().join("gone").join("database.db")));
    let state = Arc::new(AppState {
        page: PageConfig::from(&DashboardConfig::default()),
        dashboard: Arc::new(Dashboard::new(Aggregator::new(broken), "Salaire Moyen par Genre")),
    });

    let (status, body) = get_json(state, "/api/chart").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["error"].as_str().unwrap().contains("database"));
}

#[tokio::test]
async fn test_config_and_status_endpoints() {
    let (_dir, _config, state) = setup(Some("genre;salaire\nF;2500\nM;2700\n"));

    let (status, config) = get_json(state.clone(), "/api/config").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(config["refresh_interval_ms"], 1000);
    assert_eq!(config["heading"], "Analyse des Salaires par Genre");

    let (status, before) = get_json(state.clone(), "/api/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(before["state"], "idle");
    assert!(before["last_tick"].is_null());
    assert_eq!(before["record_count"], 2);

    state.dashboard.render(4).await.unwrap();
    let (_, after) = get_json(state, "/api/status").await;
    assert_eq!(after["last_tick"], 4);
}
