use clap::Parser;
use salary_dashboard::utils::{logger, validation::Validate};
use salary_dashboard::{
    Aggregator, AppState, CliConfig, Dashboard, DashboardConfig, DashboardError,
    DashboardServer, ImportEngine, PageConfig, RefreshLoop, SqliteStore,
};
use std::sync::Arc;
use tokio::sync::watch;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Make sure the configuration file exists and is valid TOML");
            std::process::exit(1);
        }
    };

    // 初始化日誌
    logger::init_logger(config.verbose, config.log_format);

    tracing::info!("🚀 Starting salary-dashboard");
    tracing::debug!("Resolved config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = run(config).await {
        tracing::error!(
            "❌ salary-dashboard failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        std::process::exit(e.exit_code());
    }
}

async fn run(config: DashboardConfig) -> Result<(), DashboardError> {
    let store: Arc<SqliteStore> = Arc::new(SqliteStore::new(config.database_path.clone()));

    // 匯入在開始服務前同步完成
    let import = ImportEngine::new(store.clone(), config.clone(), config.csv_options()?);
    let report = tokio::task::spawn_blocking(move || import.run())
        .await
        .map_err(|e| DashboardError::IoError(std::io::Error::other(e)))??;
    tracing::info!("Import finished: {:?}", report.outcome);

    let dashboard = Arc::new(Dashboard::new(
        Aggregator::new(store),
        config.title.clone(),
    ));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let refresh = tokio::spawn(
        RefreshLoop::new(dashboard.clone(), config.refresh_interval()).run(shutdown_rx),
    );

    let state = Arc::new(AppState {
        page: PageConfig::from(&config),
        dashboard,
    });

    println!("✅ Dashboard available at http://{}", config.bind_address());

    let served = DashboardServer::start(&config.bind_address(), state, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("🛑 Shutdown requested");
    })
    .await;

    let _ = shutdown_tx.send(true);
    if let Err(e) = refresh.await {
        tracing::warn!("Refresh loop ended abnormally: {}", e);
    }

    served
}
