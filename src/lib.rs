pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::SqliteStore;
pub use config::DashboardConfig;
pub use self::core::{
    aggregator::Aggregator, dashboard::Dashboard, etl::ImportEngine, loader::CsvLoader,
    refresh::RefreshLoop,
};
pub use server::{AppState, DashboardServer, PageConfig};
pub use utils::error::{DashboardError, Result};
