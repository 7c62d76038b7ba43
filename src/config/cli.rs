use crate::config::toml_config::TomlConfig;
use crate::config::DashboardConfig;
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "salary-dashboard")]
#[command(about = "Import salary records from CSV and serve an average-salary-by-gender dashboard")]
pub struct CliConfig {
    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// SQLite database file
    #[arg(long)]
    pub database: Option<PathBuf>,

    /// CSV file imported at startup (skipped when absent)
    #[arg(long)]
    pub csv: Option<PathBuf>,

    #[arg(long)]
    pub host: Option<String>,

    #[arg(long)]
    pub port: Option<u16>,

    /// Chart refresh interval in milliseconds
    #[arg(long)]
    pub refresh_interval_ms: Option<u64>,

    /// Delete existing rows before importing the CSV file
    #[arg(long)]
    pub reset_store: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl CliConfig {
    /// 合併順序：內建預設 < TOML 檔案 < 命令列參數
    pub fn resolve(&self) -> Result<DashboardConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?.into_dashboard_config()?,
            None => DashboardConfig::default(),
        };

        if let Some(database) = &self.database {
            config.database_path = database.clone();
        }
        if let Some(csv) = &self.csv {
            config.csv_path = csv.clone();
        }
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(interval) = self.refresh_interval_ms {
            config.refresh_interval_ms = interval;
        }
        if self.reset_store {
            config.reset_on_start = true;
        }
        if self.verbose {
            config.verbose = true;
        }
        if self.json_logs {
            config.log_format = LogFormat::Json;
        }

        Ok(config)
    }
}
