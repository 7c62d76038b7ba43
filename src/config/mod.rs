#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::chart::DEFAULT_CHART_TITLE;
use crate::core::loader::CsvOptions;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{DashboardError, Result};
use crate::utils::logger::LogFormat;
use crate::utils::validation::{self, Validate};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_DATABASE_PATH: &str = "database.db";
pub const DEFAULT_CSV_PATH: &str = "data.csv";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8050;
pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 5000;
pub const DEFAULT_HEADING: &str = "Analyse des Salaires par Genre";

/// Lower bound keeping the dashboard from hammering SQLite.
pub const MIN_REFRESH_INTERVAL_MS: u64 = 100;

/// Everything the process needs, resolved once at startup and passed to constructors.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub database_path: PathBuf,
    pub csv_path: PathBuf,
    pub csv_delimiter: char,
    pub decimal_separator: char,
    pub reset_on_start: bool,
    pub host: String,
    pub port: u16,
    pub refresh_interval_ms: u64,
    pub title: String,
    pub heading: String,
    pub verbose: bool,
    pub log_format: LogFormat,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            csv_path: PathBuf::from(DEFAULT_CSV_PATH),
            csv_delimiter: ';',
            decimal_separator: '.',
            reset_on_start: false,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
            title: DEFAULT_CHART_TITLE.to_string(),
            heading: DEFAULT_HEADING.to_string(),
            verbose: false,
            log_format: LogFormat::Compact,
        }
    }
}

impl DashboardConfig {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// CSV 解析選項；分隔符號已於 `validate` 檢查過
    pub fn csv_options(&self) -> Result<CsvOptions> {
        Ok(CsvOptions {
            delimiter: validation::validate_single_ascii("source.delimiter", self.csv_delimiter)?,
            decimal_separator: self.decimal_separator,
        })
    }
}

impl ConfigProvider for DashboardConfig {
    fn database_path(&self) -> &Path {
        &self.database_path
    }

    fn csv_path(&self) -> &Path {
        &self.csv_path
    }

    fn reset_on_start(&self) -> bool {
        self.reset_on_start
    }
}

impl Validate for DashboardConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("store.path", &self.database_path.to_string_lossy())?;
        validation::validate_path("source.csv_path", &self.csv_path.to_string_lossy())?;
        validation::validate_single_ascii("source.delimiter", self.csv_delimiter)?;

        if !matches!(self.decimal_separator, '.' | ',') {
            return Err(DashboardError::InvalidConfigValueError {
                field: "source.decimal_separator".to_string(),
                value: self.decimal_separator.to_string(),
                reason: "Only '.' and ',' are supported".to_string(),
            });
        }
        if self.decimal_separator == self.csv_delimiter {
            return Err(DashboardError::ConfigValidationError {
                field: "source.decimal_separator".to_string(),
                message: "Decimal separator cannot equal the field delimiter".to_string(),
            });
        }

        validation::validate_host("server.host", &self.host)?;
        validation::validate_positive_number("server.port", u64::from(self.port), 1)?;
        validation::validate_positive_number(
            "dashboard.refresh_interval_ms",
            self.refresh_interval_ms,
            MIN_REFRESH_INTERVAL_MS,
        )?;
        validation::validate_non_empty_string("dashboard.title", &self.title)?;

        Ok(())
    }
}
