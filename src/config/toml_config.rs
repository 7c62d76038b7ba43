use crate::config::DashboardConfig;
use crate::utils::error::{DashboardError, Result};
use crate::utils::logger::LogFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// On-disk configuration. Every section and key is optional; missing values
/// keep the built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub store: Option<StoreConfig>,
    pub source: Option<SourceConfig>,
    pub server: Option<ServerConfig>,
    pub dashboard: Option<DashboardSection>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    pub path: Option<PathBuf>,
    pub reset_on_start: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    pub csv_path: Option<PathBuf>,
    pub delimiter: Option<char>,
    pub decimal_separator: Option<char>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DashboardSection {
    pub title: Option<String>,
    pub heading: Option<String>,
    pub refresh_interval_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub format: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DashboardError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DashboardError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DashboardError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 將檔案中有設定的值覆蓋到 `config`
    pub fn apply_to(&self, config: &mut DashboardConfig) -> Result<()> {
        if let Some(store) = &self.store {
            if let Some(path) = &store.path {
                config.database_path = path.clone();
            }
            if let Some(reset) = store.reset_on_start {
                config.reset_on_start = reset;
            }
        }

        if let Some(source) = &self.source {
            if let Some(path) = &source.csv_path {
                config.csv_path = path.clone();
            }
            if let Some(delimiter) = source.delimiter {
                config.csv_delimiter = delimiter;
            }
            if let Some(separator) = source.decimal_separator {
                config.decimal_separator = separator;
            }
        }

        if let Some(server) = &self.server {
            if let Some(host) = &server.host {
                config.host = host.clone();
            }
            if let Some(port) = server.port {
                config.port = port;
            }
        }

        if let Some(dashboard) = &self.dashboard {
            if let Some(title) = &dashboard.title {
                config.title = title.clone();
            }
            if let Some(heading) = &dashboard.heading {
                config.heading = heading.clone();
            }
            if let Some(interval) = dashboard.refresh_interval_ms {
                config.refresh_interval_ms = interval;
            }
        }

        if let Some(logging) = &self.logging {
            if let Some(verbose) = logging.verbose {
                config.verbose = verbose;
            }
            if let Some(format) = &logging.format {
                config.log_format = LogFormat::parse(format).ok_or_else(|| {
                    DashboardError::InvalidConfigValueError {
                        field: "logging.format".to_string(),
                        value: format.clone(),
                        reason: "Expected 'compact' or 'json'".to_string(),
                    }
                })?;
            }
        }

        Ok(())
    }

    pub fn into_dashboard_config(self) -> Result<DashboardConfig> {
        let mut config = DashboardConfig::default();
        self.apply_to(&mut config)?;
        Ok(config)
    }
}
