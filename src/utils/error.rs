use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Storage unavailable at {path}: {source}")]
    StorageUnavailable {
        path: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Parse error in {path} (line {line}): {message}")]
    ParseError {
        path: String,
        line: u64,
        message: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Render failed: {message}")]
    RenderError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Storage,
    Input,
    Configuration,
    Rendering,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl DashboardError {
    pub fn storage(path: impl Into<String>, source: rusqlite::Error) -> Self {
        Self::StorageUnavailable {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<String>, line: u64, message: impl Into<String>) -> Self {
        Self::ParseError {
            path: path.into(),
            line,
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::StorageUnavailable { .. } => ErrorCategory::Storage,
            Self::ParseError { .. } => ErrorCategory::Input,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::RenderError { .. } => ErrorCategory::Rendering,
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 單次刷新失敗，下一個 tick 會再試
            ErrorCategory::Rendering => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 依嚴重程度決定程序退出碼，致命錯誤一律非零
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::StorageUnavailable { .. } => {
                "Check that the database directory exists and is writable"
            }
            Self::ParseError { .. } => {
                "Fix the CSV file: ';' separated, header with 'genre' and 'salaire', numeric salaries"
            }
            Self::IoError(_) => "Check file permissions and that the port is not already in use",
            Self::RenderError { .. } => {
                "The next refresh will retry automatically"
            }
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => {
                "Review the configuration file and command line flags"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::StorageUnavailable { path, .. } => {
                format!("Cannot open or write the salary database '{}'", path)
            }
            Self::ParseError {
                path,
                line,
                message,
            } => format!("Import of '{}' aborted at line {}: {}", path, line, message),
            Self::IoError(e) => format!("File system or network error: {}", e),
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::ConfigValidationError { field, message } => {
                format!("Configuration field '{}' is invalid: {}", field, message)
            }
            Self::InvalidConfigValueError {
                field,
                value,
                reason,
            } => format!("'{}' is not a valid {}: {}", value, field, reason),
            Self::RenderError { message } => format!("Chart refresh failed: {}", message),
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
