use crate::utils::error::{DashboardError, Result};
use std::net::IpAddr;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(DashboardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(DashboardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// 綁定位址必須是 IP，或 `localhost`
pub fn validate_host(field_name: &str, host: &str) -> Result<()> {
    if host == "localhost" || host.parse::<IpAddr>().is_ok() {
        return Ok(());
    }

    Err(DashboardError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: host.to_string(),
        reason: "Expected an IP address such as 0.0.0.0 or 127.0.0.1".to_string(),
    })
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(DashboardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DashboardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// CSV 分隔符號必須是單一 ASCII 字元
pub fn validate_single_ascii(field_name: &str, value: char) -> Result<u8> {
    if value.is_ascii() && !value.is_ascii_alphanumeric() && value != '"' {
        return Ok(value as u8);
    }

    Err(DashboardError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: "Must be a single ASCII punctuation or whitespace character".to_string(),
    })
}
