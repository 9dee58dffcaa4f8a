use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API request failed with status: {status}")]
    ApiStatusError { status: u16 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Filter error: {message}")]
    FilterError { message: String },
}

pub type Result<T> = std::result::Result<T, DashboardError>;

/// 錯誤嚴重程度，決定 CLI 的退出碼
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    System,
}

impl DashboardError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DashboardError::ApiError(_) | DashboardError::ApiStatusError { .. } => {
                ErrorCategory::Network
            }
            DashboardError::SerializationError(_) | DashboardError::FilterError { .. } => {
                ErrorCategory::Data
            }
            DashboardError::ConfigError { .. }
            | DashboardError::InvalidValueError { .. }
            | DashboardError::MissingConfigError { .. } => ErrorCategory::Configuration,
            DashboardError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 網路問題通常是暫時的，下一次觸發就會重試整個週期
            DashboardError::ApiError(_) | DashboardError::ApiStatusError { .. } => {
                ErrorSeverity::Medium
            }
            DashboardError::SerializationError(_) | DashboardError::FilterError { .. } => {
                ErrorSeverity::High
            }
            DashboardError::ConfigError { .. }
            | DashboardError::InvalidValueError { .. }
            | DashboardError::MissingConfigError { .. } => ErrorSeverity::High,
            DashboardError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的訊息，不暴露傳輸層細節
    pub fn user_friendly_message(&self) -> String {
        match self {
            DashboardError::ApiError(_) => "Failed to fetch portfolio data".to_string(),
            DashboardError::ApiStatusError { status } => {
                format!("Failed to fetch portfolio data (HTTP {})", status)
            }
            DashboardError::SerializationError(_) => {
                "The portfolio API returned an unexpected response".to_string()
            }
            DashboardError::FilterError { message } => {
                format!("Filter settings are invalid: {}", message)
            }
            DashboardError::ConfigError { message } => {
                format!("Configuration problem: {}", message)
            }
            DashboardError::InvalidValueError { field, reason, .. } => {
                format!("Invalid {}: {}", field, reason)
            }
            DashboardError::MissingConfigError { field } => {
                format!("Missing required setting: {}", field)
            }
            DashboardError::IoError(_) => "Could not read or write local files".to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            DashboardError::ApiError(_) => {
                "Check that the portfolio API server is reachable".to_string()
            }
            DashboardError::ApiStatusError { status } if *status == 401 || *status == 403 => {
                "Check that the API token is valid".to_string()
            }
            DashboardError::ApiStatusError { .. } => {
                "Check the portfolio API server logs".to_string()
            }
            DashboardError::SerializationError(_) => {
                "Verify the API endpoint points at /api/portfolio".to_string()
            }
            DashboardError::FilterError { .. } => {
                "Fix the filters file and trigger a refresh again".to_string()
            }
            DashboardError::ConfigError { .. } | DashboardError::InvalidValueError { .. } => {
                "Review the configuration values".to_string()
            }
            DashboardError::MissingConfigError { field } => {
                format!("Provide {} via flag, config file or environment", field)
            }
            DashboardError::IoError(_) => {
                "Check file permissions on the filters file and output path".to_string()
            }
        }
    }
}
