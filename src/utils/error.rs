use reqwest::StatusCode;
use thiserror::Error;

pub const ROUTE_FAILED_MESSAGE: &str = "Route calculation failed";
pub const OVERPASS_TIMEOUT_MESSAGE: &str = "Area too large, Overpass timed out";

#[derive(Error, Debug)]
pub enum GatewayError {
    /// 路徑服務拒絕請求，保留原始錯誤文字
    #[error("ORS Error: {detail}")]
    UpstreamRejection { detail: String },

    #[error("Route calculation failed (provider status {status})")]
    RouteCalculationFailed { status: u16 },

    #[error("Overpass request timed out")]
    UpstreamTimeout,

    #[error("Upstream error ({status}): {message}")]
    UpstreamError { status: u16, message: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

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
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Upstream,
    Network,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl GatewayError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            GatewayError::UpstreamRejection { .. }
            | GatewayError::RouteCalculationFailed { .. }
            | GatewayError::UpstreamError { .. } => ErrorCategory::Upstream,
            GatewayError::UpstreamTimeout | GatewayError::ApiError(_) => ErrorCategory::Network,
            GatewayError::ConfigError { .. }
            | GatewayError::ConfigValidationError { .. }
            | GatewayError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            GatewayError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Upstream => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 對應回傳給客戶端的 HTTP 狀態碼
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::UpstreamRejection { .. } => StatusCode::BAD_REQUEST,
            GatewayError::RouteCalculationFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            GatewayError::UpstreamError { .. } | GatewayError::ApiError(_) => {
                StatusCode::BAD_GATEWAY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 給客戶端看的訊息，路徑錯誤不洩漏服務商內容
    pub fn user_friendly_message(&self) -> String {
        match self {
            GatewayError::UpstreamRejection { .. } => self.to_string(),
            GatewayError::RouteCalculationFailed { .. } => ROUTE_FAILED_MESSAGE.to_string(),
            GatewayError::UpstreamTimeout => OVERPASS_TIMEOUT_MESSAGE.to_string(),
            GatewayError::UpstreamError { status, message } => {
                format!("Overpass error ({}): {}", status, message)
            }
            GatewayError::ApiError(e) if e.is_decode() => {
                "Upstream provider returned invalid JSON".to_string()
            }
            GatewayError::ApiError(_) => "Upstream provider unreachable".to_string(),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            GatewayError::UpstreamRejection { .. } => {
                "Check ORS_API_KEY and the requested coordinates"
            }
            GatewayError::RouteCalculationFailed { .. } => {
                "Check that both points are reachable with the selected mode"
            }
            GatewayError::UpstreamTimeout => "Reduce the time budget or pick a slower travel mode",
            GatewayError::UpstreamError { .. } => "Retry later; the feature provider is overloaded",
            GatewayError::ApiError(_) => "Check network connectivity to the provider endpoints",
            GatewayError::IoError(_) => "Check file permissions and that the path exists",
            GatewayError::ConfigError { .. }
            | GatewayError::ConfigValidationError { .. }
            | GatewayError::InvalidConfigValueError { .. } => {
                "Review the command line flags and the TOML configuration file"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
