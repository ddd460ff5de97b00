//! Centralized Error Handling Module
//!
//! Every failure carries a unique error code so a failed poll cycle can be
//! told apart in the logs.
//!
//! Error codes follow pattern: CATEGORY_SPECIFIC_ERROR
//! - API_xxx: Scanner API errors (transport, HTTP status, decode)
//! - CFG_xxx: Configuration errors
//! - DASHBOARD_xxx: Dashboard lifecycle errors

use std::fmt;

/// Application-wide error type
#[derive(Debug)]
pub struct AppError {
    /// Unique error code for logging/monitoring
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// HTTP status for `ApiHttpStatus` errors
    pub status: Option<u16>,
    /// Optional underlying error
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new AppError
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            status: None,
            source: None,
        }
    }

    /// Create AppError with source error
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            status: None,
            source: Some(Box::new(source)),
        }
    }

    /// Get error code as string (for logging)
    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }

    /// No response was received (connect, DNS, timeout)
    pub fn is_transport(&self) -> bool {
        matches!(self.code, ErrorCode::ApiTransport | ErrorCode::ApiTimeout)
    }

    /// The server answered with a non-2xx status
    pub fn is_http(&self) -> bool {
        self.code == ErrorCode::ApiHttpStatus
    }

    /// The body did not match the expected schema
    pub fn is_decode(&self) -> bool {
        self.code == ErrorCode::ApiDecode
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(
                f,
                "[{}] {} (HTTP {})",
                self.code.as_str(),
                self.message,
                status
            ),
            None => write!(f, "[{}] {}", self.code.as_str(), self.message),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Unique error codes for monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // ============================================
    // Scanner API Errors
    // ============================================
    /// Connection / DNS / body read failed
    ApiTransport,
    /// Request timed out
    ApiTimeout,
    /// Non-2xx response
    ApiHttpStatus,
    /// Body does not match the expected schema
    ApiDecode,
    /// Request parameters rejected before sending
    ApiInvalidRequest,

    // ============================================
    // Configuration Errors
    // ============================================
    /// Invalid configuration value
    ConfigInvalidValue,

    // ============================================
    // Dashboard Errors
    // ============================================
    /// Dashboard manager is no longer running
    DashboardClosed,

    // ============================================
    // Generic Errors
    // ============================================
    /// Unknown error
    Unknown,
}

impl ErrorCode {
    /// Get string representation of error code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ApiTransport => "API_TRANSPORT_FAILED",
            Self::ApiTimeout => "API_TIMEOUT",
            Self::ApiHttpStatus => "API_HTTP_STATUS",
            Self::ApiDecode => "API_DECODE_FAILED",
            Self::ApiInvalidRequest => "API_INVALID_REQUEST",
            Self::ConfigInvalidValue => "CFG_INVALID_VALUE",
            Self::DashboardClosed => "DASHBOARD_CLOSED",
            Self::Unknown => "UNKNOWN_ERROR",
        }
    }
}

// ============================================
// Convenience constructors
// ============================================

impl AppError {
    /// Transport failure
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ApiTransport, msg)
    }

    /// Non-2xx response
    pub fn http_status(status: u16, msg: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            ..Self::new(ErrorCode::ApiHttpStatus, msg)
        }
    }

    /// Rejected request parameters
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ApiInvalidRequest, msg)
    }

    /// Invalid configuration value
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalidValue, msg)
    }

    /// Dashboard manager stopped
    pub fn dashboard_closed() -> Self {
        Self::new(ErrorCode::DashboardClosed, "Dashboard manager is not running")
    }
}

// ============================================
// Result type alias
// ============================================

/// Application Result type
pub type AppResult<T> = Result<T, AppError>;

// ============================================
// Conversion from common error types
// ============================================

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::with_source(ErrorCode::ApiTimeout, "Request timeout", err)
        } else if err.is_decode() {
            Self::with_source(ErrorCode::ApiDecode, "Response decode failed", err)
        } else if let Some(status) = err.status() {
            Self {
                status: Some(status.as_u16()),
                ..Self::with_source(ErrorCode::ApiHttpStatus, "HTTP error", err)
            }
        } else {
            let message = if err.is_connect() { "Connection failed" } else { "Request failed" };
            Self::with_source(ErrorCode::ApiTransport, message, err)
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(ErrorCode::ApiDecode, "JSON parse error", err)
    }
}
