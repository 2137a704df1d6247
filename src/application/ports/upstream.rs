//! Upstream Error - 外部服务调用错误
//!
//! 补全、合成、转写三类外部服务共用

use thiserror::Error;

/// 外部服务错误
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error (HTTP {status}): {message}")]
    ServiceError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Empty response: {0}")]
    EmptyResponse(String),

    #[error("Authentication failed: {0}")]
    AuthError(String),

    #[error("IO error: {0}")]
    IoError(String),
}

impl UpstreamError {
    /// 是否值得重试：超时、网络错误、429、5xx
    pub fn is_recoverable(&self) -> bool {
        match self {
            UpstreamError::Timeout | UpstreamError::NetworkError(_) => true,
            UpstreamError::ServiceError { status, .. } => {
                *status == 429 || (500..600).contains(status)
            }
            _ => false,
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            UpstreamError::Timeout
        } else if e.is_connect() {
            UpstreamError::NetworkError(format!("Cannot connect to upstream service: {}", e))
        } else if e.is_decode() {
            UpstreamError::InvalidResponse(e.to_string())
        } else {
            UpstreamError::NetworkError(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_errors() {
        assert!(UpstreamError::Timeout.is_recoverable());
        assert!(UpstreamError::NetworkError("reset".into()).is_recoverable());
        assert!(UpstreamError::ServiceError { status: 429, message: String::new() }.is_recoverable());
        assert!(UpstreamError::ServiceError { status: 503, message: String::new() }.is_recoverable());
    }

    #[test]
    fn test_non_recoverable_errors() {
        assert!(!UpstreamError::ServiceError { status: 400, message: String::new() }.is_recoverable());
        assert!(!UpstreamError::AuthError("bad key".into()).is_recoverable());
        assert!(!UpstreamError::EmptyResponse("no content".into()).is_recoverable());
    }
}
