//! HTTP Error Handling
//!
//! 错误响应体 `{errno, error}`，errno 与 HTTP 状态码一致

use axum::{
    extract::multipart::MultipartError,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::{ApplicationError, Stage};

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub errno: u16,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            errno: status.as_u16(),
            error: error.into(),
        }
    }
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    PayloadTooLarge(String),
    /// 外部服务失败，响应只包含阶段，详情仅写日志
    Upstream { stage: Stage, detail: String },
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::BadRequest(msg) => {
                tracing::warn!(errno = status.as_u16(), error = %msg, "Bad request");
                msg
            }
            ApiError::PayloadTooLarge(msg) => {
                tracing::warn!(errno = status.as_u16(), error = %msg, "Payload too large");
                msg
            }
            ApiError::Upstream { stage, detail } => {
                tracing::error!(errno = status.as_u16(), stage = %stage, error = %detail, "Upstream service failed");
                format!("Failed to complete {} request", stage)
            }
        };

        (status, Json(ErrorResponse::new(status, message))).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        match e {
            ApplicationError::ValidationError(msg) => ApiError::BadRequest(msg),
            ApplicationError::UpstreamError { stage, source } => ApiError::Upstream {
                stage,
                detail: source.to_string(),
            },
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(e.body_text())
        } else {
            ApiError::BadRequest(e.body_text())
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(e.body_text())
        } else {
            ApiError::BadRequest(format!("Failed to read multipart field: {}", e.body_text()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::UpstreamError;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let err: ApiError = ApplicationError::validation("Question cannot be empty").into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upstream_detail_is_redacted() {
        let err: ApiError = ApplicationError::upstream(
            Stage::Completion,
            UpstreamError::AuthError("Incorrect API key provided: sk-abc***".to_string()),
        )
        .into();

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["errno"], 500);
        assert_eq!(json["error"], "Failed to complete completion request");
        assert!(!String::from_utf8_lossy(&body).contains("API key"));
    }
}
