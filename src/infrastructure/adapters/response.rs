//! Upstream Response - 非 2xx 响应的错误转换
//!
//! OpenAI 与 Google 的错误体都形如 `{"error": {"message": "..."}}`

use reqwest::{Response, StatusCode};
use serde::Deserialize;

use crate::application::ports::UpstreamError;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// 提取错误信息，解析失败时使用原始响应体
fn error_message(body: String) -> String {
    serde_json::from_str::<ErrorBody>(&body)
        .map(|b| b.error.message)
        .unwrap_or(body)
}

fn classify(status: StatusCode, message: String) -> UpstreamError {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        UpstreamError::AuthError(message)
    } else {
        UpstreamError::ServiceError {
            status: status.as_u16(),
            message,
        }
    }
}

/// 将非 2xx 响应转换为 UpstreamError
pub(crate) async fn error_from_response(response: Response) -> UpstreamError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let error = classify(status, error_message(body));

    tracing::warn!(status = %status, error = %error, "Upstream returned error status");
    error
}
