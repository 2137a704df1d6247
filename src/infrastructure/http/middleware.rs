//! HTTP Middleware
//!
//! - 请求 ID：每个请求一个 span，并回写 `x-request-id`
//! - 4xx / 5xx 状态码日志

use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// 请求 ID 中间件
///
/// 客户端带了 `x-request-id` 时沿用，否则生成 UUID
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let span = tracing::info_span!("request", request_id = %request_id);
    let mut response = next.run(request).instrument(span).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// HTTP 状态码错误日志中间件
///
/// 拦截 HTTP 响应，当状态码为 4xx 或 5xx 时记录日志
/// 错误详情在 ApiError::into_response() 中记录
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;
    let status = response.status();

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            "HTTP server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            "HTTP client error"
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        routing::get,
        Router,
    };
    use std::io;
    use std::sync::{Arc, Mutex};
    use tower::util::ServiceExt;

    /// 收集日志输出
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// 在捕获日志的订阅者下请求 `uri`
    async fn request_with_logs(uri: &str) -> (StatusCode, String) {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let request = HttpRequest::builder().uri(uri).body(Body::empty()).unwrap();
        let response = create_test_router().oneshot(request).await.unwrap();
        (response.status(), logs.contents())
    }

    async fn ok_handler() -> &'static str {
        "OK"
    }

    async fn not_found_handler() -> StatusCode {
        StatusCode::NOT_FOUND
    }

    async fn error_handler() -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn create_test_router() -> Router {
        Router::new()
            .route("/ok", get(ok_handler))
            .route("/not-found", get(not_found_handler))
            .route("/error", get(error_handler))
            .layer(axum::middleware::from_fn(error_logging_middleware))
            .layer(axum::middleware::from_fn(request_id_middleware))
    }

    #[tokio::test]
    async fn test_ok_response_no_log() {
        let (status, logs) = request_with_logs("/ok").await;
        assert_eq!(status, StatusCode::OK);
        assert!(logs.is_empty());
    }

    #[tokio::test]
    async fn test_client_error_logs_warning() {
        let (status, logs) = request_with_logs("/not-found").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(logs.contains("WARN"));
        assert!(logs.contains("HTTP client error"));
        assert!(logs.contains("status=404"));
    }

    #[tokio::test]
    async fn test_request_id_generated() {
        let app = create_test_router();
        let request = HttpRequest::builder()
            .uri("/ok")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let id = response.headers().get(REQUEST_ID_HEADER).unwrap().to_str().unwrap();
        assert!(Uuid::parse_str(id).is_ok());
    }

    #[tokio::test]
    async fn test_request_id_propagated() {
        let app = create_test_router();
        let request = HttpRequest::builder()
            .uri("/ok")
            .header(REQUEST_ID_HEADER, "front-42")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.headers().get(REQUEST_ID_HEADER).unwrap(), "front-42");
    }

    #[tokio::test]
    async fn test_server_error_logs_error() {
        let (status, logs) = request_with_logs("/error").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(logs.contains("ERROR"));
        assert!(logs.contains("HTTP server error"));
        assert!(logs.contains("uri=/error"));
    }
}
