//! HTTP Server
//!
//! Axum HTTP 服务器启动和配置

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::Router;
use http::HeaderName;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::middleware::{error_logging_middleware, request_id_middleware, REQUEST_ID_HEADER};
use super::routes::create_routes;
use super::state::AppState;

/// 服务器配置
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 请求体上限（字节）
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            max_upload_bytes: 25 * 1024 * 1024,
        }
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16, max_upload_bytes: usize) -> Self {
        Self {
            host: host.into(),
            port,
            max_upload_bytes,
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 构建 Router（含 CORS、请求体限制与日志中间件）
pub fn build_router(state: Arc<AppState>, max_upload_bytes: usize) -> Router {
    // 前端可能部署在任意域名
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER)])
        .max_age(std::time::Duration::from_secs(3600));

    create_routes()
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(middleware::from_fn(error_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .with_state(state)
}

/// HTTP 服务器
pub struct HttpServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl HttpServer {
    /// 创建新的 HTTP 服务器
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self {
            config,
            state: Arc::new(state),
        }
    }

    /// 启动服务器（带优雅关闭）
    pub async fn run_with_shutdown<F>(self, shutdown_signal: F) -> Result<(), std::io::Error>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let router = build_router(self.state.clone(), self.config.max_upload_bytes);
        let addr = self.config.addr();

        info!("Starting HTTP server on {} (with graceful shutdown)", addr);

        let listener = TcpListener::bind(&addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{CompletionPort, TranscriptionPort, TtsEnginePort};
    use crate::domain::{PromptBook, VoiceTable};
    use crate::infrastructure::adapters::{
        FakeCompletionClient, FakeTranscriptionClient, FakeTtsClient,
    };
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use base64::Engine;
    use serde_json::Value;
    use tower::util::ServiceExt;

    const BOUNDARY: &str = "armger-test-boundary";

    fn state_with(completion: FakeCompletionClient, transcriber: FakeTranscriptionClient) -> Arc<AppState> {
        let completion: Arc<dyn CompletionPort> = Arc::new(completion);
        let transcriber: Arc<dyn TranscriptionPort> = Arc::new(transcriber);
        let tts: Arc<dyn TtsEnginePort> = Arc::new(FakeTtsClient::default());
        Arc::new(AppState::new(
            completion,
            transcriber,
            tts,
            PromptBook::default(),
            VoiceTable::from_names("nova", "nova", "nova").unwrap(),
        ))
    }

    fn router() -> Router {
        let state = state_with(
            FakeCompletionClient::replying("ARMGER IT разрабатывает сайты и AI-ассистентов."),
            FakeTranscriptionClient::replying("Что делает ARMGER IT?"),
        );
        build_router(state, 1024 * 1024)
    }

    fn json_request(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn multipart_request(field: &str, data: &[u8]) -> Request<Body> {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"question.webm\"\r\n")
                .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: audio/webm\r\n\r\n");
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method(Method::POST)
            .uri("/voice")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_ask_returns_text_and_base64_audio() {
        let response = router()
            .oneshot(json_request("/ask", r#"{"question": "Что делает ARMGER IT?"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["text"], "ARMGER IT разрабатывает сайты и AI-ассистентов.");

        let audio = base64::engine::general_purpose::STANDARD
            .decode(json["audio"].as_str().unwrap())
            .unwrap();
        assert!(audio.starts_with(b"ID3"));
    }

    #[tokio::test]
    async fn test_ask_blank_question_is_bad_request() {
        let response = router()
            .oneshot(json_request("/ask", r#"{"question": "   "}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert_eq!(json["errno"], 400);
        assert_eq!(json["error"], "Question cannot be empty");
    }

    #[tokio::test]
    async fn test_ask_malformed_json_is_bad_request() {
        let response = router()
            .oneshot(json_request("/ask", "{question"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["errno"], 400);
    }

    #[tokio::test]
    async fn test_ask_upstream_failure_is_redacted_500() {
        let state = state_with(
            FakeCompletionClient::timing_out(),
            FakeTranscriptionClient::replying("unused"),
        );
        let response = build_router(state, 1024 * 1024)
            .oneshot(json_request("/ask", r#"{"question": "Hello"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = json_body(response).await;
        assert_eq!(json["errno"], 500);
        assert_eq!(json["error"], "Failed to complete completion request");
    }

    #[tokio::test]
    async fn test_voice_answers_transcribed_question() {
        let response = router()
            .oneshot(multipart_request("file", b"fake-webm-audio"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["text"], "ARMGER IT разрабатывает сайты и AI-ассистентов.");
        assert!(!json["audio"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_voice_transcription_failure_is_redacted_500() {
        let state = state_with(
            FakeCompletionClient::replying("unused"),
            FakeTranscriptionClient::failing(),
        );
        let response = build_router(state, 1024 * 1024)
            .oneshot(multipart_request("file", b"fake-webm-audio"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = json_body(response).await;
        assert_eq!(json["errno"], 500);
        assert_eq!(json["error"], "Failed to complete transcription request");
        assert!(json.get("text").is_none());
        assert!(json.get("audio").is_none());
    }

    #[tokio::test]
    async fn test_voice_without_file_field_is_bad_request() {
        let response = router()
            .oneshot(multipart_request("attachment", b"fake-webm-audio"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "Missing audio file field 'file'");
    }

    #[tokio::test]
    async fn test_voice_empty_file_is_bad_request() {
        let response = router().oneshot(multipart_request("file", b"")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_speak_returns_audio() {
        let response = router()
            .oneshot(json_request("/speak", r#"{"text": "Hello", "voice_name": "shimmer"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert!(!json["audio"].as_str().unwrap().is_empty());
        assert!(json.get("text").is_none());
    }

    #[tokio::test]
    async fn test_speak_empty_text_is_bad_request() {
        let response = router()
            .oneshot(json_request("/speak", r#"{"text": ""}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_body_over_limit_is_rejected() {
        let state = state_with(
            FakeCompletionClient::replying("unused"),
            FakeTranscriptionClient::replying("unused"),
        );
        let question = "a".repeat(512);
        let response = build_router(state, 64)
            .oneshot(json_request("/ask", &format!(r#"{{"question": "{question}"}}"#)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_cors_preflight_allows_any_origin() {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/ask")
            .header(header::ORIGIN, "https://armger.kz")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap();

        let response = router().oneshot(request).await.unwrap();
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
    }
}
