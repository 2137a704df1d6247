//! HTTP Routes
//!
//! API Endpoints:
//! - /        GET   健康检查
//! - /ask     POST  文字提问，返回回答文本与音频
//! - /voice   POST  语音提问（multipart，字段 `file`）
//! - /speak   POST  任意文本合成

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::ping))
        .route("/ask", post(handlers::ask))
        .route("/voice", post(handlers::voice))
        .route("/speak", post(handlers::speak))
}
