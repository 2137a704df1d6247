//! OpenAI 公共部分 - 客户端配置
//!
//! chat / speech / whisper 三个客户端共用

use reqwest::Client;
use std::time::Duration;

use super::retry::RetryPolicy;
use crate::application::ports::UpstreamError;

/// OpenAI 客户端配置
#[derive(Debug, Clone)]
pub struct OpenAiClientConfig {
    /// API Key
    pub api_key: String,
    /// API 基础 URL（兼容 OpenAI 协议的服务也可使用）
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// 重试策略
    pub retry: RetryPolicy,
}

impl OpenAiClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout_secs: 60,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// 拼接接口 URL
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    pub(crate) fn bearer(&self) -> String {
        format!("Bearer {}", self.api_key)
    }

    /// 构建带超时的 HTTP 客户端
    pub(crate) fn build_client(&self) -> Result<Client, UpstreamError> {
        Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .build()
            .map_err(|e| UpstreamError::NetworkError(format!("Failed to create HTTP client: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = OpenAiClientConfig::new("sk-test");
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.retry.max_retries, 1);
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let config = OpenAiClientConfig::new("sk-test").with_base_url("http://localhost:9000/v1/");
        assert_eq!(config.url("chat/completions"), "http://localhost:9000/v1/chat/completions");
    }
}
