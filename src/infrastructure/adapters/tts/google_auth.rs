//! Google Auth - 服务账号换取 OAuth access token
//!
//! 流程：用私钥签名 RS256 JWT → POST token_uri (jwt-bearer) → 缓存 token 至过期前 5 分钟

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::application::ports::UpstreamError;
use crate::infrastructure::adapters::response::error_from_response;

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const TOKEN_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";
const JWT_LIFETIME_SECS: i64 = 3600;
const REFRESH_BUFFER_SECS: i64 = 300;

/// 凭据加载错误（启动阶段）
#[derive(Debug, thiserror::Error)]
pub enum CredentialsError {
    #[error("Failed to read credentials file {path}: {message}")]
    Read { path: String, message: String },

    #[error("Failed to parse service account JSON: {0}")]
    Parse(String),

    #[error("Invalid service account private key: {0}")]
    InvalidKey(String),

    #[error("Failed to create HTTP client: {0}")]
    Client(String),
}

/// access token 来源
#[async_trait]
pub trait AccessTokenSource: Send + Sync {
    async fn access_token(&self) -> Result<String, UpstreamError>;
}

/// 服务账号 JSON（只取需要的字段）
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountCredentials {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub token_uri: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
}

impl ServiceAccountCredentials {
    pub fn from_json(json: &str) -> Result<Self, CredentialsError> {
        serde_json::from_str(json).map_err(|e| CredentialsError::Parse(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CredentialsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| CredentialsError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&json)
    }

    fn token_uri(&self) -> &str {
        self.token_uri.as_deref().unwrap_or(DEFAULT_TOKEN_URI)
    }
}

#[derive(Debug, Serialize)]
struct JwtClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

struct CachedToken {
    access_token: String,
    expires_at: i64,
}

/// 服务账号 token 提供者
pub struct ServiceAccountTokenProvider {
    client: Client,
    credentials: ServiceAccountCredentials,
    key: EncodingKey,
    cache: Mutex<Option<CachedToken>>,
}

impl ServiceAccountTokenProvider {
    /// 私钥在此处解析，格式错误时启动即失败
    pub fn new(credentials: ServiceAccountCredentials, timeout_secs: u64) -> Result<Self, CredentialsError> {
        let key = EncodingKey::from_rsa_pem(credentials.private_key.as_bytes())
            .map_err(|e| CredentialsError::InvalidKey(e.to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| CredentialsError::Client(e.to_string()))?;

        tracing::info!(
            client_email = %credentials.client_email,
            project_id = credentials.project_id.as_deref().unwrap_or("-"),
            "Google service account loaded"
        );

        Ok(Self {
            client,
            credentials,
            key,
            cache: Mutex::new(None),
        })
    }

    fn create_jwt(&self, now: i64) -> Result<String, UpstreamError> {
        let claims = JwtClaims {
            iss: &self.credentials.client_email,
            scope: TOKEN_SCOPE,
            aud: self.credentials.token_uri(),
            iat: now,
            exp: now + JWT_LIFETIME_SECS,
        };

        jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &self.key)
            .map_err(|e| UpstreamError::AuthError(format!("JWT encoding failed: {}", e)))
    }

    async fn fetch_token(&self, now: i64) -> Result<CachedToken, UpstreamError> {
        let jwt = self.create_jwt(now)?;

        let response = self
            .client
            .post(self.credentials.token_uri())
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", jwt.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(match error_from_response(response).await {
                UpstreamError::ServiceError { status, message } if status < 500 => {
                    UpstreamError::AuthError(format!("Token request rejected ({}): {}", status, message))
                }
                other => other,
            });
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::InvalidResponse(format!("Failed to parse token: {}", e)))?;

        tracing::debug!(expires_in = token.expires_in, "Google access token refreshed");

        Ok(CachedToken {
            access_token: token.access_token,
            expires_at: now + token.expires_in,
        })
    }
}

#[async_trait]
impl AccessTokenSource for ServiceAccountTokenProvider {
    async fn access_token(&self) -> Result<String, UpstreamError> {
        let now = chrono::Utc::now().timestamp();

        // 持锁刷新，避免并发请求重复换取 token
        let mut cache = self.cache.lock().await;
        if let Some(cached) = cache.as_ref() {
            if cached.expires_at > now + REFRESH_BUFFER_SECS {
                return Ok(cached.access_token.clone());
            }
        }

        let fresh = self.fetch_token(now).await?;
        let access_token = fresh.access_token.clone();
        *cache = Some(fresh);
        Ok(access_token)
    }
}
