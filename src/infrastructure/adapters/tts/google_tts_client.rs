//! Google TTS Client - 调用 Cloud Text-to-Speech
//!
//! 实现 TtsEnginePort trait
//!
//! POST {base_url}/text:synthesize
//! Request: {"input": {"text"}, "voice": {"languageCode", "name"}, "audioConfig": {"audioEncoding": "MP3"}}
//! Response: {"audioContent": "<base64>"}

use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use super::google_auth::AccessTokenSource;
use crate::application::ports::{SynthesisRequest, TtsEnginePort, UpstreamError};
use crate::domain::{AudioFormat, AudioResult};
use crate::infrastructure::adapters::response::error_from_response;
use crate::infrastructure::adapters::retry::RetryPolicy;

/// 无法从请求或音色名推断时使用的语言代码
const FALLBACK_LANGUAGE_CODE: &str = "ru-RU";

/// Google TTS 客户端配置
#[derive(Debug, Clone)]
pub struct GoogleTtsClientConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub retry: RetryPolicy,
}

impl Default for GoogleTtsClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://texttospeech.googleapis.com/v1".to_string(),
            timeout_secs: 30,
            retry: RetryPolicy::default(),
        }
    }
}

#[derive(Debug, Serialize)]
struct SynthesizeHttpRequest<'a> {
    input: SynthesisInput<'a>,
    voice: VoiceSelection<'a>,
    #[serde(rename = "audioConfig")]
    audio_config: AudioConfig,
}

#[derive(Debug, Serialize)]
struct SynthesisInput<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct VoiceSelection<'a> {
    #[serde(rename = "languageCode")]
    language_code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct AudioConfig {
    #[serde(rename = "audioEncoding")]
    audio_encoding: &'static str,
}

#[derive(Debug, Deserialize)]
struct SynthesizeHttpResponse {
    #[serde(rename = "audioContent", default)]
    audio_content: Option<String>,
}

/// Google TTS 客户端
pub struct GoogleTtsClient {
    client: Client,
    config: GoogleTtsClientConfig,
    tokens: Arc<dyn AccessTokenSource>,
}

impl GoogleTtsClient {
    pub fn new(
        config: GoogleTtsClientConfig,
        tokens: Arc<dyn AccessTokenSource>,
    ) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| UpstreamError::NetworkError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config,
            tokens,
        })
    }

    fn url(&self) -> String {
        format!("{}/text:synthesize", self.config.base_url.trim_end_matches('/'))
    }

    /// 语言代码：显式指定 > 音色名前缀 > 默认
    fn language_code(request: &SynthesisRequest) -> String {
        request
            .language_code
            .clone()
            .or_else(|| request.voice.language_code().map(str::to_string))
            .unwrap_or_else(|| FALLBACK_LANGUAGE_CODE.to_string())
    }

    /// 兜底音色与语言代码不一致时省略音色名，由 Google 选择该语言的默认音色
    fn voice_name<'a>(request: &'a SynthesisRequest, language_code: &str) -> Option<&'a str> {
        let matches = request
            .voice
            .language_code()
            .is_some_and(|code| code.eq_ignore_ascii_case(language_code));
        (!request.fallback_voice || matches).then(|| request.voice.as_str())
    }

    async fn send(&self, request: &SynthesisRequest, language_code: &str) -> Result<String, UpstreamError> {
        let token = self.tokens.access_token().await?;

        let http_request = SynthesizeHttpRequest {
            input: SynthesisInput {
                text: &request.text,
            },
            voice: VoiceSelection {
                language_code,
                name: Self::voice_name(request, language_code),
            },
            audio_config: AudioConfig {
                audio_encoding: "MP3",
            },
        };

        let response = self
            .client
            .post(self.url())
            .bearer_auth(token)
            .json(&http_request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let body: SynthesizeHttpResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::InvalidResponse(format!("Failed to parse synthesis: {}", e)))?;

        body.audio_content
            .filter(|content| !content.is_empty())
            .ok_or_else(|| UpstreamError::EmptyResponse("TTS returned no audio".to_string()))
    }
}

#[async_trait]
impl TtsEnginePort for GoogleTtsClient {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<AudioResult, UpstreamError> {
        let language_code = Self::language_code(&request);

        tracing::debug!(
            text_len = request.text.len(),
            voice = %request.voice,
            language_code = %language_code,
            "Sending Google TTS request"
        );

        let encoded = self
            .config
            .retry
            .run("google_tts", || self.send(&request, &language_code))
            .await?;

        let audio_data = base64::engine::general_purpose::STANDARD
            .decode(encoded.as_bytes())
            .map_err(|e| UpstreamError::InvalidResponse(format!("audioContent is not base64: {}", e)))?;

        if audio_data.is_empty() {
            return Err(UpstreamError::EmptyResponse("TTS returned no audio".to_string()));
        }

        tracing::info!(
            voice = %request.voice,
            audio_size = audio_data.len(),
            "Google TTS completed"
        );

        Ok(AudioResult::new(audio_data, AudioFormat::Mp3))
    }

    fn provider(&self) -> &'static str {
        "google"
    }
}
