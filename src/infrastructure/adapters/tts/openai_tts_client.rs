//! OpenAI TTS Client - 调用 OpenAI 语音合成接口
//!
//! 实现 TtsEnginePort trait
//!
//! POST {base_url}/audio/speech
//! Request: {"model": "tts-1", "input": "...", "voice": "nova", "response_format": "mp3"}
//! Response: audio/mpeg binary

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::application::ports::{SynthesisRequest, TtsEnginePort, UpstreamError};
use crate::domain::{AudioFormat, AudioResult};
use crate::infrastructure::adapters::openai::OpenAiClientConfig;
use crate::infrastructure::adapters::response::error_from_response;

/// TTS 请求体 (JSON)
#[derive(Debug, Serialize)]
struct SpeechHttpRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    response_format: &'static str,
}

/// OpenAI TTS 客户端
pub struct OpenAiTtsClient {
    client: Client,
    config: OpenAiClientConfig,
    model: String,
}

impl OpenAiTtsClient {
    pub fn new(config: OpenAiClientConfig, model: impl Into<String>) -> Result<Self, UpstreamError> {
        let client = config.build_client()?;
        Ok(Self {
            client,
            config,
            model: model.into(),
        })
    }

    async fn send(&self, request: &SynthesisRequest) -> Result<Vec<u8>, UpstreamError> {
        let http_request = SpeechHttpRequest {
            model: &self.model,
            input: &request.text,
            voice: request.voice.as_str(),
            response_format: AudioFormat::Mp3.extension(),
        };

        let response = self
            .client
            .post(self.config.url("audio/speech"))
            .header("Authorization", self.config.bearer())
            .json(&http_request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let audio_data = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::InvalidResponse(format!("Failed to read audio: {}", e)))?
            .to_vec();

        Ok(audio_data)
    }
}

#[async_trait]
impl TtsEnginePort for OpenAiTtsClient {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<AudioResult, UpstreamError> {
        tracing::debug!(
            url = %self.config.url("audio/speech"),
            text_len = request.text.len(),
            voice = %request.voice,
            "Sending OpenAI TTS request"
        );

        let audio_data = self
            .config
            .retry
            .run("openai_tts", || self.send(&request))
            .await?;

        if audio_data.is_empty() {
            return Err(UpstreamError::EmptyResponse("TTS returned no audio".to_string()));
        }

        tracing::info!(
            voice = %request.voice,
            audio_size = audio_data.len(),
            "OpenAI TTS completed"
        );

        Ok(AudioResult::new(audio_data, AudioFormat::Mp3))
    }

    fn provider(&self) -> &'static str {
        "openai"
    }
}
