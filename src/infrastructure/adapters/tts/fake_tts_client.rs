//! Fake TTS Client - 用于测试的 TTS 客户端
//!
//! 始终返回固定的音频数据，不实际调用 TTS 服务

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::application::ports::{SynthesisRequest, TtsEnginePort, UpstreamError};
use crate::domain::{AudioFormat, AudioResult, VoiceId};

/// Fake TTS Client 配置
#[derive(Debug, Clone)]
pub struct FakeTtsClientConfig {
    /// 固定返回的音频数据
    pub audio_data: Vec<u8>,
    /// 音频格式
    pub format: AudioFormat,
    /// 为 true 时每次调用都返回服务错误
    pub fail: bool,
}

impl Default for FakeTtsClientConfig {
    fn default() -> Self {
        Self {
            audio_data: b"ID3fake-mp3-frames".to_vec(),
            format: AudioFormat::Mp3,
            fail: false,
        }
    }
}

/// Fake TTS Client
///
/// 记录调用次数和收到的请求，便于断言
pub struct FakeTtsClient {
    config: FakeTtsClientConfig,
    calls: AtomicUsize,
    requests: Mutex<Vec<SynthesisRequest>>,
}

impl FakeTtsClient {
    pub fn new(config: FakeTtsClientConfig) -> Self {
        Self {
            config,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// 返回指定音频数据
    pub fn with_audio(audio_data: impl Into<Vec<u8>>) -> Self {
        Self::new(FakeTtsClientConfig {
            audio_data: audio_data.into(),
            ..Default::default()
        })
    }

    /// 每次调用都失败
    pub fn failing() -> Self {
        Self::new(FakeTtsClientConfig {
            fail: true,
            ..Default::default()
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// 已使用的音色（按调用顺序）
    pub fn voices(&self) -> Vec<VoiceId> {
        self.requests()
            .into_iter()
            .map(|request| request.voice)
            .collect()
    }

    /// 收到的合成请求（按调用顺序）
    pub fn requests(&self) -> Vec<SynthesisRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

impl Default for FakeTtsClient {
    fn default() -> Self {
        Self::new(FakeTtsClientConfig::default())
    }
}

#[async_trait]
impl TtsEnginePort for FakeTtsClient {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<AudioResult, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        tracing::debug!(
            text_len = request.text.len(),
            voice = %request.voice,
            "FakeTtsClient: returning fixed audio"
        );

        if self.config.fail {
            return Err(UpstreamError::ServiceError {
                status: 503,
                message: "fake synthesis failure".to_string(),
            });
        }

        Ok(AudioResult::new(
            self.config.audio_data.clone(),
            self.config.format,
        ))
    }

    fn provider(&self) -> &'static str {
        "fake"
    }
}
