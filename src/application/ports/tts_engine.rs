//! TTS Engine Port - 语音合成抽象
//!
//! 定义语音合成的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;

use super::UpstreamError;
use crate::domain::{AudioResult, VoiceId};

/// 语音合成请求
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    /// 要合成的文本（非空）
    pub text: String,
    /// 服务商音色
    pub voice: VoiceId,
    /// 语言代码（如 `ru-RU`），不支持的服务商忽略
    pub language_code: Option<String>,
    /// 音色只是兜底选择，与语言代码不一致时服务商可忽略音色
    pub fallback_voice: bool,
}

impl SynthesisRequest {
    pub fn new(text: impl Into<String>, voice: VoiceId) -> Self {
        Self {
            text: text.into(),
            voice,
            language_code: None,
            fallback_voice: false,
        }
    }

    pub fn with_language_code(mut self, language_code: Option<String>) -> Self {
        self.language_code = language_code;
        self
    }

    pub fn with_fallback_voice(mut self, fallback_voice: bool) -> Self {
        self.fallback_voice = fallback_voice;
        self
    }
}

/// TTS Engine Port
///
/// 外部语音合成服务的抽象接口
#[async_trait]
pub trait TtsEnginePort: Send + Sync {
    /// 合成语音，返回编码后的音频数据
    async fn synthesize(&self, request: SynthesisRequest) -> Result<AudioResult, UpstreamError>;

    /// 服务商名称（用于日志）
    fn provider(&self) -> &'static str;
}
