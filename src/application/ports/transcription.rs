//! Transcription Port - 语音转写抽象

use async_trait::async_trait;

use super::UpstreamError;
use crate::domain::AudioClip;

/// Transcription Port
///
/// 返回识别出的原始文本，可能为空，由调用方校验
#[async_trait]
pub trait TranscriptionPort: Send + Sync {
    async fn transcribe(&self, clip: &AudioClip) -> Result<String, UpstreamError>;
}
