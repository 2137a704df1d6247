//! Fake Transcription Client - 用于测试的转写客户端

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::application::ports::{TranscriptionPort, UpstreamError};
use crate::domain::AudioClip;

/// 固定转写结果；None 模拟无法识别的音频
pub struct FakeTranscriptionClient {
    transcript: Option<String>,
    calls: AtomicUsize,
}

impl FakeTranscriptionClient {
    pub fn replying(transcript: impl Into<String>) -> Self {
        Self {
            transcript: Some(transcript.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            transcript: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranscriptionPort for FakeTranscriptionClient {
    async fn transcribe(&self, clip: &AudioClip) -> Result<String, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(audio_bytes = clip.data().len(), "FakeTranscriptionClient called");

        self.transcript
            .clone()
            .ok_or_else(|| UpstreamError::ServiceError {
                status: 400,
                message: "Audio file might be corrupted or unsupported".to_string(),
            })
    }
}
