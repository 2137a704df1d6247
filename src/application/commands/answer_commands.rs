//! Answer Commands - 问答与合成命令

use crate::domain::{AudioClip, AudioResult, LanguageTag, VoiceId};

/// 文字提问命令
#[derive(Debug, Clone)]
pub struct AskQuestion {
    pub question: String,
}

/// 语音提问命令
#[derive(Debug, Clone)]
pub struct AskByVoice {
    pub clip: AudioClip,
}

/// 文本合成命令
#[derive(Debug, Clone)]
pub struct Speak {
    pub text: String,
    pub language_code: Option<String>,
    pub voice_name: Option<String>,
}

/// 问答结果：回答文本 + 合成音频
#[derive(Debug, Clone)]
pub struct SpokenAnswer {
    pub text: String,
    pub audio: AudioResult,
    pub language: LanguageTag,
}

/// 合成结果
#[derive(Debug, Clone)]
pub struct SpeechOutput {
    pub audio: AudioResult,
    pub voice: VoiceId,
}
