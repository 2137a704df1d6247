//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 外部服务端口定义（Completion、TtsEngine、Transcription）
//! - commands: 问答 / 合成命令及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;

// Re-exports
pub use commands::{
    handlers::{AnswerTextHandler, AnswerVoiceHandler, SpeakHandler},
    AskByVoice, AskQuestion, Speak, SpeechOutput, SpokenAnswer,
};

pub use error::{ApplicationError, Stage};

pub use ports::{
    CompletionPort, SynthesisRequest, TranscriptionPort, TtsEnginePort, UpstreamError,
};
