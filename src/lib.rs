//! ARMGER Voice - 问答语音助手后端
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - LanguageTag 与语言识别
//! - VoiceTable / PromptBook：按语言选择音色与提示词
//! - Question / Answer / AudioClip / AudioResult
//!
//! 应用层 (application/):
//! - Ports: Completion, Transcription, TtsEngine
//! - Commands: 文字提问、语音提问、文本合成
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: JSON / multipart API
//! - Adapters: OpenAI (chat / whisper / speech), Google TTS, 临时文件

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
