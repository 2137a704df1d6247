//! Domain Layer - 领域层
//!
//! 纯逻辑，不做任何 I/O:
//! - language: 语言判定
//! - voice: 语言 → 音色映射
//! - prompt: 语言 → 系统提示词
//! - question / audio: 请求内流转的值对象

mod audio;
mod language;
mod prompt;
mod question;
pub mod voice;

pub use audio::{AudioClip, AudioFormat, AudioResult};
pub use language::{detect, LanguageTag};
pub use prompt::{PromptBook, PromptError, DEFAULT_PROMPT_EN, DEFAULT_PROMPT_KK, DEFAULT_PROMPT_RU};
pub use question::{Answer, Question};
pub use voice::{VoiceError, VoiceId, VoiceTable};
