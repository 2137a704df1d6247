//! Application Ports - 出站端口定义
//!
//! 定义应用层与外部服务之间的抽象接口

mod completion;
mod transcription;
mod tts_engine;
mod upstream;

pub use completion::CompletionPort;
pub use transcription::TranscriptionPort;
pub use tts_engine::{SynthesisRequest, TtsEnginePort};
pub use upstream::UpstreamError;
