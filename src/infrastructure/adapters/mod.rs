//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod completion;
pub mod openai;
mod response;
pub mod retry;
pub mod storage;
pub mod transcription;
pub mod tts;

pub use completion::*;
pub use openai::OpenAiClientConfig;
pub use retry::RetryPolicy;
pub use storage::*;
pub use transcription::*;
pub use tts::*;
