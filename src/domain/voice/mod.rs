//! Voice Context - 音色选择上下文
//!
//! 职责:
//! - 语言标签到合成音色的静态映射

mod errors;
mod value_objects;

pub use errors::VoiceError;
pub use value_objects::{VoiceId, VoiceTable};
