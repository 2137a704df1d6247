//! 应用层 - 命令
//!
//! 问答（文字/语音）与文本合成

mod answer_commands;

pub mod handlers;

pub use answer_commands::*;
