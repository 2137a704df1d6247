//! Completion Adapter - 文本补全客户端

mod fake_completion_client;
mod openai_chat_client;

pub use fake_completion_client::FakeCompletionClient;
pub use openai_chat_client::{ChatOptions, OpenAiChatClient};
