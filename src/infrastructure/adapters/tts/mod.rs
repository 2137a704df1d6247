//! TTS Adapter - 语音合成客户端实现（OpenAI / Google）

mod fake_tts_client;
mod google_auth;
mod google_tts_client;
mod openai_tts_client;

pub use fake_tts_client::{FakeTtsClient, FakeTtsClientConfig};
pub use google_auth::{
    AccessTokenSource, CredentialsError, ServiceAccountCredentials, ServiceAccountTokenProvider,
};
pub use google_tts_client::{GoogleTtsClient, GoogleTtsClientConfig};
pub use openai_tts_client::OpenAiTtsClient;
