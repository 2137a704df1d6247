//! Transcription Adapter - 语音转写客户端

mod fake_transcription_client;
mod openai_whisper_client;

pub use fake_transcription_client::FakeTranscriptionClient;
pub use openai_whisper_client::OpenAiWhisperClient;
