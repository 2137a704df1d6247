//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::application::{SpeechOutput, SpokenAnswer};

/// POST /ask
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub question: String,
}

/// POST /speak
#[derive(Debug, Deserialize)]
pub struct SpeakRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub language_code: Option<String>,
    #[serde(default)]
    pub voice_name: Option<String>,
}

/// /ask 与 /voice 的响应：回答文本 + base64 音频
#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub text: String,
    pub audio: String,
}

impl From<SpokenAnswer> for AnswerResponse {
    fn from(answer: SpokenAnswer) -> Self {
        Self {
            audio: answer.audio.to_base64(),
            text: answer.text,
        }
    }
}

/// /speak 的响应
#[derive(Debug, Serialize)]
pub struct SpeakResponse {
    pub audio: String,
}

impl From<SpeechOutput> for SpeakResponse {
    fn from(output: SpeechOutput) -> Self {
        Self {
            audio: output.audio.to_base64(),
        }
    }
}
