//! Speak Command Handler - 直接文本合成

use std::sync::Arc;

use crate::application::commands::{Speak, SpeechOutput};
use crate::application::error::{ApplicationError, Stage};
use crate::application::ports::{SynthesisRequest, TtsEnginePort, UpstreamError};
use crate::domain::{detect, VoiceId, VoiceTable};

/// Speak Handler
pub struct SpeakHandler {
    tts_engine: Arc<dyn TtsEnginePort>,
    voices: Arc<VoiceTable>,
}

impl SpeakHandler {
    pub fn new(tts_engine: Arc<dyn TtsEnginePort>, voices: Arc<VoiceTable>) -> Self {
        Self { tts_engine, voices }
    }

    pub async fn handle(&self, command: Speak) -> Result<SpeechOutput, ApplicationError> {
        let text = command.text.trim();
        if text.is_empty() {
            return Err(ApplicationError::validation("Text cannot be empty"));
        }

        let language_code = command
            .language_code
            .map(|code| code.trim().to_string())
            .filter(|code| !code.is_empty());

        // 显式音色 > 与语言代码匹配的音色 > 按文本语言选择
        let explicit = match command.voice_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => {
                Some(VoiceId::new(name).map_err(|e| ApplicationError::validation(e.to_string()))?)
            }
            _ => None,
        };

        let (voice, fallback_voice) = match (explicit, language_code.as_deref()) {
            (Some(voice), _) => (voice, false),
            (None, Some(code)) => match self.voices.find_by_language_code(code) {
                Some(voice) => (voice.clone(), false),
                None => (self.voices.select(detect(text)).clone(), true),
            },
            (None, None) => (self.voices.select(detect(text)).clone(), false),
        };

        let request = SynthesisRequest::new(text, voice.clone())
            .with_language_code(language_code)
            .with_fallback_voice(fallback_voice);
        let audio = self
            .tts_engine
            .synthesize(request)
            .await
            .map_err(|e| ApplicationError::upstream(Stage::Synthesis, e))?;

        if audio.is_empty() {
            return Err(ApplicationError::upstream(
                Stage::Synthesis,
                UpstreamError::EmptyResponse("synthesized audio is empty".to_string()),
            ));
        }

        tracing::info!(
            voice = %voice,
            provider = self.tts_engine.provider(),
            audio_size = audio.data().len(),
            "Text synthesized"
        );

        Ok(SpeechOutput { audio, voice })
    }
}
