//! Application State
//!
//! 持有三个用例处理器，服务商客户端在启动时构建一次

use std::sync::Arc;

use crate::application::{
    AnswerTextHandler, AnswerVoiceHandler, CompletionPort, SpeakHandler, TranscriptionPort,
    TtsEnginePort,
};
use crate::domain::{PromptBook, VoiceTable};

/// 应用状态
pub struct AppState {
    pub answer_text_handler: AnswerTextHandler,
    pub answer_voice_handler: AnswerVoiceHandler,
    pub speak_handler: SpeakHandler,
}

impl AppState {
    pub fn new(
        completion: Arc<dyn CompletionPort>,
        transcriber: Arc<dyn TranscriptionPort>,
        tts_engine: Arc<dyn TtsEnginePort>,
        prompts: PromptBook,
        voices: VoiceTable,
    ) -> Self {
        let voices = Arc::new(voices);
        let answer_text_handler = AnswerTextHandler::new(
            completion,
            tts_engine.clone(),
            Arc::new(prompts),
            voices.clone(),
        );

        Self {
            answer_voice_handler: AnswerVoiceHandler::new(transcriber, answer_text_handler.clone()),
            answer_text_handler,
            speak_handler: SpeakHandler::new(tts_engine, voices),
        }
    }
}
