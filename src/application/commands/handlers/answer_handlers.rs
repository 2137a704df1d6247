//! Answer Command Handlers
//!
//! 文字提问：校验 → 语言判定 → 补全 → 选音色 → 合成
//! 语音提问：转写 → 校验转写文本 → 文字提问管线

use std::sync::Arc;

use crate::application::commands::{AskByVoice, AskQuestion, SpokenAnswer};
use crate::application::error::{ApplicationError, Stage};
use crate::application::ports::{
    CompletionPort, SynthesisRequest, TranscriptionPort, TtsEnginePort, UpstreamError,
};
use crate::domain::{detect, PromptBook, Question, VoiceTable};

// ============================================================================
// AnswerText
// ============================================================================

/// AnswerText Handler
#[derive(Clone)]
pub struct AnswerTextHandler {
    completion: Arc<dyn CompletionPort>,
    tts_engine: Arc<dyn TtsEnginePort>,
    prompts: Arc<PromptBook>,
    voices: Arc<VoiceTable>,
}

impl AnswerTextHandler {
    pub fn new(
        completion: Arc<dyn CompletionPort>,
        tts_engine: Arc<dyn TtsEnginePort>,
        prompts: Arc<PromptBook>,
        voices: Arc<VoiceTable>,
    ) -> Self {
        Self {
            completion,
            tts_engine,
            prompts,
            voices,
        }
    }

    pub async fn handle(&self, command: AskQuestion) -> Result<SpokenAnswer, ApplicationError> {
        let question = Question::new(&command.question).map_err(ApplicationError::validation)?;
        self.answer(question).await
    }

    /// 对已校验的问题执行问答管线
    pub(crate) async fn answer(&self, question: Question) -> Result<SpokenAnswer, ApplicationError> {
        let language = detect(question.as_str());
        let system_prompt = self.prompts.get(language);

        let answer = self
            .completion
            .complete(&question, system_prompt)
            .await
            .map_err(|e| ApplicationError::upstream(Stage::Completion, e))?;

        let voice = self.voices.select(language).clone();
        tracing::debug!(
            language = %language,
            voice = %voice,
            provider = self.tts_engine.provider(),
            answer_len = answer.as_str().len(),
            "Synthesizing answer"
        );

        let audio = self
            .tts_engine
            .synthesize(SynthesisRequest::new(answer.as_str(), voice))
            .await
            .map_err(|e| ApplicationError::upstream(Stage::Synthesis, e))?;

        if audio.is_empty() {
            return Err(ApplicationError::upstream(
                Stage::Synthesis,
                UpstreamError::EmptyResponse("synthesized audio is empty".to_string()),
            ));
        }

        tracing::info!(
            language = %language,
            audio_size = audio.data().len(),
            "Question answered"
        );

        Ok(SpokenAnswer {
            text: answer.into_string(),
            audio,
            language,
        })
    }
}

// ============================================================================
// AnswerVoice
// ============================================================================

/// AnswerVoice Handler
pub struct AnswerVoiceHandler {
    transcriber: Arc<dyn TranscriptionPort>,
    answer_text: AnswerTextHandler,
}

impl AnswerVoiceHandler {
    pub fn new(transcriber: Arc<dyn TranscriptionPort>, answer_text: AnswerTextHandler) -> Self {
        Self {
            transcriber,
            answer_text,
        }
    }

    pub async fn handle(&self, command: AskByVoice) -> Result<SpokenAnswer, ApplicationError> {
        let clip = command.clip;

        let transcript = self
            .transcriber
            .transcribe(&clip)
            .await
            .map_err(|e| ApplicationError::upstream(Stage::Transcription, e))?;

        // 无法识别的音频常返回空文本，不再继续调用补全
        let question = Question::new(&transcript).map_err(|_| {
            ApplicationError::upstream(
                Stage::Transcription,
                UpstreamError::EmptyResponse("transcript is empty".to_string()),
            )
        })?;

        tracing::info!(
            audio_bytes = clip.data().len(),
            format = ?clip.format(),
            transcript_len = question.as_str().len(),
            "Voice question transcribed"
        );

        self.answer_text.answer(question).await
    }
}
