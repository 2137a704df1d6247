//! Voice Context - Errors

use thiserror::Error;

use crate::domain::LanguageTag;

#[derive(Debug, Error)]
pub enum VoiceError {
    #[error("Voice id cannot be empty")]
    EmptyVoiceId,

    #[error("No voice configured for language: {0}")]
    MissingVoice(LanguageTag),
}
