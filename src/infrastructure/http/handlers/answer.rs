//! Answer Handlers - 文字提问 / 语音提问

use axum::{
    extract::{rejection::JsonRejection, Multipart, State},
    Json,
};
use std::sync::Arc;

use crate::application::{AskByVoice, AskQuestion};
use crate::domain::AudioClip;
use crate::infrastructure::http::dto::{AnswerResponse, AskRequest};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// multipart 中音频字段名
const AUDIO_FIELD: &str = "file";

/// POST /ask
pub async fn ask(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<AnswerResponse>, ApiError> {
    let Json(req) = payload?;

    let answer = state
        .answer_text_handler
        .handle(AskQuestion {
            question: req.question,
        })
        .await?;

    Ok(Json(answer.into()))
}

/// POST /voice
pub async fn voice(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<AnswerResponse>, ApiError> {
    let clip = read_audio_clip(&mut multipart).await?;

    let answer = state
        .answer_voice_handler
        .handle(AskByVoice { clip })
        .await?;

    Ok(Json(answer.into()))
}

/// 读取 `file` 字段，其余字段忽略
async fn read_audio_clip(multipart: &mut Multipart) -> Result<AudioClip, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(AUDIO_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await?;

        tracing::debug!(
            file_name = file_name.as_deref().unwrap_or("-"),
            content_type = content_type.as_deref().unwrap_or("-"),
            size = data.len(),
            "Received audio upload"
        );

        let mut clip = AudioClip::new(data.to_vec()).map_err(|e| ApiError::BadRequest(e.to_string()))?;
        if let Some(name) = file_name {
            clip = clip.with_file_name(name);
        }
        if let Some(mime) = content_type {
            clip = clip.with_content_type(mime);
        }
        return Ok(clip);
    }

    Err(ApiError::BadRequest(format!(
        "Missing audio file field '{}'",
        AUDIO_FIELD
    )))
}
