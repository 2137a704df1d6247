//! Speak Handler - 任意文本合成

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;

use crate::application::Speak;
use crate::infrastructure::http::dto::{SpeakRequest, SpeakResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// POST /speak
pub async fn speak(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SpeakRequest>, JsonRejection>,
) -> Result<Json<SpeakResponse>, ApiError> {
    let Json(req) = payload?;

    let output = state
        .speak_handler
        .handle(Speak {
            text: req.text,
            language_code: req.language_code,
            voice_name: req.voice_name,
        })
        .await?;

    tracing::debug!(voice = %output.voice, "Speak request served");

    Ok(Json(output.into()))
}
