//! OpenAI Whisper Client - 语音转写
//!
//! 实现 TranscriptionPort trait
//!
//! POST {base_url}/audio/transcriptions (multipart: file + model)
//! Response: {"text": "..."}

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use std::path::PathBuf;

use crate::application::ports::{TranscriptionPort, UpstreamError};
use crate::domain::AudioClip;
use crate::infrastructure::adapters::openai::OpenAiClientConfig;
use crate::infrastructure::adapters::response::error_from_response;
use crate::infrastructure::adapters::storage::ScopedAudioFile;

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    #[serde(default)]
    text: String,
}

/// OpenAI Whisper 客户端
pub struct OpenAiWhisperClient {
    client: Client,
    config: OpenAiClientConfig,
    model: String,
    temp_dir: PathBuf,
}

impl OpenAiWhisperClient {
    pub fn new(
        config: OpenAiClientConfig,
        model: impl Into<String>,
        temp_dir: impl Into<PathBuf>,
    ) -> Result<Self, UpstreamError> {
        let client = config.build_client()?;
        Ok(Self {
            client,
            config,
            model: model.into(),
            temp_dir: temp_dir.into(),
        })
    }

    async fn send(&self, file: &ScopedAudioFile, clip: &AudioClip) -> Result<String, UpstreamError> {
        let data = file.read().await.map_err(|e| UpstreamError::IoError(e.to_string()))?;

        let part = Part::bytes(data)
            .file_name(clip.upload_name())
            .mime_str(clip.format().mime_type())
            .map_err(|e| UpstreamError::InvalidResponse(format!("Invalid audio mime type: {}", e)))?;

        let form = Form::new()
            .part("file", part)
            .text("model", self.model.clone());

        let response = self
            .client
            .post(self.config.url("audio/transcriptions"))
            .header("Authorization", self.config.bearer())
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let body: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::InvalidResponse(format!("Failed to parse transcription: {}", e)))?;

        Ok(body.text.trim().to_string())
    }
}

#[async_trait]
impl TranscriptionPort for OpenAiWhisperClient {
    async fn transcribe(&self, clip: &AudioClip) -> Result<String, UpstreamError> {
        let file = ScopedAudioFile::create(&self.temp_dir, clip)
            .await
            .map_err(|e| UpstreamError::IoError(format!("Failed to write temporary audio: {}", e)))?;

        tracing::debug!(
            model = %self.model,
            format = clip.format().extension(),
            size = clip.data().len(),
            "Sending transcription request"
        );

        let transcript = self
            .config
            .retry
            .run("whisper_transcription", || self.send(&file, clip))
            .await?;

        tracing::info!(transcript_len = transcript.len(), "Transcription finished");

        Ok(transcript)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::retry::RetryPolicy;
    use tempfile::tempdir;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer, temp_dir: &std::path::Path) -> OpenAiWhisperClient {
        let config = OpenAiClientConfig::new("sk-test")
            .with_base_url(server.uri())
            .with_retry(RetryPolicy::none());
        OpenAiWhisperClient::new(config, "whisper-1", temp_dir).unwrap()
    }

    fn clip() -> AudioClip {
        AudioClip::new(b"fake-webm-audio".to_vec())
            .unwrap()
            .with_content_type("audio/webm")
    }

    fn file_count(dir: &std::path::Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[tokio::test]
    async fn test_transcribe_uploads_file_and_trims_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/audio/transcriptions"))
            .and(body_string_contains("whisper-1"))
            .and(body_string_contains("filename=\"audio.webm\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "text": "  Что делает ARMGER IT?  "
            })))
            .expect(1)
            .mount(&server)
            .await;

        let temp_dir = tempdir().unwrap();
        let transcript = client(&server, temp_dir.path())
            .transcribe(&clip())
            .await
            .unwrap();

        assert_eq!(transcript, "Что делает ARMGER IT?");
        assert_eq!(file_count(temp_dir.path()), 0);
    }

    #[tokio::test]
    async fn test_temp_file_removed_on_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/audio/transcriptions"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": {"message": "Invalid file format."}
            })))
            .mount(&server)
            .await;

        let temp_dir = tempdir().unwrap();
        let err = client(&server, temp_dir.path())
            .transcribe(&clip())
            .await
            .unwrap_err();

        assert!(matches!(err, UpstreamError::ServiceError { status: 400, .. }));
        assert_eq!(file_count(temp_dir.path()), 0);
    }

    #[tokio::test]
    async fn test_silent_audio_yields_empty_transcript() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/audio/transcriptions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"text": " "})))
            .mount(&server)
            .await;

        let temp_dir = tempdir().unwrap();
        let transcript = client(&server, temp_dir.path())
            .transcribe(&clip())
            .await
            .unwrap();
        assert!(transcript.is_empty());
    }
}
