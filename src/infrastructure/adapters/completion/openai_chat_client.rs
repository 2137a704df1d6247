//! OpenAI Chat Client - 调用 Chat Completions 接口
//!
//! 实现 CompletionPort trait
//!
//! POST {base_url}/chat/completions
//! Request: {"model": "...", "messages": [{"role": "system", ...}, {"role": "user", ...}]}
//! Response: {"choices": [{"message": {"content": "..."}}]}

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{CompletionPort, UpstreamError};
use crate::domain::{Answer, Question};
use crate::infrastructure::adapters::openai::OpenAiClientConfig;
use crate::infrastructure::adapters::response::error_from_response;

/// 补全参数
#[derive(Debug, Clone)]
pub struct ChatOptions {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.4,
            max_tokens: 300,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// OpenAI Chat 客户端
pub struct OpenAiChatClient {
    client: Client,
    config: OpenAiClientConfig,
    options: ChatOptions,
}

impl OpenAiChatClient {
    pub fn new(config: OpenAiClientConfig, options: ChatOptions) -> Result<Self, UpstreamError> {
        let client = config.build_client()?;
        Ok(Self {
            client,
            config,
            options,
        })
    }

    async fn send(&self, question: &Question, system_prompt: &str) -> Result<Answer, UpstreamError> {
        let request = ChatRequest {
            model: &self.options.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: question.as_str(),
                },
            ],
            temperature: self.options.temperature,
            max_tokens: self.options.max_tokens,
        };

        let response = self
            .client
            .post(self.config.url("chat/completions"))
            .header("Authorization", self.config.bearer())
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::InvalidResponse(format!("Failed to parse completion: {}", e)))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .and_then(Answer::new)
            .ok_or_else(|| UpstreamError::EmptyResponse("completion has no content".to_string()))
    }
}

#[async_trait]
impl CompletionPort for OpenAiChatClient {
    async fn complete(
        &self,
        question: &Question,
        system_prompt: &str,
    ) -> Result<Answer, UpstreamError> {
        tracing::debug!(
            model = %self.options.model,
            question_len = question.as_str().len(),
            "Sending chat completion request"
        );

        let answer = self
            .config
            .retry
            .run("chat_completion", || self.send(question, system_prompt))
            .await?;

        tracing::info!(
            model = %self.options.model,
            answer_len = answer.as_str().len(),
            "Chat completion finished"
        );

        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::retry::RetryPolicy;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> OpenAiChatClient {
        let config = OpenAiClientConfig::new("sk-test")
            .with_base_url(server.uri())
            .with_retry(RetryPolicy::none());
        OpenAiChatClient::new(config, ChatOptions::default()).unwrap()
    }

    #[tokio::test]
    async fn test_complete_returns_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", "Bearer sk-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": "  Мы делаем сайты.  "}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let question = Question::new("Что вы делаете?").unwrap();
        let answer = client(&server).complete(&question, "prompt").await.unwrap();
        assert_eq!(answer.as_str(), "Мы делаем сайты.");
    }

    #[tokio::test]
    async fn test_empty_content_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": null}}]
            })))
            .mount(&server)
            .await;

        let question = Question::new("Hello").unwrap();
        let err = client(&server).complete(&question, "prompt").await.unwrap_err();
        assert!(matches!(err, UpstreamError::EmptyResponse(_)));
    }

    #[tokio::test]
    async fn test_api_error_message_extracted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}
            })))
            .mount(&server)
            .await;

        let question = Question::new("Hello").unwrap();
        let err = client(&server).complete(&question, "prompt").await.unwrap_err();
        match err {
            UpstreamError::AuthError(message) => assert_eq!(message, "Incorrect API key provided"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_server_error_is_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(503))
            .expect(2)
            .mount(&server)
            .await;

        let config = OpenAiClientConfig::new("sk-test")
            .with_base_url(server.uri())
            .with_retry(RetryPolicy {
                max_retries: 1,
                base_delay: std::time::Duration::from_millis(1),
                max_delay: std::time::Duration::from_millis(1),
            });
        let client = OpenAiChatClient::new(config, ChatOptions::default()).unwrap();

        let question = Question::new("Hello").unwrap();
        let err = client.complete(&question, "prompt").await.unwrap_err();
        assert!(matches!(err, UpstreamError::ServiceError { status: 503, .. }));
    }
}
