//! Completion Port - 大模型问答抽象

use async_trait::async_trait;

use super::UpstreamError;
use crate::domain::{Answer, Question};

/// Completion Port
///
/// 每次调用对应一次外部请求；内容为空视为失败
#[async_trait]
pub trait CompletionPort: Send + Sync {
    async fn complete(
        &self,
        question: &Question,
        system_prompt: &str,
    ) -> Result<Answer, UpstreamError>;
}
