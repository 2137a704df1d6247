//! Fake Completion Client - 用于测试的补全客户端

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::application::ports::{CompletionPort, UpstreamError};
use crate::domain::{Answer, Question};

/// 固定回复；None 模拟超时
pub struct FakeCompletionClient {
    reply: Option<String>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl FakeCompletionClient {
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn timing_out() -> Self {
        Self {
            reply: None,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// 最近一次调用使用的系统提示词
    pub fn last_prompt(&self) -> Option<String> {
        self.prompts
            .lock()
            .ok()
            .and_then(|prompts| prompts.last().cloned())
    }
}

#[async_trait]
impl CompletionPort for FakeCompletionClient {
    async fn complete(
        &self,
        question: &Question,
        system_prompt: &str,
    ) -> Result<Answer, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(system_prompt.to_string());
        }

        tracing::debug!(question_len = question.as_str().len(), "FakeCompletionClient called");

        match &self.reply {
            Some(reply) => Answer::new(reply)
                .ok_or_else(|| UpstreamError::EmptyResponse("completion has no content".to_string())),
            None => Err(UpstreamError::Timeout),
        }
    }
}
