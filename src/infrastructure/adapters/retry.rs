//! Retry - 外部调用的有限重试（指数退避）
//!
//! 仅对可恢复错误重试：超时、网络错误、429、5xx

use std::future::Future;
use std::time::Duration;

use crate::application::ports::UpstreamError;

/// 重试策略
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// 最大重试次数（0 表示不重试）
    pub max_retries: u32,
    /// 初始退避时间（每次翻倍）
    pub base_delay: Duration,
    /// 退避上限
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 1,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Default::default()
        }
    }

    /// 不重试
    pub fn none() -> Self {
        Self::new(0)
    }

    /// 第 attempt 次重试前的等待时间：`min(base * 2^attempt, max)`
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(attempt))
            .min(self.max_delay)
    }

    /// 执行操作，可恢复错误按策略重试
    pub async fn run<T, F, Fut>(&self, operation: &'static str, mut f: F) -> Result<T, UpstreamError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, UpstreamError>>,
    {
        let mut attempt = 0;
        loop {
            match f().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_recoverable() && attempt < self.max_retries => {
                    let delay = self.delay_for_attempt(attempt);
                    tracing::warn!(
                        operation,
                        attempt = attempt + 1,
                        max_retries = self.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Upstream call failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
