//! 应用层错误定义
//!
//! 统一的命令处理错误类型

use thiserror::Error;

use super::ports::UpstreamError;

/// 管线阶段（用于日志和错误定位）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Transcription,
    Completion,
    Synthesis,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Transcription => write!(f, "transcription"),
            Stage::Completion => write!(f, "completion"),
            Stage::Synthesis => write!(f, "synthesis"),
        }
    }
}

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 验证错误（调用方输入不满足前置条件）
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 外部服务错误
    #[error("{stage} failed: {source}")]
    UpstreamError {
        stage: Stage,
        #[source]
        source: UpstreamError,
    },
}

impl ApplicationError {
    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建外部服务错误
    pub fn upstream(stage: Stage, source: UpstreamError) -> Self {
        Self::UpstreamError { stage, source }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_))
    }
}
