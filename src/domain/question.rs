//! Question / Answer - 问答值对象

use serde::{Deserialize, Serialize};

/// 用户问题
///
/// 不变量:
/// - 去除首尾空白后非空
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question(String);

impl Question {
    pub fn new(text: impl AsRef<str>) -> Result<Self, &'static str> {
        let text = text.as_ref().trim();
        if text.is_empty() {
            return Err("Question cannot be empty");
        }
        Ok(Self(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 生成的回答
///
/// 不变量:
/// - 去除首尾空白后非空
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer(String);

impl Answer {
    /// 空回答返回 None，由调用方决定如何报错
    pub fn new(text: impl AsRef<str>) -> Option<Self> {
        let text = text.as_ref().trim();
        (!text.is_empty()).then(|| Self(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_rejects_blank() {
        assert!(Question::new("").is_err());
        assert!(Question::new("   \n\t").is_err());
    }

    #[test]
    fn test_question_is_trimmed() {
        let q = Question::new("  Привет  ").unwrap();
        assert_eq!(q.as_str(), "Привет");
    }

    #[test]
    fn test_answer_rejects_blank() {
        assert!(Answer::new(" ").is_none());
        assert_eq!(Answer::new(" ok ").unwrap().as_str(), "ok");
    }
}
