//! Voice Context - Value Objects

use serde::{Deserialize, Serialize};

use super::VoiceError;
use crate::domain::LanguageTag;

/// 合成音色标识（由语音服务商定义，如 `nova`、`ru-RU-Standard-A`）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoiceId(String);

impl VoiceId {
    pub fn new(id: impl Into<String>) -> Result<Self, VoiceError> {
        let id = id.into().trim().to_string();
        if id.is_empty() {
            return Err(VoiceError::EmptyVoiceId);
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 从 Google 风格的音色名中提取语言代码
    ///
    /// `ru-RU-Standard-A` → `ru-RU`；不符合该格式时返回 None
    pub fn language_code(&self) -> Option<&str> {
        let mut parts = self.0.splitn(3, '-');
        let lang = parts.next()?;
        let region = parts.next()?;
        parts.next()?;

        let valid = lang.len() >= 2
            && lang.chars().all(|c| c.is_ascii_lowercase())
            && region.len() == 2
            && region.chars().all(|c| c.is_ascii_uppercase());
        valid.then(|| &self.0[..lang.len() + 1 + region.len()])
    }
}

impl std::fmt::Display for VoiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 语言 → 音色映射表
///
/// 不变量:
/// - 每个 LanguageTag 都有且只有一个音色（按字段构造，天然完备）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceTable {
    ru: VoiceId,
    kk: VoiceId,
    en: VoiceId,
}

impl VoiceTable {
    /// 从配置字符串构建，任一为空即失败
    pub fn from_names(ru: &str, kk: &str, en: &str) -> Result<Self, VoiceError> {
        let build = |tag: LanguageTag, name: &str| {
            VoiceId::new(name).map_err(|_| VoiceError::MissingVoice(tag))
        };

        Ok(Self {
            ru: build(LanguageTag::Ru, ru)?,
            kk: build(LanguageTag::Kk, kk)?,
            en: build(LanguageTag::En, en)?,
        })
    }

    /// 选择语言对应的音色
    pub fn select(&self, tag: LanguageTag) -> &VoiceId {
        match tag {
            LanguageTag::Ru => &self.ru,
            LanguageTag::Kk => &self.kk,
            LanguageTag::En => &self.en,
        }
    }

    /// 按语言代码（如 `ru-RU`）查找音色名前缀一致的音色
    pub fn find_by_language_code(&self, code: &str) -> Option<&VoiceId> {
        [&self.ru, &self.kk, &self.en].into_iter().find(|voice| {
            voice
                .language_code()
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(code))
        })
    }
}
