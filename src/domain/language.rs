//! Language Detection - 基于字符集的语言判定
//!
//! 按优先级依次检测：
//! 1. 哈萨克语特有西里尔字母 → `kk`
//! 2. 任意拉丁字母 → `en`
//! 3. 其余（含空文本）→ `ru`

use serde::{Deserialize, Serialize};

/// 哈萨克语特有字母（小写）
const KAZAKH_LETTERS: &[char] = &['ә', 'ғ', 'қ', 'ң', 'ө', 'ұ', 'ү', 'һ', 'і'];

/// 语言标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LanguageTag {
    /// 兜底语言
    #[default]
    Ru,
    Kk,
    En,
}

impl LanguageTag {
    /// 所有语言标签
    pub const ALL: [LanguageTag; 3] = [LanguageTag::Ru, LanguageTag::Kk, LanguageTag::En];

    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageTag::Ru => "ru",
            LanguageTag::Kk => "kk",
            LanguageTag::En => "en",
        }
    }
}

impl std::fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 判定文本语言
///
/// 混合脚本的文本按检测顺序归类，先命中者优先。
pub fn detect(text: &str) -> LanguageTag {
    let folded = text.to_lowercase();

    if folded.chars().any(|c| KAZAKH_LETTERS.contains(&c)) {
        return LanguageTag::Kk;
    }

    if folded.chars().any(|c| c.is_ascii_alphabetic()) {
        return LanguageTag::En;
    }

    LanguageTag::default()
}
