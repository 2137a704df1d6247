//! Prompt Book - 按语言区分的系统提示词
//!
//! 每个 LanguageTag 必须对应一条非空提示词，启动时校验。

use thiserror::Error;

use super::LanguageTag;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("No system prompt configured for language: {0}")]
    MissingPrompt(LanguageTag),
}

pub const DEFAULT_PROMPT_RU: &str = "Ты — голосовой AI-ассистент компании ARMGER IT. \
ARMGER IT разрабатывает сайты, интернет-магазины, чат-ботов и AI-ассистентов для бизнеса. \
Отвечай кратко, дружелюбно и по делу, в 1-3 предложениях. \
Отвечай строго на том же языке, на котором задан вопрос, и никогда не смешивай языки. \
Не придумывай факты, цены и сроки, которых нет в этой инструкции. \
Если вопрос не относится к ARMGER IT и её услугам, вежливо верни разговор к услугам компании.";

pub const DEFAULT_PROMPT_KK: &str = "Сен ARMGER IT компаниясының дауыстық AI-көмекшісісің. \
ARMGER IT бизнеске арналған сайттар, интернет-дүкендер, чат-боттар және AI-көмекшілер жасайды. \
Қысқа, достық пейілмен және нақты жауап бер, 1-3 сөйлеммен. \
Сұрақ қандай тілде қойылса, тек сол тілде жауап бер және тілдерді ешқашан араластырма. \
Осы нұсқаулықта жоқ фактілерді, бағаларды және мерзімдерді ойдан шығарма. \
Егер сұрақ ARMGER IT пен оның қызметтеріне қатысты болмаса, әңгімені сыпайы түрде компания қызметтеріне бұр.";

pub const DEFAULT_PROMPT_EN: &str = "You are the voice AI assistant of ARMGER IT. \
ARMGER IT builds websites, online stores, chatbots and AI assistants for businesses. \
Answer briefly, warmly and to the point, in 1-3 sentences. \
Always respond in the same language as the question and never mix languages. \
Never invent facts, prices or deadlines that are not stated in these instructions. \
If the question is unrelated to ARMGER IT and its services, politely steer the conversation back to the company's services.";

/// 系统提示词表
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptBook {
    ru: String,
    kk: String,
    en: String,
}

impl PromptBook {
    pub fn new(
        ru: impl Into<String>,
        kk: impl Into<String>,
        en: impl Into<String>,
    ) -> Result<Self, PromptError> {
        let check = |tag: LanguageTag, prompt: String| {
            if prompt.trim().is_empty() {
                Err(PromptError::MissingPrompt(tag))
            } else {
                Ok(prompt)
            }
        };

        Ok(Self {
            ru: check(LanguageTag::Ru, ru.into())?,
            kk: check(LanguageTag::Kk, kk.into())?,
            en: check(LanguageTag::En, en.into())?,
        })
    }

    pub fn get(&self, tag: LanguageTag) -> &str {
        match tag {
            LanguageTag::Ru => &self.ru,
            LanguageTag::Kk => &self.kk,
            LanguageTag::En => &self.en,
        }
    }
}

impl Default for PromptBook {
    fn default() -> Self {
        Self {
            ru: DEFAULT_PROMPT_RU.to_string(),
            kk: DEFAULT_PROMPT_KK.to_string(),
            en: DEFAULT_PROMPT_EN.to_string(),
        }
    }
}
