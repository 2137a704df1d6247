//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

use crate::domain::{
    PromptBook, PromptError, VoiceError, VoiceTable, DEFAULT_PROMPT_EN, DEFAULT_PROMPT_KK,
    DEFAULT_PROMPT_RU,
};

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// OpenAI 配置（补全 / 转写 / 合成）
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Google Cloud TTS 配置
    #[serde(default)]
    pub google: GoogleConfig,

    /// 语音合成配置
    #[serde(default)]
    pub speech: SpeechConfig,

    /// 各语言的系统提示词
    #[serde(default)]
    pub prompts: PromptsConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

impl AppConfig {
    /// 当前合成服务对应的音色表
    pub fn voice_table(&self) -> Result<VoiceTable, VoiceError> {
        let voices = match self.speech.provider {
            SpeechProvider::OpenAi => &self.openai.voices,
            SpeechProvider::Google => &self.google.voices,
        };
        VoiceTable::from_names(&voices.ru, &voices.kk, &voices.en)
    }

    pub fn prompt_book(&self) -> Result<PromptBook, PromptError> {
        PromptBook::new(&self.prompts.ru, &self.prompts.kk, &self.prompts.en)
    }
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 请求体上限（字节），默认 25MB
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_max_upload_bytes() -> usize {
    25 * 1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 每种语言对应的音色名
#[derive(Debug, Clone, Deserialize)]
pub struct VoicesConfig {
    pub ru: String,
    pub kk: String,
    pub en: String,
}

impl VoicesConfig {
    fn uniform(voice: &str) -> Self {
        Self {
            ru: voice.to_string(),
            kk: voice.to_string(),
            en: voice.to_string(),
        }
    }
}

/// OpenAI 配置
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiConfig {
    /// API Key（未配置时回退到 OPENAI_API_KEY）
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_openai_base_url")]
    pub base_url: String,

    #[serde(default = "default_chat_model")]
    pub chat_model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_transcription_model")]
    pub transcription_model: String,

    #[serde(default = "default_tts_model")]
    pub tts_model: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_openai_timeout")]
    pub timeout_secs: u64,

    /// 可恢复错误的最大重试次数
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    #[serde(default = "default_openai_voices")]
    pub voices: VoicesConfig,
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_chat_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f32 {
    0.4
}

fn default_max_tokens() -> u32 {
    300
}

fn default_transcription_model() -> String {
    "whisper-1".to_string()
}

fn default_tts_model() -> String {
    "tts-1".to_string()
}

fn default_openai_timeout() -> u64 {
    60
}

fn default_max_retries() -> u32 {
    1
}

fn default_openai_voices() -> VoicesConfig {
    VoicesConfig::uniform("nova")
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_openai_base_url(),
            chat_model: default_chat_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            transcription_model: default_transcription_model(),
            tts_model: default_tts_model(),
            timeout_secs: default_openai_timeout(),
            max_retries: default_max_retries(),
            voices: default_openai_voices(),
        }
    }
}

/// Google Cloud TTS 配置
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleConfig {
    /// 服务账号 JSON 内容（未配置时回退到 GOOGLE_APPLICATION_CREDENTIALS_JSON）
    #[serde(default)]
    pub credentials_json: Option<String>,

    /// 服务账号 JSON 文件路径（未配置时回退到 GOOGLE_APPLICATION_CREDENTIALS）
    #[serde(default)]
    pub credentials_path: Option<String>,

    #[serde(default = "default_google_base_url")]
    pub base_url: String,

    #[serde(default = "default_google_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Google 没有哈萨克语音色，kk 默认使用俄语音色
    #[serde(default = "default_google_voices")]
    pub voices: VoicesConfig,
}

fn default_google_base_url() -> String {
    "https://texttospeech.googleapis.com/v1".to_string()
}

fn default_google_timeout() -> u64 {
    30
}

fn default_google_voices() -> VoicesConfig {
    VoicesConfig {
        ru: "ru-RU-Standard-A".to_string(),
        kk: "ru-RU-Standard-A".to_string(),
        en: "en-US-Standard-C".to_string(),
    }
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            credentials_json: None,
            credentials_path: None,
            base_url: default_google_base_url(),
            timeout_secs: default_google_timeout(),
            max_retries: default_max_retries(),
            voices: default_google_voices(),
        }
    }
}

impl GoogleConfig {
    /// 是否配置了任一凭据来源
    pub fn has_credentials(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        present(&self.credentials_json) || present(&self.credentials_path)
    }
}

/// 合成服务提供方
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeechProvider {
    #[default]
    OpenAi,
    Google,
}

impl SpeechProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpeechProvider::OpenAi => "openai",
            SpeechProvider::Google => "google",
        }
    }
}

/// 语音合成配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpeechConfig {
    /// openai | google
    #[serde(default)]
    pub provider: SpeechProvider,

    /// 上传音频的临时目录，空表示系统临时目录
    #[serde(default)]
    pub temp_dir: String,
}

/// 系统提示词
#[derive(Debug, Clone, Deserialize)]
pub struct PromptsConfig {
    #[serde(default = "default_prompt_ru")]
    pub ru: String,

    #[serde(default = "default_prompt_kk")]
    pub kk: String,

    #[serde(default = "default_prompt_en")]
    pub en: String,
}

fn default_prompt_ru() -> String {
    DEFAULT_PROMPT_RU.to_string()
}

fn default_prompt_kk() -> String {
    DEFAULT_PROMPT_KK.to_string()
}

fn default_prompt_en() -> String {
    DEFAULT_PROMPT_EN.to_string()
}

impl Default for PromptsConfig {
    fn default() -> Self {
        Self {
            ru: default_prompt_ru(),
            kk: default_prompt_kk(),
            en: default_prompt_en(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别（RUST_LOG 优先）
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
