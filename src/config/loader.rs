//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量（`ARMGER_` 前缀）
//! 2. 配置文件（config.toml / config.local.toml）
//! 3. 服务商通用环境变量（OPENAI_API_KEY 等）
//! 4. 默认值

use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::{AppConfig, SpeechProvider};
use crate::domain::{DEFAULT_PROMPT_EN, DEFAULT_PROMPT_KK, DEFAULT_PROMPT_RU};

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 服务商约定的环境变量 → 配置键
const PROVIDER_ENV_FALLBACKS: &[(&str, &str)] = &[
    ("OPENAI_API_KEY", "openai.api_key"),
    ("GOOGLE_APPLICATION_CREDENTIALS_JSON", "google.credentials_json"),
    ("GOOGLE_APPLICATION_CREDENTIALS", "google.credentials_path"),
];

/// 加载应用配置
///
/// # 环境变量示例
/// - `ARMGER_SERVER__PORT=8080`
/// - `ARMGER_SPEECH__PROVIDER=google`
/// - `ARMGER_OPENAI__CHAT_MODEL=gpt-4o`
/// - `ARMGER_GOOGLE__VOICES__EN=en-US-Wavenet-F`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    // 1. 默认值
    let mut builder = with_defaults(Config::builder())?;

    // 2. 服务商通用环境变量，仅作为默认值
    for (var, key) in PROVIDER_ENV_FALLBACKS {
        if let Ok(value) = std::env::var(var) {
            if !value.trim().is_empty() {
                builder = builder.set_default(*key, value)?;
            }
        }
    }

    // 3. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 4. 环境变量（最高优先级）
    // 例如: ARMGER_OPENAI__API_KEY=sk-...
    builder = builder.add_source(
        Environment::with_prefix("ARMGER")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

fn with_defaults(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigCrateError> {
    builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8000)?
        .set_default("server.max_upload_bytes", 25 * 1024 * 1024)?
        .set_default("openai.api_key", "")?
        .set_default("openai.base_url", "https://api.openai.com/v1")?
        .set_default("openai.chat_model", "gpt-4o-mini")?
        .set_default("openai.temperature", 0.4)?
        .set_default("openai.max_tokens", 300)?
        .set_default("openai.transcription_model", "whisper-1")?
        .set_default("openai.tts_model", "tts-1")?
        .set_default("openai.timeout_secs", 60)?
        .set_default("openai.max_retries", 1)?
        .set_default("openai.voices.ru", "nova")?
        .set_default("openai.voices.kk", "nova")?
        .set_default("openai.voices.en", "nova")?
        .set_default("google.base_url", "https://texttospeech.googleapis.com/v1")?
        .set_default("google.timeout_secs", 30)?
        .set_default("google.max_retries", 1)?
        .set_default("google.voices.ru", "ru-RU-Standard-A")?
        .set_default("google.voices.kk", "ru-RU-Standard-A")?
        .set_default("google.voices.en", "en-US-Standard-C")?
        .set_default("speech.provider", "openai")?
        .set_default("speech.temp_dir", "")?
        .set_default("prompts.ru", DEFAULT_PROMPT_RU)?
        .set_default("prompts.kk", DEFAULT_PROMPT_KK)?
        .set_default("prompts.en", DEFAULT_PROMPT_EN)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.server.max_upload_bytes == 0 {
        return Err(ConfigError::ValidationError(
            "server.max_upload_bytes cannot be 0".to_string(),
        ));
    }

    // 补全与转写始终走 OpenAI
    if config.openai.api_key.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "OpenAI API key is missing (set openai.api_key or OPENAI_API_KEY)".to_string(),
        ));
    }

    if !(0.0..=2.0).contains(&config.openai.temperature) {
        return Err(ConfigError::ValidationError(format!(
            "openai.temperature must be within 0.0..=2.0, got {}",
            config.openai.temperature
        )));
    }

    if config.openai.timeout_secs == 0 || config.google.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Upstream timeout cannot be 0".to_string(),
        ));
    }

    if config.speech.provider == SpeechProvider::Google && !config.google.has_credentials() {
        return Err(ConfigError::ValidationError(
            "Google credentials are missing (set google.credentials_json, google.credentials_path \
             or GOOGLE_APPLICATION_CREDENTIALS)"
                .to_string(),
        ));
    }

    config
        .voice_table()
        .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

    config
        .prompt_book()
        .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

    Ok(())
}

/// 打印配置信息（用于启动时日志，不含密钥）
pub fn print_config(config: &AppConfig) {
    let voices = match config.speech.provider {
        SpeechProvider::OpenAi => &config.openai.voices,
        SpeechProvider::Google => &config.google.voices,
    };

    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!("Max Upload: {} bytes", config.server.max_upload_bytes);
    tracing::info!("OpenAI Base URL: {}", config.openai.base_url);
    tracing::info!(
        "Chat Model: {} (temperature={}, max_tokens={})",
        config.openai.chat_model,
        config.openai.temperature,
        config.openai.max_tokens
    );
    tracing::info!("Transcription Model: {}", config.openai.transcription_model);
    tracing::info!("Speech Provider: {}", config.speech.provider.as_str());
    if config.speech.provider == SpeechProvider::OpenAi {
        tracing::info!("TTS Model: {}", config.openai.tts_model);
    } else {
        tracing::info!("Google TTS URL: {}", config.google.base_url);
    }
    tracing::info!("Voices: ru={} kk={} en={}", voices.ru, voices.kk, voices.en);
    tracing::info!(
        "Temp Directory: {}",
        if config.speech.temp_dir.is_empty() {
            "<system>"
        } else {
            config.speech.temp_dir.as_str()
        }
    );
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn valid_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.openai.api_key = "sk-test".to_string();
        config
    }

    fn config_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_validation_passes_for_valid_config() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_missing_openai_key_is_fatal() {
        let config = AppConfig::default();
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = valid_config();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_google_provider_requires_credentials() {
        let mut config = valid_config();
        config.speech.provider = SpeechProvider::Google;
        assert!(validate_config(&config).is_err());

        config.google.credentials_path = Some("/etc/armger/sa.json".to_string());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_blank_voice_rejected() {
        let mut config = valid_config();
        config.openai.voices.kk = "  ".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_blank_prompt_rejected() {
        let mut config = valid_config();
        config.prompts.en = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_temperature_out_of_range_rejected() {
        let mut config = valid_config();
        config.openai.temperature = 3.5;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_load_from_file_merges_with_defaults() {
        let file = config_file(
            r#"
[server]
port = 9100

[openai]
api_key = "sk-from-file"
chat_model = "gpt-4o"

[openai.voices]
ru = "alloy"
kk = "alloy"
en = "shimmer"
"#,
        );

        let config = load_config_from_path(Some(file.path())).unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.openai.api_key, "sk-from-file");
        assert_eq!(config.openai.chat_model, "gpt-4o");
        assert_eq!(config.openai.transcription_model, "whisper-1");
        assert_eq!(config.openai.voices.en, "shimmer");
        assert_eq!(config.prompts.ru, DEFAULT_PROMPT_RU);
    }

    #[test]
    fn test_load_rejects_unknown_provider() {
        let file = config_file(
            r#"
[openai]
api_key = "sk-from-file"

[speech]
provider = "azure"
"#,
        );

        let err = load_config_from_path(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }
}
