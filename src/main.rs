//! ARMGER Voice - 问答语音助手后端
//!
//! 启动流程：加载配置 → 初始化日志 → 构建服务商客户端 → 启动 HTTP 服务

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use armger_voice::application::{CompletionPort, TranscriptionPort, TtsEnginePort};
use armger_voice::config::{load_config, print_config, AppConfig, SpeechProvider};
use armger_voice::infrastructure::adapters::{
    resolve_temp_dir, ChatOptions, GoogleTtsClient, GoogleTtsClientConfig, OpenAiChatClient,
    OpenAiClientConfig, OpenAiTtsClient, OpenAiWhisperClient, RetryPolicy,
    ServiceAccountCredentials, ServiceAccountTokenProvider,
};
use armger_voice::infrastructure::http::{AppState, HttpServer, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().context("Failed to load config")?;

    init_tracing(&config);

    tracing::info!("ARMGER Voice backend v{}", env!("CARGO_PKG_VERSION"));
    print_config(&config);

    let prompts = config.prompt_book().context("Invalid prompts")?;
    let voices = config.voice_table().context("Invalid voice table")?;

    // OpenAI：补全与转写
    let openai = OpenAiClientConfig::new(&config.openai.api_key)
        .with_base_url(&config.openai.base_url)
        .with_timeout(config.openai.timeout_secs)
        .with_retry(RetryPolicy::new(config.openai.max_retries));

    let completion: Arc<dyn CompletionPort> = Arc::new(OpenAiChatClient::new(
        openai.clone(),
        ChatOptions {
            model: config.openai.chat_model.clone(),
            temperature: config.openai.temperature,
            max_tokens: config.openai.max_tokens,
        },
    )?);

    let transcriber: Arc<dyn TranscriptionPort> = Arc::new(OpenAiWhisperClient::new(
        openai.clone(),
        &config.openai.transcription_model,
        resolve_temp_dir(&config.speech.temp_dir),
    )?);

    let tts_engine = build_tts_engine(&config, openai)?;
    tracing::info!(provider = tts_engine.provider(), "Speech synthesis ready");

    let server_config = ServerConfig::new(
        &config.server.host,
        config.server.port,
        config.server.max_upload_bytes,
    );
    let state = AppState::new(completion, transcriber, tts_engine, prompts, voices);
    let server = HttpServer::new(server_config, state);

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

/// 初始化日志（RUST_LOG 优先于 log.level）
fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},armger_voice={},tower_http=debug",
        config.log.level, config.log.level
    );
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// 按 speech.provider 构建合成客户端
fn build_tts_engine(
    config: &AppConfig,
    openai: OpenAiClientConfig,
) -> anyhow::Result<Arc<dyn TtsEnginePort>> {
    match config.speech.provider {
        SpeechProvider::OpenAi => Ok(Arc::new(OpenAiTtsClient::new(openai, &config.openai.tts_model)?)),
        SpeechProvider::Google => {
            let google = &config.google;
            let credentials = match (google.credentials_json.as_deref(), google.credentials_path.as_deref()) {
                (Some(json), _) if !json.trim().is_empty() => ServiceAccountCredentials::from_json(json)?,
                (_, Some(path)) => ServiceAccountCredentials::from_file(path)?,
                _ => anyhow::bail!("Google credentials are not configured"),
            };

            let tokens = ServiceAccountTokenProvider::new(credentials, google.timeout_secs)
                .context("Failed to initialise Google service account")?;

            let client = GoogleTtsClient::new(
                GoogleTtsClientConfig {
                    base_url: google.base_url.clone(),
                    timeout_secs: google.timeout_secs,
                    retry: RetryPolicy::new(google.max_retries),
                },
                Arc::new(tokens),
            )?;
            Ok(Arc::new(client))
        }
    }
}
