//! Audio Value Objects - 上传录音与合成音频

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

/// 音频格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    Wav,
    Mp3,
    Ogg,
    Webm,
    M4a,
    Flac,
}

impl AudioFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "wav" => Some(Self::Wav),
            "mp3" | "mpeg" | "mpga" => Some(Self::Mp3),
            "ogg" | "oga" | "opus" => Some(Self::Ogg),
            "webm" => Some(Self::Webm),
            "m4a" | "mp4" => Some(Self::M4a),
            "flac" => Some(Self::Flac),
            _ => None,
        }
    }

    /// 从 MIME 类型推断，忽略 `;codecs=...` 等参数
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        match essence.to_lowercase().as_str() {
            "audio/wav" | "audio/x-wav" | "audio/wave" => Some(Self::Wav),
            "audio/mpeg" | "audio/mp3" => Some(Self::Mp3),
            "audio/ogg" | "audio/opus" => Some(Self::Ogg),
            "audio/webm" | "video/webm" => Some(Self::Webm),
            "audio/mp4" | "audio/x-m4a" | "audio/m4a" => Some(Self::M4a),
            "audio/flac" | "audio/x-flac" => Some(Self::Flac),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::Mp3 => "mp3",
            Self::Ogg => "ogg",
            Self::Webm => "webm",
            Self::M4a => "m4a",
            Self::Flac => "flac",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Wav => "audio/wav",
            Self::Mp3 => "audio/mpeg",
            Self::Ogg => "audio/ogg",
            Self::Webm => "audio/webm",
            Self::M4a => "audio/mp4",
            Self::Flac => "audio/flac",
        }
    }
}

/// 浏览器录音默认为 webm
const DEFAULT_CLIP_FORMAT: AudioFormat = AudioFormat::Webm;

/// 用户上传的录音
///
/// 仅作为转写输入，转写后即丢弃
#[derive(Debug, Clone)]
pub struct AudioClip {
    data: Vec<u8>,
    file_name: Option<String>,
    content_type: Option<String>,
}

impl AudioClip {
    pub fn new(data: Vec<u8>) -> Result<Self, &'static str> {
        if data.is_empty() {
            return Err("Audio file is empty");
        }
        Ok(Self {
            data,
            file_name: None,
            content_type: None,
        })
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// 容器格式：文件扩展名优先，其次 MIME，最后默认 webm
    pub fn format(&self) -> AudioFormat {
        self.file_name
            .as_deref()
            .and_then(|name| name.rsplit_once('.'))
            .and_then(|(_, ext)| AudioFormat::from_extension(ext))
            .or_else(|| self.content_type.as_deref().and_then(AudioFormat::from_mime))
            .unwrap_or(DEFAULT_CLIP_FORMAT)
    }

    /// 上传给转写服务时使用的文件名
    pub fn upload_name(&self) -> String {
        format!("audio.{}", self.format().extension())
    }
}

/// 合成结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioResult {
    data: Vec<u8>,
    format: AudioFormat,
}

impl AudioResult {
    pub fn new(data: Vec<u8>, format: AudioFormat) -> Self {
        Self { data, format }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn format(&self) -> AudioFormat {
        self.format
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// 标准 base64 编码，用于 JSON 传输
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.data)
    }
}
