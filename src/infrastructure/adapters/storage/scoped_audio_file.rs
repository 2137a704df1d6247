//! Scoped Audio File - 请求级临时音频文件
//!
//! 创建于配置的临时目录，Drop 时删除（包括错误与 panic 路径）

use std::io;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::fs;

use crate::domain::AudioClip;

/// 临时音频文件，生命周期与持有者绑定
pub struct ScopedAudioFile {
    file: NamedTempFile,
}

impl ScopedAudioFile {
    /// 在 `dir` 下写入音频片段，文件后缀沿用片段格式
    pub async fn create(dir: impl AsRef<Path>, clip: &AudioClip) -> io::Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).await?;

        // tempfile 的创建是阻塞调用
        let suffix = format!(".{}", clip.format().extension());
        let target = dir.to_path_buf();
        let file = tokio::task::spawn_blocking(move || {
            tempfile::Builder::new()
                .prefix("armger-upload-")
                .suffix(&suffix)
                .tempfile_in(&target)
        })
        .await
        .map_err(io::Error::other)??;

        fs::write(file.path(), clip.data()).await?;

        tracing::debug!(
            path = %file.path().display(),
            size = clip.data().len(),
            "Wrote temporary audio file"
        );

        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub async fn read(&self) -> io::Result<Vec<u8>> {
        fs::read(self.path()).await
    }
}

impl Drop for ScopedAudioFile {
    fn drop(&mut self) {
        // NamedTempFile 自身负责删除，这里只记录
        tracing::debug!(path = %self.file.path().display(), "Removing temporary audio file");
    }
}

/// 临时目录：配置为空时使用系统默认
pub fn resolve_temp_dir(configured: &str) -> PathBuf {
    if configured.trim().is_empty() {
        std::env::temp_dir()
    } else {
        PathBuf::from(configured)
    }
}
