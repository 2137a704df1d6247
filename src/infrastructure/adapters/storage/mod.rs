//! Storage Adapter - 临时文件

mod scoped_audio_file;

pub use scoped_audio_file::{resolve_temp_dir, ScopedAudioFile};
