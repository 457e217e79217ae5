use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::conversion::chunker::DEFAULT_CHUNK_SIZE;
use crate::domain::conversion::OutputFormat;

/// Session defaults and worker tuning.
///
/// Nothing here is read from the environment or persisted; the shell
/// owns a `Settings` for the session and hands it to the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory output files land in by default.
    pub output_dir: PathBuf,
    /// Base file name used by [`Settings::default_output_path`].
    pub base_name: String,
    /// Container written when the request does not say otherwise.
    pub format: OutputFormat,
    /// Playback rate multiplier; 1.0 is the synthesized speed.
    pub speed: f32,
    /// Playback volume in [0.0, 1.0].
    pub volume: f32,
    /// Ask the synthesis service for slow speech.
    pub slow: bool,
    /// Maximum characters per synthesis call.
    pub chunk_size: usize,
    /// Cache per-chunk synthesis results for the session.
    pub cache_enabled: bool,
    /// Parent directory for per-run temp files; `None` means the system
    /// temp directory.
    pub temp_root: Option<PathBuf>,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_dir: std::env::temp_dir(),
            base_name: "output_audio".to_string(),
            format: OutputFormat::Mp3,
            speed: 1.0,
            volume: 1.0,
            slow: false,
            chunk_size: DEFAULT_CHUNK_SIZE,
            cache_enabled: false,
            temp_root: None,
            log_format: LogFormat::Pretty,
        }
    }
}

impl Settings {
    /// Where a conversion lands when the shell does not pick a path.
    pub fn default_output_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", self.base_name, self.format.extension()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path_composes_name_and_format() {
        let settings = Settings {
            output_dir: PathBuf::from("/home/user/audio"),
            base_name: "story".to_string(),
            format: OutputFormat::Wav,
            ..Settings::default()
        };
        assert_eq!(
            settings.default_output_path(),
            PathBuf::from("/home/user/audio/story.wav")
        );
    }

    #[test]
    fn test_defaults_match_the_session_picker() {
        let settings = Settings::default();
        assert_eq!(settings.base_name, "output_audio");
        assert_eq!(settings.format, OutputFormat::Mp3);
        assert_eq!(settings.chunk_size, DEFAULT_CHUNK_SIZE);
        assert_eq!(settings.speed, 1.0);
        assert_eq!(settings.volume, 1.0);
        assert!(!settings.slow);
        assert!(!settings.cache_enabled);
    }
}
