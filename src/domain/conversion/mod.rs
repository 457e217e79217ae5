//! The chunked-conversion pipeline: request types, text chunking,
//! progress/event reporting and the background worker itself.

pub mod chunker;
pub mod events;
pub mod worker;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::language::{AccentVariant, LanguageCode};

pub use events::ConversionEvent;

/// Audio container written at the end of a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Mp3,
    Wav,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Mp3 => "mp3",
            OutputFormat::Wav => "wav",
        }
    }

    /// Guess the format from a file name; `None` for unknown extensions.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "mp3" => Some(OutputFormat::Mp3),
            "wav" => Some(OutputFormat::Wav),
            _ => None,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Everything the shell provides to start one conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub text: String,
    /// `None` lets the engine detect the language from the text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<LanguageCode>,
    pub accent: AccentVariant,
    pub output_path: PathBuf,
    pub format: OutputFormat,
}

impl ConversionRequest {
    /// A request with picker defaults; the format follows the output
    /// path's extension.
    pub fn new(text: impl Into<String>, output_path: impl Into<PathBuf>) -> Self {
        let output_path = output_path.into();
        let format = OutputFormat::from_path(&output_path).unwrap_or(OutputFormat::Mp3);
        Self {
            text: text.into(),
            language: None,
            accent: AccentVariant::default(),
            output_path,
            format,
        }
    }
}
