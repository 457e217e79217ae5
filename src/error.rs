use crate::infrastructure::audio::AudioError;
use crate::infrastructure::synthesis::SynthesisError;

/// Errors surfaced at the conversion worker boundary.
///
/// Every failure in the pipeline is folded into one of these variants and
/// delivered to the shell as a single terminal `Failed` event; nothing in
/// the worker panics or crashes the process.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// The request text was empty, or cleaned down to nothing.
    #[error("Text is empty")]
    EmptyInput,

    /// The external synthesis service rejected or failed a chunk.
    #[error("Speech synthesis failed: {0}")]
    Synthesis(#[from] SynthesisError),

    /// Temp-file or output-file trouble.
    #[error("Audio file error: {0}")]
    Io(#[from] std::io::Error),

    /// The audio subsystem failed to decode, merge or play the result.
    #[error("Audio playback failed: {0}")]
    Playback(#[from] AudioError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Custom result type for the conversion pipeline.
pub type ConversionResult<T> = Result<T, ConversionError>;
