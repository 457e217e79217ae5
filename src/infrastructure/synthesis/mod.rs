//! The synthesis seam.
//!
//! Text-to-speech is fully delegated to an external cloud service; this
//! module abstracts the provider (Google Translate TTS, OpenAI, ...)
//! behind one trait so the worker never sees wire details.

mod openai;
mod translate;

pub use openai::OpenAiSynthesizer;
pub use translate::TranslateTtsClient;

use async_trait::async_trait;

use crate::domain::language::{AccentVariant, LanguageCode};

/// Voice parameters for one synthesis call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoiceSpec {
    pub language: LanguageCode,
    pub accent: AccentVariant,
    pub slow: bool,
}

/// Errors from the external synthesis service.
#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    /// The request never reached the service or the transport failed.
    #[error("request to synthesis service failed: {0}")]
    Request(String),

    /// The service answered with a non-success status.
    #[error("synthesis service returned status {status}: {message}")]
    Service { status: u16, message: String },

    /// The chunk exceeds what the provider accepts in one call.
    #[error("chunk of {length} characters exceeds the provider limit of {limit}")]
    ChunkTooLarge { length: usize, limit: usize },
}

/// An external text-to-speech provider.
///
/// Implementations turn one bounded text chunk into playable audio bytes
/// (MP3 unless noted). Splitting text to fit `max_chunk_chars` is the
/// worker's job; providers reject oversized input instead of splitting
/// it themselves.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize one chunk of text with the given voice parameters.
    ///
    /// # Errors
    /// Returns an error if the service is unreachable, rejects the
    /// request, or the chunk is over the provider limit.
    async fn synthesize(&self, text: &str, voice: &VoiceSpec)
        -> Result<Vec<u8>, SynthesisError>;

    /// Largest chunk this provider accepts in a single call.
    fn max_chunk_chars(&self) -> usize;
}
