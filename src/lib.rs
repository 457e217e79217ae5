//! talktape: a text-to-speech conversion engine.
//!
//! Takes user-entered text, splits it into bounded chunks, synthesizes
//! each chunk through an external cloud TTS provider, reports progress,
//! merges the clips in order, plays the result once and saves it to disk.
//! The GUI shell lives elsewhere; it drives this crate through
//! [`ConversionEngine::start_conversion`] and consumes the event stream
//! on the returned [`ConversionHandle`].

pub mod domain;
pub mod engine;
pub mod error;
pub mod infrastructure;

pub use domain::conversion::{ConversionEvent, ConversionRequest, OutputFormat};
pub use domain::language::{AccentVariant, LanguageCode, TextDirection};
pub use engine::{ConversionEngine, ConversionHandle};
pub use error::ConversionError;
pub use infrastructure::audio::playback::{NoopPlayer, PlaybackSettings, Player, RodioPlayer};
pub use infrastructure::audio::{AudioError, PcmBuffer};
pub use infrastructure::config::{LogFormat, Settings};
pub use infrastructure::locale::LabelCatalog;
pub use infrastructure::synthesis::{
    OpenAiSynthesizer, SpeechSynthesizer, SynthesisError, TranslateTtsClient, VoiceSpec,
};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging for a shell embedding the engine. Call once at
/// startup.
pub fn init_logging(format: LogFormat) {
    if format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "talktape=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "talktape=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
