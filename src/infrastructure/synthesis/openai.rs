use std::sync::Arc;

use async_openai::{
    config::OpenAIConfig,
    types::{CreateSpeechRequest, SpeechModel, Voice},
    Client,
};
use async_trait::async_trait;

use super::{SpeechSynthesizer, SynthesisError, VoiceSpec};
use crate::domain::language::LanguageCode;

/// OpenAI accepts at most this many characters per speech request.
const MAX_CHUNK_CHARS: usize = 4096;

/// OpenAI TTS implementation of the synthesis seam.
///
/// The OpenAI voices are multilingual and carry no regional variants, so
/// the accent parameter has no effect here; the per-language mapping is a
/// tone choice.
pub struct OpenAiSynthesizer {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
    default_voice: String,
}

impl OpenAiSynthesizer {
    /// `default_voice` overrides the per-language mapping when non-empty.
    pub fn new(client: Arc<Client<OpenAIConfig>>, model: String, default_voice: String) -> Self {
        Self {
            client,
            model,
            default_voice,
        }
    }

    /// Select a voice whose characteristics suit the language.
    fn voice_for_language(language: LanguageCode) -> Voice {
        match language {
            LanguageCode::English => Voice::Alloy,
            LanguageCode::Persian => Voice::Nova,
            LanguageCode::ChineseSimplified => Voice::Shimmer,
            LanguageCode::Russian => Voice::Onyx,
        }
    }

    fn parse_voice(name: &str) -> Voice {
        match name.to_lowercase().as_str() {
            "alloy" => Voice::Alloy,
            "echo" => Voice::Echo,
            "fable" => Voice::Fable,
            "onyx" => Voice::Onyx,
            "nova" => Voice::Nova,
            "shimmer" => Voice::Shimmer,
            _ => Voice::Alloy, // Default fallback
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for OpenAiSynthesizer {
    async fn synthesize(
        &self,
        text: &str,
        voice: &VoiceSpec,
    ) -> Result<Vec<u8>, SynthesisError> {
        let length = text.chars().count();
        if length > MAX_CHUNK_CHARS {
            return Err(SynthesisError::ChunkTooLarge {
                length,
                limit: MAX_CHUNK_CHARS,
            });
        }

        let speech_voice = if self.default_voice.is_empty() {
            Self::voice_for_language(voice.language)
        } else {
            Self::parse_voice(&self.default_voice)
        };

        // Parse model string to SpeechModel enum
        let model = match self.model.as_str() {
            "tts-1" => SpeechModel::Tts1,
            "tts-1-hd" => SpeechModel::Tts1Hd,
            other => SpeechModel::Other(other.to_string()),
        };

        tracing::info!(
            model = %self.model,
            language = %voice.language,
            slow = voice.slow,
            text_length = length,
            "Calling OpenAI TTS API"
        );

        let request = CreateSpeechRequest {
            model,
            input: text.to_string(),
            voice: speech_voice,
            response_format: None, // Defaults to MP3
            speed: Some(if voice.slow { 0.75 } else { 1.0 }),
        };

        let response = self.client.audio().speech(request).await.map_err(|e| {
            tracing::error!(
                error = %e,
                model = %self.model,
                text_length = length,
                "OpenAI TTS API call failed"
            );
            SynthesisError::Request(format!("OpenAI TTS error: {}", e))
        })?;

        let audio_bytes = response.bytes.to_vec();
        tracing::debug!(
            audio_size = audio_bytes.len(),
            "OpenAI TTS audio received successfully"
        );

        Ok(audio_bytes)
    }

    fn max_chunk_chars(&self) -> usize {
        MAX_CHUNK_CHARS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_per_language_mapping() {
        assert!(matches!(
            OpenAiSynthesizer::voice_for_language(LanguageCode::English),
            Voice::Alloy
        ));
        assert!(matches!(
            OpenAiSynthesizer::voice_for_language(LanguageCode::Persian),
            Voice::Nova
        ));
        assert!(matches!(
            OpenAiSynthesizer::voice_for_language(LanguageCode::Russian),
            Voice::Onyx
        ));
    }

    #[test]
    fn test_unknown_voice_names_fall_back_to_alloy() {
        assert!(matches!(OpenAiSynthesizer::parse_voice("Echo"), Voice::Echo));
        assert!(matches!(
            OpenAiSynthesizer::parse_voice("not-a-voice"),
            Voice::Alloy
        ));
    }
}
