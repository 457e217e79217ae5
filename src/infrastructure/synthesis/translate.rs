use async_trait::async_trait;

use super::{SpeechSynthesizer, SynthesisError, VoiceSpec};

/// The translate endpoint rejects requests past this length.
const MAX_CHUNK_CHARS: usize = 5000;

/// The endpoint only answers requests that look like they come from a
/// browser.
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// `ttsspeed` value the web frontend sends for slow speech.
const SLOW_SPEED: &str = "0.24";

/// Client for the Google Translate text-to-speech endpoint.
///
/// The accent variant picks the regional host (`translate.google.co.uk`
/// and friends), which shifts pronunciation the same way the regional
/// translate frontends do. Responses are MP3.
pub struct TranslateTtsClient {
    http: reqwest::Client,
    /// Overrides the per-accent host; tests point this at a local server.
    base_url: Option<String>,
}

impl TranslateTtsClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: None,
        }
    }

    /// A client pinned to one host instead of the regional frontends.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: Some(base_url.into()),
        }
    }

    fn host_for(&self, voice: &VoiceSpec) -> String {
        match &self.base_url {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => format!("https://translate.google.{}", voice.accent.as_tld()),
        }
    }
}

impl Default for TranslateTtsClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechSynthesizer for TranslateTtsClient {
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

        let url = format!("{}/translate_tts", self.host_for(voice));
        let ttsspeed = if voice.slow { SLOW_SPEED } else { "1" };

        tracing::info!(
            language = %voice.language,
            accent = %voice.accent,
            slow = voice.slow,
            text_length = length,
            "Calling translate TTS endpoint"
        );

        let response = self
            .http
            .get(&url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", voice.language.as_str()),
                ("ttsspeed", ttsspeed),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Translate TTS request failed");
                SynthesisError::Request(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(
                status = status.as_u16(),
                language = %voice.language,
                "Translate TTS returned an error status"
            );
            return Err(SynthesisError::Service {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("unexpected response")
                    .to_string(),
            });
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| SynthesisError::Request(e.to_string()))?;

        tracing::debug!(audio_size = audio.len(), "Translate TTS audio received");
        Ok(audio.to_vec())
    }

    fn max_chunk_chars(&self) -> usize {
        MAX_CHUNK_CHARS
    }
}
