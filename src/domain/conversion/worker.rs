use std::path::PathBuf;
use std::sync::Arc;

use lingua::LanguageDetector;
use moka::future::Cache;
use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

use crate::domain::conversion::chunker::split_into_chunks;
use crate::domain::conversion::events::{ConversionEvent, ProgressTracker};
use crate::domain::conversion::{ConversionRequest, OutputFormat};
use crate::domain::language::detect_language;
use crate::domain::text::TextSanitizer;
use crate::error::{ConversionError, ConversionResult};
use crate::infrastructure::audio::playback::{PlaybackSettings, Player};
use crate::infrastructure::audio::{decode_clip, encode, merge_clips, AudioError, PcmBuffer};
use crate::infrastructure::config::Settings;
use crate::infrastructure::synthesis::{SpeechSynthesizer, SynthesisError, VoiceSpec};

/// One conversion run: chunk, synthesize, merge, save, play.
///
/// The worker executes on a background task and never touches the shell
/// directly. Progress crosses over on the event channel; the terminal
/// outcome is reported by the engine that spawned the run. A failure at
/// any step aborts the remaining steps; chunks are never retried.
pub struct ConversionWorker {
    pub(crate) run_id: Uuid,
    pub(crate) synthesizer: Arc<dyn SpeechSynthesizer>,
    pub(crate) player: Arc<dyn Player>,
    pub(crate) detector: Arc<LanguageDetector>,
    pub(crate) sanitizer: TextSanitizer,
    pub(crate) chunk_cache: Option<Cache<String, Vec<u8>>>,
    pub(crate) settings: Settings,
    pub(crate) events: UnboundedSender<ConversionEvent>,
}

impl ConversionWorker {
    /// Drive one request through the pipeline. Returns the output path on
    /// success; the caller folds the result into the terminal event.
    pub(crate) async fn run(self, request: ConversionRequest) -> ConversionResult<PathBuf> {
        // 1. Validate and clean the input. An all-markup paste can clean
        //    down to nothing, which fails the same way as empty input:
        //    before any synthesis call and before any progress event.
        if request.text.trim().is_empty() {
            return Err(ConversionError::EmptyInput);
        }
        let text = self.sanitizer.clean(&request.text);
        if text.is_empty() {
            return Err(ConversionError::EmptyInput);
        }

        // 2. Resolve the language.
        let language = request
            .language
            .unwrap_or_else(|| detect_language(&self.detector, &text));

        // 3. Chunk the text, honoring the provider's own per-call limit.
        let chunk_size = self.settings.chunk_size.min(self.synthesizer.max_chunk_chars());
        let chunks = split_into_chunks(&text, chunk_size);
        let total_chars = text.chars().count();

        tracing::info!(
            run_id = %self.run_id,
            language = %language,
            accent = %request.accent,
            chunk_count = chunks.len(),
            total_chars = total_chars,
            "Starting conversion"
        );

        // 4. Per-run temp namespace. The guard removes the directory and
        //    every clip in it on all exit paths, including failure.
        let temp_dir = self.create_temp_dir()?;

        let voice = VoiceSpec {
            language,
            accent: request.accent,
            slow: self.settings.slow,
        };

        // 5. Synthesize chunk by chunk, strictly in index order. The next
        //    chunk starts only after this one is persisted.
        let mut progress = ProgressTracker::new(total_chars);
        let mut clip_paths = Vec::with_capacity(chunks.len());
        for (index, chunk) in chunks.iter().enumerate() {
            let audio = self.synthesize_chunk(chunk, &voice).await?;

            let clip_path = temp_dir.path().join(format!("{index:05}.clip"));
            tokio::fs::write(&clip_path, &audio).await?;
            clip_paths.push(clip_path);

            let percent = progress.advance(chunk_size);
            tracing::debug!(
                run_id = %self.run_id,
                chunk_index = index,
                chunk_chars = chunk.chars().count(),
                audio_size = audio.len(),
                percent = percent,
                "Chunk synthesized"
            );
            self.emit(ConversionEvent::Progress(percent));
        }

        // 6. Merge in chunk order: the raw byte stream for the MP3
        //    artifact, decoded samples for playback and WAV export. The
        //    final audible output is the ordered concatenation of every
        //    clip, not the last clip alone.
        let mut merged_bytes = Vec::new();
        let mut clips = Vec::with_capacity(clip_paths.len());
        for clip_path in &clip_paths {
            let bytes = tokio::fs::read(clip_path).await?;
            clips.push(decode_clip(&bytes)?);
            merged_bytes.extend(bytes);
        }
        let merged = merge_clips(clips)?;

        // 7. Save before playback, so a playback failure still leaves the
        //    file on disk.
        self.save_output(&request, &merged_bytes, &merged).await?;

        // 8. Play the whole utterance once.
        self.play(merged).await?;

        drop(temp_dir);

        tracing::info!(
            run_id = %self.run_id,
            output_path = %request.output_path.display(),
            "Conversion finished"
        );
        Ok(request.output_path)
    }

    fn create_temp_dir(&self) -> std::io::Result<tempfile::TempDir> {
        let prefix = format!("talktape-{}-", self.run_id);
        let mut builder = tempfile::Builder::new();
        builder.prefix(&prefix);
        match &self.settings.temp_root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        }
    }

    async fn synthesize_chunk(
        &self,
        chunk: &str,
        voice: &VoiceSpec,
    ) -> Result<Vec<u8>, SynthesisError> {
        if let Some(cache) = &self.chunk_cache {
            let key = format!(
                "{}:{}:{}:{}",
                voice.language, voice.accent, voice.slow, chunk
            );
            if let Some(audio) = cache.get(&key).await {
                tracing::debug!(run_id = %self.run_id, audio_size = audio.len(), "Chunk cache hit");
                return Ok(audio);
            }
            let audio = self.synthesizer.synthesize(chunk, voice).await?;
            cache.insert(key, audio.clone()).await;
            Ok(audio)
        } else {
            self.synthesizer.synthesize(chunk, voice).await
        }
    }

    async fn save_output(
        &self,
        request: &ConversionRequest,
        merged_bytes: &[u8],
        merged: &PcmBuffer,
    ) -> ConversionResult<()> {
        if let Some(parent) = request.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        match request.format {
            OutputFormat::Mp3 => {
                tokio::fs::write(&request.output_path, merged_bytes).await?;
            }
            OutputFormat::Wav => {
                // Real transcoding: the synthesized clips are compressed,
                // so WAV output goes through the decoded samples.
                let path = request.output_path.clone();
                let audio = merged.clone();
                tokio::task::spawn_blocking(move || encode::write_wav(&path, &audio))
                    .await
                    .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))??;
            }
        }

        tracing::info!(
            run_id = %self.run_id,
            format = %request.format,
            output_path = %request.output_path.display(),
            "Output saved"
        );
        Ok(())
    }

    async fn play(&self, merged: PcmBuffer) -> ConversionResult<()> {
        let player = Arc::clone(&self.player);
        let playback = PlaybackSettings {
            volume: self.settings.volume,
            speed: self.settings.speed,
        };
        tokio::task::spawn_blocking(move || player.play(merged, playback))
            .await
            .map_err(|e| AudioError::Playback(format!("playback task failed: {e}")))??;
        Ok(())
    }

    fn emit(&self, event: ConversionEvent) {
        // The shell may have dropped its receiver; the run still finishes
        // for the saved file's sake.
        let _ = self.events.send(event);
    }
}
