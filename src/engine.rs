use std::sync::Arc;
use std::time::Duration;

use lingua::LanguageDetector;
use moka::future::Cache;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::conversion::events::ConversionEvent;
use crate::domain::conversion::worker::ConversionWorker;
use crate::domain::conversion::ConversionRequest;
use crate::domain::language::language_detector;
use crate::domain::text::TextSanitizer;
use crate::infrastructure::audio::playback::Player;
use crate::infrastructure::config::Settings;
use crate::infrastructure::synthesis::SpeechSynthesizer;

/// Handle to one running conversion.
///
/// Events arrive in emission order; the terminal `Completed`/`Failed`
/// event is always last and always comes, even when the request never
/// got as far as a synthesis call.
pub struct ConversionHandle {
    run_id: Uuid,
    events: UnboundedReceiver<ConversionEvent>,
}

impl ConversionHandle {
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Next event, or `None` once the stream is drained.
    pub async fn next_event(&mut self) -> Option<ConversionEvent> {
        self.events.recv().await
    }

    /// Drain the stream and return the terminal event.
    pub async fn wait(mut self) -> ConversionEvent {
        let mut last = ConversionEvent::Failed {
            message: "conversion worker stopped without reporting".to_string(),
        };
        while let Some(event) = self.events.recv().await {
            let terminal = event.is_terminal();
            last = event;
            if terminal {
                break;
            }
        }
        last
    }
}

/// Converts text to speech through an injected synthesizer and player.
///
/// The engine owns what is expensive or shared (the language detector,
/// the optional per-chunk synthesis cache, the run gate) and spawns one
/// [`ConversionWorker`] per request. Exactly one worker is active at a
/// time: concurrent `start_conversion` calls queue behind the gate.
pub struct ConversionEngine {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    player: Arc<dyn Player>,
    detector: Arc<LanguageDetector>,
    chunk_cache: Option<Cache<String, Vec<u8>>>,
    settings: Settings,
    run_gate: Arc<Mutex<()>>,
}

impl ConversionEngine {
    pub fn new(
        synthesizer: Arc<dyn SpeechSynthesizer>,
        player: Arc<dyn Player>,
        settings: Settings,
    ) -> Self {
        // The detector is expensive to build; construct it once per engine.
        let detector = Arc::new(language_detector());

        let chunk_cache = if settings.cache_enabled {
            Some(
                Cache::builder()
                    .max_capacity(100)
                    .time_to_idle(Duration::from_secs(30 * 60)) // 30 minutes, refreshes on access
                    .build(),
            )
        } else {
            None
        };

        Self {
            synthesizer,
            player,
            detector,
            chunk_cache,
            settings,
            run_gate: Arc::new(Mutex::new(())),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Start a conversion on a background task and return immediately.
    ///
    /// Must be called from within a tokio runtime. The returned handle is
    /// the only place progress and the terminal outcome are reported.
    pub fn start_conversion(&self, request: ConversionRequest) -> ConversionHandle {
        let run_id = Uuid::new_v4();
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        let worker = ConversionWorker {
            run_id,
            synthesizer: Arc::clone(&self.synthesizer),
            player: Arc::clone(&self.player),
            detector: Arc::clone(&self.detector),
            sanitizer: TextSanitizer::new(),
            chunk_cache: self.chunk_cache.clone(),
            settings: self.settings.clone(),
            events: events_tx.clone(),
        };
        let gate = Arc::clone(&self.run_gate);

        tokio::spawn(async move {
            // One worker at a time; a request started while another run is
            // active parks here until that run terminates.
            let _active = gate.lock().await;

            let terminal = match worker.run(request).await {
                Ok(output_path) => ConversionEvent::Completed { output_path },
                Err(error) => {
                    tracing::error!(run_id = %run_id, error = %error, "Conversion failed");
                    ConversionEvent::Failed {
                        message: error.to_string(),
                    }
                }
            };
            let _ = events_tx.send(terminal);
        });

        ConversionHandle {
            run_id,
            events: events_rx,
        }
    }
}
