//! Device playback behind a single process-wide output handle.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Mutex;
use std::thread;

use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamHandle, Sink};

use super::{AudioError, PcmBuffer};

/// Volume and speed applied to one playback pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackSettings {
    /// Linear gain in [0.0, 1.0].
    pub volume: f32,
    /// Playback rate multiplier; 1.0 is the synthesized speed.
    pub speed: f32,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            volume: 1.0,
            speed: 1.0,
        }
    }
}

/// Plays one merged utterance to completion.
///
/// Implementations must be callable from a blocking context; the worker
/// moves playback onto a blocking task.
pub trait Player: Send + Sync {
    fn play(&self, audio: PcmBuffer, settings: PlaybackSettings) -> Result<(), AudioError>;
}

/// Discards audio; for headless shells that only save the file.
#[derive(Debug, Default)]
pub struct NoopPlayer;

impl Player for NoopPlayer {
    fn play(&self, _audio: PcmBuffer, _settings: PlaybackSettings) -> Result<(), AudioError> {
        Ok(())
    }
}

enum DeviceCommand {
    Play {
        audio: PcmBuffer,
        settings: PlaybackSettings,
        done: Sender<Result<(), AudioError>>,
    },
    Shutdown,
}

/// The process-wide audio output.
///
/// rodio's `OutputStream` is tied to the thread that opens it, so one
/// dedicated device thread owns it and serves playback requests strictly
/// one at a time. The thread starts lazily on the first `play` and stops
/// on [`RodioPlayer::shutdown`] (or drop); exactly one playback is ever
/// active.
pub struct RodioPlayer {
    device: Mutex<Option<Sender<DeviceCommand>>>,
}

impl RodioPlayer {
    pub fn new() -> Self {
        Self {
            device: Mutex::new(None),
        }
    }

    /// Tear the device thread down. The next `play` starts a fresh one.
    pub fn shutdown(&self) {
        let mut device = self.device.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(sender) = device.take() {
            let _ = sender.send(DeviceCommand::Shutdown);
        }
    }

    fn device_loop(commands: Receiver<DeviceCommand>) {
        // Opening the stream can fail on headless machines; the failure is
        // reported per play request rather than killing the thread.
        let stream = OutputStream::try_default();
        while let Ok(command) = commands.recv() {
            match command {
                DeviceCommand::Play {
                    audio,
                    settings,
                    done,
                } => {
                    let result = match &stream {
                        Ok((_stream, handle)) => Self::play_on(handle, audio, settings),
                        Err(e) => Err(AudioError::Device(e.to_string())),
                    };
                    let _ = done.send(result);
                }
                DeviceCommand::Shutdown => break,
            }
        }
    }

    fn play_on(
        handle: &OutputStreamHandle,
        audio: PcmBuffer,
        settings: PlaybackSettings,
    ) -> Result<(), AudioError> {
        let sink = Sink::try_new(handle).map_err(|e| AudioError::Device(e.to_string()))?;
        sink.set_volume(settings.volume.clamp(0.0, 1.0));
        sink.set_speed(settings.speed);
        sink.append(SamplesBuffer::new(
            audio.channels,
            audio.sample_rate,
            audio.samples,
        ));
        sink.sleep_until_end();
        Ok(())
    }
}

impl Default for RodioPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RodioPlayer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl Player for RodioPlayer {
    fn play(&self, audio: PcmBuffer, settings: PlaybackSettings) -> Result<(), AudioError> {
        let sender = {
            let mut device = self.device.lock().unwrap_or_else(|e| e.into_inner());
            match device.as_ref() {
                Some(sender) => sender.clone(),
                None => {
                    let (tx, rx) = mpsc::channel();
                    thread::Builder::new()
                        .name("talktape-audio".into())
                        .spawn(move || Self::device_loop(rx))
                        .map_err(|e| AudioError::Device(e.to_string()))?;
                    *device = Some(tx.clone());
                    tx
                }
            }
        };

        let (done_tx, done_rx) = mpsc::channel();
        sender
            .send(DeviceCommand::Play {
                audio,
                settings,
                done: done_tx,
            })
            .map_err(|_| AudioError::Device("audio device thread stopped".to_string()))?;

        done_rx
            .recv()
            .map_err(|_| AudioError::Playback("audio device thread dropped the request".to_string()))?
    }
}
