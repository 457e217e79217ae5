//! Decoding and ordered merging of synthesized clips.

pub mod encode;
pub mod playback;

use std::io::Cursor;
use std::time::Duration;

use rodio::{Decoder, Source};

/// Errors from the audio subsystem.
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("failed to decode audio clip: {0}")]
    Decode(String),

    #[error("clip format mismatch: expected {expected_channels}ch @ {expected_rate}Hz, got {actual_channels}ch @ {actual_rate}Hz")]
    FormatMismatch {
        expected_channels: u16,
        expected_rate: u32,
        actual_channels: u16,
        actual_rate: u32,
    },

    #[error("audio clip contained no samples")]
    EmptyClip,

    #[error("audio output device unavailable: {0}")]
    Device(String),

    #[error("playback failed: {0}")]
    Playback(String),
}

/// Decoded interleaved PCM; the unit of merging, playback and WAV export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcmBuffer {
    pub samples: Vec<i16>,
    pub channels: u16,
    pub sample_rate: u32,
}

impl PcmBuffer {
    /// Append another clip's samples after this one's.
    ///
    /// Clips synthesized by the same voice share a format; anything else
    /// is an error rather than an audible artifact.
    pub fn append(&mut self, other: PcmBuffer) -> Result<(), AudioError> {
        if other.channels != self.channels || other.sample_rate != self.sample_rate {
            return Err(AudioError::FormatMismatch {
                expected_channels: self.channels,
                expected_rate: self.sample_rate,
                actual_channels: other.channels,
                actual_rate: other.sample_rate,
            });
        }
        self.samples.extend(other.samples);
        Ok(())
    }

    /// Playback length at the clip's native speed.
    pub fn duration(&self) -> Duration {
        let frames = self.samples.len() as f64 / self.channels.max(1) as f64;
        Duration::from_secs_f64(frames / self.sample_rate.max(1) as f64)
    }
}

/// Decode one synthesized clip (MP3 or WAV) into PCM.
pub fn decode_clip(bytes: &[u8]) -> Result<PcmBuffer, AudioError> {
    let decoder =
        Decoder::new(Cursor::new(bytes.to_vec())).map_err(|e| AudioError::Decode(e.to_string()))?;
    let channels = decoder.channels();
    let sample_rate = decoder.sample_rate();
    let samples: Vec<i16> = decoder.collect();

    if samples.is_empty() {
        return Err(AudioError::EmptyClip);
    }

    Ok(PcmBuffer {
        samples,
        channels,
        sample_rate,
    })
}

/// Merge clips into one buffer, strictly in the order given.
pub fn merge_clips(clips: Vec<PcmBuffer>) -> Result<PcmBuffer, AudioError> {
    let mut clips = clips.into_iter();
    let mut merged = clips.next().ok_or(AudioError::EmptyClip)?;
    for clip in clips {
        merged.append(clip)?;
    }
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wav_bytes(samples: &[i16], channels: u16, sample_rate: u32) -> Vec<u8> {
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
            for &sample in samples {
                writer.write_sample(sample).unwrap();
            }
            writer.finalize().unwrap();
        }
        cursor.into_inner()
    }

    fn buffer(samples: Vec<i16>, channels: u16, sample_rate: u32) -> PcmBuffer {
        PcmBuffer {
            samples,
            channels,
            sample_rate,
        }
    }

    #[test]
    fn test_decode_recovers_wav_samples() {
        let samples = vec![1i16, -2, 3, -4, 5];
        let decoded = decode_clip(&wav_bytes(&samples, 1, 8000)).unwrap();

        assert_eq!(decoded.samples, samples);
        assert_eq!(decoded.channels, 1);
        assert_eq!(decoded.sample_rate, 8000);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            decode_clip(&[0u8, 1, 2, 3]),
            Err(AudioError::Decode(_))
        ));
    }

    #[test]
    fn test_merge_preserves_clip_order() {
        let clips = vec![
            buffer(vec![1, 1], 1, 8000),
            buffer(vec![2, 2], 1, 8000),
            buffer(vec![3, 3], 1, 8000),
        ];
        let merged = merge_clips(clips).unwrap();
        assert_eq!(merged.samples, vec![1, 1, 2, 2, 3, 3]);
    }

    #[test]
    fn test_merge_rejects_mismatched_formats() {
        let clips = vec![buffer(vec![1], 1, 8000), buffer(vec![2], 2, 8000)];
        assert!(matches!(
            merge_clips(clips),
            Err(AudioError::FormatMismatch { .. })
        ));

        let clips = vec![buffer(vec![1], 1, 8000), buffer(vec![2], 1, 44100)];
        assert!(matches!(
            merge_clips(clips),
            Err(AudioError::FormatMismatch { .. })
        ));
    }

    #[test]
    fn test_merge_of_nothing_is_an_error() {
        assert!(matches!(merge_clips(Vec::new()), Err(AudioError::EmptyClip)));
    }

    #[test]
    fn test_duration_counts_frames_not_samples() {
        let stereo = buffer(vec![0; 16000], 2, 8000);
        assert_eq!(stereo.duration(), Duration::from_secs(1));
    }
}
