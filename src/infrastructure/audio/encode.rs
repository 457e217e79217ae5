//! Writing merged audio to disk.
//!
//! MP3 output is the concatenated synthesized stream, written verbatim.
//! WAV output is a real transcode: the clips are decoded and the merged
//! samples re-encoded, so the saved file matches its extension.

use std::path::Path;

use super::PcmBuffer;

/// Encode merged PCM as a 16-bit integer WAV file.
pub fn write_wav(path: &Path, audio: &PcmBuffer) -> std::io::Result<()> {
    let spec = hound::WavSpec {
        channels: audio.channels,
        sample_rate: audio.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec).map_err(into_io)?;
    {
        let mut samples = writer.get_i16_writer(audio.samples.len() as u32);
        for &sample in &audio.samples {
            samples.write_sample(sample);
        }
        samples.flush().map_err(into_io)?;
    }
    writer.finalize().map_err(into_io)
}

fn into_io(err: hound::Error) -> std::io::Error {
    match err {
        hound::Error::IoError(e) => e,
        other => std::io::Error::new(std::io::ErrorKind::Other, other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wav_round_trip() {
        let audio = PcmBuffer {
            samples: vec![1, -1, 1000, -1000, i16::MAX, i16::MIN],
            channels: 2,
            sample_rate: 24000,
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.wav");

        write_wav(&path, &audio).unwrap();

        let mut reader = hound::WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 2);
        assert_eq!(spec.sample_rate, 24000);
        assert_eq!(spec.bits_per_sample, 16);

        let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(samples, audio.samples);
    }

    #[test]
    fn test_write_to_a_missing_directory_fails() {
        let audio = PcmBuffer {
            samples: vec![0],
            channels: 1,
            sample_rate: 8000,
        };
        let result = write_wav(Path::new("/nonexistent/dir/out.wav"), &audio);
        assert!(result.is_err());
    }
}
