//! WAV artifact written while capturing.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use crate::error::CaptureError;
use crate::params::RecordingConfig;

/// Mono 32-bit float WAV writer, finalized when capture stops
pub struct WavRecorder {
    writer: hound::WavWriter<BufWriter<File>>,
    path: PathBuf,
    samples_written: u64,
}

impl WavRecorder {
    /// Create the output directory and open the WAV file
    pub fn create(config: &RecordingConfig, sample_rate: u32) -> Result<Self, CaptureError> {
        std::fs::create_dir_all(&config.output_dir).map_err(hound::Error::IoError)?;

        let path = config.audio_path();
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let writer = hound::WavWriter::create(&path, spec)?;
        log::info!("Recording to {}", path.display());

        Ok(Self {
            writer,
            path,
            samples_written: 0,
        })
    }

    pub fn write(&mut self, samples: &[f32]) -> Result<(), CaptureError> {
        for &sample in samples {
            self.writer.write_sample(sample)?;
        }
        self.samples_written += samples.len() as u64;
        Ok(())
    }

    pub fn samples_written(&self) -> u64 {
        self.samples_written
    }

    /// Flush pending samples, patch the header and close the file
    pub fn finalize(self) -> Result<PathBuf, CaptureError> {
        self.writer.finalize()?;
        log::info!(
            "Recording finalized: {} ({} samples)",
            self.path.display(),
            self.samples_written
        );
        Ok(self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_and_finalize() {
        let dir = std::env::temp_dir().join(format!("cubescope-recorder-{}", std::process::id()));
        let config = RecordingConfig::new(&dir);

        let mut recorder = WavRecorder::create(&config, 8000).unwrap();
        recorder.write(&[0.0, 0.25, -0.25, 0.5]).unwrap();
        assert_eq!(recorder.samples_written(), 4);

        let path = recorder.finalize().unwrap();
        let reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().channels, 1);
        assert_eq!(reader.spec().sample_rate, 8000);

        let samples: Vec<f32> = reader.into_samples::<f32>().map(|s| s.unwrap()).collect();
        assert_eq!(samples, vec![0.0, 0.25, -0.25, 0.5]);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
