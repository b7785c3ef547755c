//! Live microphone input through cpal.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::Sample;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use super::analyser::Analyser;
use super::source::SampleSource;
use super::system::{lock_tap, start_then_record, CaptureTap};
use crate::error::CaptureError;
use crate::params::{AnalysisConfig, RecordingConfig, SampleDomain};

/// Default input device feeding a shared capture tap.
///
/// The stream only exists between `acquire` and `release`; the audio
/// callback downmixes to mono and pushes into the tap.
pub struct MicrophoneSource {
    tap: Arc<Mutex<CaptureTap>>,
    recording: Option<RecordingConfig>,
    domain: SampleDomain,
    frame: Vec<u8>,

    /// Input stream (kept alive while capturing)
    stream: Option<cpal::Stream>,
}

impl MicrophoneSource {
    pub fn new(
        config: &AnalysisConfig,
        analyser: Analyser,
        recording: Option<RecordingConfig>,
    ) -> Self {
        Self {
            tap: Arc::new(Mutex::new(CaptureTap::new(analyser))),
            recording,
            domain: config.domain,
            frame: vec![128; config.frame_len()],
            stream: None,
        }
    }
}

impl SampleSource for MicrophoneSource {
    fn acquire(&mut self) -> Result<(), CaptureError> {
        let host = cpal::default_host();
        let device = host.default_input_device().ok_or_else(|| {
            CaptureError::AcquisitionFailure("No audio input device found".to_string())
        })?;

        let supported = device
            .default_input_config()
            .map_err(|e| acquisition_failure("Failed to get input config", e))?;

        log::info!(
            "Audio input: {} @ {}Hz, {} channel(s), {:?}",
            device.name().unwrap_or_else(|_| "Unknown".to_string()),
            supported.sample_rate().0,
            supported.channels(),
            supported.sample_format()
        );

        let sample_format = supported.sample_format();
        let sample_rate = supported.sample_rate().0;
        let config: cpal::StreamConfig = supported.into();
        let tap = Arc::clone(&self.tap);

        let stream = start_then_record(&self.tap, self.recording.as_ref(), sample_rate, || {
            let stream = match sample_format {
                cpal::SampleFormat::F32 => build_input_stream::<f32>(&device, &config, tap),
                cpal::SampleFormat::I16 => build_input_stream::<i16>(&device, &config, tap),
                cpal::SampleFormat::U16 => build_input_stream::<u16>(&device, &config, tap),
                other => {
                    return Err(CaptureError::AcquisitionFailure(format!(
                        "Unsupported sample format: {}",
                        other
                    )))
                }
            }
            .map_err(|e| acquisition_failure("Failed to build input stream", e))?;

            stream
                .play()
                .map_err(|e| acquisition_failure("Failed to start input stream", e))?;
            Ok(stream)
        })?;

        self.stream = Some(stream);
        Ok(())
    }

    fn read_frame(&mut self) -> Result<&[u8], CaptureError> {
        lock_tap(&self.tap)?.fill_frame(self.domain, &mut self.frame);
        Ok(&self.frame)
    }

    fn pause(&mut self) -> Result<(), CaptureError> {
        if let Some(stream) = &self.stream {
            stream
                .pause()
                .map_err(|e| unavailable("Failed to pause input stream", e))?;
        }
        Ok(())
    }

    fn resume(&mut self) -> Result<(), CaptureError> {
        if let Some(stream) = &self.stream {
            stream
                .play()
                .map_err(|e| unavailable("Failed to resume input stream", e))?;
        }
        Ok(())
    }

    fn release(&mut self) -> Result<Option<PathBuf>, CaptureError> {
        // Dropping the stream stops the callback before the recording closes
        self.stream = None;
        lock_tap(&self.tap)?.finish()
    }
}

fn acquisition_failure(context: &str, err: impl std::fmt::Display) -> CaptureError {
    CaptureError::AcquisitionFailure(format!("{}: {}", context, err))
}

fn unavailable(context: &str, err: impl std::fmt::Display) -> CaptureError {
    CaptureError::SourceUnavailable(format!("{}: {}", context, err))
}

fn build_input_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    tap: Arc<Mutex<CaptureTap>>,
) -> Result<cpal::Stream, cpal::BuildStreamError>
where
    T: cpal::SizedSample + 'static,
    f32: cpal::FromSample<T>,
{
    let channels = config.channels.max(1) as usize;
    let mut mono: Vec<f32> = Vec::new();

    device.build_input_stream(
        config,
        move |data: &[T], _: &cpal::InputCallbackInfo| {
            // Downmix interleaved frames to mono by averaging channels
            mono.clear();
            for frame in data.chunks_exact(channels) {
                let sum: f32 = frame.iter().map(|&s| s.to_sample::<f32>()).sum();
                mono.push(sum / channels as f32);
            }
            if let Ok(mut tap) = tap.lock() {
                if let Err(e) = tap.push(&mono) {
                    log::error!("Capture tap error: {}", e);
                }
            }
        },
        |err| log::error!("Input stream error: {}", err),
        None,
    )
}
