//! Capture tap: the shared sink every captured block passes through.

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use super::analyser::Analyser;
use super::recorder::WavRecorder;
use crate::error::CaptureError;
use crate::params::{RecordingConfig, SampleDomain};

/// Analyser plus optional recording, fed with mono blocks by a source
pub struct CaptureTap {
    analyser: Analyser,
    recorder: Option<WavRecorder>,
}

impl CaptureTap {
    pub fn new(analyser: Analyser) -> Self {
        Self {
            analyser,
            recorder: None,
        }
    }

    pub fn with_recorder(mut self, recorder: WavRecorder) -> Self {
        self.recorder = Some(recorder);
        self
    }

    pub fn set_recorder(&mut self, recorder: WavRecorder) {
        self.recorder = Some(recorder);
    }

    pub fn is_recording(&self) -> bool {
        self.recorder.is_some()
    }

    /// Feed one captured block to the analyser and the recording
    pub fn push(&mut self, samples: &[f32]) -> Result<(), CaptureError> {
        self.analyser.push(samples);
        if let Some(recorder) = self.recorder.as_mut() {
            recorder.write(samples)?;
        }
        Ok(())
    }

    /// Snapshot the analyser into `out` in the requested domain
    pub fn fill_frame(&mut self, domain: SampleDomain, out: &mut [u8]) {
        match domain {
            SampleDomain::TimeDomain => self.analyser.byte_time_domain_data(out),
            SampleDomain::Frequency => self.analyser.byte_frequency_data(out),
        }
    }

    /// Finalize the recording, if one is running
    pub fn finish(&mut self) -> Result<Option<PathBuf>, CaptureError> {
        self.recorder.take().map(WavRecorder::finalize).transpose()
    }
}

/// Lock a tap shared with an audio callback
pub fn lock_tap(tap: &Mutex<CaptureTap>) -> Result<MutexGuard<'_, CaptureTap>, CaptureError> {
    tap.lock().map_err(|_| CaptureError::SourceUnavailable("capture tap poisoned".to_string()))
}

/// Run `start`, then open the recording on the shared tap.
///
/// Nothing is written to disk unless `start` succeeds.
pub fn start_then_record<T>(
    tap: &Mutex<CaptureTap>,
    recording: Option<&RecordingConfig>,
    sample_rate: u32,
    start: impl FnOnce() -> Result<T, CaptureError>,
) -> Result<T, CaptureError> {
    let running = start()?;
    if let Some(recording) = recording {
        let recorder = WavRecorder::create(recording, sample_rate)?;
        lock_tap(tap)?.set_recorder(recorder);
    }
    Ok(running)
}
