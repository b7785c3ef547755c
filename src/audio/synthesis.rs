//! Synthetic tone source for headless runs.

use std::f64::consts::TAU;
use std::path::PathBuf;

use super::source::SampleSource;
use super::system::CaptureTap;
use crate::error::CaptureError;
use crate::params::{AnalysisConfig, SampleDomain};

/// Sine generator standing in for a microphone.
///
/// Each frame advances the tone by one tick's worth of samples, pushes them
/// through the capture tap and snapshots the analyser.
pub struct ToneSource {
    tap: CaptureTap,
    domain: SampleDomain,
    frame: Vec<u8>,
    block: Vec<f32>,

    frequency_hz: f64,
    amplitude: f32,
    sample_rate_hz: f64,
    phase: f64,
}

impl ToneSource {
    pub fn new(
        config: &AnalysisConfig,
        tap: CaptureTap,
        frequency_hz: f64,
        amplitude: f32,
    ) -> Self {
        Self {
            tap,
            domain: config.domain,
            frame: vec![128; config.frame_len()],
            block: vec![0.0; config.samples_per_frame().max(1)],
            frequency_hz,
            amplitude,
            sample_rate_hz: config.sample_rate_hz as f64,
            phase: 0.0,
        }
    }

    fn generate_block(&mut self) {
        let step = TAU * self.frequency_hz / self.sample_rate_hz;
        for sample in self.block.iter_mut() {
            *sample = self.amplitude * self.phase.sin() as f32;
            self.phase = (self.phase + step) % TAU;
        }
    }
}

impl SampleSource for ToneSource {
    fn acquire(&mut self) -> Result<(), CaptureError> {
        log::info!(
            "Tone source: {:.1} Hz @ {} Hz sample rate",
            self.frequency_hz,
            self.sample_rate_hz
        );
        Ok(())
    }

    fn read_frame(&mut self) -> Result<&[u8], CaptureError> {
        self.generate_block();
        self.tap.push(&self.block)?;
        self.tap.fill_frame(self.domain, &mut self.frame);
        Ok(&self.frame)
    }

    fn release(&mut self) -> Result<Option<PathBuf>, CaptureError> {
        self.tap.finish()
    }
}
