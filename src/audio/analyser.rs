//! Byte-valued waveform and spectrum snapshots of captured audio.
//!
//! Keeps the most recent `fft_size` mono samples and converts them on demand
//! into the two byte buffers a frame can consume:
//! - waveform bytes centered at 128
//! - smoothed spectrum bytes on a decibel scale

use rustfft::num_complex::Complex;
use rustfft::num_traits::Zero;
use rustfft::{Fft, FftPlanner};
use std::collections::VecDeque;
use std::f64::consts::PI;
use std::sync::Arc;

use crate::error::SetupError;
use crate::params::AnalyserConfig;

/// Rolling analysis window over captured audio
pub struct Analyser {
    config: AnalyserConfig,
    fft: Arc<dyn Fft<f64>>,
    window: Vec<f64>,

    // Mutable state.
    history: VecDeque<f32>,
    smoothed: Vec<f64>,
    scratch: Vec<Complex<f64>>,
}

impl Analyser {
    pub fn new(config: AnalyserConfig) -> Result<Self, SetupError> {
        config.validate()?;

        let size = config.fft_size;
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);

        let mut history = VecDeque::with_capacity(size);
        history.resize(size, 0.0);

        Ok(Self {
            fft,
            window: (0..size).map(|i| blackman_window(i, size)).collect(),
            history,
            smoothed: vec![0.0; config.frequency_bin_count()],
            scratch: vec![Complex::zero(); size],
            config,
        })
    }

    pub fn frequency_bin_count(&self) -> usize {
        self.config.frequency_bin_count()
    }

    /// Append mono samples, dropping the oldest beyond `fft_size`
    pub fn push(&mut self, samples: &[f32]) {
        let size = self.config.fft_size;
        let tail = &samples[samples.len().saturating_sub(size)..];
        let overflow = (self.history.len() + tail.len()).saturating_sub(size);
        self.history.drain(..overflow);
        self.history.extend(tail.iter().copied());
    }

    /// Most recent `out.len()` samples as bytes, `128 * (1 + x)` clamped.
    ///
    /// Requests longer than the window are padded with silence (128).
    pub fn byte_time_domain_data(&self, out: &mut [u8]) {
        let n = out.len().min(self.history.len());
        let start = self.history.len() - n;

        for (byte, &sample) in out.iter_mut().zip(self.history.range(start..)) {
            *byte = (128.0 * (1.0 + sample)).clamp(0.0, 255.0) as u8;
        }
        for byte in out.iter_mut().skip(n) {
            *byte = 128;
        }
    }

    /// Spectrum bytes for the first `out.len()` bins.
    ///
    /// Blackman-windowed transform, magnitude divided by `fft_size`, smoothed
    /// against the previous call, then `[min_decibels, max_decibels]` mapped
    /// linearly onto 0..=255. Bins beyond the bin count are zeroed.
    pub fn byte_frequency_data(&mut self, out: &mut [u8]) {
        self.update_smoothed_spectrum();

        let min_db = self.config.min_decibels;
        let range_db = self.config.max_decibels - min_db;

        for (byte, &magnitude) in out.iter_mut().zip(&self.smoothed) {
            let db = 20.0 * magnitude.log10();
            // log10(0) is -inf, which clamps to 0 below
            let scaled = 255.0 / range_db * (db - min_db);
            *byte = if scaled.is_nan() {
                0
            } else {
                scaled.clamp(0.0, 255.0) as u8
            };
        }
        for byte in out.iter_mut().skip(self.smoothed.len()) {
            *byte = 0;
        }
    }

    fn update_smoothed_spectrum(&mut self) {
        let size = self.config.fft_size;
        for ((slot, &sample), &w) in self
            .scratch
            .iter_mut()
            .zip(&self.history)
            .zip(&self.window)
        {
            *slot = Complex::new(sample as f64 * w, 0.0);
        }

        self.fft.process(&mut self.scratch);

        let tau = self.config.smoothing_time_constant;
        for (smoothed, bin) in self.smoothed.iter_mut().zip(&self.scratch) {
            let magnitude = bin.norm() / size as f64;
            *smoothed = tau * *smoothed + (1.0 - tau) * magnitude;
        }
    }
}

/// Blackman window (alpha = 0.16) over a period of `size` samples
fn blackman_window(index: usize, size: usize) -> f64 {
    let x = index as f64 / size as f64;
    0.42 - 0.5 * (2.0 * PI * x).cos() + 0.08 * (4.0 * PI * x).cos()
}
