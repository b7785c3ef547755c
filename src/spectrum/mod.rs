//! Spectral analysis kernel: byte decoding, windowing, FFT engines and
//! magnitude extraction.

mod engine;
mod fft;
mod magnitude;
mod window;

use rustfft::num_complex::Complex;

use crate::error::SpectrumError;
use crate::params::SampleDomain;

// Re-export public types
pub use engine::{engine_for, PlannedFft, RecursiveFft, SpectrumEngine};
pub use fft::fft;
pub use magnitude::magnitudes;
pub use window::{apply_window, hann_window};

/// Complex spectrum stored as interleaved (re, im) pairs, bin k at `2k`.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexSpectrum {
    interleaved: Vec<f64>,
}

impl ComplexSpectrum {
    /// Wrap an interleaved buffer, rejecting odd lengths
    pub fn from_interleaved(interleaved: Vec<f64>) -> Result<Self, SpectrumError> {
        if interleaved.len() % 2 != 0 {
            return Err(SpectrumError::InvalidSpectrumLength {
                len: interleaved.len(),
            });
        }
        Ok(Self { interleaved })
    }

    pub fn from_bins(bins: &[Complex<f64>]) -> Self {
        let mut interleaved = Vec::with_capacity(bins.len() * 2);
        for bin in bins {
            interleaved.push(bin.re);
            interleaved.push(bin.im);
        }
        Self { interleaved }
    }

    pub fn bin_count(&self) -> usize {
        self.interleaved.len() / 2
    }

    pub fn bin(&self, k: usize) -> Option<Complex<f64>> {
        let re = *self.interleaved.get(2 * k)?;
        let im = *self.interleaved.get(2 * k + 1)?;
        Some(Complex::new(re, im))
    }

    pub fn as_interleaved(&self) -> &[f64] {
        &self.interleaved
    }

    /// Per-bin modulus; the length is always valid here
    pub fn magnitudes(&self) -> Vec<f64> {
        self.interleaved
            .chunks_exact(2)
            .map(|pair| (pair[0] * pair[0] + pair[1] * pair[1]).sqrt())
            .collect()
    }
}

/// Decode source bytes into real samples, reusing `out`.
///
/// Time-domain bytes are centered on 128 and come out signed; frequency
/// bytes are already magnitudes and pass through unchanged.
pub fn decode_bytes(bytes: &[u8], domain: SampleDomain, out: &mut Vec<f64>) {
    out.clear();
    match domain {
        SampleDomain::TimeDomain => out.extend(bytes.iter().map(|&b| b as f64 - 128.0)),
        SampleDomain::Frequency => out.extend(bytes.iter().map(|&b| b as f64)),
    }
}
