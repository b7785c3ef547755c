//! Interchangeable transform implementations behind one trait.

use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

use super::{fft, ComplexSpectrum};
use crate::error::SpectrumError;
use crate::params::EngineKind;

/// Real-input forward transform producing an interleaved spectrum.
///
/// Implementations hold no per-call state, so one engine may serve
/// repeated or concurrent calls.
pub trait SpectrumEngine: Send + Sync {
    fn transform(&self, samples: &[f64]) -> Result<ComplexSpectrum, SpectrumError>;

    fn name(&self) -> &'static str;
}

/// Recursive radix-2 engine
#[derive(Debug, Default, Clone, Copy)]
pub struct RecursiveFft;

impl SpectrumEngine for RecursiveFft {
    fn transform(&self, samples: &[f64]) -> Result<ComplexSpectrum, SpectrumError> {
        fft(samples)
    }

    fn name(&self) -> &'static str {
        "recursive"
    }
}

/// rustfft engine planned once for a fixed length
pub struct PlannedFft {
    fft: Arc<dyn Fft<f64>>,
    len: usize,
}

impl PlannedFft {
    pub fn new(len: usize) -> Result<Self, SpectrumError> {
        if !len.is_power_of_two() {
            return Err(SpectrumError::InvalidInputLength { len });
        }
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(len);
        Ok(Self { fft, len })
    }
}

impl SpectrumEngine for PlannedFft {
    fn transform(&self, samples: &[f64]) -> Result<ComplexSpectrum, SpectrumError> {
        if samples.len() != self.len {
            return Err(SpectrumError::InvalidInputLength { len: samples.len() });
        }

        let mut buffer: Vec<Complex<f64>> =
            samples.iter().map(|&s| Complex::new(s, 0.0)).collect();
        self.fft.process(&mut buffer);
        Ok(ComplexSpectrum::from_bins(&buffer))
    }

    fn name(&self) -> &'static str {
        "planned"
    }
}

/// Build the engine selected in the configuration
pub fn engine_for(
    kind: EngineKind,
    len: usize,
) -> Result<Box<dyn SpectrumEngine>, SpectrumError> {
    Ok(match kind {
        EngineKind::Recursive => Box::new(RecursiveFft),
        EngineKind::Planned => Box::new(PlannedFft::new(len)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engines_agree() {
        let n = 512;
        let samples: Vec<f64> = (0..n)
            .map(|i| ((i * 131) % 256) as f64 - 128.0)
            .collect();

        let recursive = RecursiveFft.transform(&samples).unwrap();
        let planned = PlannedFft::new(n).unwrap().transform(&samples).unwrap();

        let scale = planned.magnitudes().into_iter().fold(0.0, f64::max);
        for (a, b) in recursive
            .as_interleaved()
            .iter()
            .zip(planned.as_interleaved())
        {
            assert!((a - b).abs() <= 1e-6 * scale);
        }
    }

    #[test]
    fn test_planned_rejects_other_lengths() {
        let engine = PlannedFft::new(16).unwrap();
        assert_eq!(
            engine.transform(&[0.0; 8]).unwrap_err(),
            SpectrumError::InvalidInputLength { len: 8 }
        );
        assert!(PlannedFft::new(12).is_err());
    }

    #[test]
    fn test_engine_for() {
        assert_eq!(
            engine_for(EngineKind::Recursive, 64).unwrap().name(),
            "recursive"
        );
        assert_eq!(engine_for(EngineKind::Planned, 64).unwrap().name(), "planned");
    }
}
