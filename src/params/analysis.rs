//! Spectral analysis configuration and analyser constants.

use crate::error::SetupError;

/// Interpretation of the byte samples handed over by the source each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleDomain {
    /// Waveform bytes centered at 128
    #[default]
    TimeDomain,
    /// Analyser magnitude bytes, 0-255
    Frequency,
}

/// Window applied to the decoded sequence before the transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowType {
    #[default]
    Rect,
    Hann,
}

/// Post-transform magnitude scaling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Normalization {
    /// Raw moduli (grow with N)
    None,
    /// Moduli divided by N, so byte-scale input gives byte-scale output
    #[default]
    ByLength,
}

/// How many magnitude bins are forwarded to the visualization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BinSelection {
    /// All N bins, mirror half included
    Full,
    /// The N/2 bins below Nyquist
    #[default]
    Half,
}

impl BinSelection {
    /// Number of bins forwarded for an N-point transform
    pub fn bin_count(self, transform_len: usize) -> usize {
        match self {
            BinSelection::Full => transform_len,
            BinSelection::Half => transform_len / 2,
        }
    }
}

/// Transform implementation used by the frame loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineKind {
    /// Recursive radix-2 decimation-in-time
    #[default]
    Recursive,
    /// rustfft planned transform
    Planned,
}

/// Frame-loop analysis configuration
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Capture sample rate (Hz)
    pub sample_rate_hz: usize,

    /// Analyser window size (must be power of 2, at least 2).
    /// Each tick hands the core half of this: the analyser's bin count.
    pub fft_size: usize,

    /// Tick interval (milliseconds)
    /// 16 ms ≈ one display refresh at 60 Hz
    pub frame_interval_ms: u64,

    pub domain: SampleDomain,
    pub window: WindowType,
    pub normalization: Normalization,
    pub bins: BinSelection,
    pub engine: EngineKind,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: 44100,
            fft_size: 2048,
            frame_interval_ms: 16,
            domain: SampleDomain::TimeDomain,
            window: WindowType::Rect,
            normalization: Normalization::ByLength,
            bins: BinSelection::Half,
            engine: EngineKind::Recursive,
        }
    }
}

impl AnalysisConfig {
    /// Samples handed to the FFT engine per tick
    pub fn frame_len(&self) -> usize {
        self.fft_size / 2
    }

    /// Magnitude bins forwarded to the visualization per tick
    pub fn bin_count(&self) -> usize {
        self.bins.bin_count(self.frame_len())
    }

    /// Samples produced by the source between two ticks
    pub fn samples_per_frame(&self) -> usize {
        (self.sample_rate_hz as u64 * self.frame_interval_ms / 1000) as usize
    }

    /// Validate configuration (FFT size must be power of 2, etc.)
    pub fn validate(&self) -> Result<(), SetupError> {
        if !self.fft_size.is_power_of_two() || self.fft_size < 2 {
            return Err(SetupError::InvalidConfig(format!(
                "FFT size must be a power of 2 and at least 2, got {}",
                self.fft_size
            )));
        }
        if self.sample_rate_hz == 0 {
            return Err(SetupError::InvalidConfig(
                "Sample rate must be > 0".to_string(),
            ));
        }
        if self.frame_interval_ms == 0 {
            return Err(SetupError::InvalidConfig(
                "Frame interval must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Analyser node parameters (byte conversion of captured audio)
#[derive(Debug, Clone)]
pub struct AnalyserConfig {
    /// Window size of the analyser's own transform (power of 2)
    pub fft_size: usize,

    /// Exponential averaging between successive frequency frames, in [0, 1]
    pub smoothing_time_constant: f64,

    /// Level mapped to byte 0 (dBFS)
    pub min_decibels: f64,

    /// Level mapped to byte 255 (dBFS)
    pub max_decibels: f64,
}

impl Default for AnalyserConfig {
    fn default() -> Self {
        Self {
            fft_size: 2048,
            smoothing_time_constant: 0.8,
            min_decibels: -100.0,
            max_decibels: -30.0,
        }
    }
}

impl AnalyserConfig {
    pub fn frequency_bin_count(&self) -> usize {
        self.fft_size / 2
    }

    pub fn validate(&self) -> Result<(), SetupError> {
        if !self.fft_size.is_power_of_two() || self.fft_size < 2 {
            return Err(SetupError::InvalidConfig(format!(
                "Analyser FFT size must be a power of 2 and at least 2, got {}",
                self.fft_size
            )));
        }
        if !(0.0..=1.0).contains(&self.smoothing_time_constant) {
            return Err(SetupError::InvalidConfig(format!(
                "Smoothing time constant must be in [0, 1], got {}",
                self.smoothing_time_constant
            )));
        }
        if self.min_decibels >= self.max_decibels {
            return Err(SetupError::InvalidConfig(format!(
                "min_decibels ({}) must be below max_decibels ({})",
                self.min_decibels, self.max_decibels
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_len_is_half_fft_size() {
        let config = AnalysisConfig::default();
        assert_eq!(config.frame_len(), 1024);
        assert_eq!(config.bin_count(), 512);

        let full = AnalysisConfig {
            bins: BinSelection::Full,
            ..AnalysisConfig::default()
        };
        assert_eq!(full.bin_count(), 1024);
    }

    #[test]
    fn test_samples_per_frame() {
        let config = AnalysisConfig::default();
        assert_eq!(config.samples_per_frame(), 705);
    }

    #[test]
    fn test_validate_rejects_non_power_of_two() {
        let config = AnalysisConfig {
            fft_size: 1000,
            ..AnalysisConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(AnalysisConfig::default().validate().is_ok());
    }

    #[test]
    fn test_analyser_validate() {
        assert!(AnalyserConfig::default().validate().is_ok());

        let inverted = AnalyserConfig {
            min_decibels: -20.0,
            max_decibels: -30.0,
            ..AnalyserConfig::default()
        };
        assert!(inverted.validate().is_err());

        let smoothing = AnalyserConfig {
            smoothing_time_constant: 1.5,
            ..AnalyserConfig::default()
        };
        assert!(smoothing.validate().is_err());
    }
}
