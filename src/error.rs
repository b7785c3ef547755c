//! Error types for the analysis pipeline, capture sources and frame loop.

use thiserror::Error;

use crate::frame_loop::CaptureState;

/// Failures of the FFT engine and magnitude extractor.
///
/// Both fail before touching any output, so a caller never sees a partially
/// written spectrum.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpectrumError {
    #[error("sample sequence length {len} is not a power of two")]
    InvalidInputLength { len: usize },
    #[error("interleaved spectrum length {len} is odd")]
    InvalidSpectrumLength { len: usize },
}

/// Failures of a sample source or its recording artifact.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("failed to acquire input stream: {0}")]
    AcquisitionFailure(String),
    #[error("sample source is not available: {0}")]
    SourceUnavailable(String),
    #[error("recording failed: {0}")]
    Recording(#[from] hound::Error),
}

/// Configuration problems detected while wiring the pipeline together.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SetupError {
    #[error("visualization has {cells} cells but the spectrum yields {bins} bins")]
    CellCountMismatch { cells: usize, bins: usize },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Rejected state transitions and capture failures raised by the frame loop.
#[derive(Debug, Error)]
pub enum LoopError {
    #[error("cannot {action} while {from:?}")]
    InvalidTransition {
        from: CaptureState,
        action: &'static str,
    },
    #[error(transparent)]
    Capture(#[from] CaptureError),
}

/// Why a single tick produced no frame.
#[derive(Debug, Error)]
pub enum TickError {
    #[error(transparent)]
    Spectrum(#[from] SpectrumError),
    #[error(transparent)]
    Capture(#[from] CaptureError),
    #[error("sample source yielded {actual} samples, expected {expected}")]
    FrameLength { expected: usize, actual: usize },
}
