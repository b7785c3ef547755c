//! Parameter definitions with physical units and documented semantics.
//!
//! All tunables are collected here with:
//! - Units (Hz, milliseconds, dBFS, world units, pixels)
//! - Documented ranges and meanings
//! - A `validate()` where a value can be rejected

mod analysis;
mod capture;
mod visual;

// Re-export all types
pub use analysis::{
    AnalyserConfig, AnalysisConfig, BinSelection, EngineKind, Normalization, SampleDomain,
    WindowType,
};
pub use capture::RecordingConfig;
pub use visual::{CanvasConfig, CubeGridLayout, DepthMapping};
