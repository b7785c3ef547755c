//! Audio capture: analyser, recording and the sample sources that feed the
//! frame loop.
//!
//! Every source pushes mono blocks through a `CaptureTap`, which keeps the
//! analyser window current and writes the optional WAV recording.

mod analyser;
#[cfg(feature = "capture")]
mod capture;
mod recorder;
mod source;
mod synthesis;
mod system;

// Re-export public types
pub use analyser::Analyser;
#[cfg(feature = "capture")]
pub use capture::MicrophoneSource;
pub use recorder::WavRecorder;
pub use source::SampleSource;
pub use synthesis::ToneSource;
pub use system::CaptureTap;
