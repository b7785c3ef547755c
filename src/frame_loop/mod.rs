//! Frame update loop: pulls a frame per tick, transforms it and drives the
//! visualization while capture is active.

mod state;
mod system;
mod ticker;

// Re-export public types
pub use state::CaptureState;
pub use system::{FrameLoop, FrameStats, TickOutcome};
pub use ticker::{TickToken, Ticker};
