//! Visualization mappers driven by per-bin magnitudes.
//!
//! Cells are created once, mutated every tick and returned to rest on stop;
//! their count never changes after construction.

mod bars;
mod cubes;
mod waveform;

// Re-export public types
pub use bars::BarMeter;
pub use cubes::{Cube, CubeGrid, CubeInstance};
pub use waveform::WaveformPath;

/// Output boundary of the frame loop
pub trait VisualSink {
    /// Number of cells, fixed for the sink's lifetime
    fn cell_count(&self) -> usize;

    /// Drive every cell from one magnitude; `magnitudes.len() == cell_count()`
    fn update(&mut self, magnitudes: &[f64]);

    /// Return every cell to its resting value
    fn rest(&mut self);
}

impl<V: VisualSink + ?Sized> VisualSink for Box<V> {
    fn cell_count(&self) -> usize {
        (**self).cell_count()
    }

    fn update(&mut self, magnitudes: &[f64]) {
        (**self).update(magnitudes)
    }

    fn rest(&mut self) {
        (**self).rest()
    }
}
