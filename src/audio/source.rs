//! The boundary between capture and analysis.

use std::path::PathBuf;

use crate::error::CaptureError;

/// Supplier of one byte frame per tick.
///
/// The frame returned by `read_frame` is owned by the source and borrowed
/// for the current tick only; the next call may overwrite it.
pub trait SampleSource {
    /// Open the input stream. Called on Idle → Capturing.
    fn acquire(&mut self) -> Result<(), CaptureError> {
        Ok(())
    }

    /// Newest frame of byte samples
    fn read_frame(&mut self) -> Result<&[u8], CaptureError>;

    /// Suspend the input stream, keeping buffered samples
    fn pause(&mut self) -> Result<(), CaptureError> {
        Ok(())
    }

    fn resume(&mut self) -> Result<(), CaptureError> {
        Ok(())
    }

    /// Close the input stream and flush the recording, returning its path
    fn release(&mut self) -> Result<Option<PathBuf>, CaptureError> {
        Ok(None)
    }
}

impl<S: SampleSource + ?Sized> SampleSource for Box<S> {
    fn acquire(&mut self) -> Result<(), CaptureError> {
        (**self).acquire()
    }

    fn read_frame(&mut self) -> Result<&[u8], CaptureError> {
        (**self).read_frame()
    }

    fn pause(&mut self) -> Result<(), CaptureError> {
        (**self).pause()
    }

    fn resume(&mut self) -> Result<(), CaptureError> {
        (**self).resume()
    }

    fn release(&mut self) -> Result<Option<PathBuf>, CaptureError> {
        (**self).release()
    }
}
