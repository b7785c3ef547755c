//! Capture lifecycle.

/// Capture state; ticks only run while `Capturing`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureState {
    #[default]
    Idle,
    Capturing,
    Paused,
}

impl CaptureState {
    pub fn can_start(self) -> bool {
        self == CaptureState::Idle
    }

    pub fn can_pause(self) -> bool {
        self == CaptureState::Capturing
    }

    pub fn can_resume(self) -> bool {
        self == CaptureState::Paused
    }

    pub fn can_stop(self) -> bool {
        matches!(self, CaptureState::Capturing | CaptureState::Paused)
    }
}
