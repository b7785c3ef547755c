//! The frame loop proper: state machine, per-tick pipeline and failure policy.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use super::state::CaptureState;
use super::ticker::{TickToken, Ticker};
use crate::audio::SampleSource;
use crate::error::{LoopError, SetupError, TickError};
use crate::params::{AnalysisConfig, Normalization};
use crate::spectrum::{apply_window, decode_bytes, engine_for, SpectrumEngine};
use crate::visual::VisualSink;

/// Counters over the lifetime of a loop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Ticks that updated the visualization
    pub frames_rendered: u64,
    /// Ticks skipped because of a bad frame or a source error
    pub failed_ticks: u64,
    /// Callbacks that arrived with a stale token or outside `Capturing`
    pub cancelled_ticks: u64,
}

/// Result of one tick callback
#[derive(Debug)]
pub enum TickOutcome {
    Rendered,
    /// The frame was dropped; the next tick is already scheduled
    Failed(TickError),
    /// No-op: the tick was cancelled by a state change or already ran
    Cancelled,
}

/// Owns the source, the visualization and the ticker for one capture session.
///
/// The host calls [`FrameLoop::tick`] with the token of the pending tick (or
/// [`FrameLoop::poll`] with the current time); every accepted tick schedules
/// exactly one successor, and leaving `Capturing` cancels it.
pub struct FrameLoop<S: SampleSource, V: VisualSink> {
    config: AnalysisConfig,
    source: S,
    sink: V,
    engine: Box<dyn SpectrumEngine>,
    ticker: Ticker,
    state: CaptureState,

    // Scratch reused every tick.
    samples: Vec<f64>,

    stats: FrameStats,
    failure_streak: u64,
}

impl<S: SampleSource, V: VisualSink> FrameLoop<S, V> {
    /// Wire source and sink together, checking that the sink has one cell per
    /// forwarded bin
    pub fn new(config: AnalysisConfig, source: S, sink: V) -> Result<Self, SetupError> {
        config.validate()?;

        let bins = config.bin_count();
        if sink.cell_count() != bins {
            return Err(SetupError::CellCountMismatch {
                cells: sink.cell_count(),
                bins,
            });
        }

        let engine = engine_for(config.engine, config.frame_len())
            .map_err(|e| SetupError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            ticker: Ticker::new(Duration::from_millis(config.frame_interval_ms)),
            samples: Vec::with_capacity(config.frame_len()),
            config,
            source,
            sink,
            engine,
            state: CaptureState::Idle,
            stats: FrameStats::default(),
            failure_streak: 0,
        })
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    pub fn sink(&self) -> &V {
        &self.sink
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn engine_name(&self) -> &'static str {
        self.engine.name()
    }

    /// Token of the scheduled tick, if any
    pub fn pending_tick(&self) -> Option<TickToken> {
        self.ticker.pending()
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.ticker.next_due()
    }

    /// Idle → Capturing. Acquisition failure leaves the loop idle.
    pub fn start(&mut self) -> Result<(), LoopError> {
        self.guard(self.state.can_start(), "start")?;

        self.source.acquire()?;
        self.state = CaptureState::Capturing;
        self.ticker.schedule(Instant::now());

        log::info!(
            "Capture started: {} engine, {} samples per frame, {} bins",
            self.engine.name(),
            self.config.frame_len(),
            self.config.bin_count()
        );
        Ok(())
    }

    /// Capturing → Paused. The pending tick is cancelled before the source
    /// is suspended.
    pub fn pause(&mut self) -> Result<(), LoopError> {
        self.guard(self.state.can_pause(), "pause")?;

        self.ticker.cancel();
        self.state = CaptureState::Paused;
        self.source.pause()?;

        log::info!("Capture paused after {} frames", self.stats.frames_rendered);
        Ok(())
    }

    /// Paused → Capturing
    pub fn resume(&mut self) -> Result<(), LoopError> {
        self.guard(self.state.can_resume(), "resume")?;

        self.source.resume()?;
        self.state = CaptureState::Capturing;
        self.ticker.schedule(Instant::now());

        log::info!("Capture resumed");
        Ok(())
    }

    /// Capturing | Paused → Idle. Returns the recording path when the source
    /// wrote one.
    pub fn stop(&mut self) -> Result<Option<PathBuf>, LoopError> {
        self.guard(self.state.can_stop(), "stop")?;

        self.ticker.cancel();
        self.state = CaptureState::Idle;
        self.sink.rest();
        let artifact = self.source.release()?;

        log::info!(
            "Capture stopped: {} frames rendered, {} failed",
            self.stats.frames_rendered,
            self.stats.failed_ticks
        );
        Ok(artifact)
    }

    /// Run the tick identified by `token`.
    ///
    /// Stale tokens and ticks outside `Capturing` are no-ops. A failed frame
    /// is reported in the outcome and never stops the schedule.
    pub fn tick(&mut self, token: TickToken) -> TickOutcome {
        if self.state != CaptureState::Capturing || !self.ticker.consume(token) {
            self.stats.cancelled_ticks += 1;
            return TickOutcome::Cancelled;
        }

        let result = self.process_frame();
        self.ticker.schedule(Instant::now());

        match result {
            Ok(()) => {
                if self.failure_streak > 0 {
                    log::info!("Frames recovered after {} failed ticks", self.failure_streak);
                    self.failure_streak = 0;
                }
                self.stats.frames_rendered += 1;
                TickOutcome::Rendered
            }
            Err(e) => {
                if self.failure_streak == 0 {
                    log::warn!("Skipping frame: {}", e);
                } else {
                    log::debug!("Skipping frame: {}", e);
                }
                self.failure_streak += 1;
                self.stats.failed_ticks += 1;
                TickOutcome::Failed(e)
            }
        }
    }

    /// Run the pending tick if it is due at `now`
    pub fn poll(&mut self, now: Instant) -> Option<TickOutcome> {
        let token = self.ticker.due(now)?;
        Some(self.tick(token))
    }

    fn guard(&self, allowed: bool, action: &'static str) -> Result<(), LoopError> {
        if allowed {
            Ok(())
        } else {
            Err(LoopError::InvalidTransition {
                from: self.state,
                action,
            })
        }
    }

    /// Source → decode → window → transform → magnitudes → sink
    fn process_frame(&mut self) -> Result<(), TickError> {
        let frame = self.source.read_frame()?;
        let expected = self.config.frame_len();
        if frame.len() != expected && frame.len().is_power_of_two() {
            return Err(TickError::FrameLength {
                expected,
                actual: frame.len(),
            });
        }

        decode_bytes(frame, self.config.domain, &mut self.samples);
        apply_window(&mut self.samples, self.config.window);

        let spectrum = self.engine.transform(&self.samples)?;
        let mut magnitudes = spectrum.magnitudes();

        if self.config.normalization == Normalization::ByLength {
            let n = self.samples.len() as f64;
            for magnitude in &mut magnitudes {
                *magnitude /= n;
            }
        }

        let bins = self.config.bin_count();
        self.sink.update(&magnitudes[..bins]);
        Ok(())
    }
}
